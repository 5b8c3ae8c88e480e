//! Seed ↔ 24-word passphrase vectors.
//!
//! The first 23 words of every vector equal the 24-word BIP39 mnemonic for
//! the same entropy; the last word differs because the padding bits are
//! zero instead of a checksum, and a checksummed last word is rejected.

use sync_code_core::seed::{decode, encode};
use sync_code_core::{hex_to_passphrase, hex_to_seed, passphrase_to_hex, DecodeError};

/// (seed hex, passphrase)
const VECTORS: &[(&str, &str)] = &[
    (
        "0000000000000000000000000000000000000000000000000000000000000000",
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon",
    ),
    (
        "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo theme",
    ),
    (
        "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f",
        "abandon amount liar amount expire adjust cage candy arch gather drum bullet absurd math era live bid rhythm alien crouch range attend journey theme",
    ),
    (
        "7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f",
        "legal winner thank year wave sausage worth useful legal winner thank year wave sausage worth useful legal winner thank year wave sausage worth theme",
    ),
    (
        "8080808080808080808080808080808080808080808080808080808080808080",
        "letter advice cage absurd amount doctor acoustic avoid letter advice cage absurd amount doctor acoustic avoid letter advice cage absurd amount doctor acoustic abandon",
    ),
    (
        "3e141609b97933b66a060dcddc71fad1d91677db872031e85f4c015c5e7e8982",
        "dignity pass list indicate nasty swamp pool script soccer toe leaf photo multiply desk host tomato cradle drill spread actor shine dismiss champion divorce",
    ),
];

#[test]
fn hex_to_passphrase_vectors() {
    for (hex, passphrase) in VECTORS {
        assert_eq!(hex_to_passphrase(hex).unwrap(), *passphrase, "seed {hex}");
    }
}

#[test]
fn passphrase_to_hex_vectors() {
    for (hex, passphrase) in VECTORS {
        assert_eq!(passphrase_to_hex(passphrase).unwrap(), *hex, "seed {hex}");
    }
}

#[test]
fn encode_matches_seed_method() {
    for (hex, passphrase) in VECTORS {
        let seed = hex_to_seed(hex).unwrap();
        assert_eq!(encode(seed.expose()), *passphrase);
        assert_eq!(seed.to_passphrase(), *passphrase);
    }
}

#[test]
fn bip39_mnemonics_with_checksum_are_rejected() {
    // Standard 24-word BIP39 mnemonics carry a checksum in the padding bits.
    let mnemonics = [
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art",
        "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo vote",
        "dignity pass list indicate nasty swamp pool script soccer toe leaf photo multiply desk host tomato cradle drill spread actor shine dismiss champion exotic",
    ];
    for mnemonic in mnemonics {
        assert_eq!(decode(mnemonic).unwrap_err(), DecodeError::NonZeroPadding);
    }
}

#[test]
fn vectors_roundtrip_words_hex_words() {
    for (_, passphrase) in VECTORS {
        let hex = passphrase_to_hex(passphrase).unwrap();
        assert_eq!(hex_to_passphrase(&hex).unwrap(), *passphrase);
    }
}

#[test]
fn uppercase_hex_decodes_to_lowercase() {
    let upper = VECTORS[5].0.to_uppercase();
    assert_eq!(hex_to_passphrase(&upper).unwrap(), VECTORS[5].1);
    assert_eq!(hex_to_seed(&upper).unwrap().to_hex(), VECTORS[5].0);
}
