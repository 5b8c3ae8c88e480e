//! Sync seed and its 24-word passphrase encoding.
//!
//! A seed is 32 raw bytes. Its passphrase is a direct index encoding with no
//! checksum: the 256 seed bits (most significant first) followed by 8 zero
//! padding bits are cut into 24 groups of 11 bits, and each group selects a
//! word from [`crate::wordlist`].
//!
//! ```text
//! | seed bits 0..=255 | 0000_0000 |   264 bits
//! |  w0  |  w1  | ... |   w23     |   24 x 11 bits
//! ```
//!
//! Decoding requires the padding bits of the last word to be zero, so every
//! passphrase that decodes re-encodes to itself. A checksummed 24-word BIP39
//! phrase is rejected unless its checksum happens to be zero.

use std::fmt;

use data_encoding::{HEXLOWER, HEXLOWER_PERMISSIVE};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::DecodeError;
use crate::wordlist::{self, BITS_PER_WORD};

/// Length of a sync seed in bytes.
pub const SEED_LEN: usize = 32;

/// Number of words in a pure-words passphrase.
pub const PASSPHRASE_WORD_COUNT: usize = 24;

/// Length of a hex-encoded seed.
pub const HEX_SEED_LEN: usize = SEED_LEN * 2;

const WORD_MASK: u32 = (1 << BITS_PER_WORD) - 1;

// ── Seed ───────────────────────────────────────────────────────────

/// The 32-byte secret identifying a sync chain.
///
/// Zeroized on drop. `Debug`/`Display` never print the bytes.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Seed {
    bytes: [u8; SEED_LEN],
}

impl Seed {
    /// Wrap raw seed bytes.
    #[must_use]
    pub const fn new(bytes: [u8; SEED_LEN]) -> Self {
        Self { bytes }
    }

    /// Generate a fresh seed from the OS CSPRNG.
    ///
    /// # Errors
    ///
    /// Returns the RNG error if the OS entropy source is unavailable.
    pub fn random() -> Result<Self, rand::Error> {
        let mut bytes = [0u8; SEED_LEN];
        OsRng.try_fill_bytes(&mut bytes)?;
        let seed = Self::new(bytes);
        bytes.zeroize();
        Ok(seed)
    }

    /// Expose the raw bytes.
    #[must_use]
    pub const fn expose(&self) -> &[u8; SEED_LEN] {
        &self.bytes
    }

    /// The 24-word passphrase for this seed.
    #[must_use]
    pub fn to_passphrase(&self) -> String {
        encode(&self.bytes)
    }

    /// Lowercase hex encoding of this seed.
    #[must_use]
    pub fn to_hex(&self) -> String {
        seed_to_hex(&self.bytes)
    }
}

impl From<[u8; SEED_LEN]> for Seed {
    fn from(bytes: [u8; SEED_LEN]) -> Self {
        Self::new(bytes)
    }
}

impl PartialEq for Seed {
    fn eq(&self, other: &Self) -> bool {
        constant_time_eq(&self.bytes, &other.bytes)
    }
}

impl Eq for Seed {}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(***)")
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(***)")
    }
}

/// Compare two equal-length byte arrays without short-circuiting.
fn constant_time_eq(a: &[u8; SEED_LEN], b: &[u8; SEED_LEN]) -> bool {
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

// ── Passphrase codec ───────────────────────────────────────────────

/// Encode a seed as 24 space-separated words.
#[must_use]
pub fn encode(seed: &[u8; SEED_LEN]) -> String {
    let mut words: Vec<&'static str> = Vec::with_capacity(PASSPHRASE_WORD_COUNT);
    let mut acc: u32 = 0;
    let mut acc_bits: usize = 0;

    // The trailing zero byte supplies the 8 padding bits of the last word.
    for &byte in seed.iter().chain(std::iter::once(&0u8)) {
        // acc never holds more than BITS_PER_WORD - 1 + 8 = 18 live bits.
        #[allow(clippy::arithmetic_side_effects)]
        {
            acc = (acc << 8) | u32::from(byte);
            acc_bits += 8;
            if acc_bits >= BITS_PER_WORD {
                acc_bits -= BITS_PER_WORD;
                let index = (acc >> acc_bits) & WORD_MASK;
                words.push(wordlist::word_at(index as usize));
                acc &= (1 << acc_bits) - 1;
            }
        }
    }
    debug_assert_eq!(words.len(), PASSPHRASE_WORD_COUNT);
    acc.zeroize();

    words.join(" ")
}

/// Decode a 24-word passphrase back into its seed.
///
/// Leading, trailing and repeated whitespace is ignored. Word lookup is
/// ASCII case-insensitive.
///
/// # Errors
///
/// - [`DecodeError::WrongWordCount`] unless there are exactly 24 words
/// - [`DecodeError::UnknownWord`] if a word is not in the vocabulary
/// - [`DecodeError::NonZeroPadding`] if the low 8 bits of the last word are
///   not zero
pub fn decode(passphrase: &str) -> Result<Seed, DecodeError> {
    let found = passphrase.split_whitespace().count();
    if found != PASSPHRASE_WORD_COUNT {
        return Err(DecodeError::WrongWordCount { found });
    }

    let mut bytes = Zeroizing::new([0u8; SEED_LEN]);
    let mut filled: usize = 0;
    let mut acc: u32 = 0;
    let mut acc_bits: usize = 0;

    for (position, word) in passphrase.split_whitespace().enumerate() {
        let index = wordlist::index_of(word).ok_or(DecodeError::UnknownWord { position })?;
        // acc never holds more than 7 + BITS_PER_WORD = 18 live bits; index
        // is below 2048 so the cast is lossless.
        #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
        {
            acc = (acc << BITS_PER_WORD) | index as u32;
            acc_bits += BITS_PER_WORD;
            while acc_bits >= 8 && filled < SEED_LEN {
                acc_bits -= 8;
                bytes[filled] = (acc >> acc_bits) as u8;
                filled += 1;
                acc &= (1 << acc_bits) - 1;
            }
        }
    }
    // Whatever remains in `acc` is the padding of the last word.
    let padding = acc;
    acc.zeroize();
    if padding != 0 {
        return Err(DecodeError::NonZeroPadding);
    }

    Ok(Seed::new(*bytes))
}

/// Returns `true` iff [`decode`] succeeds.
#[must_use]
pub fn is_passphrase_valid(passphrase: &str) -> bool {
    decode(passphrase).is_ok()
}

// ── Hex codec ──────────────────────────────────────────────────────

/// Lowercase hex encoding of a seed (64 characters).
#[must_use]
pub fn seed_to_hex(seed: &[u8; SEED_LEN]) -> String {
    HEXLOWER.encode(seed)
}

/// Parse a 64-character hex seed. Either letter case is accepted.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidHex`] if the input is not exactly 64 hex
/// characters.
pub fn hex_to_seed(hex: &str) -> Result<Seed, DecodeError> {
    if hex.len() != HEX_SEED_LEN {
        return Err(DecodeError::InvalidHex);
    }
    let decoded = Zeroizing::new(
        HEXLOWER_PERMISSIVE
            .decode(hex.as_bytes())
            .map_err(|_| DecodeError::InvalidHex)?,
    );
    let bytes: [u8; SEED_LEN] = decoded
        .as_slice()
        .try_into()
        .map_err(|_| DecodeError::InvalidHex)?;
    Ok(Seed::new(bytes))
}

/// Convert a hex seed into its 24-word passphrase.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidHex`] if the input is not exactly 64 hex
/// characters.
pub fn hex_to_passphrase(hex: &str) -> Result<String, DecodeError> {
    Ok(hex_to_seed(hex)?.to_passphrase())
}

/// Convert a 24-word passphrase into its lowercase hex seed.
///
/// # Errors
///
/// Same as [`decode`].
pub fn passphrase_to_hex(passphrase: &str) -> Result<String, DecodeError> {
    Ok(decode(passphrase)?.to_hex())
}

// ── Tests ──────────────────────────────────────────────────────────
