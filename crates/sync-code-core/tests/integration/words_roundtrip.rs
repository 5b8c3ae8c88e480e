//! Word code issued on one device and typed on another.

use sync_code_core::words::{not_after, WordsPolicy};
use sync_code_core::{
    detect_format, passphrase_to_hex, CodeFormat, FixedClock, QrCodeData, Seed, Timestamp,
    WordsValidationStatus,
};

fn issuer_now() -> Timestamp {
    Timestamp::from_unix_seconds(1_700_000_000)
}

/// Seed → 25-word code → typed with sloppy spacing → same seed.
#[test]
fn issue_type_recover() {
    let policy = WordsPolicy::default();
    let seed = Seed::new([0x7c; 32]);
    let code = policy
        .generate_for_now(&seed.to_passphrase(), &FixedClock(issuer_now()))
        .unwrap();
    assert_eq!(detect_format(&code), Some(CodeFormat::TimeLimited));

    let typed = format!("  {}  ", code.replace(' ', "   "));
    let pure = policy.parse(&typed, issuer_now().add_minutes(90)).unwrap();
    assert_eq!(passphrase_to_hex(&pure).unwrap(), seed.to_hex());
}

/// The same seed pairs via QR and via words.
#[test]
fn words_and_qr_agree() {
    let seed = Seed::new([0x42; 32]);
    let clock = FixedClock(issuer_now());

    let qr = QrCodeData::create_with_actual_date(seed.to_hex(), &clock);
    let code = WordsPolicy::default()
        .generate_for_now(&seed.to_passphrase(), &clock)
        .unwrap();
    let pure = WordsPolicy::default().parse(&code, issuer_now()).unwrap();

    assert_eq!(passphrase_to_hex(&pure).unwrap(), qr.sync_code_hex());
}

/// A code typed two days later is expired, but the words are still recoverable.
#[test]
fn stale_code_recovers_with_ignore_date() {
    let policy = WordsPolicy::default();
    let seed = Seed::new([0x01; 32]);
    let code = policy
        .generate_for_date(&seed.to_passphrase(), issuer_now())
        .unwrap();
    let later = issuer_now().add_days(2);

    assert_eq!(policy.status_of(&code, later), WordsValidationStatus::Expired);
    assert_eq!(
        policy.parse_ignore_date(&code, later).unwrap(),
        seed.to_passphrase()
    );
    assert!(not_after(&code).unwrap() > issuer_now());
}
