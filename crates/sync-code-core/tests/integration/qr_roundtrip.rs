//! QR payload issued by one device and scanned by another.

use sync_code_core::{
    hex_to_passphrase, validate_qr_data_json, FixedClock, QrCodeData, QrPolicy,
    QrValidationResult, Seed, Timestamp, QR_V1_SUNSET_DAY,
};

fn issuer_now() -> Timestamp {
    Timestamp::from_unix_seconds(1_700_000_000)
}

/// Issue a QR, scan it a few minutes later, recover the same passphrase.
#[test]
fn issue_scan_recover() {
    let seed = Seed::new([0x5a; 32]);
    let payload = QrCodeData::create_with_actual_date(seed.to_hex(), &FixedClock(issuer_now()));
    let scanned = payload.to_json();

    let scan_time = issuer_now().add_minutes(5);
    assert_eq!(validate_qr_data_json(&scanned, scan_time), QrValidationResult::Valid);

    let parsed = QrCodeData::from_json(&scanned).unwrap();
    assert_eq!(parsed.seed().unwrap(), seed);
    assert_eq!(
        hex_to_passphrase(parsed.sync_code_hex()).unwrap(),
        seed.to_passphrase()
    );
}

/// The same payload ages out after its 30-minute window.
#[test]
fn scanned_too_late_is_expired() {
    let seed = Seed::new([0x11; 32]);
    let scanned =
        QrCodeData::create_with_actual_date(seed.to_hex(), &FixedClock(issuer_now())).to_json();

    let edge = issuer_now().add_minutes(30);
    assert_eq!(validate_qr_data_json(&scanned, edge), QrValidationResult::Valid);
    let late = edge.saturating_add_seconds(1);
    assert_eq!(validate_qr_data_json(&scanned, late), QrValidationResult::Expired);
}

/// A scanner whose clock runs behind the issuer's by more than the maximum
/// validity sees the payload as valid for too long.
#[test]
fn scanner_clock_far_behind() {
    let seed = Seed::new([0x22; 32]);
    let scanned =
        QrCodeData::create_with_actual_date(seed.to_hex(), &FixedClock(issuer_now())).to_json();
    let behind = issuer_now().saturating_sub_seconds(31 * 60 + 1);
    assert_eq!(
        validate_qr_data_json(&scanned, behind),
        QrValidationResult::ValidForTooLong
    );
}

/// A device still showing the bare hex seed is accepted only before the sunset.
#[test]
fn legacy_device_pairs_until_sunset() {
    let hex = Seed::new([0x33; 32]).to_hex();
    let policy = QrPolicy::default();
    assert_eq!(
        policy.validate(&hex, QR_V1_SUNSET_DAY.saturating_sub_seconds(1)),
        QrValidationResult::Valid
    );
    assert_eq!(
        policy.validate(&hex, QR_V1_SUNSET_DAY),
        QrValidationResult::VersionDeprecated
    );
}
