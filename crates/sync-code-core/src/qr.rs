//! QR code enrollment payload.
//!
//! The QR shown by a device joining others to its sync chain carries a small
//! JSON envelope:
//!
//! ```json
//! {"version":"2","sync_code_hex":"<64 hex chars>","not_after":"1637080050"}
//! ```
//!
//! `version` and `not_after` travel as decimal strings; `not_after` is in
//! seconds since the Unix epoch. Parsing also accepts JSON integers for both.
//!
//! Before the envelope existed (v1) the QR held the bare hex seed. Those
//! payloads are accepted until [`QR_V1_SUNSET_DAY`].

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::DecodeError;
use crate::seed::{self, Seed, HEX_SEED_LEN};
use crate::time::{Clock, Timestamp, SECONDS_PER_MINUTE};

// ── Constants ──────────────────────────────────────────────────────

/// Envelope version produced and accepted by this crate.
pub const QR_CODE_VERSION: u32 = 2;

/// Bare hex-seed payloads are deprecated from 2022-08-01T00:00:00Z.
pub const QR_V1_SUNSET_DAY: Timestamp = Timestamp::from_unix_seconds(1_659_312_000);

/// Lifetime given to freshly created payloads.
pub const DEFAULT_QR_VALIDITY_MINUTES: i64 = 30;

/// Longest lifetime a payload may claim before it is rejected as forged.
pub const MAX_QR_VALIDITY_MINUTES: i64 = 60;

// ── Validation result ──────────────────────────────────────────────

/// Outcome of validating a scanned QR payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum QrValidationResult {
    /// The payload can be used to join the sync chain.
    #[error("QR code is valid")]
    Valid,
    /// Reserved for host code reporting a failure outside this
    /// classification; never produced by [`QrPolicy::validate`].
    #[error("QR code is invalid")]
    InvalidUnknownReason,
    /// Not an envelope, not a bare hex seed, or a broken seed inside.
    #[error("QR code data is not well formed")]
    NotWellFormed,
    /// Envelope version newer than this crate understands.
    #[error("QR code version is not recognized")]
    VersionNotRecognized,
    /// Older envelope version, or a bare hex seed after the v1 sunset day.
    #[error("QR code version is deprecated")]
    VersionDeprecated,
    /// `not_after` is in the past.
    #[error("QR code has expired")]
    Expired,
    /// `not_after` is further away than the maximum validity.
    #[error("QR code is valid for too long")]
    ValidForTooLong,
}

impl QrValidationResult {
    /// Returns `true` for [`Self::Valid`].
    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

// ── Payload ────────────────────────────────────────────────────────

/// The QR enrollment envelope.
///
/// Immutable once created; build a new one to refresh the expiry. The hex
/// seed is zeroized on drop and masked in `Debug`.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct QrCodeData {
    version: u32,
    sync_code_hex: String,
    #[zeroize(skip)]
    not_after: Timestamp,
}

/// Serialized form. Field order is the wire order.
#[derive(Serialize)]
struct WireOut<'a> {
    version: String,
    sync_code_hex: &'a str,
    not_after: String,
}

/// Deserialized form. All fields are required.
#[derive(Deserialize)]
struct WireIn {
    version: WireNumber,
    sync_code_hex: String,
    not_after: WireNumber,
}

/// A number carried either as a decimal string or as a JSON integer.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireNumber {
    Text(String),
    Integer(i64),
}

impl WireNumber {
    fn to_i64(&self) -> Option<i64> {
        match self {
            Self::Text(text) => text.parse().ok(),
            Self::Integer(value) => Some(*value),
        }
    }
}

impl QrCodeData {
    /// Build an envelope with an explicit version.
    #[must_use]
    pub fn new(version: u32, sync_code_hex: impl Into<String>, not_after: Timestamp) -> Self {
        Self {
            version,
            sync_code_hex: sync_code_hex.into(),
            not_after,
        }
    }

    /// Current-version envelope expiring at `not_after`.
    #[must_use]
    pub fn create_with_date(sync_code_hex: impl Into<String>, not_after: Timestamp) -> Self {
        Self::new(QR_CODE_VERSION, sync_code_hex, not_after)
    }

    /// Current-version envelope valid for [`DEFAULT_QR_VALIDITY_MINUTES`]
    /// from the clock's now.
    #[must_use]
    pub fn create_with_actual_date(sync_code_hex: impl Into<String>, clock: &impl Clock) -> Self {
        let not_after = clock.now().add_minutes(DEFAULT_QR_VALIDITY_MINUTES);
        Self::create_with_date(sync_code_hex, not_after)
    }

    /// Envelope version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Hex-encoded seed, as carried on the wire.
    #[must_use]
    pub fn sync_code_hex(&self) -> &str {
        &self.sync_code_hex
    }

    /// Last valid instant.
    #[must_use]
    pub const fn not_after(&self) -> Timestamp {
        self.not_after
    }

    /// Decode the carried hex seed.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidHex`] if the hex is malformed.
    pub fn seed(&self) -> Result<Seed, DecodeError> {
        seed::hex_to_seed(&self.sync_code_hex)
    }

    /// Serialize to the JSON wire format.
    #[must_use]
    pub fn to_json(&self) -> String {
        let wire = WireOut {
            version: self.version.to_string(),
            sync_code_hex: &self.sync_code_hex,
            not_after: self.not_after.as_unix_seconds().to_string(),
        };
        // A struct of strings always serializes.
        serde_json::to_string(&wire).unwrap_or_default()
    }

    /// Parse the JSON wire format.
    ///
    /// Returns `None` unless all of `version`, `sync_code_hex` and
    /// `not_after` are present and well typed. Unknown fields are ignored.
    #[must_use]
    pub fn from_json(text: &str) -> Option<Self> {
        let wire: WireIn = serde_json::from_str(text).ok()?;
        let version = u32::try_from(wire.version.to_i64()?).ok()?;
        let not_after = Timestamp::from_unix_seconds(wire.not_after.to_i64()?);
        Some(Self {
            version,
            sync_code_hex: wire.sync_code_hex,
            not_after,
        })
    }
}

impl fmt::Debug for QrCodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QrCodeData")
            .field("version", &self.version)
            .field("sync_code_hex", &"***")
            .field("not_after", &self.not_after)
            .finish()
    }
}

// ── Validation ─────────────────────────────────────────────────────

/// Version and expiry rules for QR payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QrPolicy {
    /// The only envelope version considered valid.
    pub current_version: u32,
    /// First instant at which bare hex-seed payloads are deprecated.
    pub v1_sunset_day: Timestamp,
    /// Lifetime given to payloads created through this policy.
    pub validity_minutes: i64,
    /// Longest lifetime a payload may claim.
    pub max_validity_minutes: i64,
}

impl Default for QrPolicy {
    fn default() -> Self {
        Self {
            current_version: QR_CODE_VERSION,
            v1_sunset_day: QR_V1_SUNSET_DAY,
            validity_minutes: DEFAULT_QR_VALIDITY_MINUTES,
            max_validity_minutes: MAX_QR_VALIDITY_MINUTES,
        }
    }
}

impl QrPolicy {
    /// Envelope for `sync_code_hex` valid for [`Self::validity_minutes`] after `now`.
    #[must_use]
    pub fn create(&self, sync_code_hex: impl Into<String>, now: Timestamp) -> QrCodeData {
        QrCodeData::new(
            self.current_version,
            sync_code_hex,
            now.add_minutes(self.validity_minutes),
        )
    }

    /// Classify a scanned QR payload at `now`.
    #[must_use]
    pub fn validate(&self, text: &str, now: Timestamp) -> QrValidationResult {
        let Some(data) = QrCodeData::from_json(text) else {
            return self.validate_bare_hex(text, now);
        };

        if data.sync_code_hex.is_empty() {
            return QrValidationResult::NotWellFormed;
        }

        match data.version.cmp(&self.current_version) {
            Ordering::Less => return QrValidationResult::VersionDeprecated,
            Ordering::Greater => return QrValidationResult::VersionNotRecognized,
            Ordering::Equal => {}
        }

        let words_ok = seed::hex_to_passphrase(&data.sync_code_hex)
            .is_ok_and(|words| seed::is_passphrase_valid(&words));
        if !words_ok {
            return QrValidationResult::NotWellFormed;
        }

        if now > data.not_after {
            return QrValidationResult::Expired;
        }

        let max_validity = self.max_validity_minutes.saturating_mul(SECONDS_PER_MINUTE);
        if data.not_after.seconds_since(now) > max_validity {
            return QrValidationResult::ValidForTooLong;
        }

        QrValidationResult::Valid
    }

    /// Legacy v1 payload: the bare hex seed.
    fn validate_bare_hex(&self, text: &str, now: Timestamp) -> QrValidationResult {
        if !is_bare_hex_seed(text) || seed::hex_to_seed(text).is_err() {
            return QrValidationResult::NotWellFormed;
        }
        if now < self.v1_sunset_day {
            QrValidationResult::Valid
        } else {
            QrValidationResult::VersionDeprecated
        }
    }
}

/// Returns `true` if `text` is exactly 64 hex characters (a v1 QR payload).
#[must_use]
pub fn is_bare_hex_seed(text: &str) -> bool {
    text.len() == HEX_SEED_LEN && text.bytes().all(|b| b.is_ascii_hexdigit())
}

/// [`QrPolicy::validate`] with the default policy.
#[must_use]
pub fn validate_qr_data_json(text: &str, now: Timestamp) -> QrValidationResult {
    QrPolicy::default().validate(text, now)
}

// ── Tests ──────────────────────────────────────────────────────────
