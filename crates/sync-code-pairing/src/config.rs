//! Pairing configuration: reference dates and validity windows.
//!
//! Stored as plain JSON next to the host's other settings. Every field has a
//! default equal to the core crate's constants, so an empty object or a
//! missing file yields the production behaviour.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sync_code_core::{
    QrPolicy, Timestamp, WordsPolicy, DATE_WORD_TOLERANCE_DAYS, DEFAULT_QR_VALIDITY_MINUTES,
    MAX_QR_VALIDITY_MINUTES, QR_CODE_VERSION, QR_V1_SUNSET_DAY, WORDS_V1_SUNSET_DAY,
    WORDS_V2_EPOCH,
};

use crate::error::ConfigError;

/// File name used inside the configuration directory.
pub const CONFIG_FILE: &str = "sync_pairing.json";

const CONFIG_TMP_FILE: &str = ".sync_pairing.json.tmp";

// ── Configuration ──────────────────────────────────────────────────

/// Pairing rules. Instants are seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PairingConfig {
    /// Day 0 of the time-limited date word.
    #[serde(default = "default_words_v2_epoch")]
    pub words_v2_epoch: Timestamp,

    /// From this instant on, 24-word codes are deprecated.
    #[serde(default = "default_words_v1_sunset_day")]
    pub words_v1_sunset_day: Timestamp,

    /// From this instant on, bare hex-seed QR payloads are deprecated.
    #[serde(default = "default_qr_v1_sunset_day")]
    pub qr_v1_sunset_day: Timestamp,

    /// The only QR envelope version accepted and issued.
    #[serde(default = "default_qr_code_version")]
    pub qr_code_version: u32,

    /// Lifetime of issued QR payloads.
    #[serde(default = "default_qr_validity_minutes")]
    pub qr_validity_minutes: i64,

    /// Longest lifetime a scanned QR payload may claim.
    #[serde(default = "default_qr_max_validity_minutes")]
    pub qr_max_validity_minutes: i64,

    /// Accepted distance in days between the date word and today.
    #[serde(default = "default_date_word_tolerance_days")]
    pub date_word_tolerance_days: i64,
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            words_v2_epoch: default_words_v2_epoch(),
            words_v1_sunset_day: default_words_v1_sunset_day(),
            qr_v1_sunset_day: default_qr_v1_sunset_day(),
            qr_code_version: default_qr_code_version(),
            qr_validity_minutes: default_qr_validity_minutes(),
            qr_max_validity_minutes: default_qr_max_validity_minutes(),
            date_word_tolerance_days: default_date_word_tolerance_days(),
        }
    }
}

const fn default_words_v2_epoch() -> Timestamp {
    WORDS_V2_EPOCH
}
const fn default_words_v1_sunset_day() -> Timestamp {
    WORDS_V1_SUNSET_DAY
}
const fn default_qr_v1_sunset_day() -> Timestamp {
    QR_V1_SUNSET_DAY
}
const fn default_qr_code_version() -> u32 {
    QR_CODE_VERSION
}
const fn default_qr_validity_minutes() -> i64 {
    DEFAULT_QR_VALIDITY_MINUTES
}
const fn default_qr_max_validity_minutes() -> i64 {
    MAX_QR_VALIDITY_MINUTES
}
const fn default_date_word_tolerance_days() -> i64 {
    DATE_WORD_TOLERANCE_DAYS
}

impl PairingConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Parse`] if the text is not a JSON object of the
    ///   expected shape
    /// - [`ConfigError::Invalid`] if [`Self::validate`] fails
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values against each other.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.words_v1_sunset_day < self.words_v2_epoch {
            return Err(invalid("wordsV1SunsetDay is before wordsV2Epoch"));
        }
        if self.qr_v1_sunset_day < self.words_v2_epoch {
            return Err(invalid("qrV1SunsetDay is before wordsV2Epoch"));
        }
        if self.qr_code_version == 0 {
            return Err(invalid("qrCodeVersion must be at least 1"));
        }
        if self.qr_validity_minutes <= 0 {
            return Err(invalid("qrValidityMinutes must be positive"));
        }
        if self.qr_validity_minutes > self.qr_max_validity_minutes {
            return Err(invalid("qrValidityMinutes exceeds qrMaxValidityMinutes"));
        }
        if self.date_word_tolerance_days < 0 {
            return Err(invalid("dateWordToleranceDays must not be negative"));
        }
        Ok(())
    }

    /// Word-code rules for the core crate.
    #[must_use]
    pub const fn words_policy(&self) -> WordsPolicy {
        WordsPolicy {
            epoch: self.words_v2_epoch,
            v1_sunset_day: self.words_v1_sunset_day,
            tolerance_days: self.date_word_tolerance_days,
        }
    }

    /// QR payload rules for the core crate.
    #[must_use]
    pub const fn qr_policy(&self) -> QrPolicy {
        QrPolicy {
            current_version: self.qr_code_version,
            v1_sunset_day: self.qr_v1_sunset_day,
            validity_minutes: self.qr_validity_minutes,
            max_validity_minutes: self.qr_max_validity_minutes,
        }
    }

    // ── File I/O ───────────────────────────────────────────────────

    /// Load `{config_dir}/sync_pairing.json`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Io`] if the file cannot be read
    /// - [`ConfigError::Parse`] / [`ConfigError::Invalid`] as in [`Self::from_json`]
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(config_dir.join(CONFIG_FILE))?;
        Self::from_json(&contents)
    }

    /// Load the configuration, falling back to defaults on any error.
    ///
    /// A missing file is the normal case and is not logged; unreadable,
    /// corrupt or inconsistent files are.
    #[must_use]
    pub fn load_or_default(config_dir: &Path) -> Self {
        match Self::load(config_dir) {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!("Pairing configuration unusable, using defaults: {e}");
                Self::default()
            }
        }
    }

    /// Persist to `{config_dir}/sync_pairing.json`.
    ///
    /// Writes a temporary file and renames it over the target so a crash
    /// never leaves a truncated file behind.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Invalid`] if [`Self::validate`] fails
    /// - [`ConfigError::Io`] if the directory does not exist or the write or
    ///   rename is rejected
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        let path = config_dir.join(CONFIG_FILE);
        let tmp = config_dir.join(CONFIG_TMP_FILE);

        let json = serde_json::to_string_pretty(self)?;
        fs::write(&tmp, &json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

fn invalid(reason: &str) -> ConfigError {
    ConfigError::Invalid(reason.to_owned())
}

// ── Tests ──────────────────────────────────────────────────────────
