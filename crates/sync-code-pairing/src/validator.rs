//! The single entry point a host calls with whatever the user scanned or typed.
//!
//! The validator samples its clock once per call, picks the QR or the word
//! path, and hands back the decoded seed or the reason for rejection.

use std::fmt;

use sync_code_core::seed::{self, Seed};
use sync_code_core::words::{detect_format, words_count, CodeFormat};
use sync_code_core::{
    is_bare_hex_seed, Clock, GenerateError, QrCodeData, QrValidationResult, SystemClock,
    Timestamp, WordsValidationStatus,
};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::config::PairingConfig;
use crate::error::PairingError;

// ── Outcomes ───────────────────────────────────────────────────────

/// Which kind of code produced a [`PairingSecret`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PairingSource {
    /// Versioned JSON QR payload.
    QrCode,
    /// Bare hex seed shown by an older device.
    LegacyHexQr,
    /// 24 words plus date word.
    TimeLimitedWords,
    /// Bare 24 words from an older device.
    PureWords,
}

/// An accepted pairing code. Zeroized on drop; `Debug` hides the secret.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PairingSecret {
    seed: Seed,
    passphrase: String,
    #[zeroize(skip)]
    source: PairingSource,
}

impl PairingSecret {
    /// The sync chain seed.
    #[must_use]
    pub const fn seed(&self) -> &Seed {
        &self.seed
    }

    /// The canonical 24-word passphrase of [`Self::seed`].
    #[must_use]
    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }

    /// Which kind of code was accepted.
    #[must_use]
    pub const fn source(&self) -> PairingSource {
        self.source
    }
}

impl fmt::Debug for PairingSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PairingSecret")
            .field("seed", &self.seed)
            .field("passphrase", &"***")
            .field("source", &self.source)
            .finish()
    }
}

/// Flat outcome of [`PairingValidator::classify`], for UI state switching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PairingStatus {
    /// The code can be used.
    Valid,
    /// Rejected on the QR path.
    Qr(QrValidationResult),
    /// Rejected on the word path.
    Words(WordsValidationStatus),
}

impl From<PairingError> for PairingStatus {
    fn from(err: PairingError) -> Self {
        match err {
            PairingError::Qr(result) => Self::Qr(result),
            PairingError::Words(status) => Self::Words(status),
        }
    }
}

// ── Validator ──────────────────────────────────────────────────────

/// Validates and issues pairing codes under one [`PairingConfig`].
#[derive(Debug, Clone)]
pub struct PairingValidator<C: Clock = SystemClock> {
    config: PairingConfig,
    clock: C,
}

impl PairingValidator<SystemClock> {
    /// Default configuration on the system clock.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(PairingConfig::default(), SystemClock)
    }
}

impl<C: Clock> PairingValidator<C> {
    /// Build a validator from a configuration and a clock.
    #[must_use]
    pub const fn new(config: PairingConfig, clock: C) -> Self {
        Self { config, clock }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &PairingConfig {
        &self.config
    }

    /// Validate a scanned QR payload (JSON envelope or legacy bare hex).
    ///
    /// # Errors
    ///
    /// Returns [`PairingError::Qr`] with the rejection reason.
    pub fn validate_qr(&self, text: &str) -> Result<PairingSecret, PairingError> {
        self.validate_qr_at(text, self.clock.now())
    }

    /// Validate a typed word code (24 or 25 words).
    ///
    /// # Errors
    ///
    /// Returns [`PairingError::Words`] with the rejection reason.
    pub fn validate_words(&self, code: &str) -> Result<PairingSecret, PairingError> {
        self.validate_words_at(code, self.clock.now())
    }

    /// Validate any user input: text starting with `{` or a bare 64-hex
    /// string takes the QR path, everything else the word path.
    ///
    /// # Errors
    ///
    /// Same as [`Self::validate_qr`] or [`Self::validate_words`].
    pub fn validate(&self, input: &str) -> Result<PairingSecret, PairingError> {
        let now = self.clock.now();
        if looks_like_qr(input) {
            self.validate_qr_at(input, now)
        } else {
            self.validate_words_at(input, now)
        }
    }

    /// [`Self::validate`] flattened to a status.
    #[must_use]
    pub fn classify(&self, input: &str) -> PairingStatus {
        self.validate(input)
            .map_or_else(PairingStatus::from, |_| PairingStatus::Valid)
    }

    /// Decode the seed of a word code whatever its date word says.
    ///
    /// # Errors
    ///
    /// Returns [`PairingError::Words`] for every rejection except
    /// `Expired` and `ValidForTooLong`.
    pub fn recover_seed(&self, code: &str) -> Result<Seed, PairingError> {
        let now = self.clock.now();
        let result = self.config.words_policy().parse_ignore_date(code, now);
        tracing::debug!(
            words = words_count(code),
            status = ?status_of(&result),
            "Sync words recovered ignoring date"
        );
        let pure = Zeroizing::new(result?);
        decode_pure_words(&pure).map_err(PairingError::Words)
    }

    /// The time-limited word code for `seed`, dated today.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::NotAfterBeforeEpoch`] if the clock reads
    /// before the configured epoch.
    pub fn issue_words(&self, seed: &Seed) -> Result<String, GenerateError> {
        let passphrase = Zeroizing::new(seed.to_passphrase());
        self.config
            .words_policy()
            .generate_for_date(&passphrase, self.clock.now())
    }

    /// The QR payload for `seed`, valid for the configured number of minutes.
    #[must_use]
    pub fn issue_qr(&self, seed: &Seed) -> QrCodeData {
        self.config.qr_policy().create(seed.to_hex(), self.clock.now())
    }

    fn validate_qr_at(&self, text: &str, now: Timestamp) -> Result<PairingSecret, PairingError> {
        let text = text.trim();
        let result = self.config.qr_policy().validate(text, now);
        tracing::debug!(status = ?result, "QR payload validated");
        if !result.is_valid() {
            return Err(PairingError::Qr(result));
        }

        let (decoded, source) = match QrCodeData::from_json(text) {
            Some(data) => (data.seed(), PairingSource::QrCode),
            None => (seed::hex_to_seed(text), PairingSource::LegacyHexQr),
        };
        let seed = decoded.map_err(|_| PairingError::Qr(QrValidationResult::NotWellFormed))?;
        Ok(accept(seed, source))
    }

    fn validate_words_at(
        &self,
        code: &str,
        now: Timestamp,
    ) -> Result<PairingSecret, PairingError> {
        let format = detect_format(code);
        let result = self.config.words_policy().parse(code, now);
        tracing::debug!(
            words = words_count(code),
            ?format,
            status = ?status_of(&result),
            "Sync words validated"
        );

        let pure = Zeroizing::new(result?);
        let seed = decode_pure_words(&pure)?;
        let source = match format {
            Some(CodeFormat::TimeLimited) => PairingSource::TimeLimitedWords,
            _ => PairingSource::PureWords,
        };
        Ok(accept(seed, source))
    }
}

fn accept(seed: Seed, source: PairingSource) -> PairingSecret {
    tracing::info!(?source, "Pairing code accepted");
    PairingSecret {
        passphrase: seed.to_passphrase(),
        seed,
        source,
    }
}

fn decode_pure_words(pure: &str) -> Result<Seed, WordsValidationStatus> {
    seed::decode(pure).map_err(|_| WordsValidationStatus::NotValidPureWords)
}

fn status_of(result: &Result<String, WordsValidationStatus>) -> WordsValidationStatus {
    match result {
        Ok(_) => WordsValidationStatus::Valid,
        Err(status) => *status,
    }
}

fn looks_like_qr(input: &str) -> bool {
    let trimmed = input.trim();
    trimmed.starts_with('{') || is_bare_hex_seed(trimmed)
}

// ── Tests ──────────────────────────────────────────────────────────
