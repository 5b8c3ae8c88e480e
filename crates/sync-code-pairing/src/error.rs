//! Error types for `sync-code-pairing`.

use sync_code_core::{QrValidationResult, WordsValidationStatus};
use thiserror::Error;

/// Why a pairing input was rejected.
///
/// Wraps the core classification so the host can tell the user which kind
/// of code failed and how.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PairingError {
    /// The input was treated as a QR payload.
    #[error(transparent)]
    Qr(#[from] QrValidationResult),

    /// The input was treated as a word code.
    #[error(transparent)]
    Words(#[from] WordsValidationStatus),
}

/// Errors produced while loading, saving or checking a [`PairingConfig`].
///
/// [`PairingConfig`]: crate::PairingConfig
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error from the filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid configuration JSON.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The values parse but are inconsistent.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
