//! Structural error types for `sync-code-core`.
//!
//! These describe misuse of the codec (malformed passphrases, bad hex, a
//! `not_after` before the epoch). End-user validation outcomes are not
//! errors in this sense; they live in [`crate::words::WordsValidationStatus`]
//! and [`crate::qr::QrValidationResult`].
//!
//! No variant carries secret material: positions and counts only.

use thiserror::Error;

/// Errors produced while decoding a passphrase or hex seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The passphrase does not contain exactly 24 words.
    #[error("wrong word count: {found}, expected 24")]
    WrongWordCount {
        /// Number of whitespace-delimited words found.
        found: usize,
    },

    /// A word is not part of the vocabulary.
    #[error("word not found in wordlist at position {position}")]
    UnknownWord {
        /// 0-based position of the offending word.
        position: usize,
    },

    /// The low 8 bits of the last word are not zero, so the passphrase
    /// would not re-encode to itself.
    #[error("last word carries non-zero padding bits")]
    NonZeroPadding,

    /// The hex seed is not exactly 64 hexadecimal characters.
    #[error("invalid hex seed: expected 64 hex characters")]
    InvalidHex,
}

/// Errors produced while appending a date word to a passphrase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// The passphrase to extend is empty.
    #[error("passphrase must not be empty")]
    EmptyPassphrase,

    /// `not_after` rounds to a day before the words v2 epoch.
    #[error("not_after is before the words v2 epoch")]
    NotAfterBeforeEpoch,
}
