//! `sync-code-core`: Sync chain enrollment codes.
//!
//! A sync chain is keyed by a 32-byte seed. Devices join by typing the seed
//! as 24 words (plus a 25th word encoding an expiry day) or by scanning a QR
//! payload carrying the hex seed and an expiry instant. This crate holds the
//! pure codecs and validators; nothing here reads the clock implicitly, does
//! I/O, or logs.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod time;
pub mod wordlist;

pub mod seed;

pub mod words;

pub mod qr;

pub use error::{DecodeError, GenerateError};
pub use qr::{
    is_bare_hex_seed, validate_qr_data_json, QrCodeData, QrPolicy, QrValidationResult,
    DEFAULT_QR_VALIDITY_MINUTES, MAX_QR_VALIDITY_MINUTES, QR_CODE_VERSION, QR_V1_SUNSET_DAY,
};
pub use seed::{
    hex_to_passphrase, hex_to_seed, is_passphrase_valid, passphrase_to_hex, seed_to_hex, Seed,
    HEX_SEED_LEN, PASSPHRASE_WORD_COUNT, SEED_LEN,
};
pub use time::{Clock, FixedClock, SystemClock, Timestamp};
pub use words::{
    detect_format, CodeFormat, WordsPolicy, WordsValidationStatus, DATE_WORD_TOLERANCE_DAYS,
    TIME_LIMITED_WORD_COUNT, WORDS_V1_SUNSET_DAY, WORDS_V2_EPOCH,
};
