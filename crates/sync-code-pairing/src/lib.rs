//! `sync-code-pairing`: Validation and issuing of sync chain pairing codes.
//!
//! Wraps the pure codecs of `sync-code-core` behind one configured,
//! clock-driven [`PairingValidator`] and logs each outcome through `tracing`.
//! No secret material is ever logged.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod config;
pub mod error;
pub mod validator;

pub use config::{PairingConfig, CONFIG_FILE};
pub use error::{ConfigError, PairingError};
pub use validator::{PairingSecret, PairingSource, PairingStatus, PairingValidator};
