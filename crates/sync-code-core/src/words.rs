//! Time-limited sync word codes.
//!
//! A v2 code is the 24-word passphrase plus a 25th "date word" whose index is
//! the number of days between [`WORDS_V2_EPOCH`] and the code's `not_after`
//! instant, modulo 2048. A v1 code is the bare 24-word passphrase; it is only
//! accepted before [`WORDS_V1_SUNSET_DAY`].
//!
//! Validation accepts the date word within ±[`DATE_WORD_TOLERANCE_DAYS`] of
//! today's index to absorb clock skew and timezone rounding between the
//! generating and the validating device.
//!
//! Day indices repeat every 2048 days (about 5.6 years), so a stale code is
//! accepted again once the index wraps around. This is a known limitation of
//! the format and is kept as is.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::GenerateError;
use crate::seed::{self, PASSPHRASE_WORD_COUNT};
use crate::time::{rounded_days_between, Clock, Timestamp};
use crate::wordlist::{self, WORDLIST_SIZE};

// ── Constants ──────────────────────────────────────────────────────

/// Day 0 of the date word: 2022-05-10T00:00:00Z.
pub const WORDS_V2_EPOCH: Timestamp = Timestamp::from_unix_seconds(1_652_140_800);

/// Undated 24-word codes are deprecated from 2022-08-01T00:00:00Z.
pub const WORDS_V1_SUNSET_DAY: Timestamp = Timestamp::from_unix_seconds(1_659_312_000);

/// Number of words in a time-limited code (passphrase + date word).
pub const TIME_LIMITED_WORD_COUNT: usize = PASSPHRASE_WORD_COUNT + 1;

/// Accepted distance, in days, between the date word and today.
pub const DATE_WORD_TOLERANCE_DAYS: i64 = 1;

// ── Types ──────────────────────────────────────────────────────────

/// Outcome of validating a word code.
///
/// `Valid` is only ever reported by [`WordsPolicy::status_of`]; the
/// `Result`-returning parsers never use it as an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum WordsValidationStatus {
    /// The code is well formed and fresh.
    #[error("sync code is valid")]
    Valid,
    /// The 24 passphrase words do not decode to a seed.
    #[error("sync code words are not valid")]
    NotValidPureWords,
    /// An undated 24-word code presented after the v1 sunset day.
    #[error("sync code format is deprecated")]
    VersionDeprecated,
    /// The date word is older than the tolerance window.
    #[error("sync code has expired")]
    Expired,
    /// The date word is further in the future than the tolerance window.
    #[error("sync code is valid for too long")]
    ValidForTooLong,
    /// Neither 24 nor 25 words.
    #[error("sync code has the wrong number of words")]
    WrongWordsNumber,
}

impl WordsValidationStatus {
    /// Returns `true` for [`Self::Valid`].
    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Shape of a word code, decided by its word count alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CodeFormat {
    /// v1: the bare 24-word passphrase.
    PureWords,
    /// v2: passphrase plus date word.
    TimeLimited,
}

/// Returns the format a code claims by its word count.
#[must_use]
pub fn detect_format(code: &str) -> Option<CodeFormat> {
    match words_count(code) {
        PASSPHRASE_WORD_COUNT => Some(CodeFormat::PureWords),
        TIME_LIMITED_WORD_COUNT => Some(CodeFormat::TimeLimited),
        _ => None,
    }
}

/// Counts non-empty whitespace-delimited tokens.
#[must_use]
pub fn words_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Reference dates and tolerance for word-code generation and validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordsPolicy {
    /// Day 0 of the date word.
    pub epoch: Timestamp,
    /// First instant at which undated codes are deprecated.
    pub v1_sunset_day: Timestamp,
    /// Accepted |today - date word| in days.
    pub tolerance_days: i64,
}

impl Default for WordsPolicy {
    fn default() -> Self {
        Self {
            epoch: WORDS_V2_EPOCH,
            v1_sunset_day: WORDS_V1_SUNSET_DAY,
            tolerance_days: DATE_WORD_TOLERANCE_DAYS,
        }
    }
}

impl WordsPolicy {
    /// Append the date word for `not_after` to `passphrase`.
    ///
    /// The passphrase words are re-joined with single spaces; they are not
    /// checked against the vocabulary.
    ///
    /// # Errors
    ///
    /// - [`GenerateError::NotAfterBeforeEpoch`] if `not_after` rounds to a
    ///   day before [`Self::epoch`], checked first
    /// - [`GenerateError::EmptyPassphrase`] if `passphrase` has no words
    pub fn generate_for_date(
        &self,
        passphrase: &str,
        not_after: Timestamp,
    ) -> Result<String, GenerateError> {
        let days = rounded_days_between(self.epoch, not_after);
        let days = usize::try_from(days).map_err(|_| GenerateError::NotAfterBeforeEpoch)?;
        if passphrase.split_whitespace().next().is_none() {
            return Err(GenerateError::EmptyPassphrase);
        }

        let mut words: Vec<&str> = passphrase.split_whitespace().collect();
        words.push(wordlist::word_at(days));
        Ok(words.join(" "))
    }

    /// [`Self::generate_for_date`] with `not_after` read from `clock`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::generate_for_date`].
    pub fn generate_for_now(
        &self,
        passphrase: &str,
        clock: &impl Clock,
    ) -> Result<String, GenerateError> {
        self.generate_for_date(passphrase, clock.now())
    }

    /// Validate a word code at `now` and return its 24 pure words.
    ///
    /// # Errors
    ///
    /// - [`WordsValidationStatus::WrongWordsNumber`] unless 24 or 25 words
    /// - [`WordsValidationStatus::VersionDeprecated`] for 24 words at or after
    ///   the v1 sunset day
    /// - [`WordsValidationStatus::NotValidPureWords`] if the passphrase part
    ///   does not decode
    /// - [`WordsValidationStatus::Expired`] / [`WordsValidationStatus::ValidForTooLong`]
    ///   if the date word is outside the tolerance window
    pub fn parse(&self, code: &str, now: Timestamp) -> Result<String, WordsValidationStatus> {
        let words: Vec<&str> = code.split_whitespace().collect();
        match words.len() {
            PASSPHRASE_WORD_COUNT => {
                if now >= self.v1_sunset_day {
                    return Err(WordsValidationStatus::VersionDeprecated);
                }
                pure_words(&words)
            }
            TIME_LIMITED_WORD_COUNT => {
                let (passphrase, date_word) = words.split_at(PASSPHRASE_WORD_COUNT);
                let pure = pure_words(passphrase)?;
                // Only vocabulary words can be generated, so a foreign date
                // word means the code was mistyped.
                let days_encoded = date_word
                    .first()
                    .and_then(|w| wordlist::index_of(w))
                    .ok_or(WordsValidationStatus::NotValidPureWords)?;
                self.check_date_word(days_encoded, now)?;
                Ok(pure)
            }
            _ => Err(WordsValidationStatus::WrongWordsNumber),
        }
    }

    /// Like [`Self::parse`] but a stale or too-fresh date word still yields
    /// the pure words.
    ///
    /// # Errors
    ///
    /// Every [`Self::parse`] error except `Expired` and `ValidForTooLong`.
    pub fn parse_ignore_date(
        &self,
        code: &str,
        now: Timestamp,
    ) -> Result<String, WordsValidationStatus> {
        match self.parse(code, now) {
            Err(WordsValidationStatus::Expired | WordsValidationStatus::ValidForTooLong) => {
                let words: Vec<&str> = code.split_whitespace().collect();
                pure_words(&words[..PASSPHRASE_WORD_COUNT])
            }
            other => other,
        }
    }

    /// Flattened classification of `code` at `now`.
    #[must_use]
    pub fn status_of(&self, code: &str, now: Timestamp) -> WordsValidationStatus {
        self.parse(code, now)
            .map_or_else(|status| status, |_| WordsValidationStatus::Valid)
    }

    /// The last instant a 25-word code is meant to be used.
    ///
    /// Computed as `epoch + (date word index + 1) days`. Returns `None` for
    /// undated codes, malformed codes and unknown date words.
    #[must_use]
    pub fn not_after(&self, code: &str) -> Option<Timestamp> {
        let words: Vec<&str> = code.split_whitespace().collect();
        if words.len() != TIME_LIMITED_WORD_COUNT {
            return None;
        }
        let days_encoded = words.last().and_then(|w| wordlist::index_of(w))?;
        let days = i64::try_from(days_encoded).ok()?.checked_add(1)?;
        Some(self.epoch.add_days(days))
    }

    /// Compare the encoded day index with today's, both modulo 2048.
    fn check_date_word(&self, days_encoded: usize, now: Timestamp) -> Result<(), WordsValidationStatus> {
        let modulus = i64::try_from(WORDLIST_SIZE).unwrap_or(i64::MAX);
        let days_actual = rounded_days_between(self.epoch, now).rem_euclid(modulus);
        let days_encoded = i64::try_from(days_encoded).unwrap_or(i64::MAX);

        let diff = days_actual.abs_diff(days_encoded);
        if diff <= self.tolerance_days.unsigned_abs() {
            Ok(())
        } else if days_actual > days_encoded {
            Err(WordsValidationStatus::Expired)
        } else {
            Err(WordsValidationStatus::ValidForTooLong)
        }
    }
}

/// Decode the 24 passphrase words and return them single-space joined.
fn pure_words(words: &[&str]) -> Result<String, WordsValidationStatus> {
    let joined = words.join(" ");
    if seed::is_passphrase_valid(&joined) {
        Ok(joined)
    } else {
        Err(WordsValidationStatus::NotValidPureWords)
    }
}

// ── Default-policy shorthands ──────────────────────────────────────

/// [`WordsPolicy::generate_for_date`] with the default policy.
///
/// # Errors
///
/// See [`WordsPolicy::generate_for_date`].
pub fn generate_for_date(passphrase: &str, not_after: Timestamp) -> Result<String, GenerateError> {
    WordsPolicy::default().generate_for_date(passphrase, not_after)
}

/// [`WordsPolicy::generate_for_now`] with the default policy.
///
/// # Errors
///
/// See [`WordsPolicy::generate_for_date`].
pub fn generate_for_now(passphrase: &str, clock: &impl Clock) -> Result<String, GenerateError> {
    WordsPolicy::default().generate_for_now(passphrase, clock)
}

/// [`WordsPolicy::parse`] with the default policy.
///
/// # Errors
///
/// See [`WordsPolicy::parse`].
pub fn parse(code: &str, now: Timestamp) -> Result<String, WordsValidationStatus> {
    WordsPolicy::default().parse(code, now)
}

/// [`WordsPolicy::parse_ignore_date`] with the default policy.
///
/// # Errors
///
/// See [`WordsPolicy::parse_ignore_date`].
pub fn parse_ignore_date(code: &str, now: Timestamp) -> Result<String, WordsValidationStatus> {
    WordsPolicy::default().parse_ignore_date(code, now)
}

/// [`WordsPolicy::not_after`] with the default policy.
#[must_use]
pub fn not_after(code: &str) -> Option<Timestamp> {
    WordsPolicy::default().not_after(code)
}

// ── Tests ──────────────────────────────────────────────────────────
