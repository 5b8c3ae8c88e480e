//! The 2048-word vocabulary shared by sync passphrases and date words.
//!
//! The English BIP39 list is embedded at compile time via `include_str!` and
//! parsed once on first access using `OnceLock`. Lookups never fail: indices
//! wrap modulo [`WORDLIST_SIZE`] and unknown words map to `None`.

use std::sync::OnceLock;

/// Number of words in the vocabulary.
pub const WORDLIST_SIZE: usize = 2048;

/// Bits encoded by one word (`2^11 == WORDLIST_SIZE`).
pub const BITS_PER_WORD: usize = 11;

// ── Embedded wordlist data ─────────────────────────────────────────

const ENGLISH_RAW: &str = include_str!("wordlist/english.txt");

static ENGLISH_LOCK: OnceLock<Box<[&'static str]>> = OnceLock::new();

/// Parse a raw newline-delimited wordlist into a boxed slice of `&'static str`.
fn parse_wordlist(raw: &'static str) -> Box<[&'static str]> {
    let words: Vec<&'static str> = raw.lines().map(str::trim).filter(|w| !w.is_empty()).collect();
    debug_assert!(
        words.len() == WORDLIST_SIZE,
        "wordlist must contain exactly {WORDLIST_SIZE} words, got {}",
        words.len()
    );
    words.into_boxed_slice()
}

// ── Public API ─────────────────────────────────────────────────────

/// Returns the whole vocabulary in index order.
///
/// Parsed lazily on first access and cached for the lifetime of the process.
#[must_use]
pub fn words() -> &'static [&'static str] {
    ENGLISH_LOCK.get_or_init(|| parse_wordlist(ENGLISH_RAW))
}

/// Returns the word at `index`, wrapping modulo [`WORDLIST_SIZE`].
#[must_use]
pub fn word_at(index: usize) -> &'static str {
    let words = words();
    // The list is never empty; the modulus is the list length itself so a
    // truncated list still cannot index out of bounds.
    #[allow(clippy::arithmetic_side_effects)]
    let wrapped = index % words.len();
    words[wrapped]
}

/// Returns the 0-based index of `word`, ignoring ASCII case.
///
/// Returns `None` if the word is not in the vocabulary.
#[must_use]
pub fn index_of(word: &str) -> Option<usize> {
    words()
        .binary_search_by(|candidate| {
            candidate
                .bytes()
                .cmp(word.bytes().map(|b| b.to_ascii_lowercase()))
        })
        .ok()
}

/// Check whether `word` is in the vocabulary (ASCII case-insensitive).
#[must_use]
pub fn contains(word: &str) -> bool {
    index_of(word).is_some()
}

// ── Tests ──────────────────────────────────────────────────────────
