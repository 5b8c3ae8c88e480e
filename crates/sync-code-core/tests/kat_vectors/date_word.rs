//! Date word vectors against the fixed reference epoch (2022-05-10 UTC).

use sync_code_core::words::{generate_for_date, not_after, parse};
use sync_code_core::{Timestamp, WORDS_V1_SUNSET_DAY, WORDS_V2_EPOCH};

const PURE_WORDS: &str = "abandon amount liar amount expire adjust cage candy arch gather drum bullet absurd math era live bid rhythm alien crouch range attend journey theme";

fn last_word(code: &str) -> &str {
    code.split_whitespace().last().unwrap()
}

#[test]
fn epoch_is_day_zero() {
    let code = generate_for_date(PURE_WORDS, WORDS_V2_EPOCH).unwrap();
    assert_eq!(last_word(&code), "abandon");
    assert_eq!(code, format!("{PURE_WORDS} abandon"));
}

#[test]
fn known_days() {
    // (not_after, date word)
    let cases = [
        (1_652_140_800 + 86_400, "ability"),
        (1_652_140_800 + 15 * 86_400, "acid"),
        (1_652_140_800 + 25 * 86_400, "add"),
        // 2022-08-01T00:00:00Z is day 83.
        (1_659_312_000, "apology"),
        // 2023-11-14T22:13:20Z rounds to day 554.
        (1_700_000_000, "earn"),
    ];
    for (seconds, word) in cases {
        let code = generate_for_date(PURE_WORDS, Timestamp::from_unix_seconds(seconds)).unwrap();
        assert_eq!(last_word(&code), word, "at {seconds}");
    }
    assert_eq!(
        last_word(&generate_for_date(PURE_WORDS, WORDS_V1_SUNSET_DAY).unwrap()),
        "apology"
    );
}

#[test]
fn day_2048_wraps_to_first_word() {
    let not_after = WORDS_V2_EPOCH.add_days(2048);
    let code = generate_for_date(PURE_WORDS, not_after).unwrap();
    assert_eq!(last_word(&code), "abandon");
    assert_eq!(parse(&code, not_after).unwrap(), PURE_WORDS);
}

#[test]
fn not_after_is_end_of_encoded_day() {
    let code = format!("{PURE_WORDS} acid");
    assert_eq!(not_after(&code), Some(WORDS_V2_EPOCH.add_days(16)));
}
