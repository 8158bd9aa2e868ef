// Word scanner shared by samples, chunks and fixed word lists.
//
// A word is a run of word characters, optionally joined by internal
// apostrophes ("don't", "o'clock"). Leading or trailing apostrophes are not
// part of the word. Text is lowercased before scanning, and typographic
// apostrophes (U+2019) are folded to ASCII so "don’t" and "don't" count as
// the same word.

use std::sync::OnceLock;

use regex_lite::Regex;

// regex-lite's \w is ASCII-only, so Latin-1 Supplement and Latin Extended-A/B
// letters are listed explicitly, skipping × (U+00D7) and ÷ (U+00F7).
// Combining diacritics (U+0300-U+036F) keep decomposed accents inside the word.
const WORD_PATTERN: &str = r"[\w\x{00C0}-\x{00D6}\x{00D8}-\x{00F6}\x{00F8}-\x{024F}\x{0300}-\x{036F}]+(?:['\x{2019}][\w\x{00C0}-\x{00D6}\x{00D8}-\x{00F6}\x{00F8}-\x{024F}\x{0300}-\x{036F}]+)*";

fn word_regex() -> &'static Regex {
    static WORD_REGEX: OnceLock<Regex> = OnceLock::new();
    WORD_REGEX.get_or_init(|| Regex::new(WORD_PATTERN).expect("WORD_PATTERN is a valid regex"))
}

/// Split text into lowercased words, in reading order.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    word_regex()
        .find_iter(&lower)
        .map(|m| m.as_str().replace('\u{2019}', "'"))
        .collect()
}
