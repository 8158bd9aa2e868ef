// Unit tests for the text layer.
//
// Tests tokenizer edge cases, TextSample frequency invariants, and the
// chunking law (floor(L/S) chunks of exactly S words, remainder dropped,
// too-short texts reported distinctly).

use std::collections::HashSet;

use stylometer::text::chunker::Chunker;
use stylometer::text::sample::TextSample;
use stylometer::text::tokenizer::tokenize;
use stylometer::{ErrorKind, StyleError};

// ============================================================
// tokenize — word scanner
// ============================================================

#[test]
fn tokenize_strips_surrounding_apostrophes() {
    assert_eq!(tokenize("'quoted' rock'n'roll"), vec!["quoted", "rock'n'roll"]);
}

#[test]
fn tokenize_keeps_digits_and_underscores() {
    assert_eq!(tokenize("chapter_1 has 42 pages"), vec!["chapter_1", "has", "42", "pages"]);
}

#[test]
fn tokenize_empty_string() {
    assert!(tokenize("").is_empty());
}

#[test]
fn tokenize_splits_on_hyphens() {
    assert_eq!(tokenize("well-known"), vec!["well", "known"]);
}

// ============================================================
// TextSample — frequency invariants
// ============================================================

#[test]
fn relative_frequencies_of_own_words_sum_to_one() {
    let texts = [
        "It was the best of times, it was the worst of times",
        "Call me Ishmael. Some years ago—never mind how long precisely",
        "don't don't do it's its",
    ];
    for text in texts {
        let sample = TextSample::new("d", "a", "d", text, None).unwrap();
        let sum: f64 = sample.words().map(|w| sample.relative_frequency(w)).sum();
        assert!((sum - 1.0).abs() < 1e-12, "sum was {sum} for {text:?}");
    }
}

#[test]
fn allowed_frequencies_sum_to_one_over_allowed_words() {
    let allowed: HashSet<String> = ["the", "of", "and"].iter().map(|s| s.to_string()).collect();
    let sample = TextSample::new(
        "d",
        "a",
        "d",
        "The history of the decline and fall of the Roman empire",
        Some(&allowed),
    )
    .unwrap();
    assert_eq!(sample.total_words(), 6);
    let sum: f64 = allowed.iter().map(|w| sample.relative_frequency(w)).sum();
    assert!((sum - 1.0).abs() < 1e-12);
}

#[test]
fn unseen_word_counts_zero() {
    let sample = TextSample::new("d", "a", "d", "the cat sat", None).unwrap();
    assert_eq!(sample.count("dog"), 0);
    assert_eq!(sample.relative_frequency("dog"), 0.0);
}

#[test]
fn record_carries_metadata() {
    let sample = TextSample::new("emma.0", "austen", "emma", "words", None).unwrap();
    let record = sample.record();
    assert_eq!(record.name, "emma.0");
    assert_eq!(record.author, "austen");
    assert_eq!(record.group, "emma");
}

#[test]
fn empty_text_is_input_error() {
    let err = TextSample::new("blank", "a", "blank", "", None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);
}

// ============================================================
// Chunker — chunking law
// ============================================================

fn text_of(words: usize) -> String {
    (0..words).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
}

#[test]
fn chunk_count_is_floor_of_length_over_size() {
    for (length, size) in [(10, 3), (9, 3), (100, 7), (5, 5), (6, 1)] {
        let chunker = Chunker::new(size).unwrap();
        let chunks: Vec<Vec<String>> = chunker.chunk("doc", &text_of(length)).unwrap().collect();
        assert_eq!(chunks.len(), length / size, "L={length} S={size}");
        assert!(chunks.iter().all(|c| c.len() == size));
    }
}

#[test]
fn chunk_remainder_words_are_dropped() {
    let chunker = Chunker::new(4).unwrap();
    let chunks: Vec<Vec<String>> = chunker.chunk("doc", &text_of(11)).unwrap().collect();
    let kept: Vec<String> = chunks.into_iter().flatten().collect();
    assert_eq!(kept.len(), 8);
    assert!(!kept.contains(&"w8".to_string()));
    assert!(!kept.contains(&"w10".to_string()));
}

#[test]
fn chunk_shorter_than_size_is_reported() {
    let chunker = Chunker::new(10).unwrap();
    let err = chunker.chunk("short", &text_of(9)).unwrap_err();
    assert!(matches!(err, StyleError::NoChunks { words: 9, chunk_size: 10, .. }));
    assert_eq!(err.kind(), ErrorKind::Input);
}

#[test]
fn chunk_empty_text_is_reported() {
    let chunker = Chunker::new(1).unwrap();
    assert!(matches!(
        chunker.chunk("empty", ""),
        Err(StyleError::NoChunks { words: 0, .. })
    ));
}

#[test]
fn chunk_samples_respect_allowed_words() {
    let allowed: HashSet<String> = ["the"].iter().map(|s| s.to_string()).collect();
    let chunker = Chunker::new(3).unwrap();
    let samples = chunker
        .samples("doc", "a", "the cat sat on the mat", Some(&allowed))
        .unwrap();
    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0].total_words(), 1);
    assert_eq!(samples[1].count("the"), 1);
    assert_eq!(samples[1].count("mat"), 0);
}
