// TextSample — the word-count profile of one document or chunk.
//
// A sample is immutable once built. It remembers which source document it
// came from (`group`) so chunks of one text can be kept together when the
// results are displayed.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::tokenizer;
use crate::error::{Result, StyleError};

/// The (name, author, group) triple handed to callers alongside matrices
/// and coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub name: String,
    pub author: String,
    pub group: String,
}

/// Word counts for a single document.
///
/// Invariant: `total_words` is the sum of all values in `counts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextSample {
    name: String,
    author: String,
    group: String,
    total_words: u64,
    counts: BTreeMap<String, u32>,
}

impl TextSample {
    /// Build a sample from raw text.
    ///
    /// When `allowed` is given, only words in that set are counted, and only
    /// they contribute to the total. Relative frequencies are then shares of
    /// the allowed words rather than of the whole text.
    pub fn new(
        name: impl Into<String>,
        author: impl Into<String>,
        group: impl Into<String>,
        raw_text: &str,
        allowed: Option<&HashSet<String>>,
    ) -> Result<Self> {
        let tokens = tokenizer::tokenize(raw_text);
        Self::from_tokens(name, author, group, &tokens, allowed)
    }

    /// Build a sample from words that have already been tokenized.
    ///
    /// Fails when `tokens` is empty. A non-empty token list whose words are
    /// all outside `allowed` yields a sample with a total of zero.
    pub fn from_tokens<T: AsRef<str>>(
        name: impl Into<String>,
        author: impl Into<String>,
        group: impl Into<String>,
        tokens: &[T],
        allowed: Option<&HashSet<String>>,
    ) -> Result<Self> {
        let name = name.into();
        if tokens.is_empty() {
            return Err(StyleError::EmptyText { name });
        }

        let mut counts: BTreeMap<String, u32> = BTreeMap::new();
        let mut total_words = 0u64;
        for token in tokens {
            let word = token.as_ref();
            if let Some(allowed) = allowed {
                if !allowed.contains(word) {
                    continue;
                }
            }
            *counts.entry(word.to_string()).or_insert(0) += 1;
            total_words += 1;
        }

        if total_words == 0 {
            tracing::warn!(
                document = %name,
                tokens = tokens.len(),
                "No words from the allowed vocabulary; every frequency will be 0"
            );
        }

        Ok(Self {
            name,
            author: author.into(),
            group: group.into(),
            total_words,
            counts,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    /// Number of counted words (after allow-set filtering).
    pub fn total_words(&self) -> u64 {
        self.total_words
    }

    /// Number of distinct counted words.
    pub fn distinct_words(&self) -> usize {
        self.counts.len()
    }

    /// Distinct words in lexicographic order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// (word, count) pairs in lexicographic word order.
    pub fn counts(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(w, &c)| (w.as_str(), c))
    }

    /// Occurrences of `word`; 0 when the word never appeared.
    pub fn count(&self, word: &str) -> u32 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Share of the sample's words that are `word`.
    ///
    /// A sample with zero counted words returns 0.0 for every word rather
    /// than NaN.
    pub fn relative_frequency(&self, word: &str) -> f64 {
        if self.total_words == 0 {
            return 0.0;
        }
        self.count(word) as f64 / self.total_words as f64
    }

    pub fn record(&self) -> DocumentRecord {
        DocumentRecord {
            name: self.name.clone(),
            author: self.author.clone(),
            group: self.group.clone(),
        }
    }
}
