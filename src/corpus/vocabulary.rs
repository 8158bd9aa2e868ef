// Vocabulary selection — which words become analysis features.
//
// Three modes:
//   Union  — every word in any document, sorted alphabetically
//   Fixed  — an external word list (e.g. function words), frozen once loaded
//   TopK   — the K words with the highest corpus-wide counts
//
// Union and TopK are derived from the corpus and must be recomputed whenever
// the corpus changes. Fixed never looks at the corpus; instead its word set
// is used to restrict counting when documents are ingested.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::collection::Corpus;
use crate::error::{Result, StyleError};
use crate::text::tokenizer;

/// An externally supplied, deduplicated word list.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedWordList {
    words: Vec<String>,
    set: HashSet<String>,
}

impl FixedWordList {
    /// Tokenize `text` with the document tokenizer and keep the first
    /// occurrence of every word, in source order.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut words = Vec::new();
        let mut set = HashSet::new();
        for word in tokenizer::tokenize(text) {
            if set.insert(word.clone()) {
                words.push(word);
            }
        }
        if words.is_empty() {
            return Err(StyleError::Vocabulary(
                "Fixed word list contains no words".to_string(),
            ));
        }
        Ok(Self { words, set })
    }

    /// Read and tokenize a word list file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| StyleError::WordListIo {
            path: path.to_path_buf(),
            source,
        })?;
        let list = Self::from_text(&text)?;
        tracing::info!(path = %path.display(), words = list.len(), "Loaded fixed word list");
        Ok(list)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// The word set, used as the allow-set when counting documents.
    pub fn allowed(&self) -> &HashSet<String> {
        &self.set
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// How the vocabulary is built.
#[derive(Debug, Clone, PartialEq)]
pub enum VocabularyMode {
    Union,
    Fixed(FixedWordList),
    TopK(usize),
}

impl VocabularyMode {
    pub fn label(&self) -> &'static str {
        match self {
            VocabularyMode::Union => "union",
            VocabularyMode::Fixed(_) => "fixed",
            VocabularyMode::TopK(_) => "top-k",
        }
    }

    /// Words that documents are restricted to at ingestion, if any.
    pub fn allowed_words(&self) -> Option<&HashSet<String>> {
        match self {
            VocabularyMode::Fixed(list) => Some(list.allowed()),
            _ => None,
        }
    }

    /// True for modes whose vocabulary depends on the corpus contents.
    pub fn is_derived(&self) -> bool {
        !matches!(self, VocabularyMode::Fixed(_))
    }
}

/// The ordered list of feature words.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    words: Vec<String>,
}

impl Vocabulary {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.words.iter()
    }
}

/// Build the vocabulary for `corpus` under `mode`.
///
/// Pure and deterministic: the same corpus and mode always produce the same
/// ordered word list.
pub fn select(mode: &VocabularyMode, corpus: &Corpus) -> Result<Vocabulary> {
    let vocabulary = match mode {
        VocabularyMode::Union => union(corpus),
        VocabularyMode::Fixed(list) => Vocabulary::new(list.words().to_vec()),
        VocabularyMode::TopK(k) => top_k(corpus, *k)?,
    };
    tracing::debug!(
        mode = mode.label(),
        documents = corpus.len(),
        words = vocabulary.len(),
        "Vocabulary selected"
    );
    Ok(vocabulary)
}

fn union(corpus: &Corpus) -> Vocabulary {
    let words: BTreeSet<&str> = corpus.iter().flat_map(|s| s.words()).collect();
    Vocabulary::new(words.into_iter().map(str::to_string).collect())
}

/// Aggregate each word's count over every document, then rank by count
/// descending with alphabetical tie-break.
fn top_k(corpus: &Corpus, k: usize) -> Result<Vocabulary> {
    if k == 0 {
        return Err(StyleError::Vocabulary(
            "Top-K vocabulary needs K greater than zero".to_string(),
        ));
    }

    let mut totals: HashMap<&str, u64> = HashMap::new();
    for sample in corpus {
        for (word, count) in sample.counts() {
            *totals.entry(word).or_insert(0) += count as u64;
        }
    }

    let mut ranked: Vec<(&str, u64)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(k);

    Ok(Vocabulary::new(
        ranked.into_iter().map(|(w, _)| w.to_string()).collect(),
    ))
}
