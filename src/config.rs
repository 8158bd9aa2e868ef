use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::analysis::pca::DEFAULT_LARGE_VOCABULARY;
use crate::corpus::vocabulary::{FixedWordList, VocabularyMode};

/// Which vocabulary selection policy to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VocabularyChoice {
    /// Every word in the corpus (default)
    Union,
    /// External word list, see STYLOMETER_WORD_LIST
    Fixed,
    /// The K most frequent words, see STYLOMETER_TOP_K
    TopK,
}

impl FromStr for VocabularyChoice {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "union" => Ok(VocabularyChoice::Union),
            "fixed" => Ok(VocabularyChoice::Fixed),
            "top-k" | "topk" | "top_k" => Ok(VocabularyChoice::TopK),
            other => anyhow::bail!(
                "Unknown vocabulary mode '{other}'. Expected one of: union, fixed, top-k"
            ),
        }
    }
}

/// Analysis settings, loaded from environment variables.
///
/// The .env file is loaded by the binary at startup via dotenvy. Command-line
/// flags override whatever is loaded here.
#[derive(Debug, Clone)]
pub struct Config {
    /// Words per chunk; 0 disables chunking
    pub chunk_size: usize,
    pub vocabulary: VocabularyChoice,
    /// K for top-K vocabulary
    pub top_k: usize,
    /// Word list file for the fixed vocabulary
    pub word_list: Option<PathBuf>,
    /// Number of principal axes to project onto
    pub dimensions: usize,
    /// Vocabulary size that triggers a slow-analysis warning
    pub large_vocabulary: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chunk_size: 0,
            vocabulary: VocabularyChoice::Union,
            top_k: 100,
            word_list: None,
            dimensions: 2,
            large_vocabulary: DEFAULT_LARGE_VOCABULARY,
        }
    }
}

impl Config {
    /// Load configuration from environment variables. Every variable is
    /// optional; unset ones keep their defaults.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            chunk_size: parse_or(&lookup, "STYLOMETER_CHUNK_SIZE", defaults.chunk_size)?,
            vocabulary: parse_or(&lookup, "STYLOMETER_VOCABULARY", defaults.vocabulary)?,
            top_k: parse_or(&lookup, "STYLOMETER_TOP_K", defaults.top_k)?,
            word_list: lookup("STYLOMETER_WORD_LIST")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            dimensions: parse_or(&lookup, "STYLOMETER_DIMENSIONS", defaults.dimensions)?,
            large_vocabulary: parse_or(
                &lookup,
                "STYLOMETER_VOCAB_WARN",
                defaults.large_vocabulary,
            )?,
        })
    }

    /// Check that the fixed vocabulary has a word list to load.
    /// Call this before building a session in fixed mode.
    pub fn require_word_list(&self) -> Result<&PathBuf> {
        match &self.word_list {
            Some(path) => Ok(path),
            None => anyhow::bail!(
                "STYLOMETER_WORD_LIST not set. The fixed vocabulary needs a word list file.\n\
                 Set it in your .env file or pass --word-list."
            ),
        }
    }

    /// Resolve the configured vocabulary policy, loading the word list for
    /// fixed mode.
    pub fn vocabulary_mode(&self) -> Result<VocabularyMode> {
        match self.vocabulary {
            VocabularyChoice::Union => Ok(VocabularyMode::Union),
            VocabularyChoice::TopK => {
                if self.top_k == 0 {
                    anyhow::bail!("STYLOMETER_TOP_K must be greater than zero");
                }
                Ok(VocabularyMode::TopK(self.top_k))
            }
            VocabularyChoice::Fixed => {
                let path = self.require_word_list()?;
                Ok(VocabularyMode::Fixed(FixedWordList::load(path)?))
            }
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Invalid value for {key}: '{raw}'")),
        _ => Ok(default),
    }
}
