// Error taxonomy for the analysis core.
//
// Every fallible core operation returns `StyleError`. Variants are grouped
// into four kinds (input, duplicate document, vocabulary, numeric) so callers
// can report a failure category without matching every variant.

use std::path::PathBuf;

/// Broad category of a `StyleError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    DuplicateDocument,
    Vocabulary,
    Numeric,
}

#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    #[error("Document '{name}' contains no words")]
    EmptyText { name: String },

    #[error("Corpus is empty — add documents before building a frequency matrix")]
    EmptyCorpus,

    #[error("Vocabulary is empty — no words to use as features")]
    EmptyVocabulary,

    #[error("Chunk size must be greater than zero")]
    InvalidChunkSize,

    /// The text is shorter than a single chunk. Reported instead of silently
    /// producing zero samples.
    #[error("Document '{name}' has {words} words, fewer than the chunk size of {chunk_size}")]
    NoChunks {
        name: String,
        words: usize,
        chunk_size: usize,
    },

    #[error("A document named '{0}' is already in the corpus")]
    DuplicateDocument(String),

    #[error("Vocabulary error: {0}")]
    Vocabulary(String),

    #[error("Failed to read word list {}: {source}", path.display())]
    WordListIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot reduce to {requested} dimensions: {reason}")]
    InvalidDimensions { requested: usize, reason: String },

    #[error("Scatter matrix is degenerate — every document has the same frequency profile")]
    DegenerateScatter,

    #[error("Eigensolver failed: {0}")]
    EigenSolverFailed(String),
}

impl StyleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StyleError::EmptyText { .. }
            | StyleError::EmptyCorpus
            | StyleError::EmptyVocabulary
            | StyleError::InvalidChunkSize
            | StyleError::NoChunks { .. } => ErrorKind::Input,
            StyleError::DuplicateDocument(_) => ErrorKind::DuplicateDocument,
            StyleError::Vocabulary(_) | StyleError::WordListIo { .. } => ErrorKind::Vocabulary,
            StyleError::InvalidDimensions { .. }
            | StyleError::DegenerateScatter
            | StyleError::EigenSolverFailed(_) => ErrorKind::Numeric,
        }
    }
}

pub type Result<T> = std::result::Result<T, StyleError>;
