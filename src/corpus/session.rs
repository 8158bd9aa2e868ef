// Session — the corpus and its vocabulary, mutated as one unit.
//
// Every mutation takes `&mut self` and recomputes the vocabulary before it
// returns, so a caller never sees a vocabulary built from a different corpus
// snapshot than the one stored. Downstream stages (frequency matrix, PCA)
// are computed fresh from the session on every request.

use tracing::{debug, info, warn};

use super::collection::Corpus;
use super::vocabulary::{self, FixedWordList, Vocabulary, VocabularyMode};
use crate::analysis::matrix::FrequencyMatrix;
use crate::analysis::pca::{PcaEngine, PcaResult};
use crate::config::Config;
use crate::error::{Result, StyleError};
use crate::text::chunker::Chunker;
use crate::text::sample::{DocumentRecord, TextSample};

/// Raw input for one document.
#[derive(Debug, Clone)]
pub struct SourceText {
    pub name: String,
    pub author: String,
    pub text: String,
}

impl SourceText {
    pub fn new(name: impl Into<String>, author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            author: author.into(),
            text: text.into(),
        }
    }
}

/// Outcome of a batch ingestion. Failed items do not stop the batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Names of the samples that were added (chunk names when chunking)
    pub added: Vec<String>,
    /// Source document name and the reason it was skipped
    pub failures: Vec<(String, StyleError)>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug)]
pub struct Session {
    corpus: Corpus,
    mode: VocabularyMode,
    vocabulary: Vocabulary,
    chunker: Option<Chunker>,
    engine: PcaEngine,
}

impl Session {
    /// Create an empty session. `chunk_size == 0` disables chunking.
    pub fn new(mode: VocabularyMode, chunk_size: usize) -> Result<Self> {
        validate_mode(&mode)?;
        let chunker = match chunk_size {
            0 => None,
            size => Some(Chunker::new(size)?),
        };
        let corpus = Corpus::new();
        let vocabulary = vocabulary::select(&mode, &corpus)?;
        Ok(Self {
            corpus,
            mode,
            vocabulary,
            chunker,
            engine: PcaEngine::default(),
        })
    }

    /// Build a session from loaded configuration, reading the fixed word
    /// list if that mode is selected.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let mode = config.vocabulary_mode()?;
        let engine = PcaEngine::default().with_large_vocabulary_warning(config.large_vocabulary);
        Ok(Self::new(mode, config.chunk_size)?.with_engine(engine))
    }

    /// Replace the PCA engine (e.g. to plug in another eigensolver).
    pub fn with_engine(mut self, engine: PcaEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn mode(&self) -> &VocabularyMode {
        &self.mode
    }

    pub fn chunk_size(&self) -> usize {
        self.chunker.map_or(0, |c| c.chunk_size())
    }

    pub fn records(&self) -> Vec<DocumentRecord> {
        self.corpus.records()
    }

    /// Ingest one document, chunking it when a chunk size is configured.
    ///
    /// All of a document's chunks are added or none are. Returns the names
    /// of the added samples.
    pub fn add_text(&mut self, source: &SourceText) -> Result<Vec<String>> {
        let added = self.insert_source(source)?;
        self.refresh_vocabulary()?;
        info!(
            document = %source.name,
            author = %source.author,
            samples = added.len(),
            "Document added"
        );
        Ok(added)
    }

    /// Add an already-built sample as-is.
    pub fn add_sample(&mut self, sample: TextSample) -> Result<()> {
        self.corpus.add(sample)?;
        self.refresh_vocabulary()
    }

    /// Ingest many documents, skipping the ones that fail. The vocabulary is
    /// recomputed once at the end.
    pub fn add_batch<I>(&mut self, sources: I) -> Result<BatchReport>
    where
        I: IntoIterator<Item = SourceText>,
    {
        let mut report = BatchReport::default();
        for source in sources {
            match self.insert_source(&source) {
                Ok(names) => report.added.extend(names),
                Err(e) => {
                    warn!(document = %source.name, error = %e, "Skipping document");
                    report.failures.push((source.name, e));
                }
            }
        }
        self.refresh_vocabulary()?;
        info!(
            added = report.added.len(),
            failed = report.failures.len(),
            documents = self.corpus.len(),
            "Batch ingestion complete"
        );
        Ok(report)
    }

    pub fn remove_by_name(&mut self, name: &str) -> Result<Vec<TextSample>> {
        let removed = self.corpus.remove_by_name(name);
        self.after_removal(removed)
    }

    pub fn remove_by_author(&mut self, author: &str) -> Result<Vec<TextSample>> {
        let removed = self.corpus.remove_by_author(author);
        self.after_removal(removed)
    }

    /// Remove every chunk of one source document.
    pub fn remove_by_group(&mut self, group: &str) -> Result<Vec<TextSample>> {
        let removed = self.corpus.remove_by_group(group);
        self.after_removal(removed)
    }

    /// Switch vocabulary policy.
    ///
    /// Changes into or out of fixed mode require an empty corpus: fixed mode
    /// restricts counting at ingestion, so samples counted under one policy
    /// cannot be reinterpreted under the other.
    pub fn set_vocabulary_mode(&mut self, mode: VocabularyMode) -> Result<()> {
        validate_mode(&mode)?;
        let touches_fixed = !self.mode.is_derived() || !mode.is_derived();
        if touches_fixed && self.mode != mode && !self.corpus.is_empty() {
            return Err(StyleError::Vocabulary(format!(
                "cannot switch from {} to {} vocabulary with {} documents loaded; clear the corpus first",
                self.mode.label(),
                mode.label(),
                self.corpus.len()
            )));
        }
        self.mode = mode;
        self.refresh_vocabulary()
    }

    /// Load a new fixed word list in place of the current vocabulary.
    pub fn replace_fixed_vocabulary(&mut self, list: FixedWordList) -> Result<()> {
        self.set_vocabulary_mode(VocabularyMode::Fixed(list))
    }

    /// Remove every document.
    pub fn clear(&mut self) -> Result<Vec<TextSample>> {
        let removed = self.corpus.clear();
        self.after_removal(removed)
    }

    /// Build the documents × vocabulary frequency matrix.
    ///
    /// Top-K vocabularies are reselected in full here rather than trusted
    /// from the last mutation.
    pub fn frequency_matrix(&self) -> Result<FrequencyMatrix> {
        match self.mode {
            VocabularyMode::TopK(_) => {
                let fresh = vocabulary::select(&self.mode, &self.corpus)?;
                FrequencyMatrix::build(&self.corpus, &fresh)
            }
            _ => FrequencyMatrix::build(&self.corpus, &self.vocabulary),
        }
    }

    /// Project every document onto the top `dimensions` principal axes.
    pub fn pca(&self, dimensions: usize) -> Result<PcaResult> {
        let matrix = self.frequency_matrix()?;
        self.engine.analyze(&matrix, dimensions)
    }

    fn build_samples(&self, source: &SourceText) -> Result<Vec<TextSample>> {
        let allowed = self.mode.allowed_words();
        match &self.chunker {
            Some(chunker) => chunker.samples(&source.name, &source.author, &source.text, allowed),
            None => Ok(vec![TextSample::new(
                source.name.as_str(),
                source.author.as_str(),
                source.name.as_str(),
                &source.text,
                allowed,
            )?]),
        }
    }

    /// Insert a source's samples without touching the vocabulary. Checks
    /// every name first so a failure leaves the corpus unchanged.
    fn insert_source(&mut self, source: &SourceText) -> Result<Vec<String>> {
        let samples = self.build_samples(source)?;
        if let Some(clash) = samples.iter().find(|s| self.corpus.contains(s.name())) {
            return Err(StyleError::DuplicateDocument(clash.name().to_string()));
        }
        let mut names = Vec::with_capacity(samples.len());
        for sample in samples {
            names.push(sample.name().to_string());
            self.corpus.add(sample)?;
        }
        Ok(names)
    }

    fn after_removal(&mut self, removed: Vec<TextSample>) -> Result<Vec<TextSample>> {
        if !removed.is_empty() {
            self.refresh_vocabulary()?;
            info!(
                removed = removed.len(),
                documents = self.corpus.len(),
                "Documents removed"
            );
        }
        Ok(removed)
    }

    fn refresh_vocabulary(&mut self) -> Result<()> {
        self.vocabulary = vocabulary::select(&self.mode, &self.corpus)?;
        debug!(words = self.vocabulary.len(), "Vocabulary refreshed");
        Ok(())
    }
}

fn validate_mode(mode: &VocabularyMode) -> Result<()> {
    match mode {
        VocabularyMode::TopK(0) => Err(StyleError::Vocabulary(
            "Top-K vocabulary needs K greater than zero".to_string(),
        )),
        VocabularyMode::Fixed(list) if list.is_empty() => Err(StyleError::Vocabulary(
            "Fixed word list contains no words".to_string(),
        )),
        _ => Ok(()),
    }
}
