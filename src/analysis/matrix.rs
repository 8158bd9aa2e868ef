// Frequency matrix — documents × vocabulary relative frequencies.
//
// Rows follow corpus order, columns follow vocabulary order. The matrix is
// always built fresh from the current corpus and vocabulary; nothing here is
// cached.

use nalgebra::DMatrix;
use serde::Serialize;

use crate::corpus::collection::Corpus;
use crate::corpus::vocabulary::Vocabulary;
use crate::error::{Result, StyleError};
use crate::text::sample::DocumentRecord;

#[derive(Debug, Clone)]
pub struct FrequencyMatrix {
    records: Vec<DocumentRecord>,
    vocabulary: Vocabulary,
    values: DMatrix<f64>,
}

/// Plain row-major form for serialization.
#[derive(Debug, Clone, Serialize)]
pub struct FrequencyTable<'a> {
    pub vocabulary: &'a [String],
    pub documents: Vec<FrequencyRow<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrequencyRow<'a> {
    #[serde(flatten)]
    pub record: &'a DocumentRecord,
    pub frequencies: Vec<f64>,
}

impl FrequencyMatrix {
    /// Build the matrix. Both the corpus and the vocabulary must be
    /// non-empty.
    pub fn build(corpus: &Corpus, vocabulary: &Vocabulary) -> Result<Self> {
        if corpus.is_empty() {
            return Err(StyleError::EmptyCorpus);
        }
        if vocabulary.is_empty() {
            return Err(StyleError::EmptyVocabulary);
        }

        let samples = corpus.samples();
        let words = vocabulary.words();
        let values = DMatrix::from_fn(samples.len(), words.len(), |row, col| {
            samples[row].relative_frequency(&words[col])
        });

        Ok(Self {
            records: corpus.records(),
            vocabulary: vocabulary.clone(),
            values,
        })
    }

    /// Number of documents.
    pub fn rows(&self) -> usize {
        self.values.nrows()
    }

    /// Number of vocabulary words.
    pub fn cols(&self) -> usize {
        self.values.ncols()
    }

    pub fn records(&self) -> &[DocumentRecord] {
        &self.records
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Frequency of `word` in the document named `document`, if both exist.
    pub fn get(&self, document: &str, word: &str) -> Option<f64> {
        let row = self.records.iter().position(|r| r.name == document)?;
        let col = self.vocabulary.iter().position(|w| w == word)?;
        Some(self.values[(row, col)])
    }

    /// One document's frequency vector, in vocabulary order.
    pub fn row(&self, index: usize) -> Vec<f64> {
        self.values.row(index).iter().copied().collect()
    }

    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.values
    }

    pub fn table(&self) -> FrequencyTable<'_> {
        FrequencyTable {
            vocabulary: self.vocabulary.words(),
            documents: self
                .records
                .iter()
                .enumerate()
                .map(|(i, record)| FrequencyRow {
                    record,
                    frequencies: self.row(i),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::vocabulary::{select, VocabularyMode};
    use crate::text::sample::TextSample;

    fn cat_dog() -> Corpus {
        let mut corpus = Corpus::new();
        corpus
            .add(TextSample::new("doc1", "a", "doc1", "the cat sat", None).unwrap())
            .unwrap();
        corpus
            .add(TextSample::new("doc2", "b", "doc2", "the dog sat", None).unwrap())
            .unwrap();
        corpus
    }

    #[test]
    fn test_shape_and_values() {
        let corpus = cat_dog();
        let vocab = select(&VocabularyMode::Union, &corpus).unwrap();
        let m = FrequencyMatrix::build(&corpus, &vocab).unwrap();
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 4);
        assert!((m.get("doc1", "cat").unwrap() - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(m.get("doc1", "dog"), Some(0.0));
        assert_eq!(m.get("doc3", "cat"), None);
        // Columns are [cat, dog, sat, the]
        let row = m.row(1);
        assert_eq!(row[0], 0.0);
        assert!((row[3] - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_corpus_rejected() {
        let vocab = Vocabulary::new(vec!["the".to_string()]);
        let err = FrequencyMatrix::build(&Corpus::new(), &vocab).unwrap_err();
        assert!(matches!(err, StyleError::EmptyCorpus));
    }

    #[test]
    fn test_empty_vocabulary_rejected() {
        let err = FrequencyMatrix::build(&cat_dog(), &Vocabulary::default()).unwrap_err();
        assert!(matches!(err, StyleError::EmptyVocabulary));
    }

    #[test]
    fn test_table_serializes_rows_in_corpus_order() {
        let corpus = cat_dog();
        let vocab = select(&VocabularyMode::Union, &corpus).unwrap();
        let m = FrequencyMatrix::build(&corpus, &vocab).unwrap();
        let json = serde_json::to_value(m.table()).unwrap();
        assert_eq!(json["documents"][0]["name"], "doc1");
        assert_eq!(json["documents"][1]["author"], "b");
        assert_eq!(json["vocabulary"][1], "dog");
    }
}
