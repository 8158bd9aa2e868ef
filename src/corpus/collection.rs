// Corpus — the ordered set of samples under analysis.
//
// Samples are kept sorted by (author, name) with plain byte-wise string
// ordering, so "Zola" sorts before "austen". Names are unique across the
// whole corpus, not just within one author.

use std::collections::{BTreeSet, HashSet};

use crate::error::{Result, StyleError};
use crate::text::sample::{DocumentRecord, TextSample};

#[derive(Debug, Clone, Default)]
pub struct Corpus {
    samples: Vec<TextSample>,
    names: HashSet<String>,
}

fn sort_key(sample: &TextSample) -> (&str, &str) {
    (sample.author(), sample.name())
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a sample at its (author, name) position.
    pub fn add(&mut self, sample: TextSample) -> Result<()> {
        if self.names.contains(sample.name()) {
            return Err(StyleError::DuplicateDocument(sample.name().to_string()));
        }
        let key = sort_key(&sample);
        let at = self.samples.partition_point(|s| sort_key(s) <= key);
        self.names.insert(sample.name().to_string());
        self.samples.insert(at, sample);
        Ok(())
    }

    /// Remove the sample with exactly this name. Returns an empty vector when
    /// nothing matched.
    pub fn remove_by_name(&mut self, name: &str) -> Vec<TextSample> {
        self.remove_where(|s| s.name() == name)
    }

    /// Remove every sample written by `author`.
    pub fn remove_by_author(&mut self, author: &str) -> Vec<TextSample> {
        self.remove_where(|s| s.author() == author)
    }

    /// Remove every sample derived from the source document `group`.
    pub fn remove_by_group(&mut self, group: &str) -> Vec<TextSample> {
        self.remove_where(|s| s.group() == group)
    }

    fn remove_where(&mut self, matches: impl Fn(&TextSample) -> bool) -> Vec<TextSample> {
        let (removed, kept): (Vec<TextSample>, Vec<TextSample>) =
            self.samples.drain(..).partition(|s| matches(s));
        self.samples = kept;
        for sample in &removed {
            self.names.remove(sample.name());
        }
        removed
    }

    /// Drop every sample.
    pub fn clear(&mut self) -> Vec<TextSample> {
        self.names.clear();
        std::mem::take(&mut self.samples)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn get(&self, name: &str) -> Option<&TextSample> {
        self.samples.iter().find(|s| s.name() == name)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TextSample> {
        self.samples.iter()
    }

    pub fn samples(&self) -> &[TextSample] {
        &self.samples
    }

    /// Document records in corpus order.
    pub fn records(&self) -> Vec<DocumentRecord> {
        self.samples.iter().map(TextSample::record).collect()
    }

    /// Distinct authors, sorted.
    pub fn authors(&self) -> Vec<&str> {
        self.samples
            .iter()
            .map(TextSample::author)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a TextSample;
    type IntoIter = std::slice::Iter<'a, TextSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
