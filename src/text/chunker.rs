// Fixed-size chunking of long documents.
//
// A long text is cut into consecutive runs of exactly `chunk_size` words.
// Each run becomes its own sample so one novel can contribute many points to
// the analysis. The words left over at the end (fewer than `chunk_size`) are
// dropped.

use std::collections::HashSet;

use super::sample::TextSample;
use super::tokenizer;
use crate::error::{Result, StyleError};

/// Splits texts into fixed-size word groups.
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    chunk_size: usize,
}

impl Chunker {
    /// A chunk size of zero is rejected; "no chunking" is expressed by not
    /// using a `Chunker` at all.
    pub fn new(chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(StyleError::InvalidChunkSize);
        }
        Ok(Self { chunk_size })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Tokenize `text` and return an iterator over its chunks.
    ///
    /// Fails with `NoChunks` when the text has fewer words than one chunk.
    pub fn chunk(&self, name: &str, text: &str) -> Result<Chunks> {
        self.chunk_tokens(name, tokenizer::tokenize(text))
    }

    /// Same as `chunk`, for words that are already tokenized.
    pub fn chunk_tokens(&self, name: &str, tokens: Vec<String>) -> Result<Chunks> {
        let total = tokens.len() / self.chunk_size;
        if total == 0 {
            return Err(StyleError::NoChunks {
                name: name.to_string(),
                words: tokens.len(),
                chunk_size: self.chunk_size,
            });
        }
        Ok(Chunks {
            words: tokens.into_iter(),
            chunk_size: self.chunk_size,
            remaining: total,
        })
    }

    /// Chunk `text` and turn every chunk into a sample named
    /// `<name>.<index>` with `group = name`.
    pub fn samples(
        &self,
        name: &str,
        author: &str,
        text: &str,
        allowed: Option<&HashSet<String>>,
    ) -> Result<Vec<TextSample>> {
        let chunks = self.chunk(name, text)?;
        let mut samples = Vec::with_capacity(chunks.len());
        for (index, words) in chunks.enumerate() {
            samples.push(TextSample::from_tokens(
                format!("{name}.{index}"),
                author,
                name,
                &words,
                allowed,
            )?);
        }
        tracing::debug!(
            document = name,
            chunks = samples.len(),
            chunk_size = self.chunk_size,
            "Chunked document"
        );
        Ok(samples)
    }
}

/// Consuming iterator over the chunks of one text. It cannot be restarted;
/// chunk the text again to walk it a second time.
#[derive(Debug)]
pub struct Chunks {
    words: std::vec::IntoIter<String>,
    chunk_size: usize,
    remaining: usize,
}

impl Iterator for Chunks {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.words.by_ref().take(self.chunk_size).collect())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Chunks {}
