// Stylometer: stylometric authorship analysis.
//
// This is the library root. Documents are reduced to word-frequency profiles
// over a shared vocabulary, and PCA projects those profiles onto a few
// principal axes so writing styles can be compared.
//
//   text      — tokenizer, per-document word counts, fixed-size chunking
//   corpus    — ordered sample collection, vocabulary selection, session
//   analysis  — frequency matrix, eigensolver, PCA
//   ingest    — reading files and folders (caller layer)
//   output    — terminal tables (caller layer)

pub mod analysis;
pub mod config;
pub mod corpus;
pub mod error;
pub mod ingest;
pub mod output;
pub mod text;

pub use error::{ErrorKind, Result, StyleError};
