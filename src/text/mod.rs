// Text layer — tokenizing, word counting and chunking.

pub mod chunker;
pub mod sample;
pub mod tokenizer;
