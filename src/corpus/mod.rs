// Corpus — sample collection, vocabulary policies and the session that keeps
// them in step.

pub mod collection;
pub mod session;
pub mod vocabulary;
