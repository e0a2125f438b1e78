//! I/O module
//!
//! Loading, validating, generating and writing plain-text corpora with one
//! sequence per line.

pub mod corpus;
pub mod generator;

pub use corpus::{read_corpus, read_corpus_mmap, write_corpus, Corpus, CorpusError, CorpusResult};
pub use generator::{GeneratorConfig, SequenceGenerator};
