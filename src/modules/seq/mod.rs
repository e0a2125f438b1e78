//! Sequence module
//!
//! Alphabet handling shared by the motif engine, the corpus loader and the
//! sequence generator.

pub mod alphabet;

pub use alphabet::Alphabet;
