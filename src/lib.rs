//! Parallel motif discovery for nucleotide corpora
//!
//! Finds the fixed-length motif with the most (overlapping) occurrences in a
//! corpus of sequences. Count ties are broken by the longest run of
//! back-to-back occurrences within a single sequence, then by enumeration
//! order.
//!
//! ```rust
//! use motif_finder::{MotifConfig, MotifSelector};
//!
//! let selector = MotifSelector::new(&MotifConfig::default()).unwrap();
//! let motif = selector.select(&["ACGTACGT", "ACGTACGT"]).unwrap();
//! assert_eq!(motif, "ACGT");
//! ```

pub mod engines;
pub mod modules;

pub use engines::compute::{ComputeError, ComputeResult};
pub use modules::io::{Corpus, CorpusError, CorpusResult, GeneratorConfig, SequenceGenerator};
pub use modules::motif::{
    ChunkCount, ChunkCounter, ConsecutiveRepeatScorer, CountTable, MotifConfig, MotifEnumerator,
    MotifHit, MotifSelector, MotifSet, ParallelAggregator, RepeatScoring,
};
pub use modules::seq::Alphabet;

/// Find the winning motif of `motif_size` symbols over `alphabet`
///
/// Uses one worker per processing unit. Returns an empty string for an
/// empty corpus.
pub fn find_motif<S>(corpus: &[S], alphabet: &Alphabet, motif_size: usize) -> ComputeResult<String>
where
    S: AsRef<[u8]> + Sync,
{
    let config = MotifConfig {
        alphabet: alphabet.clone(),
        motif_size,
        ..Default::default()
    };
    MotifSelector::new(&config)?.select(corpus)
}
