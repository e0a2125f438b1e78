//! Longest back-to-back repeat scoring
//!
//! This score deliberately differs from occurrence counting: the counter
//! includes overlapping occurrences, while a repeat run only grows when the
//! next match starts exactly one motif length after the previous match. For
//! `AA` in `AAAA` the counter reports 3 and the score is 1.

use rayon::prelude::*;

use crate::engines::compute::string_ops::longest_tiling_run;
use crate::engines::compute::ComputeResult;

/// Scores a motif by its longest run of consecutive tiling occurrences
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsecutiveRepeatScorer;

impl ConsecutiveRepeatScorer {
    pub fn new() -> Self {
        ConsecutiveRepeatScorer
    }

    /// Longest run of `motif` within one sequence
    pub fn score_sequence(&self, motif: &str, sequence: &[u8]) -> ComputeResult<usize> {
        longest_tiling_run(sequence, motif.as_bytes())
    }

    /// Longest run of `motif` within any single sequence of `corpus`
    ///
    /// Runs never span two sequences. Sequences are scanned in parallel on
    /// the current rayon pool; an empty corpus scores 0.
    pub fn score<S>(&self, motif: &str, corpus: &[S]) -> ComputeResult<usize>
    where
        S: AsRef<[u8]> + Sync,
    {
        corpus
            .par_iter()
            .map(|sequence| self.score_sequence(motif, sequence.as_ref()))
            .try_reduce(|| 0, |a, b| Ok(a.max(b)))
    }
}
