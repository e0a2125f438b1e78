//! Occurrence count tables

use std::sync::Arc;

use crate::engines::compute::{ComputeError, ComputeResult};
use crate::modules::motif::enumerator::MotifSet;

/// Occurrence count for every candidate motif, including zero counts
///
/// Counts are stored densely in enumeration order, so two tables built over
/// the same [`MotifSet`] merge by element-wise addition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountTable {
    candidates: Arc<MotifSet>,
    counts: Vec<u64>,
}

impl CountTable {
    /// A table with every candidate at zero
    pub fn zeroed(candidates: Arc<MotifSet>) -> Self {
        let counts = vec![0; candidates.len()];
        Self { candidates, counts }
    }

    /// Count for `motif`, or `None` if it is not a candidate
    pub fn get(&self, motif: &str) -> Option<u64> {
        self.candidates.rank_of(motif).map(|rank| self.counts[rank])
    }

    /// Count for the candidate at enumeration position `rank`
    pub fn count_at(&self, rank: usize) -> u64 {
        self.counts[rank]
    }

    /// Increment the count at `rank` by one
    #[inline]
    pub(crate) fn increment(&mut self, rank: usize) {
        self.counts[rank] += 1;
    }

    /// Number of entries (always the number of candidates)
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Largest count in the table
    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `(motif, count)` pairs in enumeration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.candidates.iter().zip(self.counts.iter().copied())
    }

    /// Add every count of `other` into `self`
    ///
    /// Both tables must cover the same candidate set.
    pub fn merge(&mut self, other: &CountTable) -> ComputeResult<()> {
        if !Arc::ptr_eq(&self.candidates, &other.candidates) && self.candidates != other.candidates {
            return Err(ComputeError::ComputationFailed(format!(
                "Cannot merge count tables over different candidate sets (size {} vs {})",
                self.candidates.motif_size(),
                other.candidates.motif_size()
            )));
        }

        for (total, partial) in self.counts.iter_mut().zip(&other.counts) {
            *total += partial;
        }
        Ok(())
    }
}
