//! Per-partition occurrence counting

use std::sync::Arc;

use crate::engines::compute::string_ops::window_ranks;
use crate::engines::compute::ComputeResult;
use crate::modules::motif::enumerator::MotifSet;
use crate::modules::motif::table::CountTable;

/// Counts candidate motif occurrences within one partition of the corpus
///
/// Implementations must be pure: the result may depend only on `chunk` and
/// `candidates`, so partitions can be counted concurrently and merged in any
/// order.
pub trait ChunkCount: Sync {
    /// Count every candidate over `chunk`
    fn count_chunk<S>(&self, chunk: &[S], candidates: &Arc<MotifSet>) -> ComputeResult<CountTable>
    where
        S: AsRef<[u8]>;
}

/// Sliding-window occurrence counter
///
/// Each sequence is scanned once. Every window of width `motif_size` whose
/// symbols all belong to the alphabet is converted to its enumeration rank
/// and that candidate's count is incremented, so overlapping occurrences are
/// all counted. Sequences shorter than the motif contribute nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChunkCounter;

impl ChunkCounter {
    pub fn new() -> Self {
        ChunkCounter
    }
}

impl ChunkCount for ChunkCounter {
    fn count_chunk<S>(&self, chunk: &[S], candidates: &Arc<MotifSet>) -> ComputeResult<CountTable>
    where
        S: AsRef<[u8]>,
    {
        let alphabet = candidates.alphabet();
        let mut table = CountTable::zeroed(Arc::clone(candidates));

        for sequence in chunk {
            let ranks = window_ranks(
                sequence.as_ref(),
                candidates.motif_size(),
                alphabet.len(),
                |b| alphabet.index_of(b),
            )?;
            for rank in ranks {
                table.increment(rank);
            }
        }

        Ok(table)
    }
}
