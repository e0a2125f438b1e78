//! Parallel fan-out/fan-in occurrence aggregation

use std::sync::Arc;

use crate::engines::compute::ComputeResult;
use crate::engines::core::parallel::{partition_contiguous, WorkerPool};
use crate::modules::motif::counter::{ChunkCount, ChunkCounter};
use crate::modules::motif::enumerator::MotifSet;
use crate::modules::motif::table::CountTable;

/// Splits the corpus across a worker pool and merges the partial counts
///
/// The corpus is cut into one contiguous chunk per worker, each chunk is
/// counted independently and the per-chunk tables are summed on the calling
/// thread once every worker has returned. If any worker fails, nothing but
/// the error is returned.
pub struct ParallelAggregator<C = ChunkCounter> {
    pool: WorkerPool,
    counter: C,
}

impl ParallelAggregator<ChunkCounter> {
    /// Aggregator with `num_workers` threads (0 = one per processing unit)
    pub fn new(num_workers: usize) -> ComputeResult<Self> {
        Self::with_counter(num_workers, ChunkCounter)
    }
}

impl<C: ChunkCount> ParallelAggregator<C> {
    /// Aggregator using a custom per-chunk counter
    pub fn with_counter(num_workers: usize, counter: C) -> ComputeResult<Self> {
        Ok(Self {
            pool: WorkerPool::new(num_workers)?,
            counter,
        })
    }

    /// Number of workers, which is also the number of partitions
    pub fn num_workers(&self) -> usize {
        self.pool.num_threads()
    }

    /// The worker pool used for counting
    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    /// Count every candidate over the whole corpus
    pub fn aggregate<S>(&self, corpus: &[S], candidates: &Arc<MotifSet>) -> ComputeResult<CountTable>
    where
        S: AsRef<[u8]> + Sync,
    {
        let chunks = partition_contiguous(corpus, self.num_workers());
        log::debug!(
            "Counting {} sequences in {} chunks (last chunk {} sequences)",
            corpus.len(),
            chunks.len(),
            chunks.last().map_or(0, |c| c.len())
        );

        let partials = self
            .pool
            .fan_out(&chunks, |_, chunk| self.counter.count_chunk(chunk, candidates))?;

        let mut totals = CountTable::zeroed(Arc::clone(candidates));
        for partial in &partials {
            totals.merge(partial)?;
        }

        log::debug!(
            "Merged {} partial tables, {} windows counted",
            partials.len(),
            totals.total()
        );
        Ok(totals)
    }
}
