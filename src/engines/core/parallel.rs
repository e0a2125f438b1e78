//! Parallel processing primitives
//!
//! A fixed-size worker pool with a fan-out/fan-in helper. Work is split into
//! contiguous read-only partitions, every partition is handed to one task, and
//! the coordinating thread blocks until all tasks have finished or one failed.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::engines::compute::{ComputeError, ComputeResult};

/// Get the default number of threads to use
pub fn default_num_threads() -> usize {
    num_cpus::get()
}

/// Resolve a requested worker count, where 0 means "all processing units"
pub fn resolve_num_threads(requested: usize) -> usize {
    if requested == 0 {
        default_num_threads()
    } else {
        requested
    }
}

/// Split `items` into `parts` contiguous chunks of `len / parts` items each
///
/// The last chunk absorbs the remainder, so the chunks always cover `items`
/// exactly once and in order. When `items` is shorter than `parts`, the
/// leading chunks are empty.
pub fn partition_contiguous<T>(items: &[T], parts: usize) -> Vec<&[T]> {
    let parts = parts.max(1);
    let chunk_size = items.len() / parts;

    (0..parts)
        .map(|i| {
            let start = i * chunk_size;
            let end = if i == parts - 1 {
                items.len()
            } else {
                (i + 1) * chunk_size
            };
            &items[start..end]
        })
        .collect()
}

/// Dedicated pool of worker threads
pub struct WorkerPool {
    pool: ThreadPool,
}

impl WorkerPool {
    /// Build a pool with `num_threads` workers (0 = one per processing unit)
    pub fn new(num_threads: usize) -> ComputeResult<Self> {
        let num_threads = resolve_num_threads(num_threads);

        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|idx| format!("motif-worker-{}", idx))
            .build()
            .map_err(|e| {
                ComputeError::ComputationFailed(format!("Failed to create thread pool: {}", e))
            })?;

        log::debug!("Initialized worker pool with {} threads", num_threads);

        Ok(Self { pool })
    }

    /// Number of worker threads in the pool
    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run `op` inside the pool, so nested rayon iterators use its workers
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }

    /// Run `f` on every chunk concurrently and collect the results in chunk order
    ///
    /// Blocks until every task has returned. The first error, or a panic in any
    /// task, is reported as the result and the other results are dropped.
    pub fn fan_out<'a, T, R, F>(&self, chunks: &[&'a [T]], f: F) -> ComputeResult<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(usize, &'a [T]) -> ComputeResult<R> + Sync,
    {
        self.pool.install(|| {
            chunks
                .par_iter()
                .enumerate()
                .map(|(idx, chunk)| {
                    match panic::catch_unwind(AssertUnwindSafe(|| f(idx, *chunk))) {
                        Ok(result) => result,
                        Err(payload) => Err(ComputeError::ComputationFailed(format!(
                            "worker for chunk {} panicked: {}",
                            idx,
                            panic_message(payload.as_ref())
                        ))),
                    }
                })
                .collect::<ComputeResult<Vec<R>>>()
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_covers_input() {
        let items: Vec<usize> = (0..10).collect();
        let chunks = partition_contiguous(&items, 3);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0], &[0, 1, 2]);
        assert_eq!(chunks[1], &[3, 4, 5]);
        // Last chunk absorbs the remainder
        assert_eq!(chunks[2], &[6, 7, 8, 9]);

        let rejoined: Vec<usize> = chunks.concat();
        assert_eq!(rejoined, items);
    }

    #[test]
    fn test_partition_fewer_items_than_parts() {
        let items = vec!['a', 'b'];
        let chunks = partition_contiguous(&items, 4);

        assert_eq!(chunks.len(), 4);
        assert!(chunks[..3].iter().all(|c| c.is_empty()));
        assert_eq!(chunks[3], &['a', 'b']);

        let empty: Vec<u8> = Vec::new();
        let chunks = partition_contiguous(&empty, 0);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].is_empty());
    }

    #[test]
    fn test_fan_out_preserves_chunk_order() {
        let pool = WorkerPool::new(4).unwrap();
        assert_eq!(pool.num_threads(), 4);

        let data: Vec<usize> = (1..=12).collect();
        let chunks = partition_contiguous(&data, 4);
        let sums = pool
            .fan_out(&chunks, |_, chunk| Ok(chunk.iter().sum::<usize>()))
            .unwrap();

        assert_eq!(sums, vec![6, 15, 24, 33]);
    }

    #[test]
    fn test_fan_out_propagates_errors() {
        let pool = WorkerPool::new(2).unwrap();
        let data: Vec<i32> = vec![1, 2, 3, -4, 5, 6];
        let chunks = partition_contiguous(&data, 3);

        let result = pool.fan_out(&chunks, |_, chunk| {
            if chunk.iter().any(|x| *x < 0) {
                Err(ComputeError::ComputationFailed("negative input".to_string()))
            } else {
                Ok(chunk.len())
            }
        });

        assert_eq!(
            result,
            Err(ComputeError::ComputationFailed("negative input".to_string()))
        );
    }

    #[test]
    fn test_fan_out_converts_panics() {
        let pool = WorkerPool::new(2).unwrap();
        let data: Vec<u32> = (0..8).collect();
        let chunks = partition_contiguous(&data, 2);

        let result: ComputeResult<Vec<u32>> = pool.fan_out(&chunks, |idx, chunk| {
            if idx == 1 {
                panic!("simulated worker fault");
            }
            Ok(chunk.iter().sum())
        });

        match result {
            Err(ComputeError::ComputationFailed(msg)) => {
                assert!(msg.contains("simulated worker fault"));
            }
            other => panic!("Expected ComputationFailed, got {:?}", other),
        }
    }
}
