//! Motif discovery
//!
//! The pipeline runs leaf first: [`MotifEnumerator`] builds the candidate
//! set, [`ChunkCounter`] counts one partition, [`ParallelAggregator`] fans the
//! partitions out over the worker pool and merges the tables,
//! [`ConsecutiveRepeatScorer`] breaks count ties and [`MotifSelector`] ties it
//! all together.

pub mod aggregator;
pub mod config;
pub mod counter;
pub mod enumerator;
pub mod repeats;
pub mod selector;
pub mod table;

pub use aggregator::ParallelAggregator;
pub use config::{MotifConfig, RepeatScoring};
pub use counter::{ChunkCount, ChunkCounter};
pub use enumerator::{candidate_count, MotifEnumerator, MotifSet, MAX_CANDIDATES};
pub use repeats::ConsecutiveRepeatScorer;
pub use selector::{MotifHit, MotifSelector};
pub use table::CountTable;
