//! Motif selection pipeline
//!
//! Enumerate candidates, count them over the corpus in parallel, then pick
//! the candidate with the highest count. Candidates tied on count are
//! separated by their longest back-to-back repeat; if that ties too, the
//! candidate that comes first in enumeration order wins.

use std::cmp::Ordering;
use std::sync::Arc;

use itertools::Itertools;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engines::compute::ComputeResult;
use crate::modules::motif::aggregator::ParallelAggregator;
use crate::modules::motif::config::{MotifConfig, RepeatScoring};
use crate::modules::motif::counter::{ChunkCount, ChunkCounter};
use crate::modules::motif::enumerator::MotifSet;
use crate::modules::motif::repeats::ConsecutiveRepeatScorer;
use crate::modules::motif::table::CountTable;

/// A scored candidate motif
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotifHit {
    /// The motif itself
    pub motif: String,
    /// Overlapping occurrences across the corpus
    pub count: u64,
    /// Longest back-to-back run within a single sequence
    pub repeat_score: usize,
}

impl MotifHit {
    /// Whether `self` should replace `best` as the current winner
    fn beats(&self, best: &MotifHit) -> bool {
        self.count > best.count || (self.count == best.count && self.repeat_score > best.repeat_score)
    }
}

/// Drives the full motif search
pub struct MotifSelector<C = ChunkCounter> {
    candidates: Arc<MotifSet>,
    aggregator: ParallelAggregator<C>,
    scorer: ConsecutiveRepeatScorer,
    repeat_scoring: RepeatScoring,
}

impl MotifSelector<ChunkCounter> {
    /// Validate `config`, enumerate the candidates and start the worker pool
    pub fn new(config: &MotifConfig) -> ComputeResult<Self> {
        Self::with_counter(config, ChunkCounter)
    }
}

impl<C: ChunkCount> MotifSelector<C> {
    /// Selector using a custom per-chunk counter
    pub fn with_counter(config: &MotifConfig, counter: C) -> ComputeResult<Self> {
        config.validate()?;
        let candidates = Arc::new(MotifSet::enumerate(&config.alphabet, config.motif_size)?);
        let aggregator = ParallelAggregator::with_counter(config.num_workers, counter)?;

        Ok(Self {
            candidates,
            aggregator,
            scorer: ConsecutiveRepeatScorer::new(),
            repeat_scoring: config.repeat_scoring,
        })
    }

    /// The candidate set, in enumeration order
    pub fn candidates(&self) -> &MotifSet {
        &self.candidates
    }

    /// Occurrence counts for every candidate over `corpus`
    pub fn count_table<S>(&self, corpus: &[S]) -> ComputeResult<CountTable>
    where
        S: AsRef<[u8]> + Sync,
    {
        self.aggregator.aggregate(corpus, &self.candidates)
    }

    /// The winning motif, or an empty string when the corpus is empty
    pub fn select<S>(&self, corpus: &[S]) -> ComputeResult<String>
    where
        S: AsRef<[u8]> + Sync,
    {
        Ok(self
            .select_hit(corpus)?
            .map(|hit| hit.motif)
            .unwrap_or_default())
    }

    /// The winning motif with its count and repeat score, or `None` for an empty corpus
    pub fn select_hit<S>(&self, corpus: &[S]) -> ComputeResult<Option<MotifHit>>
    where
        S: AsRef<[u8]> + Sync,
    {
        if corpus.is_empty() {
            log::info!("Corpus is empty, no motif selected");
            return Ok(None);
        }

        let table = self.count_table(corpus)?;
        let max_count = table.max_count();

        let mut best: Option<MotifHit> = None;
        let mut scored = 0usize;
        for (rank, motif) in self.candidates.iter().enumerate() {
            let count = table.count_at(rank);
            if self.repeat_scoring == RepeatScoring::TiedOnly && count < max_count {
                continue;
            }

            let repeat_score = self.score(motif, corpus)?;
            scored += 1;

            let hit = MotifHit {
                motif: motif.to_string(),
                count,
                repeat_score,
            };
            if best.as_ref().map_or(true, |current| hit.beats(current)) {
                best = Some(hit);
            }
        }

        if let Some(hit) = &best {
            log::info!(
                "Selected motif {} (count {}, repeat score {}, {} of {} candidates scored)",
                hit.motif,
                hit.count,
                hit.repeat_score,
                scored,
                self.candidates.len()
            );
        }
        Ok(best)
    }

    /// The `n` best candidates, best first
    ///
    /// Ordered by count, then repeat score (both descending), then
    /// enumeration order. Every candidate is scored, regardless of the
    /// configured [`RepeatScoring`]. The first entry is always the motif
    /// [`select`](Self::select) returns.
    pub fn rank<S>(&self, corpus: &[S], n: usize) -> ComputeResult<Vec<MotifHit>>
    where
        S: AsRef<[u8]> + Sync,
    {
        if corpus.is_empty() || n == 0 {
            return Ok(Vec::new());
        }

        let table = self.count_table(corpus)?;
        let scores: Vec<usize> = self.aggregator.pool().install(|| {
            self.candidates
                .motifs()
                .par_iter()
                .map(|motif| self.scorer.score(motif, corpus))
                .collect::<ComputeResult<Vec<usize>>>()
        })?;

        let ranked = table
            .iter()
            .zip(scores)
            .map(|((motif, count), repeat_score)| MotifHit {
                motif: motif.to_string(),
                count,
                repeat_score,
            })
            .enumerate()
            .sorted_by(|(rank_a, a), (rank_b, b)| compare_hits(a, *rank_a, b, *rank_b))
            .map(|(_, hit)| hit)
            .take(n)
            .collect();

        Ok(ranked)
    }

    fn score<S>(&self, motif: &str, corpus: &[S]) -> ComputeResult<usize>
    where
        S: AsRef<[u8]> + Sync,
    {
        self.aggregator
            .pool()
            .install(|| self.scorer.score(motif, corpus))
    }
}

fn compare_hits(a: &MotifHit, rank_a: usize, b: &MotifHit, rank_b: usize) -> Ordering {
    b.count
        .cmp(&a.count)
        .then(b.repeat_score.cmp(&a.repeat_score))
        .then(rank_a.cmp(&rank_b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::compute::ComputeError;
    use crate::modules::seq::Alphabet;

    fn selector(motif_size: usize, repeat_scoring: RepeatScoring) -> MotifSelector {
        MotifSelector::new(&MotifConfig {
            motif_size,
            num_workers: 2,
            repeat_scoring,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_selects_most_frequent() {
        let corpus = ["ACGTACGT", "ACGTACGT"];
        let hit = selector(4, RepeatScoring::TiedOnly)
            .select_hit(&corpus)
            .unwrap()
            .unwrap();

        assert_eq!(hit.motif, "ACGT");
        assert_eq!(hit.count, 4);
        assert_eq!(hit.repeat_score, 2);
    }

    #[test]
    fn test_repeat_score_breaks_count_ties() {
        let corpus = ["ACACAC", "GGGG"];
        let sel = selector(2, RepeatScoring::Exhaustive);
        let table = sel.count_table(&corpus).unwrap();
        assert_eq!(table.get("AC"), Some(3));
        assert_eq!(table.get("GG"), Some(3));
        assert_eq!(table.get("CA"), Some(2));

        // GG only overlaps itself, so its run is 1 against AC's 3
        assert_eq!(sel.select(&corpus).unwrap(), "AC");
    }

    #[test]
    fn test_later_candidate_with_better_run_wins() {
        // AC and GT both occur twice, only GT occurs back to back
        let corpus = ["ACTTAC", "GTGT"];
        for scoring in [RepeatScoring::Exhaustive, RepeatScoring::TiedOnly] {
            let hit = selector(2, scoring).select_hit(&corpus).unwrap().unwrap();
            assert_eq!(
                hit,
                MotifHit {
                    motif: "GT".to_string(),
                    count: 2,
                    repeat_score: 2,
                }
            );
        }
    }

    #[test]
    fn test_full_tie_keeps_enumeration_order() {
        // GT, TT and TG all count 1 with a run of 1
        let corpus = ["GTTG"];
        for scoring in [RepeatScoring::Exhaustive, RepeatScoring::TiedOnly] {
            assert_eq!(selector(2, scoring).select(&corpus).unwrap(), "GT");
        }
    }

    #[test]
    fn test_empty_corpus_selects_nothing() {
        let corpus: Vec<String> = Vec::new();
        let sel = selector(4, RepeatScoring::TiedOnly);
        assert_eq!(sel.select(&corpus).unwrap(), "");
        assert!(sel.rank(&corpus, 5).unwrap().is_empty());
    }

    #[test]
    fn test_motif_longer_than_every_sequence() {
        let corpus = ["ACG", "TT"];
        for scoring in [RepeatScoring::Exhaustive, RepeatScoring::TiedOnly] {
            let hit = selector(5, scoring).select_hit(&corpus).unwrap().unwrap();
            assert_eq!(hit.motif, "AAAAA");
            assert_eq!(hit.count, 0);
            assert_eq!(hit.repeat_score, 0);
        }
    }

    #[test]
    fn test_invalid_config_rejected_before_counting() {
        let err = MotifSelector::new(&MotifConfig {
            motif_size: 0,
            ..Default::default()
        })
        .err()
        .unwrap();
        assert!(matches!(err, ComputeError::InvalidArgument(_)));

        let err = MotifSelector::new(&MotifConfig {
            motif_size: 20,
            ..Default::default()
        })
        .err()
        .unwrap();
        assert!(matches!(err, ComputeError::InvalidArgument(_)));
    }

    #[test]
    fn test_strategies_agree() {
        let corpus = [
            "ACGTTGCAACGTAC",
            "TTTTACGATCGATCGA",
            "GATCGATC",
            "CCCCGGGGAAAATTTT",
            "AGAGAGAGTCTC",
        ];
        for size in 1..=3 {
            let exhaustive = selector(size, RepeatScoring::Exhaustive)
                .select_hit(&corpus)
                .unwrap();
            let tied = selector(size, RepeatScoring::TiedOnly)
                .select_hit(&corpus)
                .unwrap();
            assert_eq!(exhaustive, tied, "motif size {}", size);
        }
    }

    #[test]
    fn test_rank_orders_candidates() {
        let corpus = ["ACACAC", "GGGG"];
        let sel = selector(2, RepeatScoring::TiedOnly);
        let ranked = sel.rank(&corpus, 4).unwrap();

        let motifs: Vec<&str> = ranked.iter().map(|h| h.motif.as_str()).collect();
        assert_eq!(motifs, vec!["AC", "GG", "CA", "AA"]);
        assert_eq!(ranked[0].motif, sel.select(&corpus).unwrap());
        assert_eq!(ranked[3].count, 0);

        assert_eq!(sel.rank(&corpus, 100).unwrap().len(), 16);
    }

    #[test]
    fn test_custom_alphabet() {
        let sel = MotifSelector::new(&MotifConfig {
            alphabet: Alphabet::new(b"ACGU").unwrap(),
            motif_size: 3,
            num_workers: 1,
            ..Default::default()
        })
        .unwrap();

        assert_eq!(sel.candidates().len(), 64);
        assert_eq!(sel.select(&["UUUGUUU", "CUU"]).unwrap(), "UUU");
    }
}
