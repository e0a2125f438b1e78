//! Random corpus generation
//!
//! Produces synthetic sequences with per-symbol weights and uniformly drawn
//! lengths. Sequences are produced in blocks of fixed size, each block with
//! its own RNG seeded from the configured seed and the block index, so the
//! output depends only on the configuration and not on the worker count.

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engines::compute::{ComputeError, ComputeResult};
use crate::engines::core::parallel::WorkerPool;
use crate::modules::seq::Alphabet;

const BLOCK_SIZE: usize = 4096;

/// Parameters for synthetic corpus generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of sequences to produce
    pub num_sequences: usize,
    /// Shortest sequence length (inclusive)
    pub min_len: usize,
    /// Longest sequence length (inclusive)
    pub max_len: usize,
    /// Relative weight of each alphabet symbol, in alphabet order; empty means uniform
    pub weights: Vec<f64>,
    /// Base seed for the per-block RNGs
    pub seed: u64,
    /// Worker threads (0 = one per processing unit)
    pub num_workers: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_sequences: 1_000_000,
            min_len: 5,
            max_len: 100,
            weights: Vec::new(),
            seed: 0,
            num_workers: 0,
        }
    }
}

/// Weighted random sequence generator
#[derive(Debug)]
pub struct SequenceGenerator {
    config: GeneratorConfig,
    alphabet: Alphabet,
    symbols: WeightedIndex<f64>,
}

impl SequenceGenerator {
    /// Validate `config` against `alphabet` and build the sampler
    pub fn new(config: GeneratorConfig, alphabet: Alphabet) -> ComputeResult<Self> {
        if config.min_len > config.max_len {
            return Err(ComputeError::InvalidArgument(format!(
                "Minimum length {} exceeds maximum length {}",
                config.min_len, config.max_len
            )));
        }

        let weights = if config.weights.is_empty() {
            vec![1.0; alphabet.len()]
        } else {
            config.weights.clone()
        };
        if weights.len() != alphabet.len() {
            return Err(ComputeError::InvalidArgument(format!(
                "Expected {} weights for alphabet '{}', got {}",
                alphabet.len(),
                alphabet,
                weights.len()
            )));
        }

        let symbols = WeightedIndex::new(&weights)
            .map_err(|e| ComputeError::InvalidArgument(format!("Invalid symbol weights: {}", e)))?;

        Ok(Self {
            config,
            alphabet,
            symbols,
        })
    }

    /// Draw one sequence from `rng`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let len = rng.gen_range(self.config.min_len..=self.config.max_len);
        let symbols = self.alphabet.symbols();
        (0..len)
            .map(|_| symbols[self.symbols.sample(rng)] as char)
            .collect()
    }

    /// Produce the full corpus in parallel
    pub fn generate(&self) -> ComputeResult<Vec<String>> {
        let total = self.config.num_sequences;
        let blocks = (total + BLOCK_SIZE - 1) / BLOCK_SIZE;
        let pool = WorkerPool::new(self.config.num_workers)?;

        let sequences: Vec<String> = pool.install(|| {
            (0..blocks)
                .into_par_iter()
                .flat_map_iter(|block| {
                    let mut rng = StdRng::seed_from_u64(self.config.seed.wrapping_add(block as u64));
                    let start = block * BLOCK_SIZE;
                    let end = (start + BLOCK_SIZE).min(total);
                    (start..end)
                        .map(|_| self.sample(&mut rng))
                        .collect::<Vec<String>>()
                })
                .collect()
        });

        log::info!(
            "Generated {} sequences of length {}..={} over '{}'",
            sequences.len(),
            self.config.min_len,
            self.config.max_len,
            self.alphabet
        );
        Ok(sequences)
    }
}
