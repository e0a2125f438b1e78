//! Candidate motif enumeration
//!
//! Motifs are generated with an odometer over `motif_size` positions: the
//! last position turns fastest, so the output is in lexicographic order with
//! respect to the alphabet order. No recursion is involved, the only state is
//! one digit per position.

use std::iter::FusedIterator;

use crate::engines::compute::string_ops::checked_space;
use crate::engines::compute::{ComputeError, ComputeResult};
use crate::modules::seq::Alphabet;

/// Largest candidate space a search will enumerate (`4^11` for DNA)
///
/// Every candidate is materialised and every worker holds a count per
/// candidate, so bigger spaces are refused up front.
pub const MAX_CANDIDATES: usize = 1 << 22;

/// Number of candidates of `motif_size` symbols over `alphabet`
///
/// Fails with `InvalidArgument` when `motif_size` is zero or the space is
/// larger than [`MAX_CANDIDATES`].
pub fn candidate_count(alphabet: &Alphabet, motif_size: usize) -> ComputeResult<usize> {
    if motif_size == 0 {
        return Err(ComputeError::InvalidArgument(
            "Motif size must be positive".to_string(),
        ));
    }
    let total = checked_space(alphabet.len(), motif_size)?;
    if total > MAX_CANDIDATES {
        return Err(ComputeError::InvalidArgument(format!(
            "Motif size {} over '{}' gives {} candidates, at most {} are supported",
            motif_size, alphabet, total, MAX_CANDIDATES
        )));
    }
    Ok(total)
}

/// Iterator over every `motif_size`-length string over an alphabet
#[derive(Debug, Clone)]
pub struct MotifEnumerator {
    symbols: Vec<u8>,
    digits: Vec<usize>,
    remaining: usize,
}

impl MotifEnumerator {
    /// Create an enumerator, failing on `motif_size == 0` or an intractable space
    pub fn new(alphabet: &Alphabet, motif_size: usize) -> ComputeResult<Self> {
        let total = candidate_count(alphabet, motif_size)?;

        Ok(Self {
            symbols: alphabet.symbols().to_vec(),
            digits: vec![0; motif_size],
            remaining: total,
        })
    }

    fn advance(&mut self) {
        let base = self.symbols.len();
        for digit in self.digits.iter_mut().rev() {
            *digit += 1;
            if *digit < base {
                return;
            }
            *digit = 0;
        }
    }
}

impl Iterator for MotifEnumerator {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.remaining == 0 {
            return None;
        }

        let motif: String = self
            .digits
            .iter()
            .map(|&d| self.symbols[d] as char)
            .collect();

        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(motif)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for MotifEnumerator {}

impl FusedIterator for MotifEnumerator {}

/// The full candidate set for one alphabet and motif size, in enumeration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotifSet {
    alphabet: Alphabet,
    motif_size: usize,
    motifs: Vec<String>,
}

impl MotifSet {
    /// Enumerate every candidate motif
    pub fn enumerate(alphabet: &Alphabet, motif_size: usize) -> ComputeResult<Self> {
        let motifs: Vec<String> = MotifEnumerator::new(alphabet, motif_size)?.collect();

        if motifs.is_empty() {
            return Err(ComputeError::InvalidArgument(format!(
                "No candidate motifs of size {} over '{}'",
                motif_size, alphabet
            )));
        }

        log::debug!(
            "Enumerated {} candidate motifs of size {} over '{}'",
            motifs.len(),
            motif_size,
            alphabet
        );

        Ok(Self {
            alphabet: alphabet.clone(),
            motif_size,
            motifs,
        })
    }

    /// Alphabet the motifs are drawn from
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Length of every motif in the set
    pub fn motif_size(&self) -> usize {
        self.motif_size
    }

    /// Number of candidates (`|alphabet|^motif_size`)
    pub fn len(&self) -> usize {
        self.motifs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motifs.is_empty()
    }

    /// Candidates in enumeration order
    pub fn motifs(&self) -> &[String] {
        &self.motifs
    }

    /// Motif at enumeration position `rank`
    pub fn get(&self, rank: usize) -> Option<&str> {
        self.motifs.get(rank).map(String::as_str)
    }

    /// Enumeration position of `motif`, or `None` if it is not a candidate
    pub fn rank_of(&self, motif: &str) -> Option<usize> {
        if motif.len() != self.motif_size {
            return None;
        }
        let base = self.alphabet.len();
        motif.bytes().try_fold(0usize, |acc, b| {
            self.alphabet.index_of(b).map(|digit| acc * base + digit)
        })
    }

    /// Iterate candidates in enumeration order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.motifs.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_enumerates_full_product() {
        let dna = Alphabet::dna();
        let motifs: Vec<String> = MotifEnumerator::new(&dna, 2).unwrap().collect();

        assert_eq!(motifs.len(), 16);
        assert_eq!(motifs[0], "AA");
        assert_eq!(motifs[1], "AC");
        assert_eq!(motifs[4], "CA");
        assert_eq!(motifs[15], "TT");

        let unique: HashSet<&String> = motifs.iter().collect();
        assert_eq!(unique.len(), motifs.len());
        assert!(motifs.iter().all(|m| m.len() == 2));
    }

    #[test]
    fn test_exact_size() {
        let dna = Alphabet::dna();
        let mut motifs = MotifEnumerator::new(&dna, 3).unwrap();
        assert_eq!(motifs.len(), 64);
        motifs.next();
        assert_eq!(motifs.len(), 63);
        assert_eq!(motifs.count(), 63);
    }

    #[test]
    fn test_single_symbol_alphabet() {
        let alphabet = Alphabet::new(b"G").unwrap();
        let motifs: Vec<String> = MotifEnumerator::new(&alphabet, 5).unwrap().collect();
        assert_eq!(motifs, vec!["GGGGG".to_string()]);
    }

    #[test]
    fn test_zero_size_rejected() {
        let err = MotifEnumerator::new(&Alphabet::dna(), 0).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(MotifSet::enumerate(&Alphabet::dna(), 0).is_err());
    }

    #[test]
    fn test_intractable_space_rejected() {
        let err = MotifEnumerator::new(&Alphabet::dna(), 64).unwrap_err();
        assert!(err.is_invalid_argument());

        // Fits in a usize but is far past the candidate bound
        let err = MotifEnumerator::new(&Alphabet::dna(), 20).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(MotifSet::enumerate(&Alphabet::dna(), 20).is_err());
    }

    #[test]
    fn test_candidate_count_bound() {
        let dna = Alphabet::dna();
        assert_eq!(candidate_count(&dna, 11).unwrap(), MAX_CANDIDATES);
        assert!(candidate_count(&dna, 12).unwrap_err().is_invalid_argument());
        assert_eq!(MotifEnumerator::new(&dna, 11).unwrap().len(), MAX_CANDIDATES);

        let single = Alphabet::new(b"G").unwrap();
        assert_eq!(candidate_count(&single, 1000).unwrap(), 1);
    }

    #[test]
    fn test_rank_matches_enumeration_order() {
        let set = MotifSet::enumerate(&Alphabet::dna(), 3).unwrap();
        for (rank, motif) in set.iter().enumerate() {
            assert_eq!(set.rank_of(motif), Some(rank));
            assert_eq!(set.get(rank), Some(motif));
        }
        assert_eq!(set.rank_of("ACN"), None);
        assert_eq!(set.rank_of("AC"), None);
        assert_eq!(set.rank_of("acg"), None);
    }
}
