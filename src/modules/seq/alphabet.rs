//! Ordered symbol alphabets
//!
//! The order of the symbols fixes both the motif enumeration order and the
//! rank encoding used to index count tables.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engines::compute::{ComputeError, ComputeResult};

/// Nucleotide symbols in canonical order
pub const DNA_SYMBOLS: &[u8] = b"ACGT";

const NO_RANK: u8 = u8::MAX;

/// An ordered set of distinct single-byte ASCII symbols
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alphabet {
    symbols: Vec<u8>,
    ranks: [u8; 256],
}

impl Alphabet {
    /// Create an alphabet from an ordered list of symbols
    ///
    /// Symbols must be ASCII, distinct and there must be at least one and at
    /// most 255 of them. Matching is case-sensitive, so `a` and `A` are
    /// different symbols.
    pub fn new(symbols: &[u8]) -> ComputeResult<Self> {
        if symbols.is_empty() {
            return Err(ComputeError::InvalidArgument(
                "Alphabet must contain at least one symbol".to_string(),
            ));
        }
        if symbols.len() >= NO_RANK as usize {
            return Err(ComputeError::InvalidArgument(format!(
                "Alphabet has {} symbols, at most {} are supported",
                symbols.len(),
                NO_RANK - 1
            )));
        }

        let mut ranks = [NO_RANK; 256];
        for (rank, &symbol) in symbols.iter().enumerate() {
            if !symbol.is_ascii() || symbol.is_ascii_control() || symbol == b' ' {
                return Err(ComputeError::InvalidArgument(format!(
                    "Alphabet symbol {:?} is not a printable ASCII character",
                    symbol as char
                )));
            }
            if ranks[symbol as usize] != NO_RANK {
                return Err(ComputeError::InvalidArgument(format!(
                    "Alphabet symbol '{}' appears more than once",
                    symbol as char
                )));
            }
            ranks[symbol as usize] = rank as u8;
        }

        Ok(Self {
            symbols: symbols.to_vec(),
            ranks,
        })
    }

    /// The nucleotide alphabet `A, C, G, T`
    pub fn dna() -> Self {
        let mut ranks = [NO_RANK; 256];
        for (rank, &symbol) in DNA_SYMBOLS.iter().enumerate() {
            ranks[symbol as usize] = rank as u8;
        }
        Self {
            symbols: DNA_SYMBOLS.to_vec(),
            ranks,
        }
    }

    /// Symbols in alphabet order
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Number of symbols
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false for a constructed alphabet; provided for API symmetry
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Position of `symbol` in the alphabet, if it belongs to it
    #[inline]
    pub fn index_of(&self, symbol: u8) -> Option<usize> {
        match self.ranks[symbol as usize] {
            NO_RANK => None,
            rank => Some(rank as usize),
        }
    }

    /// Check whether `symbol` belongs to the alphabet
    pub fn contains(&self, symbol: u8) -> bool {
        self.index_of(symbol).is_some()
    }

    /// Position of the first byte of `sequence` outside the alphabet
    pub fn first_invalid(&self, sequence: &[u8]) -> Option<usize> {
        sequence.iter().position(|&b| !self.contains(b))
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Alphabet::dna()
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Alphabet")
            .field(&String::from_utf8_lossy(&self.symbols))
            .finish()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.symbols))
    }
}

impl TryFrom<String> for Alphabet {
    type Error = ComputeError;

    fn try_from(symbols: String) -> ComputeResult<Self> {
        Alphabet::new(symbols.as_bytes())
    }
}

impl std::str::FromStr for Alphabet {
    type Err = ComputeError;

    fn from_str(s: &str) -> ComputeResult<Self> {
        Alphabet::new(s.as_bytes())
    }
}

impl From<Alphabet> for String {
    fn from(alphabet: Alphabet) -> String {
        alphabet.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dna_alphabet() {
        let dna = Alphabet::dna();
        assert_eq!(dna.len(), 4);
        assert_eq!(dna.symbols(), b"ACGT");
        assert_eq!(dna.index_of(b'A'), Some(0));
        assert_eq!(dna.index_of(b'T'), Some(3));
        assert_eq!(dna.index_of(b'a'), None);
        assert_eq!(dna.index_of(b'N'), None);
        assert_eq!(dna, Alphabet::new(b"ACGT").unwrap());
    }

    #[test]
    fn test_custom_order() {
        let alphabet: Alphabet = "TGCA".parse().unwrap();
        assert_eq!(alphabet.index_of(b'T'), Some(0));
        assert_eq!(alphabet.index_of(b'A'), Some(3));
        assert_eq!(alphabet.to_string(), "TGCA");
    }

    #[test]
    fn test_invalid_alphabets() {
        assert!(Alphabet::new(b"").unwrap_err().is_invalid_argument());
        assert!(Alphabet::new(b"ACGA").unwrap_err().is_invalid_argument());
        assert!(Alphabet::new(b"AC T").is_err());
        assert!(Alphabet::new(&[b'A', 0xC3]).is_err());
    }

    #[test]
    fn test_first_invalid() {
        let dna = Alphabet::dna();
        assert_eq!(dna.first_invalid(b"ACGT"), None);
        assert_eq!(dna.first_invalid(b"ACNGT"), Some(2));
        assert_eq!(dna.first_invalid(b"acgt"), Some(0));
    }

    #[test]
    fn test_serde_round_trip() {
        let alphabet = Alphabet::new(b"ACGU").unwrap();
        let json = serde_json::to_string(&alphabet).unwrap();
        assert_eq!(json, "\"ACGU\"");

        let parsed: Alphabet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, alphabet);
        assert!(serde_json::from_str::<Alphabet>("\"AA\"").is_err());
    }
}
