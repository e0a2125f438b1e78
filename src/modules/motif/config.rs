//! Motif search configuration

use serde::{Deserialize, Serialize};

use crate::engines::compute::{ComputeError, ComputeResult};
use crate::modules::motif::enumerator::candidate_count;
use crate::modules::seq::Alphabet;

/// Which candidates get a repeat score during selection
///
/// Both strategies select the same motif. `TiedOnly` only scores the
/// candidates that share the highest occurrence count, which is what matters
/// for large candidate spaces; `Exhaustive` scores every candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatScoring {
    /// Score every candidate
    Exhaustive,
    /// Score only the candidates tied on the best count
    #[default]
    TiedOnly,
}

/// Parameters of a motif search
///
/// # Examples
///
/// ```rust
/// use motif_finder::{MotifConfig, RepeatScoring};
///
/// let config = MotifConfig {
///     motif_size: 6,
///     repeat_scoring: RepeatScoring::Exhaustive,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotifConfig {
    /// Ordered symbols motifs are drawn from
    pub alphabet: Alphabet,
    /// Length of every candidate motif
    pub motif_size: usize,
    /// Worker threads for counting (0 = one per processing unit)
    pub num_workers: usize,
    /// Tie-break scoring strategy
    pub repeat_scoring: RepeatScoring,
}

impl Default for MotifConfig {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::dna(),
            motif_size: 4,
            num_workers: 0,
            repeat_scoring: RepeatScoring::TiedOnly,
        }
    }
}

impl MotifConfig {
    /// Check that the configuration describes a non-empty candidate space of
    /// at most [`MAX_CANDIDATES`](crate::modules::motif::enumerator::MAX_CANDIDATES) motifs
    pub fn validate(&self) -> ComputeResult<()> {
        if candidate_count(&self.alphabet, self.motif_size)? == 0 {
            return Err(ComputeError::InvalidArgument(
                "Alphabet and motif size produce no candidates".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration; missing fields take their defaults
    pub fn from_json(json: &str) -> ComputeResult<Self> {
        let config: MotifConfig = serde_json::from_str(json)
            .map_err(|e| ComputeError::InvalidArgument(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = MotifConfig::default();
        assert_eq!(config.motif_size, 4);
        assert_eq!(config.alphabet, Alphabet::dna());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_motif_size_rejected() {
        let config = MotifConfig {
            motif_size: 0,
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_oversized_space_rejected() {
        let config = MotifConfig {
            motif_size: 20,
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().is_invalid_argument());
        assert!(MotifConfig::from_json(r#"{"motif_size": 20}"#).is_err());

        let config = MotifConfig {
            motif_size: 11,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json() {
        let config =
            MotifConfig::from_json(r#"{"motif_size": 3, "repeat_scoring": "exhaustive"}"#).unwrap();
        assert_eq!(config.motif_size, 3);
        assert_eq!(config.repeat_scoring, RepeatScoring::Exhaustive);
        assert_eq!(config.alphabet, Alphabet::dna());
        assert_eq!(config.num_workers, 0);

        let config = MotifConfig::from_json(r#"{"alphabet": "ACGU"}"#).unwrap();
        assert_eq!(config.alphabet.symbols(), b"ACGU");
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert!(MotifConfig::from_json(r#"{"alphabet": ""}"#).is_err());
        assert!(MotifConfig::from_json(r#"{"motif_size": 0}"#).is_err());
        assert!(MotifConfig::from_json(r#"{"motif_size": -2}"#).is_err());
        assert!(MotifConfig::from_json("not json").is_err());
    }
}
