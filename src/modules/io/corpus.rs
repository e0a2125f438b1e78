//! Plain-text corpus loading and writing
//!
//! A corpus file holds one sequence per line. Lines are kept in file order,
//! empty lines become empty sequences and `\r\n` terminators are accepted.

use std::path::Path;

use crate::engines::compute::ComputeError;
use crate::engines::core::io::{split_lines, FastReader, FastWriter};
use crate::engines::core::memory::MemoryMapped;
use crate::modules::seq::Alphabet;

/// Result type for corpus operations
pub type CorpusResult<T> = Result<T, CorpusError>;

/// Errors raised while loading or checking a corpus
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line} is not valid UTF-8")]
    InvalidUtf8 { line: usize },

    #[error("Line {line}, column {column}: symbol {symbol:?} is not in the alphabet")]
    InvalidSymbol {
        line: usize,
        column: usize,
        symbol: char,
    },

    #[error(transparent)]
    Compute(#[from] ComputeError),
}

/// An ordered, immutable collection of sequences
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    sequences: Vec<String>,
}

impl Corpus {
    /// Build a corpus from sequences in order
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sequences: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// The sequences in their original order
    pub fn sequences(&self) -> &[String] {
        &self.sequences
    }

    /// Number of sequences
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Total number of symbols over all sequences
    pub fn total_symbols(&self) -> usize {
        self.sequences.iter().map(String::len).sum()
    }

    /// Check every symbol against `alphabet`, reporting the first offending one
    pub fn validate(&self, alphabet: &Alphabet) -> CorpusResult<()> {
        for (idx, sequence) in self.sequences.iter().enumerate() {
            if let Some(column) = alphabet.first_invalid(sequence.as_bytes()) {
                let symbol = sequence[column..].chars().next().unwrap_or('?');
                return Err(CorpusError::InvalidSymbol {
                    line: idx + 1,
                    column: column + 1,
                    symbol,
                });
            }
        }
        Ok(())
    }
}

fn decode_line(bytes: Vec<u8>, idx: usize) -> CorpusResult<String> {
    String::from_utf8(bytes).map_err(|_| CorpusError::InvalidUtf8 { line: idx + 1 })
}

/// Read a corpus through a buffered reader
pub fn read_corpus<P: AsRef<Path>>(path: P) -> CorpusResult<Corpus> {
    let mut reader = FastReader::new(path, None)?;

    let sequences = reader
        .read_lines()
        .enumerate()
        .map(|(idx, line)| decode_line(line?, idx))
        .collect::<CorpusResult<Vec<String>>>()?;

    let corpus = Corpus { sequences };
    log::info!(
        "Loaded {} sequences ({} symbols, {} bytes) from {}",
        corpus.len(),
        corpus.total_symbols(),
        reader.bytes_read(),
        reader.path()
    );
    Ok(corpus)
}

/// Read a corpus through a read-only memory mapping
pub fn read_corpus_mmap<P: AsRef<Path>>(path: P) -> CorpusResult<Corpus> {
    let mapped = MemoryMapped::open(path.as_ref())?;

    let sequences = split_lines(mapped.as_slice())
        .enumerate()
        .map(|(idx, line)| decode_line(line.to_vec(), idx))
        .collect::<CorpusResult<Vec<String>>>()?;

    let corpus = Corpus { sequences };
    log::info!(
        "Mapped {} sequences ({} bytes) from {}",
        corpus.len(),
        mapped.len(),
        path.as_ref().display()
    );
    Ok(corpus)
}

/// Write sequences to `path`, one per line, replacing any existing file
///
/// Returns the number of bytes written.
pub fn write_corpus<P, S>(path: P, sequences: &[S]) -> CorpusResult<usize>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let mut writer = FastWriter::new(path.as_ref(), None)?;
    for sequence in sequences {
        writer.write_line(sequence.as_ref().as_bytes())?;
    }
    writer.flush()?;

    let written = writer.bytes_written();
    log::info!(
        "Wrote {} sequences ({} bytes) to {}",
        sequences.len(),
        written,
        path.as_ref().display()
    );
    Ok(written)
}
