//! Buffered I/O operations
//!
//! Line-oriented readers and writers for plain-text sequence files, plus a
//! line splitter for memory-mapped input.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

// Default buffer sizes
const DEFAULT_READ_BUFFER_SIZE: usize = 1024 * 1024; // 1MB
const DEFAULT_WRITE_BUFFER_SIZE: usize = 1024 * 1024; // 1MB

/// Buffered file reader
pub struct FastReader {
    reader: BufReader<File>,
    path: String,
    bytes_read: usize,
}

impl FastReader {
    /// Create a new reader for the given file path
    pub fn new<P: AsRef<Path>>(path: P, buffer_size: Option<usize>) -> io::Result<Self> {
        let file = File::open(path.as_ref())?;
        let buf_size = buffer_size.unwrap_or(DEFAULT_READ_BUFFER_SIZE);

        Ok(Self {
            reader: BufReader::with_capacity(buf_size, file),
            path: path.as_ref().to_string_lossy().to_string(),
            bytes_read: 0,
        })
    }

    /// Read the file line by line, yielding raw bytes without the line terminator
    pub fn read_lines(&mut self) -> Lines<'_> {
        Lines {
            reader: &mut self.reader,
            bytes_read: &mut self.bytes_read,
            buffer: Vec::new(),
        }
    }

    /// Get the path of the file being read
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Bytes consumed so far, line terminators included
    pub fn bytes_read(&self) -> usize {
        self.bytes_read
    }
}

/// Iterator over lines in a file
pub struct Lines<'a> {
    reader: &'a mut BufReader<File>,
    bytes_read: &'a mut usize,
    buffer: Vec<u8>,
}

impl<'a> Iterator for Lines<'a> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => None, // EOF
            Ok(bytes) => {
                *self.bytes_read += bytes;
                Some(Ok(trim_line_end(&self.buffer).to_vec()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Buffered file writer
pub struct FastWriter {
    writer: BufWriter<File>,
    bytes_written: usize,
}

impl FastWriter {
    /// Create (or truncate) the file at `path`
    pub fn new<P: AsRef<Path>>(path: P, buffer_size: Option<usize>) -> io::Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.as_ref())?;

        let buf_size = buffer_size.unwrap_or(DEFAULT_WRITE_BUFFER_SIZE);
        Ok(Self {
            writer: BufWriter::with_capacity(buf_size, file),
            bytes_written: 0,
        })
    }

    /// Write a line to the file (appends a newline)
    pub fn write_line(&mut self, line: &[u8]) -> io::Result<usize> {
        self.writer.write_all(line)?;
        self.writer.write_all(b"\n")?;

        let written = line.len() + 1;
        self.bytes_written += written;
        Ok(written)
    }

    /// Bytes handed to the writer so far, newlines included
    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Flush any buffered data to disk
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Split an in-memory buffer into lines
///
/// `\n` and `\r\n` terminators are removed. A trailing terminator does not
/// produce an extra empty line, matching [`FastReader::read_lines`].
pub fn split_lines(data: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = data.strip_suffix(b"\n").unwrap_or(data);
    let mut pieces = body.split(|&b| b == b'\n');
    if data.is_empty() {
        // `split` yields one empty piece for empty input
        pieces.next();
    }
    pieces.map(trim_line_end)
}

fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
