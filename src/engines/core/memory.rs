//! Memory mapping primitives
//!
//! Read-only file mappings used to load large corpora without copying the
//! whole file through a read buffer first.

use std::fs::File;
use std::path::Path;

use memmap2::{Mmap, MmapOptions};

/// Read-only memory-mapped file
pub struct MemoryMapped {
    mmap: Option<Mmap>,
}

impl MemoryMapped {
    /// Map the file at `path` read-only
    ///
    /// Zero-length files cannot be mapped on every platform, so they are
    /// represented without a mapping and read as an empty slice.
    pub fn open<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();

        if len == 0 {
            return Ok(Self { mmap: None });
        }

        // SAFETY: the mapping is read-only and the corpus file is not expected
        // to be modified while it is being analysed.
        let mmap = unsafe { MmapOptions::new().map(&file)? };
        Ok(Self { mmap: Some(mmap) })
    }

    /// Get a reference to the mapped bytes
    pub fn as_slice(&self) -> &[u8] {
        match &self.mmap {
            Some(mmap) => &mmap[..],
            None => &[],
        }
    }

    /// Get the length of the mapped data
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Check if the mapped data is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
