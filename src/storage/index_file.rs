//! # Position Index File
//!
//! The sibling `.idx` file persists the `(id, heap_offset)` pairs of a table,
//! 16 bytes per entry, append-only. It is loaded once when the table is opened
//! and appended to on every insert.
//!
//! Entries are written in id order because ids are the insertion counter, so
//! the loaded sequence is sorted without any sort step.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use tracing::warn;
use zerocopy::IntoBytes;

use super::headers::{IndexEntry, IndexEntryBytes};
use crate::config::INDEX_ENTRY_SIZE;

#[derive(Debug, Clone)]
pub struct IndexFile {
    path: PathBuf,
}

impl IndexFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every complete entry. A missing file loads as an empty index; a
    /// trailing partial entry is cut off the file so later appends stay
    /// aligned to whole entries.
    pub fn load(&self) -> Result<Vec<IndexEntry>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "index file unavailable, loading empty index");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(e).wrap_err_with(|| format!("failed to read index file {:?}", self.path))
            }
        };

        let chunks = bytes.chunks_exact(INDEX_ENTRY_SIZE);
        let trailing = chunks.remainder().len();
        if trailing > 0 {
            warn!(
                path = %self.path.display(),
                trailing,
                "truncating partial entry at end of index file"
            );
            self.truncate((bytes.len() - trailing) as u64)?;
        }

        chunks
            .map(|chunk| IndexEntryBytes::from_bytes(chunk).map(IndexEntry::from))
            .collect()
    }

    pub fn append(&self, entry: IndexEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .wrap_err_with(|| format!("failed to open index file {:?}", self.path))?;

        file.write_all(IndexEntryBytes::from(entry).as_bytes())
            .wrap_err_with(|| format!("failed to append index entry for id {}", entry.id))
    }

    /// Shrinks the file to `len` bytes.
    pub fn truncate(&self, len: u64) -> Result<()> {
        OpenOptions::new()
            .write(true)
            .open(&self.path)
            .and_then(|file| file.set_len(len))
            .wrap_err_with(|| format!("failed to truncate index file {:?} to {} bytes", self.path, len))
    }

    pub fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).wrap_err_with(|| format!("failed to remove {:?}", self.path)),
        }
    }
}
