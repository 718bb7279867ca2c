//! # Heap File
//!
//! Append-only binary file holding a table's encoded records, addressed by
//! absolute byte offset.
//!
//! ```text
//! +----------------------+------------+-------------------------------+
//! | RecordHeader (267 B) | _id (8 B)  | user fields, schema order     |
//! +----------------------+------------+-------------------------------+
//! | RecordHeader         | _id        | ...                           |
//! ```
//!
//! Every operation opens the file by path, so an offset returned by `append`
//! stays valid for any later read, including after the process restarts.
//! There is no shared handle and no cache.
//!
//! A missing file is an empty heap for scans. Reading a specific offset from a
//! missing or truncated file is an error.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use eyre::{bail, ensure, Result, WrapErr};
use tracing::warn;

use super::codec::{decode_field, decode_id};
use super::headers::RecordHeader;
use super::row::Row;
use crate::config::{ID_WIDTH, RECORD_HEADER_SIZE};
use crate::schema::Schema;

#[derive(Debug, Clone)]
pub struct HeapFile {
    path: PathBuf,
}

/// Position and identity of one record met while walking the heap file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapSlot {
    pub offset: u64,
    pub id: i64,
    pub record_size: u32,
}

impl HeapFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Appends an encoded record and returns the offset it was written at.
    pub fn append(&self, record: &[u8]) -> Result<u64> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .wrap_err_with(|| format!("failed to open heap file {:?}", self.path))?;

        let offset = file
            .metadata()
            .wrap_err_with(|| format!("failed to stat heap file {:?}", self.path))?
            .len();

        file.write_all(record)
            .wrap_err_with(|| format!("failed to append record at offset {}", offset))?;

        Ok(offset)
    }

    /// Decodes the record starting at `offset` into its text fields.
    pub fn read_record(&self, offset: u64, schema: &Schema) -> Result<Row> {
        let mut file = File::open(&self.path)
            .wrap_err_with(|| format!("failed to open heap file {:?}", self.path))?;
        file.seek(SeekFrom::Start(offset))?;

        let mut buf = vec![0u8; RECORD_HEADER_SIZE + schema.size()];
        file.read_exact(&mut buf).wrap_err_with(|| {
            format!(
                "failed to read {} byte record at offset {} of {:?}",
                buf.len(),
                offset,
                self.path
            )
        })?;

        let header = RecordHeader::from_bytes(&buf)
            .wrap_err_with(|| format!("bad record header at offset {}", offset))?;
        ensure!(
            header.record_size() as usize == buf.len(),
            "record at offset {} has size {}, schema expects {}",
            offset,
            header.record_size(),
            buf.len()
        );

        let mut values = Vec::with_capacity(schema.column_count());
        let mut pos = RECORD_HEADER_SIZE;
        for column in schema.columns() {
            let width = column.size();
            values.push(decode_field(column, &buf[pos..pos + width]));
            pos += width;
        }

        Ok(Row::new(values))
    }

    /// Walks the file record by record, hopping forward by each header's
    /// declared size. Does not consult the index.
    pub fn scan(&self) -> Result<HeapCursor> {
        match File::open(&self.path) {
            Ok(file) => Ok(HeapCursor {
                reader: Some(BufReader::new(file)),
                position: 0,
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "heap file unavailable, scanning as empty");
                Ok(HeapCursor {
                    reader: None,
                    position: 0,
                })
            }
            Err(e) => {
                Err(e).wrap_err_with(|| format!("failed to open heap file {:?}", self.path))
            }
        }
    }

    /// Shrinks the file to `len` bytes, discarding every record from that
    /// offset on.
    pub fn truncate(&self, len: u64) -> Result<()> {
        OpenOptions::new()
            .write(true)
            .open(&self.path)
            .and_then(|file| file.set_len(len))
            .wrap_err_with(|| format!("failed to truncate heap file {:?} to {} bytes", self.path, len))
    }

    /// Deletes the file. A file that is already gone is not an error.
    pub fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).wrap_err_with(|| format!("failed to remove {:?}", self.path)),
        }
    }
}

pub struct HeapCursor {
    reader: Option<BufReader<File>>,
    position: u64,
}

impl HeapCursor {
    fn advance(&mut self) -> Result<Option<HeapSlot>> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };

        let mut buf = [0u8; RECORD_HEADER_SIZE + ID_WIDTH];
        let read = read_full(reader, &mut buf)?;
        if read == 0 {
            return Ok(None);
        }
        if read < buf.len() {
            bail!(
                "truncated record at offset {}: {} of {} bytes",
                self.position,
                read,
                buf.len()
            );
        }

        let header = RecordHeader::from_bytes(&buf)?;
        let record_size = header.record_size();
        ensure!(
            record_size as usize >= buf.len(),
            "record at offset {} declares size {} smaller than header and id",
            self.position,
            record_size
        );

        let slot = HeapSlot {
            offset: self.position,
            id: decode_id(&buf[RECORD_HEADER_SIZE..]),
            record_size,
        };

        reader.seek_relative(record_size as i64 - buf.len() as i64)?;
        self.position += record_size as u64;

        Ok(Some(slot))
    }
}

impl Iterator for HeapCursor {
    type Item = Result<HeapSlot>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(Some(slot)) => Some(Ok(slot)),
            Ok(None) => {
                self.reader = None;
                None
            }
            Err(e) => {
                self.reader = None;
                Some(Err(e))
            }
        }
    }
}

/// Like `read_exact`, but reports how much was read so a clean end of file
/// can be told apart from a torn record.
fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}
