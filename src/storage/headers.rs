//! # On-Disk Layouts
//!
//! Type-safe, zerocopy-based structs for the two fixed-size things heapdb
//! writes: the header in front of every heap record and the entries of the
//! index file.
//!
//! ## Record Header (267 bytes)
//!
//! ```text
//! Offset  Size  Description
//! 0       255   Table name, zero padded (truncated if longer)
//! 255     4     Record size: header + encoded fields
//! 259     8     Creation time, seconds since the Unix epoch
//! ```
//!
//! The header is self-describing only; readers skip it by its fixed length,
//! except the sequential heap scan which uses `record_size` to hop to the next
//! record without consulting the index.
//!
//! ## Index Entry (16 bytes)
//!
//! ```text
//! Offset  Size  Description
//! 0       8     Row id
//! 8       8     Absolute byte offset of the record in the heap file
//! ```
//!
//! ## Zerocopy Safety
//!
//! Both structs are `Unaligned` and built only from little-endian wrapper
//! types and byte arrays, so they can be read from any byte buffer without
//! reinterpreting raw memory.

use std::time::{SystemTime, UNIX_EPOCH};

use eyre::{ensure, Result};
use zerocopy::little_endian::{I64, U32, U64};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::config::{INDEX_ENTRY_SIZE, RECORD_HEADER_SIZE, TABLE_NAME_SIZE};

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct RecordHeader {
    table_name: [u8; TABLE_NAME_SIZE],
    record_size: U32,
    timestamp: I64,
}

const _: () = assert!(std::mem::size_of::<RecordHeader>() == RECORD_HEADER_SIZE);

impl RecordHeader {
    /// Creates a header stamped with the current time.
    pub fn new(table_name: &str, record_size: u32) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        Self::with_timestamp(table_name, record_size, timestamp)
    }

    pub fn with_timestamp(table_name: &str, record_size: u32, timestamp: i64) -> Self {
        let mut name = [0u8; TABLE_NAME_SIZE];
        let bytes = table_name.as_bytes();
        let len = bytes.len().min(TABLE_NAME_SIZE);
        name[..len].copy_from_slice(&bytes[..len]);

        Self {
            table_name: name,
            record_size: U32::new(record_size),
            timestamp: I64::new(timestamp),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        ensure!(
            bytes.len() >= RECORD_HEADER_SIZE,
            "buffer too small for RecordHeader: {} < {}",
            bytes.len(),
            RECORD_HEADER_SIZE
        );

        let header = Self::ref_from_bytes(&bytes[..RECORD_HEADER_SIZE])
            .map_err(|e| eyre::eyre!("failed to parse RecordHeader: {:?}", e))?;

        ensure!(
            header.record_size() as usize >= RECORD_HEADER_SIZE,
            "corrupt record header: record size {} is smaller than the header itself",
            header.record_size()
        );

        Ok(*header)
    }

    pub fn table_name(&self) -> String {
        let end = self
            .table_name
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(TABLE_NAME_SIZE);
        String::from_utf8_lossy(&self.table_name[..end]).into_owned()
    }

    le_field_getters! {
        record_size: u32,
        timestamp: i64,
    }
}

/// One `(id, heap_offset)` pair of a table's position index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndexEntry {
    pub id: i64,
    pub heap_offset: u64,
}

impl IndexEntry {
    pub fn new(id: i64, heap_offset: u64) -> Self {
        Self { id, heap_offset }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct IndexEntryBytes {
    id: I64,
    heap_offset: U64,
}

const _: () = assert!(std::mem::size_of::<IndexEntryBytes>() == INDEX_ENTRY_SIZE);

impl IndexEntryBytes {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        ensure!(
            bytes.len() >= INDEX_ENTRY_SIZE,
            "buffer too small for IndexEntry: {} < {}",
            bytes.len(),
            INDEX_ENTRY_SIZE
        );

        let entry = Self::ref_from_bytes(&bytes[..INDEX_ENTRY_SIZE])
            .map_err(|e| eyre::eyre!("failed to parse IndexEntry: {:?}", e))?;
        Ok(*entry)
    }

    le_field_getters! {
        id: i64,
        heap_offset: u64,
    }
}

impl From<IndexEntry> for IndexEntryBytes {
    fn from(entry: IndexEntry) -> Self {
        Self {
            id: I64::new(entry.id),
            heap_offset: U64::new(entry.heap_offset),
        }
    }
}

impl From<IndexEntryBytes> for IndexEntry {
    fn from(bytes: IndexEntryBytes) -> Self {
        IndexEntry::new(bytes.id(), bytes.heap_offset())
    }
}
