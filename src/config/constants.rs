//! # heapdb Configuration Constants
//!
//! Interdependent layout values are grouped together so a change to one is
//! visible next to the values derived from it.
//!
//! ## Dependency Graph
//!
//! ```text
//! TABLE_NAME_SIZE (255)  ─┐
//! RECORD_SIZE_WIDTH (4)  ─┼─> RECORD_HEADER_SIZE (267)
//! TIMESTAMP_WIDTH (8)    ─┘         │
//!                                   └─> every heap record starts with this many bytes
//!
//! ID_WIDTH (8)           ─┐
//! OFFSET_WIDTH (8)       ─┴─> INDEX_ENTRY_SIZE (16)
//! ```
//!
//! ## Critical Invariants
//!
//! 1. `RECORD_HEADER_SIZE == TABLE_NAME_SIZE + RECORD_SIZE_WIDTH + TIMESTAMP_WIDTH`
//! 2. `INDEX_ENTRY_SIZE == ID_WIDTH + OFFSET_WIDTH`
//!
//! Both are also asserted against `size_of` of the zerocopy structs in
//! `storage::headers`, so the heap and index files stay seek-compatible with
//! files written by earlier builds.

// ============================================================================
// HEAP RECORD LAYOUT
// ============================================================================

/// Fixed width of the table-name tag at the start of each record header.
pub const TABLE_NAME_SIZE: usize = 255;

/// Width of the `record_size` field in the record header.
pub const RECORD_SIZE_WIDTH: usize = 4;

/// Width of the creation timestamp (seconds since the Unix epoch, i64).
pub const TIMESTAMP_WIDTH: usize = 8;

/// Total record header size. Readers skip exactly this many bytes.
pub const RECORD_HEADER_SIZE: usize = TABLE_NAME_SIZE + RECORD_SIZE_WIDTH + TIMESTAMP_WIDTH;

const _: () = assert!(RECORD_HEADER_SIZE == 267);

// ============================================================================
// INDEX FILE LAYOUT
// ============================================================================

pub const ID_WIDTH: usize = 8;
pub const OFFSET_WIDTH: usize = 8;

/// One `(id, heap_offset)` pair in the index file.
pub const INDEX_ENTRY_SIZE: usize = ID_WIDTH + OFFSET_WIDTH;

// ============================================================================
// NAMING
// ============================================================================

/// Name of the implicit identity column every schema starts with.
pub const ID_COLUMN_NAME: &str = "_id";

pub const HEAP_FILE_EXTENSION: &str = "tbd";
pub const INDEX_FILE_EXTENSION: &str = "idx";

/// Directory used by `TableBuilder` when none is configured.
pub const DEFAULT_TABLE_DIR: &str = ".";

/// Separator used when rows are written as text.
pub const FIELD_SEPARATOR: &str = " | ";
