//! # Storage Module
//!
//! The storage engine: record encoding, the append-only heap file, the
//! position index and the `Table` that ties them together.
//!
//! ## File-Per-Table Architecture
//!
//! Each table owns two files in its directory:
//!
//! ```text
//! table_dir/
//! ├── person.tbd    # heap file: [RecordHeader][_id][fields]...
//! ├── person.idx    # index file: [id: i64][heap_offset: u64]...
//! ├── company.tbd
//! └── company.idx
//! ```
//!
//! Both files only grow. There is no in-place update or delete; `drop_table`
//! removes both files at once.
//!
//! ## Offsets
//!
//! A heap offset is the absolute byte position of a record's header. Offsets
//! handed out by `insert` never change, and every read opens the file by path,
//! so offsets remain usable across process restarts.
//!
//! ## Module Organization
//!
//! - `headers`: zerocopy layouts for the record header and index entries
//! - `codec`: fixed-width field encoding and decoding
//! - `heap`: heap file append, positioned reads and the sequential cursor
//! - `index_file`: index file load and append
//! - `row`: decoded row type
//! - `table`: `Table`, the concrete `Relation`
//! - `builder`: `TableBuilder`
//!
//! ## Thread Safety
//!
//! None. A `Table` assumes a single writer and no concurrent readers of its
//! files from other processes.

mod builder;
pub mod codec;
mod headers;
mod heap;
mod index_file;
mod row;
mod table;

pub use builder::TableBuilder;
pub use headers::{IndexEntry, IndexEntryBytes, RecordHeader};
pub use heap::{HeapCursor, HeapFile, HeapSlot};
pub use index_file::IndexFile;
pub use row::Row;
pub use table::Table;
