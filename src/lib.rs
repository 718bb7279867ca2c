//! # heapdb - Heap Tables, Access Methods and Joins
//!
//! heapdb stores fixed-schema relations as append-only binary heap files with
//! a sibling position index, answers id lookups through four comparable
//! access methods, and joins relations with nested-loop, hash and sort-merge
//! algorithms.
//!
//! ## Quick Start
//!
//! ```ignore
//! use heapdb::{AccessKind, ColumnType, JoinStrategy, Relation, Schema, Table};
//!
//! let schema = Schema::new()
//!     .with_char("name", 10)
//!     .with_column("age", ColumnType::Int32);
//!
//! let mut person = Table::open("./data", "person", schema)?;
//! person.insert(&["Alice", "30"])?;
//! person.insert(&["Bob", "25"])?;
//!
//! let bob = person.row_by_id(1)?;
//! let first_two = AccessKind::BinarySearch.range(&person, 0, 1)?;
//!
//! let result = person.join("_id", &worked, "person_id", JoinStrategy::SortMerge)?;
//! result.write_to(&mut std::io::stdout(), Some(20))?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Join Engine    │  Access Methods  │
//! ├─────────────────────────────────────┤
//! │      Relation trait (capability)     │
//! ├─────────────────────────────────────┤
//! │  Table: heap file + position index   │
//! ├─────────────────────────────────────┤
//! │      Field codec │ Record header     │
//! ├─────────────────────────────────────┤
//! │               Schema                 │
//! └─────────────────────────────────────┘
//! ```
//!
//! The join engine and the access methods only see `&dyn Relation`; `Table`
//! is the one implementor.
//!
//! ## Module Overview
//!
//! - [`schema`]: column types, widths and name lookup
//! - [`storage`]: record codec, heap and index files, `Table`
//! - [`relation`]: the `Relation` trait
//! - [`access`]: sequential heap, sequential index, binary search and hash
//!   lookups
//! - [`join`]: nested-loop, hash and sort-merge joins
//! - [`config`]: layout constants
//!
//! ## Concurrency
//!
//! Single-threaded and synchronous. No transactions, no write-ahead log, no
//! crash recovery.

#[macro_use]
mod macros;

pub mod access;
pub mod config;
pub mod join;
pub mod relation;
pub mod schema;
pub mod storage;

pub use access::{AccessKind, AccessMethod};
pub use join::{join, BuildSide, JoinPair, JoinResult, JoinStrategy};
pub use relation::{ColumnRef, Relation};
pub use schema::{ColumnType, Schema, SchemaColumn};
pub use storage::{IndexEntry, Row, Table, TableBuilder};
