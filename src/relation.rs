//! # Relation Capability
//!
//! `Relation` is the seam between storage and everything that reads it. The
//! access methods and the join engine are written against `&dyn Relation`
//! only, never against `Table`.
//!
//! An implementor supplies the primitives (schema, ordered index, decode by
//! offset, heap walk); id lookup, column projection, single-value lookup and
//! row count are derived from those and rely on the index being sorted by id.
//!
//! ## Lookup Results
//!
//! | Call | Absent id | Unknown column |
//! |------|-----------|----------------|
//! | `row_by_id` | `Ok(None)` | n/a |
//! | `value` | `Ok(None)` | `Ok(Some(""))` for an out-of-range position |
//! | `column` | n/a | `Err` |

use std::fmt;

use eyre::{eyre, Result};

use crate::schema::Schema;
use crate::storage::{HeapSlot, IndexEntry, Row};

/// Selects a column either by name or by zero-based position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRef<'a> {
    Name(&'a str),
    Position(usize),
}

impl<'a> From<&'a str> for ColumnRef<'a> {
    fn from(name: &'a str) -> Self {
        ColumnRef::Name(name)
    }
}

impl From<usize> for ColumnRef<'_> {
    fn from(position: usize) -> Self {
        ColumnRef::Position(position)
    }
}

impl fmt::Display for ColumnRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRef::Name(name) => write!(f, "'{}'", name),
            ColumnRef::Position(pos) => write!(f, "#{}", pos),
        }
    }
}

/// A projected column value paired with the heap offset of its row.
pub type ColumnEntry = (String, u64);

pub type HeapSlots<'a> = Box<dyn Iterator<Item = Result<HeapSlot>> + 'a>;

pub trait Relation {
    fn name(&self) -> &str;

    fn schema(&self) -> &Schema;

    /// The position index, sorted by id.
    fn index(&self) -> &[IndexEntry];

    /// Decodes the record stored at `offset`.
    fn row(&self, offset: u64) -> Result<Row>;

    /// Walks the stored records in file order without using the index.
    fn scan_heap(&self) -> Result<HeapSlots<'_>>;

    fn row_count(&self) -> usize {
        self.index().len()
    }

    /// Index entry for `id`, found by lower-bound binary search.
    fn find_entry(&self, id: i64) -> Option<IndexEntry> {
        let index = self.index();
        let idx = lower_bound(index, id);
        index.get(idx).filter(|entry| entry.id == id).copied()
    }

    fn row_by_id(&self, id: i64) -> Result<Option<Row>> {
        match self.find_entry(id) {
            Some(entry) => self.row(entry.heap_offset).map(Some),
            None => Ok(None),
        }
    }

    /// Resolves a column reference against the schema.
    fn column_position(&self, column: ColumnRef<'_>) -> Result<usize> {
        let schema = self.schema();
        match column {
            ColumnRef::Name(name) => schema
                .position(name)
                .ok_or_else(|| eyre!("column {} not found in relation '{}'", column, self.name())),
            ColumnRef::Position(pos) if pos < schema.column_count() => Ok(pos),
            ColumnRef::Position(_) => Err(eyre!(
                "column {} out of range for relation '{}' with {} columns",
                column,
                self.name(),
                schema.column_count()
            )),
        }
    }

    /// Decodes one column for every row, in index order, paired with the
    /// row's heap offset.
    fn column(&self, column: ColumnRef<'_>) -> Result<Vec<ColumnEntry>> {
        let position = self.column_position(column)?;
        let index = self.index();
        let mut projected = Vec::with_capacity(index.len());

        for entry in index {
            let mut row = self.row(entry.heap_offset)?;
            let value = std::mem::take(&mut row.values[position]);
            projected.push((value, entry.heap_offset));
        }

        Ok(projected)
    }

    /// Field `position` of row `id`. An out-of-range position yields an
    /// empty string.
    fn value(&self, id: i64, position: usize) -> Result<Option<String>> {
        Ok(self
            .row_by_id(id)?
            .map(|row| row.values.into_iter().nth(position).unwrap_or_default()))
    }
}

/// First position in `index` whose id is not less than `id`.
pub fn lower_bound(index: &[IndexEntry], id: i64) -> usize {
    index.partition_point(|entry| entry.id < id)
}
