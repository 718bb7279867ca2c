//! # Schema Definition
//!
//! A `Schema` is the ordered list of columns of a table. Insertion order is
//! on-disk field order. Every schema starts with the implicit identity column
//! `_id` (Int64), which `Table::insert` fills with the assigned row id.
//!
//! ## Schema Internals
//!
//! - `columns`: column definitions, identity column first
//! - `record_size`: sum of all column widths, kept up to date as columns are
//!   added so `size()` never recomputes

mod column;

pub use column::{ColumnType, SchemaColumn};

use crate::config::ID_COLUMN_NAME;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<SchemaColumn>,
    record_size: usize,
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema {
    /// Creates a schema holding only the identity column.
    pub fn new() -> Self {
        let id = SchemaColumn::new(ID_COLUMN_NAME, ColumnType::Int64);
        let record_size = id.size();
        Self {
            columns: vec![id],
            record_size,
        }
    }

    /// Builds a schema from `(name, type, array_size)` triples, the shape
    /// produced by schema-description readers.
    pub fn from_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = (S, ColumnType, u32)>,
        S: Into<String>,
    {
        let mut schema = Self::new();
        for (name, column_type, array_size) in columns {
            schema.add_column(name, column_type, array_size);
        }
        schema
    }

    pub fn add_column(&mut self, name: impl Into<String>, column_type: ColumnType, array_size: u32) {
        let column = SchemaColumn::with_array_size(name, column_type, array_size);
        self.record_size += column.size();
        self.columns.push(column);
    }

    pub fn with_column(mut self, name: impl Into<String>, column_type: ColumnType) -> Self {
        self.add_column(name, column_type, 0);
        self
    }

    pub fn with_char(mut self, name: impl Into<String>, max_len: u32) -> Self {
        self.add_column(name, ColumnType::Char, max_len);
        self
    }

    pub fn columns(&self) -> &[SchemaColumn] {
        &self.columns
    }

    /// Columns supplied by callers on insert (everything after `_id`).
    pub fn user_columns(&self) -> &[SchemaColumn] {
        &self.columns[1..]
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, name: &str) -> Option<&SchemaColumn> {
        self.position(name).map(|pos| &self.columns[pos])
    }

    /// Zero-based position of the named column.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|col| col.name == name)
    }

    /// Encoded size of one record's fields, excluding the record header.
    pub fn size(&self) -> usize {
        self.record_size
    }
}
