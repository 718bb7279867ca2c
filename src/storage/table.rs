//! # Table
//!
//! A table binds a name and a schema to a heap file and its position index.
//! It grows only by `insert`; `drop_table` empties it irreversibly.
//!
//! ## Insert Path
//!
//! 1. id = current index length (the insertion counter)
//! 2. encode record header, `_id`, then user fields in schema order
//! 3. append the record to the heap file, remembering the offset
//! 4. append `(id, offset)` to the index file, then to the in-memory index
//!
//! If step 4 fails the heap is cut back to `offset`, so the heap never holds a
//! record the index does not list.
//!
//! Because ids come from the counter, the in-memory index is always sorted
//! by id. Binary search lookups depend on this.
//!
//! ## Files
//!
//! ```text
//! <dir>/<name>.tbd   heap file
//! <dir>/<name>.idx   index file
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use eyre::{ensure, Result, WrapErr};
use tracing::{debug, info, warn};
use zerocopy::IntoBytes;

use super::builder::TableBuilder;
use super::codec::{encode_field, encode_id};
use super::headers::{IndexEntry, RecordHeader};
use super::heap::HeapFile;
use super::index_file::IndexFile;
use super::row::Row;
use crate::config::{HEAP_FILE_EXTENSION, INDEX_FILE_EXTENSION, RECORD_HEADER_SIZE};
use crate::join::{self, JoinResult, JoinStrategy};
use crate::relation::{HeapSlots, Relation};
use crate::schema::Schema;

#[derive(Debug)]
pub struct Table {
    name: String,
    schema: Schema,
    heap: HeapFile,
    index_file: IndexFile,
    index: Vec<IndexEntry>,
}

impl Table {
    pub fn builder(name: impl Into<String>) -> TableBuilder {
        TableBuilder::new(name)
    }

    /// Opens (or creates) table `name` in `directory`, loading its index.
    pub fn open(directory: impl AsRef<Path>, name: &str, schema: Schema) -> Result<Self> {
        Self::builder(name)
            .directory(directory.as_ref())
            .schema(schema)
            .open()
    }

    pub(crate) fn from_parts(name: String, schema: Schema, directory: PathBuf) -> Result<Self> {
        let heap = HeapFile::new(directory.join(format!("{}.{}", name, HEAP_FILE_EXTENSION)));
        let index_file = IndexFile::new(directory.join(format!("{}.{}", name, INDEX_FILE_EXTENSION)));
        let index = index_file
            .load()
            .wrap_err_with(|| format!("failed to load index of table '{}'", name))?;

        info!(table = %name, rows = index.len(), "opened table");

        Ok(Self {
            name,
            schema,
            heap,
            index_file,
            index,
        })
    }

    pub fn heap_path(&self) -> &Path {
        self.heap.path()
    }

    pub fn index_path(&self) -> &Path {
        self.index_file.path()
    }

    /// Size of every record of this table, header included.
    pub fn record_size(&self) -> usize {
        RECORD_HEADER_SIZE + self.schema.size()
    }

    /// Appends a row of user fields (everything but `_id`) and returns its id.
    pub fn insert<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<i64> {
        let expected = self.schema.user_columns().len();
        ensure!(
            fields.len() == expected,
            "table '{}' expects {} fields, got {}",
            self.name,
            expected,
            fields.len()
        );

        let record_size = self.record_size();
        let declared_size = u32::try_from(record_size)
            .map_err(|_| eyre::eyre!("record size {} exceeds u32", record_size))?;

        let id = self.index.len() as i64;
        debug_assert!(self.index.last().map_or(true, |last| last.id < id));

        let mut record = Vec::with_capacity(record_size);
        record.extend_from_slice(RecordHeader::new(&self.name, declared_size).as_bytes());
        encode_id(id, &mut record);
        for (column, field) in self.schema.user_columns().iter().zip(fields) {
            encode_field(column, field.as_ref(), &mut record);
        }
        debug_assert_eq!(record.len(), record_size);

        let offset = self
            .heap
            .append(&record)
            .wrap_err_with(|| format!("failed to insert row {} into '{}'", id, self.name))?;

        let entry = IndexEntry::new(id, offset);
        if let Err(err) = self.index_file.append(entry) {
            // an unindexed record would reuse this id on the next insert
            if let Err(rollback) = self.heap.truncate(offset) {
                warn!(table = %self.name, id, offset, error = %rollback, "failed to roll back heap append");
            }
            return Err(err.wrap_err(format!("failed to index row {} of '{}'", id, self.name)));
        }
        self.index.push(entry);

        debug!(table = %self.name, id, offset, "inserted row");
        Ok(id)
    }

    /// Inserts every row produced by a row source, in order.
    pub fn insert_all<I, R, S>(&mut self, rows: I) -> Result<Vec<i64>>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        rows.into_iter()
            .map(|row| self.insert(row.as_ref()))
            .collect()
    }

    /// Deletes both backing files and empties the in-memory index.
    pub fn drop_table(&mut self) -> Result<()> {
        self.heap.remove()?;
        self.index_file.remove()?;
        let dropped = self.index.len();
        self.index.clear();

        info!(table = %self.name, rows = dropped, "dropped table");
        Ok(())
    }

    /// Joins this table's `column` with `other_column` of `other`.
    pub fn join<'a>(
        &'a self,
        column: &str,
        other: &'a dyn Relation,
        other_column: &str,
        strategy: JoinStrategy,
    ) -> Result<JoinResult<'a>> {
        join::join(self, column, other, other_column, strategy)
    }

    /// Writes up to `limit` rows in index order, one per line.
    pub fn write_rows(&self, out: &mut impl Write, limit: Option<usize>) -> Result<()> {
        for entry in self.index.iter().take(limit.unwrap_or(usize::MAX)) {
            writeln!(out, "{}", self.row(entry.heap_offset)?)?;
        }
        Ok(())
    }

    /// Writes up to `limit` `id offset` index entries, one per line.
    pub fn write_index(&self, out: &mut impl Write, limit: Option<usize>) -> Result<()> {
        for entry in self.index.iter().take(limit.unwrap_or(usize::MAX)) {
            writeln!(out, "{} {}", entry.id, entry.heap_offset)?;
        }
        Ok(())
    }
}

impl Relation for Table {
    fn name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn index(&self) -> &[IndexEntry] {
        &self.index
    }

    fn row(&self, offset: u64) -> Result<Row> {
        self.heap
            .read_record(offset, &self.schema)
            .wrap_err_with(|| format!("failed to read row of '{}' at offset {}", self.name, offset))
    }

    fn scan_heap(&self) -> Result<HeapSlots<'_>> {
        Ok(Box::new(self.heap.scan()?))
    }
}
