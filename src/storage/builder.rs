//! # Table Builder
//!
//! Fluent configuration for opening a table.
//!
//! ## Configuration Options
//!
//! | Option    | Default                | Description                          |
//! |-----------|------------------------|--------------------------------------|
//! | directory | `.`                    | Directory holding `.tbd` and `.idx`  |
//! | schema    | identity column only   | Column layout of every record        |
//!
//! ## Usage
//!
//! ```ignore
//! let table = Table::builder("person")
//!     .directory("./data")
//!     .schema(Schema::new().with_char("name", 32))
//!     .open()?;
//! ```
//!
//! The schema is not persisted; callers must open a table with the same
//! schema it was written with.

use std::fs;
use std::path::PathBuf;

use eyre::{ensure, Result, WrapErr};

use super::table::Table;
use crate::config::DEFAULT_TABLE_DIR;
use crate::schema::Schema;

pub struct TableBuilder {
    name: String,
    directory: Option<PathBuf>,
    schema: Option<Schema>,
}

impl TableBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directory: None,
            schema: None,
        }
    }

    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Creates the directory if needed and loads the table's index.
    pub fn open(self) -> Result<Table> {
        ensure!(!self.name.is_empty(), "table name must not be empty");
        ensure!(
            !self.name.contains(['/', '\\']),
            "table name '{}' must not contain path separators",
            self.name
        );

        let directory = self
            .directory
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TABLE_DIR));
        fs::create_dir_all(&directory)
            .wrap_err_with(|| format!("failed to create table directory {:?}", directory))?;

        Table::from_parts(self.name, self.schema.unwrap_or_default(), directory)
    }
}
