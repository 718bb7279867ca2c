use std::fmt;

use eyre::{bail, Result};

use crate::config::FIELD_SEPARATOR;

/// A decoded record: one text value per schema column, `_id` first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    pub values: Vec<String>,
}

impl Row {
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    /// The identity column parsed back to an integer.
    pub fn id(&self) -> Result<i64> {
        match self.get(0) {
            Some(text) => Ok(text.parse()?),
            None => bail!("row has no identity column"),
        }
    }

    pub fn get_int(&self, index: usize) -> Result<i64> {
        match self.get(index) {
            Some(text) => text
                .parse()
                .map_err(|_| eyre::eyre!("expected integer, got {:?}", text)),
            None => bail!("column {} out of bounds", index),
        }
    }

    pub fn get_float(&self, index: usize) -> Result<f64> {
        match self.get(index) {
            Some(text) => text
                .parse()
                .map_err(|_| eyre::eyre!("expected float, got {:?}", text)),
            None => bail!("column {} out of bounds", index),
        }
    }

    pub fn column_count(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.values.join(FIELD_SEPARATOR))
    }
}

impl From<Vec<String>> for Row {
    fn from(values: Vec<String>) -> Self {
        Self::new(values)
    }
}
