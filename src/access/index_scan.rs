use eyre::Result;
use tracing::debug;

use super::{AccessKind, AccessMethod};
use crate::relation::Relation;
use crate::storage::Row;

/// Linear walk over the in-memory index.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialIndexScan;

impl AccessMethod for SequentialIndexScan {
    fn kind(&self) -> AccessKind {
        AccessKind::SequentialIndex
    }

    fn lookup(&self, relation: &dyn Relation, id: i64) -> Result<Option<Row>> {
        match relation.index().iter().find(|entry| entry.id == id) {
            Some(entry) => relation.row(entry.heap_offset).map(Some),
            None => Ok(None),
        }
    }

    fn range(&self, relation: &dyn Relation, min: i64, max: i64) -> Result<Vec<Row>> {
        let mut rows = Vec::new();
        if min > max {
            return Ok(rows);
        }

        for entry in relation.index() {
            if entry.id > max {
                break;
            }
            if entry.id >= min {
                rows.push(relation.row(entry.heap_offset)?);
            }
        }

        debug!(table = relation.name(), min, max, rows = rows.len(), "index range scan");
        Ok(rows)
    }
}
