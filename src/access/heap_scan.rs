use eyre::Result;
use tracing::debug;

use super::{AccessKind, AccessMethod};
use crate::relation::Relation;
use crate::storage::Row;

/// Walks the heap file itself, never touching the index.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialHeapScan;

impl AccessMethod for SequentialHeapScan {
    fn kind(&self) -> AccessKind {
        AccessKind::SequentialHeap
    }

    fn lookup(&self, relation: &dyn Relation, id: i64) -> Result<Option<Row>> {
        let mut visited = 0usize;
        for slot in relation.scan_heap()? {
            let slot = slot?;
            visited += 1;
            if slot.id == id {
                debug!(table = relation.name(), id, visited, "heap scan hit");
                return relation.row(slot.offset).map(Some);
            }
        }

        debug!(table = relation.name(), id, visited, "heap scan miss");
        Ok(None)
    }

    fn range(&self, relation: &dyn Relation, min: i64, max: i64) -> Result<Vec<Row>> {
        let mut rows = Vec::new();
        if min > max {
            return Ok(rows);
        }

        for slot in relation.scan_heap()? {
            let slot = slot?;
            // heap order is id order
            if slot.id > max {
                break;
            }
            if slot.id >= min {
                rows.push(relation.row(slot.offset)?);
            }
        }

        debug!(table = relation.name(), min, max, rows = rows.len(), "heap range scan");
        Ok(rows)
    }
}
