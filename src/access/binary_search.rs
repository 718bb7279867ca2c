use eyre::Result;
use tracing::debug;

use super::{AccessKind, AccessMethod};
use crate::relation::{lower_bound, Relation};
use crate::storage::Row;

/// Lower-bound search over the id-sorted index.
///
/// Correct only because ids are assigned by the insertion counter, which
/// keeps the index sorted.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinarySearchScan;

impl AccessMethod for BinarySearchScan {
    fn kind(&self) -> AccessKind {
        AccessKind::BinarySearch
    }

    fn lookup(&self, relation: &dyn Relation, id: i64) -> Result<Option<Row>> {
        let index = relation.index();
        match index.get(lower_bound(index, id)) {
            Some(entry) if entry.id == id => relation.row(entry.heap_offset).map(Some),
            _ => Ok(None),
        }
    }

    fn range(&self, relation: &dyn Relation, min: i64, max: i64) -> Result<Vec<Row>> {
        if min > max {
            return Ok(Vec::new());
        }

        let index = relation.index();
        let start = lower_bound(index, min);

        // slicing from `start` bounds the walk at the end of the index
        let rows = index[start..]
            .iter()
            .take_while(|entry| entry.id <= max)
            .map(|entry| relation.row(entry.heap_offset))
            .collect::<Result<Vec<_>>>()?;

        debug!(table = relation.name(), min, max, start, rows = rows.len(), "binary range scan");
        Ok(rows)
    }
}
