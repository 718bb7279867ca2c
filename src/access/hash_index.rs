use eyre::Result;
use hashbrown::HashMap;
use tracing::debug;

use super::{AccessKind, AccessMethod};
use crate::relation::Relation;
use crate::storage::{IndexEntry, Row};

/// Builds an id -> offset map from the whole index on every call, then probes
/// it. The map is never cached across calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashIndexScan;

fn build_map(index: &[IndexEntry]) -> HashMap<i64, u64> {
    let mut map = HashMap::with_capacity(index.len());
    map.extend(index.iter().map(|entry| (entry.id, entry.heap_offset)));
    map
}

impl AccessMethod for HashIndexScan {
    fn kind(&self) -> AccessKind {
        AccessKind::HashIndex
    }

    fn lookup(&self, relation: &dyn Relation, id: i64) -> Result<Option<Row>> {
        let map = build_map(relation.index());
        match map.get(&id) {
            Some(&offset) => relation.row(offset).map(Some),
            None => Ok(None),
        }
    }

    fn range(&self, relation: &dyn Relation, min: i64, max: i64) -> Result<Vec<Row>> {
        let map = build_map(relation.index());
        let mut rows = Vec::new();
        if map.is_empty() || min > max {
            return Ok(rows);
        }

        // Ids are 0..n, so probing at most n consecutive ids starting from the
        // first non-negative candidate covers every stored id in range.
        let start = min.max(0);
        let last = max.min(start.saturating_add(map.len() as i64 - 1));
        for id in start..=last {
            if let Some(&offset) = map.get(&id) {
                rows.push(relation.row(offset)?);
            }
        }

        debug!(table = relation.name(), min, max, probes = last - start + 1, rows = rows.len(), "hash range scan");
        Ok(rows)
    }
}
