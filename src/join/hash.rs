use eyre::{eyre, Result};
use hashbrown::HashMap;
use tracing::warn;

use super::{BuildSide, JoinPair};
use crate::relation::Relation;

/// Builds value -> offset from one side, probes it with the other.
///
/// Duplicate build keys overwrite (last write wins); see the module docs.
pub(super) fn join(
    left: &dyn Relation,
    left_position: usize,
    right: &dyn Relation,
    right_position: usize,
    side: BuildSide,
) -> Result<Vec<JoinPair>> {
    let (build, build_position, probe, probe_position) = match side {
        BuildSide::Left => (left, left_position, right, right_position),
        BuildSide::Right => (right, right_position, left, left_position),
    };

    let mut table: HashMap<String, u64> = HashMap::with_capacity(build.row_count());
    let mut duplicates = 0usize;

    for entry in build.index() {
        let value = lookup_value(build, entry.id, build_position)?;
        if table.insert(value, entry.heap_offset).is_some() {
            duplicates += 1;
        }
    }

    if duplicates > 0 {
        warn!(
            build = build.name(),
            duplicates,
            "hash join build side has duplicate keys, matches will be lost"
        );
    }

    let mut pairs = Vec::new();
    for entry in probe.index() {
        let value = lookup_value(probe, entry.id, probe_position)?;
        if let Some(&build_offset) = table.get(&value) {
            pairs.push(match side {
                BuildSide::Left => JoinPair::new(build_offset, entry.heap_offset),
                BuildSide::Right => JoinPair::new(entry.heap_offset, build_offset),
            });
        }
    }

    Ok(pairs)
}

fn lookup_value(relation: &dyn Relation, id: i64, position: usize) -> Result<String> {
    relation
        .value(id, position)?
        .ok_or_else(|| eyre!("index of '{}' lists id {} but the row is missing", relation.name(), id))
}
