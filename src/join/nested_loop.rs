use eyre::Result;

use super::JoinPair;
use crate::relation::Relation;

/// Decodes every right row once per left row and compares the join fields.
pub(super) fn join(
    left: &dyn Relation,
    left_position: usize,
    right: &dyn Relation,
    right_position: usize,
) -> Result<Vec<JoinPair>> {
    let mut pairs = Vec::new();

    for left_entry in left.index() {
        let left_row = left.row(left_entry.heap_offset)?;

        for right_entry in right.index() {
            let right_row = right.row(right_entry.heap_offset)?;

            if left_row.values[left_position] == right_row.values[right_position] {
                pairs.push(JoinPair::new(left_entry.heap_offset, right_entry.heap_offset));
            }
        }
    }

    Ok(pairs)
}
