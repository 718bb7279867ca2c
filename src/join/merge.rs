use eyre::Result;

use super::JoinPair;
use crate::relation::{ColumnEntry, Relation};

/// Projects and sorts both join columns, then merges them with two cursors,
/// emitting the cross product of each pair of equal-key groups.
pub(super) fn join(
    left: &dyn Relation,
    left_position: usize,
    right: &dyn Relation,
    right_position: usize,
) -> Result<Vec<JoinPair>> {
    let mut a = left.column(left_position.into())?;
    let mut b = right.column(right_position.into())?;

    a.sort_by(|x, y| x.0.cmp(&y.0));
    b.sort_by(|x, y| x.0.cmp(&y.0));

    Ok(merge_sorted(&a, &b))
}

fn merge_sorted(a: &[ColumnEntry], b: &[ColumnEntry]) -> Vec<JoinPair> {
    let mut pairs = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        let key = &a[i].0;
        match key.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                let a_end = i + a[i..].iter().take_while(|(v, _)| v == key).count();
                let b_end = j + b[j..].iter().take_while(|(v, _)| v == key).count();

                for (_, left_offset) in &a[i..a_end] {
                    for (_, right_offset) in &b[j..b_end] {
                        pairs.push(JoinPair::new(*left_offset, *right_offset));
                    }
                }

                i = a_end;
                j = b_end;
            }
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(values: &[&str]) -> Vec<ColumnEntry> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (v.to_string(), i as u64))
            .collect()
    }

    fn offsets(pairs: &[JoinPair]) -> Vec<(u64, u64)> {
        pairs.iter().map(|p| (p.left_offset, p.right_offset)).collect()
    }

    #[test]
    fn merge_emits_cross_product_of_groups() {
        let a = column(&["a", "b", "b", "c"]);
        let b = column(&["b", "b", "b", "d"]);

        let pairs = merge_sorted(&a, &b);

        assert_eq!(
            offsets(&pairs),
            vec![(1, 0), (1, 1), (1, 2), (2, 0), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn merge_with_no_common_keys_is_empty() {
        assert!(merge_sorted(&column(&["a", "c"]), &column(&["b", "d"])).is_empty());
        assert!(merge_sorted(&[], &column(&["b"])).is_empty());
    }

    #[test]
    fn merge_handles_groups_at_the_end() {
        let pairs = merge_sorted(&column(&["a", "z", "z"]), &column(&["z"]));

        assert_eq!(offsets(&pairs), vec![(1, 0), (2, 0)]);
    }

    #[test]
    fn string_order_puts_ten_before_nine() {
        let mut values = column(&["9", "10", "2"]);
        values.sort_by(|x, y| x.0.cmp(&y.0));

        let keys: Vec<&str> = values.iter().map(|(v, _)| v.as_str()).collect();
        assert_eq!(keys, vec!["10", "2", "9"]);
    }
}
