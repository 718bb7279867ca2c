//! # Join Algorithm Integration Tests
//!
//! Runs the nested-loop, hash and sort-merge joins over real tables and
//! compares their outputs as sets of `(left id, right id)` pairs.
//!
//! ```sh
//! cargo test --test join_algorithms
//! ```

use std::collections::BTreeSet;

use heapdb::{join, BuildSide, ColumnType, JoinResult, JoinStrategy, Relation, Schema, Table};
use tempfile::TempDir;

fn keyed_table(dir: &TempDir, name: &str, keys: &[&str]) -> Table {
    let schema = Schema::new()
        .with_char("key", 8)
        .with_column("n", ColumnType::Int32);
    let mut table = Table::open(dir.path(), name, schema).expect("Failed to open table");
    for (i, key) in keys.iter().enumerate() {
        table
            .insert(&[key.to_string(), i.to_string()])
            .expect("Failed to insert row");
    }
    table
}

fn id_pairs(result: &JoinResult<'_>) -> Vec<(i64, i64)> {
    result
        .resolve(None)
        .unwrap()
        .iter()
        .map(|(left, right)| (left.id().unwrap(), right.id().unwrap()))
        .collect()
}

fn id_set(result: &JoinResult<'_>) -> BTreeSet<(i64, i64)> {
    id_pairs(result).into_iter().collect()
}

const ALL_STRATEGIES: [JoinStrategy; 4] = [
    JoinStrategy::NestedLoop,
    JoinStrategy::Hash(BuildSide::Left),
    JoinStrategy::Hash(BuildSide::Right),
    JoinStrategy::SortMerge,
];

#[test]
fn example_with_duplicates_on_the_probe_side() {
    let dir = TempDir::new().unwrap();
    let a = keyed_table(&dir, "a", &["x", "y"]);
    let b = keyed_table(&dir, "b", &["y", "y", "z"]);

    let expected = vec![(1, 0), (1, 1)];

    let merge = join(&a, "key", &b, "key", JoinStrategy::SortMerge).unwrap();
    assert_eq!(id_pairs(&merge), expected);

    let nested = join(&a, "key", &b, "key", JoinStrategy::NestedLoop).unwrap();
    assert_eq!(id_pairs(&nested), expected);

    let hash = join(&a, "key", &b, "key", JoinStrategy::HASH).unwrap();
    assert_eq!(id_pairs(&hash), expected);
}

#[test]
fn strategies_agree_on_unique_keys() {
    let dir = TempDir::new().unwrap();
    let left = keyed_table(&dir, "left", &["k3", "k1", "k7", "k5", "k9"]);
    let right = keyed_table(&dir, "right", &["k5", "k2", "k3", "k9", "k4", "k8"]);

    let expected: BTreeSet<(i64, i64)> = [(0, 2), (3, 0), (4, 3)].into_iter().collect();

    for strategy in ALL_STRATEGIES {
        let result = join(&left, "key", &right, "key", strategy).unwrap();
        assert_eq!(id_set(&result), expected, "{:?}", strategy);
        assert_eq!(result.len(), 3, "{:?}", strategy);
    }
}

#[test]
fn duplicates_on_both_sides_produce_the_cross_product() {
    let dir = TempDir::new().unwrap();
    let left = keyed_table(&dir, "left", &["a", "b", "b", "c"]);
    let right = keyed_table(&dir, "right", &["b", "d", "b", "b"]);

    let expected: BTreeSet<(i64, i64)> = [(1, 0), (1, 2), (1, 3), (2, 0), (2, 2), (2, 3)]
        .into_iter()
        .collect();

    let nested = join(&left, "key", &right, "key", JoinStrategy::NestedLoop).unwrap();
    let merge = join(&left, "key", &right, "key", JoinStrategy::SortMerge).unwrap();

    assert_eq!(id_set(&nested), expected);
    assert_eq!(id_set(&merge), expected);
    assert_eq!(nested.len(), 6);
    assert_eq!(merge.len(), 6);
}

#[test]
fn hash_join_keeps_last_build_row_per_key() {
    let dir = TempDir::new().unwrap();
    let left = keyed_table(&dir, "left", &["a", "b", "b"]);
    let right = keyed_table(&dir, "right", &["b"]);

    let result = join(&left, "key", &right, "key", JoinStrategy::HASH).unwrap();

    assert_eq!(id_pairs(&result), vec![(2, 0)]);
}

#[test]
fn hash_join_building_on_the_right_keeps_pair_orientation() {
    let dir = TempDir::new().unwrap();
    let left = keyed_table(&dir, "left", &["x", "y", "y"]);
    let right = keyed_table(&dir, "right", &["y", "z"]);

    let result = join(&left, "key", &right, "key", JoinStrategy::Hash(BuildSide::Right)).unwrap();

    assert_eq!(id_pairs(&result), vec![(1, 0), (2, 0)]);
    for (left_row, right_row) in result.resolve(None).unwrap() {
        assert_eq!(left_row.get(1), Some("y"));
        assert_eq!(right_row.get(1), Some("y"));
    }
}

#[test]
fn joins_on_identity_and_foreign_key_columns() {
    let dir = TempDir::new().unwrap();
    let mut person = Table::open(
        dir.path(),
        "person",
        Schema::new().with_char("name", 10),
    )
    .unwrap();
    person.insert_all([["Alice"], ["Bob"], ["Cara"]]).unwrap();

    let mut worked = Table::open(
        dir.path(),
        "worked",
        Schema::new()
            .with_column("person_id", ColumnType::ForeignKey)
            .with_column("hours", ColumnType::Int32),
    )
    .unwrap();
    worked
        .insert_all([["2", "8"], ["0", "4"], ["2", "6"], ["5", "1"]])
        .unwrap();

    for strategy in [
        JoinStrategy::NestedLoop,
        JoinStrategy::HASH,
        JoinStrategy::SortMerge,
    ] {
        let result = person.join("_id", &worked, "person_id", strategy).unwrap();
        let names: BTreeSet<(String, String)> = result
            .resolve(None)
            .unwrap()
            .into_iter()
            .map(|(p, w)| (p.values[1].clone(), w.values[2].clone()))
            .collect();

        let expected: BTreeSet<(String, String)> = [("Alice", "4"), ("Cara", "8"), ("Cara", "6")]
            .iter()
            .map(|(n, h)| (n.to_string(), h.to_string()))
            .collect();
        assert_eq!(names, expected, "{}", strategy);
    }
}

#[test]
fn sort_merge_matches_numeric_keys_in_string_order() {
    let dir = TempDir::new().unwrap();
    let left = keyed_table(&dir, "left", &["9", "10", "100"]);
    let right = keyed_table(&dir, "right", &["100", "9", "10"]);

    let result = join(&left, "key", &right, "key", JoinStrategy::SortMerge).unwrap();

    assert_eq!(id_pairs(&result), vec![(1, 2), (2, 0), (0, 1)]);
}

#[test]
fn unknown_join_column_fails() {
    let dir = TempDir::new().unwrap();
    let a = keyed_table(&dir, "a", &["x"]);
    let b = keyed_table(&dir, "b", &["x"]);

    for strategy in ALL_STRATEGIES {
        assert!(join(&a, "missing", &b, "key", strategy).is_err());
        let err = join(&a, "key", &b, "missing", strategy).unwrap_err();
        assert!(format!("{:?}", err).contains("missing"));
    }
}

#[test]
fn empty_relations_join_to_nothing() {
    let dir = TempDir::new().unwrap();
    let empty = keyed_table(&dir, "empty", &[]);
    let full = keyed_table(&dir, "full", &["a", "b"]);

    for strategy in ALL_STRATEGIES {
        assert!(join(&empty, "key", &full, "key", strategy).unwrap().is_empty());
        assert!(join(&full, "key", &empty, "key", strategy).unwrap().is_empty());
    }
}

#[test]
fn write_to_prints_left_then_right_fields() {
    let dir = TempDir::new().unwrap();
    let a = keyed_table(&dir, "a", &["x", "y"]);
    let b = keyed_table(&dir, "b", &["y", "y", "z"]);

    let result = join(&a, "key", &b, "key", JoinStrategy::SortMerge).unwrap();

    let mut out = Vec::new();
    result.write_to(&mut out, None).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "1 | y | 1 | 0 | y | 0\n1 | y | 1 | 1 | y | 1\n");

    let mut out = Vec::new();
    result.write_to(&mut out, Some(1)).unwrap();
    assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
}

#[test]
fn join_result_borrows_without_mutating() {
    let dir = TempDir::new().unwrap();
    let a = keyed_table(&dir, "a", &["x", "y"]);
    let b = keyed_table(&dir, "b", &["y"]);

    let before = (a.row_count(), b.row_count());
    let result = join(&a, "key", &b, "key", JoinStrategy::NestedLoop).unwrap();

    assert_eq!(result.left().name(), "a");
    assert_eq!(result.right().name(), "b");
    assert_eq!((a.row_count(), b.row_count()), before);
}
