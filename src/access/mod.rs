//! # Access Methods
//!
//! Four interchangeable ways to answer "the row with id X" and "all rows with
//! id in [min, max]". They read the same relation state and return the same
//! rows; what differs is how they get there and what that costs.
//!
//! | Method | Point lookup | Range lookup | Mechanism |
//! |--------|--------------|--------------|-----------|
//! | `SequentialHeapScan` | O(n) heap reads | O(n), stops past `max` | hops record to record using each header's size, no index |
//! | `SequentialIndexScan` | O(n) entries | O(n), stops past `max` | linear walk of the in-memory index |
//! | `BinarySearchScan` | O(log n) | O(log n + k) | lower bound, then extend while id <= max |
//! | `HashIndexScan` | O(n) build + O(1) probe | O(n) build + O(k) probes | throwaway id -> offset map per call |
//!
//! The hash method rebuilds its map on every call. That cost is part of what
//! it measures; callers wanting a cached map should build one themselves.
//!
//! ## Range Semantics
//!
//! All methods return rows in ascending id order. An empty relation, an
//! inverted range (`min > max`) or a range containing no ids yields an empty
//! vector. A `max` above the highest stored id is clamped to the end of the
//! index.

mod binary_search;
mod hash_index;
mod heap_scan;
mod index_scan;

pub use binary_search::BinarySearchScan;
pub use hash_index::HashIndexScan;
pub use heap_scan::SequentialHeapScan;
pub use index_scan::SequentialIndexScan;

use std::fmt;

use eyre::Result;

use crate::relation::Relation;
use crate::storage::Row;

pub trait AccessMethod {
    fn kind(&self) -> AccessKind;

    /// The row whose id is `id`, if stored.
    fn lookup(&self, relation: &dyn Relation, id: i64) -> Result<Option<Row>>;

    /// Rows with `min <= id <= max`, ascending by id.
    fn range(&self, relation: &dyn Relation, min: i64, max: i64) -> Result<Vec<Row>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessKind {
    SequentialHeap,
    SequentialIndex,
    BinarySearch,
    HashIndex,
}

impl AccessKind {
    pub const ALL: [AccessKind; 4] = [
        AccessKind::SequentialHeap,
        AccessKind::SequentialIndex,
        AccessKind::BinarySearch,
        AccessKind::HashIndex,
    ];

    pub fn method(self) -> &'static dyn AccessMethod {
        match self {
            AccessKind::SequentialHeap => &SequentialHeapScan,
            AccessKind::SequentialIndex => &SequentialIndexScan,
            AccessKind::BinarySearch => &BinarySearchScan,
            AccessKind::HashIndex => &HashIndexScan,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AccessKind::SequentialHeap => "sequential heap scan",
            AccessKind::SequentialIndex => "sequential index scan",
            AccessKind::BinarySearch => "binary search index scan",
            AccessKind::HashIndex => "hash index scan",
        }
    }

    pub fn lookup(self, relation: &dyn Relation, id: i64) -> Result<Option<Row>> {
        self.method().lookup(relation, id)
    }

    pub fn range(self, relation: &dyn Relation, min: i64, max: i64) -> Result<Vec<Row>> {
        self.method().range(relation, min, max)
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_maps_to_its_method() {
        for kind in AccessKind::ALL {
            assert_eq!(kind.method().kind(), kind);
        }
    }
}
