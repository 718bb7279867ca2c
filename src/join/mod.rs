//! # Join Engine
//!
//! Equi-joins two relations on one column each, producing pairs of heap
//! offsets `(left_offset, right_offset)`. Join values are compared as the
//! decoded text of the column, so `"10"` and `"10"` match regardless of the
//! column types on either side.
//!
//! ## Algorithms
//!
//! | Strategy | Cost | Duplicate keys | Output order |
//! |----------|------|----------------|--------------|
//! | `NestedLoop` | O(n·m) row decodes | full cross product | left index order, then right index order |
//! | `Hash` | O(n + m) lookups | build side must be unique | probe index order |
//! | `SortMerge` | O(n log n + m log m) | full cross product per group | ascending join value (byte order) |
//!
//! ## Hash Join Precondition
//!
//! The build map keeps one offset per key and later rows overwrite earlier
//! ones. With duplicate keys on the build side the hash join silently loses
//! matches, so it agrees with the other two strategies only when the build
//! side's join column is unique. Duplicates are detected and reported with a
//! `warn` event; the result is still produced.
//!
//! ## Sort Order
//!
//! Sort-merge sorts join values as strings. Numeric keys therefore sort as
//! `"10" < "9"`. Both sides use the same order, so matching is unaffected.
//!
//! ## Lifetimes
//!
//! A `JoinResult<'a>` borrows both relations. It never owns or mutates them,
//! and resolving or printing it re-reads rows by offset.

mod hash;
mod merge;
mod nested_loop;
mod result;

pub use result::{JoinPair, JoinResult};

use std::fmt;

use eyre::{Result, WrapErr};
use tracing::debug;

use crate::relation::{ColumnRef, Relation};

/// Which relation populates the hash join's lookup map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuildSide {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinStrategy {
    NestedLoop,
    Hash(BuildSide),
    SortMerge,
}

impl JoinStrategy {
    /// Hash join building on the left relation.
    pub const HASH: JoinStrategy = JoinStrategy::Hash(BuildSide::Left);

    pub fn name(&self) -> &'static str {
        match self {
            JoinStrategy::NestedLoop => "nested loop",
            JoinStrategy::Hash(_) => "hash",
            JoinStrategy::SortMerge => "sort merge",
        }
    }
}

impl fmt::Display for JoinStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Joins `left.left_column = right.right_column` with the given strategy.
///
/// Fails before reading any rows if either column does not exist.
pub fn join<'a>(
    left: &'a dyn Relation,
    left_column: &str,
    right: &'a dyn Relation,
    right_column: &str,
    strategy: JoinStrategy,
) -> Result<JoinResult<'a>> {
    let left_position = left
        .column_position(ColumnRef::Name(left_column))
        .wrap_err("cannot resolve left join column")?;
    let right_position = right
        .column_position(ColumnRef::Name(right_column))
        .wrap_err("cannot resolve right join column")?;

    let pairs = match strategy {
        JoinStrategy::NestedLoop => {
            nested_loop::join(left, left_position, right, right_position)?
        }
        JoinStrategy::Hash(side) => hash::join(left, left_position, right, right_position, side)?,
        JoinStrategy::SortMerge => merge::join(left, left_position, right, right_position)?,
    };

    debug!(
        left = left.name(),
        right = right.name(),
        %strategy,
        pairs = pairs.len(),
        "join finished"
    );

    Ok(JoinResult::new(left, right, pairs))
}
