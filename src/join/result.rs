use std::io::Write;

use eyre::Result;

use crate::config::FIELD_SEPARATOR;
use crate::relation::Relation;
use crate::storage::Row;

/// Physical heap positions of one matching row in each relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JoinPair {
    pub left_offset: u64,
    pub right_offset: u64,
}

impl JoinPair {
    pub fn new(left_offset: u64, right_offset: u64) -> Self {
        Self {
            left_offset,
            right_offset,
        }
    }
}

/// The pairs produced by a join together with the relations they point into.
pub struct JoinResult<'a> {
    left: &'a dyn Relation,
    right: &'a dyn Relation,
    pairs: Vec<JoinPair>,
}

impl<'a> JoinResult<'a> {
    pub(super) fn new(left: &'a dyn Relation, right: &'a dyn Relation, pairs: Vec<JoinPair>) -> Self {
        Self { left, right, pairs }
    }

    pub fn left(&self) -> &'a dyn Relation {
        self.left
    }

    pub fn right(&self) -> &'a dyn Relation {
        self.right
    }

    pub fn pairs(&self) -> &[JoinPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Re-reads both rows of up to `limit` pairs.
    pub fn resolve(&self, limit: Option<usize>) -> Result<Vec<(Row, Row)>> {
        self.pairs
            .iter()
            .take(limit.unwrap_or(usize::MAX))
            .map(|pair| {
                Ok((
                    self.left.row(pair.left_offset)?,
                    self.right.row(pair.right_offset)?,
                ))
            })
            .collect()
    }

    /// Writes up to `limit` joined tuples, one per line: every field of the
    /// left row followed by every field of the right row.
    pub fn write_to(&self, out: &mut impl Write, limit: Option<usize>) -> Result<()> {
        for pair in self.pairs.iter().take(limit.unwrap_or(usize::MAX)) {
            let left = self.left.row(pair.left_offset)?;
            let right = self.right.row(pair.right_offset)?;
            writeln!(out, "{}{}{}", left, FIELD_SEPARATOR, right)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for JoinResult<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JoinResult")
            .field("left", &self.left.name())
            .field("right", &self.right.name())
            .field("pairs", &self.pairs.len())
            .finish()
    }
}
