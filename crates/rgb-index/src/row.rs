//! Row identifiers into the append-only backing store.

use std::fmt;

/// Position of a record in insertion order.
///
/// Row ids are handed out sequentially starting at 0. Records are never
/// removed, so a row id stays valid for the lifetime of the store that
/// issued it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RowId(usize);

impl RowId {
    /// The first row of every store.
    pub const FIRST: RowId = RowId(0);

    /// Create a row id from a raw position.
    #[must_use]
    pub const fn from_raw(row: usize) -> Self {
        Self(row)
    }

    /// Get the raw position.
    #[must_use]
    pub const fn as_raw(self) -> usize {
        self.0
    }

    /// Get the row id assigned after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Debug for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RowId({})", self.0)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row{}", self.0)
    }
}

impl From<RowId> for usize {
    fn from(row: RowId) -> Self {
        row.0
    }
}
