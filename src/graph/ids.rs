//! `VertexId` / `EdgeId`: strong, zero-cost indices for graph elements
//!
//! Vertices and edges are addressed by dense indices: a graph with `n`
//! vertices uses exactly `0..n`, and likewise for edges. Deleting elements
//! compacts the survivors, so an index held across a structural mutation may
//! now name a different element or nothing at all. That is why raw indices
//! never cross the view boundary unvalidated; see
//! [`crate::view`] for the staleness check.
//!
//! This module provides:
//! - Transparent newtypes around `usize` so vertex and edge indices cannot be
//!   confused with each other.
//! - Implementations of common traits (`Debug`, `Display`, ordering, hashing,
//!   serde) so ids can be used in maps, sets, and printed easily.

use std::fmt;

/// Index of a vertex. Dense: always `< ` the graph's current vertex count.
///
/// # Memory layout
/// `repr(transparent)`, so it has the same ABI and alignment as `usize`.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct VertexId(usize);

impl VertexId {
    /// Wraps a raw index. No range check happens here; the graph validates
    /// indices at the point they are used.
    #[inline]
    pub const fn new(raw: usize) -> Self {
        VertexId(raw)
    }

    /// Returns the inner index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VertexId").field(&self.0).finish()
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for VertexId {
    #[inline]
    fn from(raw: usize) -> Self {
        VertexId(raw)
    }
}

/// Index of an edge. Dense: always `<` the graph's current edge count.
///
/// Same layout guarantees as [`VertexId`].
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct EdgeId(usize);

impl EdgeId {
    /// Wraps a raw index.
    #[inline]
    pub const fn new(raw: usize) -> Self {
        EdgeId(raw)
    }

    /// Returns the inner index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EdgeId").field(&self.0).finish()
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for EdgeId {
    #[inline]
    fn from(raw: usize) -> Self {
        EdgeId(raw)
    }
}

#[cfg(test)]
mod layout_tests {
    //! Compile-time assertion that the id newtypes cost nothing over `usize`.
    use super::*;
    use static_assertions::assert_eq_size;

    assert_eq_size!(VertexId, usize);
    assert_eq_size!(EdgeId, usize);
}
