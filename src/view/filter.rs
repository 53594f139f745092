//! Lazy selection predicates for sequence views.
//!
//! A filtered sequence view stores its criteria, never a resolved subset.
//! Predicates therefore run against the graph's state at resolve time, and
//! they see elements through the probe types below rather than through raw
//! storage.

use crate::graph::ids::{EdgeId, VertexId};
use crate::graph::storage::{AdjacencyStore, Direction};
use std::sync::Arc;

/// Read-only access to one vertex during predicate evaluation.
///
/// Probes are only ever built for enumerated, in-bounds ids, so their
/// queries cannot fail.
pub struct VertexProbe<'a> {
    pub(crate) store: &'a AdjacencyStore,
    pub(crate) id: VertexId,
}

impl VertexProbe<'_> {
    /// Id of the vertex under test.
    #[inline]
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Degree in the given direction.
    #[inline]
    pub fn degree(&self, dir: Direction) -> usize {
        self.store.degree_unchecked(self.id, dir)
    }

    /// Neighbor ids in the given direction.
    pub fn neighbors(&self, dir: Direction) -> Vec<VertexId> {
        self.store.neighbors_unchecked(self.id, dir)
    }
}

/// Read-only access to one edge during predicate evaluation.
pub struct EdgeProbe<'a> {
    pub(crate) store: &'a AdjacencyStore,
    pub(crate) id: EdgeId,
}

impl EdgeProbe<'_> {
    /// Id of the edge under test.
    #[inline]
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// Source endpoint.
    #[inline]
    pub fn source(&self) -> VertexId {
        self.store.endpoints_unchecked(self.id).0
    }

    /// Target endpoint.
    #[inline]
    pub fn target(&self) -> VertexId {
        self.store.endpoints_unchecked(self.id).1
    }
}

pub(crate) type VertexPredicate = Arc<dyn Fn(&VertexProbe<'_>) -> bool + Send + Sync>;
pub(crate) type EdgePredicate = Arc<dyn Fn(&EdgeProbe<'_>) -> bool + Send + Sync>;
