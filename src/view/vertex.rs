//! Vertex views: single-element proxy and sequence variant.

use super::ViewAnchor;
use super::filter::{VertexPredicate, VertexProbe};
use crate::graph::ids::VertexId;
use crate::graph::storage::Direction;
use crate::lease_error::GraphLeaseError;
use std::fmt;
use std::sync::Arc;

/// Non-owning proxy for a single vertex.
///
/// Created from [`crate::graph::handle::GraphHandle::vertex`] or by
/// iterating a [`VertexSeqView`]. Holding one never keeps the graph alive.
#[derive(Clone)]
pub struct VertexView {
    anchor: Arc<ViewAnchor>,
    target: VertexId,
}

impl VertexView {
    pub(crate) fn new(anchor: Arc<ViewAnchor>, target: VertexId) -> Self {
        Self { anchor, target }
    }

    /// Validates the view and returns the vertex id it denotes.
    pub fn resolve(&self) -> Result<VertexId, GraphLeaseError> {
        self.anchor.with_store(|store| {
            store.check_vertex(self.target)?;
            Ok(self.target)
        })
    }

    /// Degree of the vertex in the given direction.
    pub fn degree(&self, dir: Direction) -> Result<usize, GraphLeaseError> {
        self.anchor
            .with_store(|store| store.degree(self.target, dir))
    }

    /// Neighbor ids in the given direction.
    pub fn neighbors(&self, dir: Direction) -> Result<Vec<VertexId>, GraphLeaseError> {
        self.anchor
            .with_store(|store| store.neighbors(self.target, dir))
    }
}

impl fmt::Debug for VertexView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VertexView")
            .field("target", &self.target)
            .field("observed", &self.anchor.observed.load())
            .finish()
    }
}

/// Non-owning view over a set of vertices, selected by lazily stored
/// criteria.
///
/// The unfiltered view from [`crate::graph::handle::GraphHandle::vertices`]
/// denotes every vertex. [`VertexSeqView::filter`] narrows the selection
/// without resolving it; predicates run each time the view resolves.
#[derive(Clone)]
pub struct VertexSeqView {
    anchor: Arc<ViewAnchor>,
    filters: Vec<VertexPredicate>,
}

impl VertexSeqView {
    pub(crate) fn from_anchor(anchor: Arc<ViewAnchor>) -> Self {
        Self {
            anchor,
            filters: Vec::new(),
        }
    }

    /// Validates the view and returns the selected vertex ids, ascending.
    pub fn resolve(&self) -> Result<Vec<VertexId>, GraphLeaseError> {
        self.anchor.with_store(|store| {
            Ok((0..store.vertex_count())
                .map(VertexId::new)
                .filter(|&id| {
                    let probe = VertexProbe { store, id };
                    self.filters.iter().all(|pred| pred(&probe))
                })
                .collect())
        })
    }

    /// Number of selected vertices.
    pub fn count(&self) -> Result<usize, GraphLeaseError> {
        self.resolve().map(|ids| ids.len())
    }

    /// Narrows the selection with `pred`, producing a new, independently
    /// validated view. The predicate is stored, not applied; the child
    /// observes the same generation as this view and registers on its own.
    pub fn filter(
        &self,
        pred: impl Fn(&VertexProbe<'_>) -> bool + Send + Sync + 'static,
    ) -> VertexSeqView {
        let mut filters = self.filters.clone();
        filters.push(Arc::new(pred));
        VertexSeqView {
            anchor: self.anchor.derive(),
            filters,
        }
    }

    /// Resolves the view and iterates the selection as single-vertex views.
    ///
    /// Resolution happens here, once; the returned iterator is finite and
    /// cheap. Calling `iter` again re-resolves against current graph state.
    pub fn iter(&self) -> Result<VertexSeqIter, GraphLeaseError> {
        let ids = self.resolve()?;
        Ok(VertexSeqIter {
            anchor: self.anchor.clone(),
            ids: ids.into_iter(),
        })
    }
}

impl fmt::Debug for VertexSeqView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VertexSeqView")
            .field("filters", &self.filters.len())
            .field("observed", &self.anchor.observed.load())
            .finish()
    }
}

/// Iterator over a resolved vertex selection. Yielded views share the
/// sequence's anchor and go stale with it.
pub struct VertexSeqIter {
    anchor: Arc<ViewAnchor>,
    ids: std::vec::IntoIter<VertexId>,
}

impl Iterator for VertexSeqIter {
    type Item = VertexView;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.ids.next()?;
        Some(VertexView::new(self.anchor.clone(), id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl ExactSizeIterator for VertexSeqIter {}
