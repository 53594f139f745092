//! Edge views: single-element proxy and sequence variant.

use super::ViewAnchor;
use super::filter::{EdgePredicate, EdgeProbe};
use crate::graph::ids::{EdgeId, VertexId};
use crate::lease_error::GraphLeaseError;
use std::fmt;
use std::sync::Arc;

/// Non-owning proxy for a single edge.
#[derive(Clone)]
pub struct EdgeView {
    anchor: Arc<ViewAnchor>,
    target: EdgeId,
}

impl EdgeView {
    pub(crate) fn new(anchor: Arc<ViewAnchor>, target: EdgeId) -> Self {
        Self { anchor, target }
    }

    /// Validates the view and returns the edge id it denotes.
    pub fn resolve(&self) -> Result<EdgeId, GraphLeaseError> {
        self.anchor.with_store(|store| {
            store.check_edge(self.target)?;
            Ok(self.target)
        })
    }

    /// Endpoints `(source, target)` of the edge.
    pub fn endpoints(&self) -> Result<(VertexId, VertexId), GraphLeaseError> {
        self.anchor.with_store(|store| store.endpoints(self.target))
    }

    /// Source endpoint.
    pub fn source(&self) -> Result<VertexId, GraphLeaseError> {
        self.endpoints().map(|(source, _)| source)
    }

    /// Target endpoint.
    pub fn target(&self) -> Result<VertexId, GraphLeaseError> {
        self.endpoints().map(|(_, target)| target)
    }
}

impl fmt::Debug for EdgeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeView")
            .field("target", &self.target)
            .field("observed", &self.anchor.observed.load())
            .finish()
    }
}

/// Non-owning view over a set of edges, selected by lazily stored criteria.
#[derive(Clone)]
pub struct EdgeSeqView {
    anchor: Arc<ViewAnchor>,
    filters: Vec<EdgePredicate>,
}

impl EdgeSeqView {
    pub(crate) fn from_anchor(anchor: Arc<ViewAnchor>) -> Self {
        Self {
            anchor,
            filters: Vec::new(),
        }
    }

    /// Validates the view and returns the selected edge ids, ascending.
    pub fn resolve(&self) -> Result<Vec<EdgeId>, GraphLeaseError> {
        self.anchor.with_store(|store| {
            Ok((0..store.edge_count())
                .map(EdgeId::new)
                .filter(|&id| {
                    let probe = EdgeProbe { store, id };
                    self.filters.iter().all(|pred| pred(&probe))
                })
                .collect())
        })
    }

    /// Number of selected edges.
    pub fn count(&self) -> Result<usize, GraphLeaseError> {
        self.resolve().map(|ids| ids.len())
    }

    /// Narrows the selection with `pred`; same laziness and generation
    /// semantics as [`crate::view::vertex::VertexSeqView::filter`].
    pub fn filter(
        &self,
        pred: impl Fn(&EdgeProbe<'_>) -> bool + Send + Sync + 'static,
    ) -> EdgeSeqView {
        let mut filters = self.filters.clone();
        filters.push(Arc::new(pred));
        EdgeSeqView {
            anchor: self.anchor.derive(),
            filters,
        }
    }

    /// Resolves the view and iterates the selection as single-edge views.
    /// Re-iterating re-resolves.
    pub fn iter(&self) -> Result<EdgeSeqIter, GraphLeaseError> {
        let ids = self.resolve()?;
        Ok(EdgeSeqIter {
            anchor: self.anchor.clone(),
            ids: ids.into_iter(),
        })
    }
}

impl fmt::Debug for EdgeSeqView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeSeqView")
            .field("filters", &self.filters.len())
            .field("observed", &self.anchor.observed.load())
            .finish()
    }
}

/// Iterator over a resolved edge selection. Yielded views share the
/// sequence's anchor and go stale with it.
pub struct EdgeSeqIter {
    anchor: Arc<ViewAnchor>,
    ids: std::vec::IntoIter<EdgeId>,
}

impl Iterator for EdgeSeqIter {
    type Item = EdgeView;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.ids.next()?;
        Some(EdgeView::new(self.anchor.clone(), id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl ExactSizeIterator for EdgeSeqIter {}
