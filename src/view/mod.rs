//! Non-owning views over graph elements.
//!
//! Four variants share one validation path: [`vertex::VertexView`] and
//! [`edge::EdgeView`] identify a single element, [`vertex::VertexSeqView`]
//! and [`edge::EdgeSeqView`] identify a set of elements through lazily
//! stored criteria. Every variant holds a [`ViewAnchor`]: a weak
//! back-reference to the graph core plus the generation observed when the
//! view was created. Resolution revalidates the anchor before any storage
//! access, so a view can go stale but can never dangle.
//!
//! Views are read-only. All structural mutation goes through
//! [`crate::graph::handle::GraphHandle`].

pub mod edge;
pub mod filter;
pub mod vertex;

use crate::graph::generation::{Generation, GenerationCell};
use crate::graph::handle::{GraphCore, LifecycleState};
use crate::graph::storage::AdjacencyStore;
use crate::lease_error::GraphLeaseError;
use crate::registry::ViewId;
use std::sync::{Arc, Weak};

/// Shared state behind every view: the weak graph reference and the
/// generation cell the registry writes the sentinel into.
///
/// Element views produced by iterating a sequence view share the sequence's
/// anchor; the registry tracks anchors, and the shared cell means one
/// invalidation sweep covers every view derived from it.
pub(crate) struct ViewAnchor {
    pub(crate) graph: Weak<GraphCore>,
    pub(crate) observed: GenerationCell,
    pub(crate) id: ViewId,
}

impl ViewAnchor {
    /// Creates an anchor registered with the graph's view registry.
    pub(crate) fn attach(core: &Arc<GraphCore>, observed: Generation) -> Arc<ViewAnchor> {
        let id = core.registry.allocate();
        let anchor = Arc::new(ViewAnchor {
            graph: Arc::downgrade(core),
            observed: GenerationCell::new(observed),
            id,
        });
        core.registry.register(id, Arc::downgrade(&anchor));
        anchor
    }

    /// Creates an unregistered anchor. Used when deriving a view from one
    /// whose graph is already finalizing or gone; such a child can only ever
    /// resolve to a staleness error, so there is nothing to invalidate.
    pub(crate) fn detached(graph: Weak<GraphCore>, observed: Generation) -> Arc<ViewAnchor> {
        Arc::new(ViewAnchor {
            graph,
            observed: GenerationCell::new(observed),
            id: ViewId::DETACHED,
        })
    }

    /// Derives a sibling anchor observing the same generation as `self`.
    /// Registered only while the graph is still live.
    pub(crate) fn derive(&self) -> Arc<ViewAnchor> {
        let observed = self.observed.load();
        match self.graph.upgrade() {
            Some(core) if core.lifecycle() == LifecycleState::Live => {
                ViewAnchor::attach(&core, observed)
            }
            _ => ViewAnchor::detached(self.graph.clone(), observed),
        }
    }

    /// Validates the anchor and runs `f` against current storage.
    ///
    /// The read lock is taken before the generation comparison, so the
    /// storage seen by `f` is the storage the matching generation describes.
    pub(crate) fn with_store<T>(
        &self,
        f: impl FnOnce(&AdjacencyStore) -> Result<T, GraphLeaseError>,
    ) -> Result<T, GraphLeaseError> {
        let observed = self.observed.load();
        let Some(core) = self.graph.upgrade() else {
            return Err(GraphLeaseError::StaleReference {
                observed,
                current: Generation::SENTINEL,
            });
        };
        let guard = core.storage.read();
        let Some(store) = guard.as_ref() else {
            return Err(GraphLeaseError::StaleReference {
                observed,
                current: Generation::SENTINEL,
            });
        };
        let current = core.generation.load();
        if observed != current {
            return Err(GraphLeaseError::StaleReference { observed, current });
        }
        f(store)
    }
}

impl Drop for ViewAnchor {
    fn drop(&mut self) {
        if let Some(core) = self.graph.upgrade() {
            core.registry.unregister(self.id);
        }
    }
}
