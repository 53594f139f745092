//! Owning graph handle and its lifecycle state machine.
//!
//! [`GraphHandle`] is the sole strong owner of a graph: storage, generation
//! counter, and view registry all live behind one `Arc` that only the handle
//! holds strongly. Views reference it weakly, and the handle's cache of
//! canonical sequence views is weak as well, so ownership is acyclic by
//! construction and the graph is reclaimed the moment the handle goes away.
//! No tracing collector is involved and there is no finalizer ordering to
//! get wrong.
//!
//! Lifecycle runs `Live -> Finalizing -> Finalized`, entered either by an
//! explicit [`GraphHandle::finalize`] or by dropping the handle. During
//! `Finalizing` the registry marks every outstanding view with the sentinel
//! generation, then storage is released; `Finalized` is terminal.
//!
//! # Caller obligations
//! Structural mutation and finalize are single-writer per graph. Resolving
//! views concurrently with each other is fine; resolving concurrently with a
//! mutation on the same graph requires external serialization. The internal
//! locking only guarantees that no interleaving is ever undefined behavior;
//! an unsynchronized resolve may simply observe a staleness error.

use crate::graph::generation::{Generation, GenerationCell};
use crate::graph::ids::{EdgeId, VertexId};
use crate::graph::storage::{AdjacencyStore, Direction};
use crate::lease_error::GraphLeaseError;
use crate::registry::ViewRegistry;
use crate::view::ViewAnchor;
use crate::view::edge::{EdgeSeqView, EdgeView};
use crate::view::vertex::{VertexSeqView, VertexView};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::sync::Weak;
use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle of a graph. `Finalized` is terminal: no mutation and no view
/// creation is permitted afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Accepting mutation and view creation.
    Live,
    /// Invalidation sweep in progress.
    Finalizing,
    /// Storage released.
    Finalized,
}

impl LifecycleState {
    const LIVE: u8 = 0;
    const FINALIZING: u8 = 1;
    const FINALIZED: u8 = 2;

    fn from_u8(raw: u8) -> Self {
        match raw {
            Self::LIVE => LifecycleState::Live,
            Self::FINALIZING => LifecycleState::Finalizing,
            Self::FINALIZED => LifecycleState::Finalized,
            _ => unreachable!("invalid lifecycle discriminant"),
        }
    }
}

/// Updated element counts, returned by every structural mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GraphCounts {
    /// Current vertex count.
    pub vertices: usize,
    /// Current edge count.
    pub edges: usize,
}

/// Shared state behind a handle. Strongly owned by [`GraphHandle`] alone;
/// everything else reaches it through `Weak`.
pub(crate) struct GraphCore {
    /// `None` once finalized.
    pub(crate) storage: RwLock<Option<AdjacencyStore>>,
    pub(crate) generation: GenerationCell,
    pub(crate) registry: ViewRegistry,
    state: AtomicU8,
    canonical_vertices: Mutex<Weak<ViewAnchor>>,
    canonical_edges: Mutex<Weak<ViewAnchor>>,
}

impl GraphCore {
    pub(crate) fn lifecycle(&self) -> LifecycleState {
        LifecycleState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Runs the finalize sequence once; later calls are no-ops.
    pub(crate) fn finalize(&self) {
        if self
            .state
            .compare_exchange(
                LifecycleState::LIVE,
                LifecycleState::FINALIZING,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            return;
        }
        log::debug!(
            "finalizing graph at generation {}",
            self.generation.load()
        );
        self.registry.invalidate_all();
        *self.storage.write() = None;
        self.state
            .store(LifecycleState::FINALIZED, Ordering::Release);
    }
}

/// Owning handle for one graph.
///
/// The handle is deliberately not `Clone`: one strong owner per logical
/// graph keeps destruction deterministic. Dropping it finalizes the graph.
///
/// ```
/// use graph_lease::prelude::*;
///
/// let g = GraphHandle::new(3, false);
/// let counts = g.add_edge(VertexId::new(0), VertexId::new(1)).unwrap();
/// assert_eq!(counts, GraphCounts { vertices: 3, edges: 1 });
/// ```
pub struct GraphHandle {
    core: Arc<GraphCore>,
}

impl GraphHandle {
    /// Creates a graph with `n` isolated vertices, at generation zero.
    pub fn new(n: usize, directed: bool) -> Self {
        Self::from_store(AdjacencyStore::new(n, directed))
    }

    /// Creates a graph with `n` vertices and the given edges, at generation
    /// zero. Fails with [`GraphLeaseError::IndexOutOfRange`] if any endpoint
    /// is `>= n`.
    pub fn from_edges<I>(n: usize, directed: bool, edges: I) -> Result<Self, GraphLeaseError>
    where
        I: IntoIterator<Item = (VertexId, VertexId)>,
    {
        let mut store = AdjacencyStore::new(n, directed);
        for (u, v) in edges {
            store.add_edge(u, v)?;
        }
        Ok(Self::from_store(store))
    }

    fn from_store(store: AdjacencyStore) -> Self {
        log::trace!(
            "creating graph with {} vertices, {} edges",
            store.vertex_count(),
            store.edge_count()
        );
        Self {
            core: Arc::new(GraphCore {
                storage: RwLock::new(Some(store)),
                generation: GenerationCell::new(Generation::zero()),
                registry: ViewRegistry::new(),
                state: AtomicU8::new(LifecycleState::LIVE),
                canonical_vertices: Mutex::new(Weak::new()),
                canonical_edges: Mutex::new(Weak::new()),
            }),
        }
    }

    /// Current lifecycle state.
    pub fn lifecycle(&self) -> LifecycleState {
        self.core.lifecycle()
    }

    /// Current generation.
    pub fn generation(&self) -> Generation {
        self.core.generation.load()
    }

    /// Current element counts.
    pub fn counts(&self) -> Result<GraphCounts, GraphLeaseError> {
        self.with_store(|store| {
            Ok(GraphCounts {
                vertices: store.vertex_count(),
                edges: store.edge_count(),
            })
        })
    }

    /// Whether edges are directed.
    pub fn is_directed(&self) -> Result<bool, GraphLeaseError> {
        self.with_store(|store| Ok(store.is_directed()))
    }

    /// Degree of `v`, bypassing the view layer.
    pub fn degree(&self, v: VertexId, dir: Direction) -> Result<usize, GraphLeaseError> {
        self.with_store(|store| store.degree(v, dir))
    }

    /// Neighbors of `v`, bypassing the view layer.
    pub fn neighbors(&self, v: VertexId, dir: Direction) -> Result<Vec<VertexId>, GraphLeaseError> {
        self.with_store(|store| store.neighbors(v, dir))
    }

    /// Number of live views currently registered against this graph.
    pub fn outstanding_views(&self) -> usize {
        self.core.registry.live_count()
    }

    /// Appends `n` isolated vertices.
    pub fn add_vertices(&self, n: usize) -> Result<GraphCounts, GraphLeaseError> {
        self.mutate(|store| {
            store.add_vertices(n);
            Ok(())
        })
    }

    /// Appends one edge.
    pub fn add_edge(&self, u: VertexId, v: VertexId) -> Result<GraphCounts, GraphLeaseError> {
        self.mutate(|store| store.add_edge(u, v).map(|_| ()))
    }

    /// Appends every edge in the iterator. Endpoints are validated against
    /// counts as they are when each edge is applied, so earlier additions in
    /// the same call are visible to later ones.
    pub fn add_edges<I>(&self, edges: I) -> Result<GraphCounts, GraphLeaseError>
    where
        I: IntoIterator<Item = (VertexId, VertexId)>,
    {
        self.mutate(|store| {
            for (u, v) in edges {
                store.add_edge(u, v)?;
            }
            Ok(())
        })
    }

    /// Removes the listed vertices and their incident edges; survivors are
    /// renumbered.
    pub fn remove_vertices(&self, ids: &[VertexId]) -> Result<GraphCounts, GraphLeaseError> {
        self.mutate(|store| store.remove_vertices(ids))
    }

    /// Removes the listed edges; survivors are renumbered.
    pub fn remove_edges(&self, ids: &[EdgeId]) -> Result<GraphCounts, GraphLeaseError> {
        self.mutate(|store| store.remove_edges(ids))
    }

    /// Releases the graph: invalidates every outstanding view, then drops
    /// storage. Idempotent; a second call is a no-op, not an error.
    pub fn finalize(&self) {
        self.core.finalize();
    }

    /// View of a single vertex. The index is validated now and the view
    /// observes the current generation.
    pub fn vertex(&self, v: VertexId) -> Result<VertexView, GraphLeaseError> {
        let guard = self.core.storage.read();
        let store = guard.as_ref().ok_or(GraphLeaseError::UseAfterFinalize)?;
        store.check_vertex(v)?;
        let anchor = ViewAnchor::attach(&self.core, self.core.generation.load());
        Ok(VertexView::new(anchor, v))
    }

    /// View of a single edge.
    pub fn edge(&self, e: EdgeId) -> Result<EdgeView, GraphLeaseError> {
        let guard = self.core.storage.read();
        let store = guard.as_ref().ok_or(GraphLeaseError::UseAfterFinalize)?;
        store.check_edge(e)?;
        let anchor = ViewAnchor::attach(&self.core, self.core.generation.load());
        Ok(EdgeView::new(anchor, e))
    }

    /// Sequence view over all vertices.
    ///
    /// Repeated calls at the same generation share one registered anchor
    /// through the weak canonical cache; once the cached anchor is stale or
    /// its views are gone, a fresh one is created.
    pub fn vertices(&self) -> Result<VertexSeqView, GraphLeaseError> {
        self.canonical_anchor(&self.core.canonical_vertices)
            .map(VertexSeqView::from_anchor)
    }

    /// Sequence view over all edges. Same caching as [`GraphHandle::vertices`].
    pub fn edges(&self) -> Result<EdgeSeqView, GraphLeaseError> {
        self.canonical_anchor(&self.core.canonical_edges)
            .map(EdgeSeqView::from_anchor)
    }

    fn canonical_anchor(
        &self,
        slot: &Mutex<Weak<ViewAnchor>>,
    ) -> Result<Arc<ViewAnchor>, GraphLeaseError> {
        if self.core.lifecycle() != LifecycleState::Live {
            return Err(GraphLeaseError::UseAfterFinalize);
        }
        let current = self.core.generation.load();
        let mut slot = slot.lock();
        if let Some(anchor) = slot.upgrade() {
            if anchor.observed.load() == current {
                return Ok(anchor);
            }
        }
        let anchor = ViewAnchor::attach(&self.core, current);
        *slot = Arc::downgrade(&anchor);
        Ok(anchor)
    }

    fn with_store<T>(
        &self,
        f: impl FnOnce(&AdjacencyStore) -> Result<T, GraphLeaseError>,
    ) -> Result<T, GraphLeaseError> {
        let guard = self.core.storage.read();
        let store = guard.as_ref().ok_or(GraphLeaseError::UseAfterFinalize)?;
        f(store)
    }

    /// Applies a structural change, then bumps the generation as the last
    /// step while the write lock is still held. A failed change leaves the
    /// generation untouched.
    fn mutate(
        &self,
        f: impl FnOnce(&mut AdjacencyStore) -> Result<(), GraphLeaseError>,
    ) -> Result<GraphCounts, GraphLeaseError> {
        if self.core.lifecycle() != LifecycleState::Live {
            return Err(GraphLeaseError::UseAfterFinalize);
        }
        let mut guard = self.core.storage.write();
        let store = guard.as_mut().ok_or(GraphLeaseError::UseAfterFinalize)?;
        f(store)?;
        let counts = GraphCounts {
            vertices: store.vertex_count(),
            edges: store.edge_count(),
        };
        let next = self.core.generation.bump();
        log::trace!("graph mutated, generation now {next}");
        Ok(counts)
    }
}

impl Drop for GraphHandle {
    fn drop(&mut self) {
        self.core.finalize();
    }
}
