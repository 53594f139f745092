//! Per-graph table of outstanding views.
//!
//! The registry is weak in both directions: it holds downgraded handles to
//! view anchors and is itself owned by the graph core, so it never extends
//! the lifetime of either side. Its one nontrivial job is the invalidation
//! sweep that runs when a graph is finalized.

use crate::graph::generation::Generation;
use crate::view::ViewAnchor;
use dashmap::DashMap;
use std::sync::Weak;
use std::sync::atomic::{AtomicU64, Ordering};

/// Registry key for one live view anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ViewId(u64);

impl ViewId {
    /// Key for anchors that were never registered (created through a view
    /// whose graph was already finalizing or gone). Unregistering them is a
    /// no-op.
    pub(crate) const DETACHED: ViewId = ViewId(u64::MAX);
}

pub(crate) struct ViewRegistry {
    entries: DashMap<ViewId, Weak<ViewAnchor>>,
    next_id: AtomicU64,
}

impl ViewRegistry {
    pub(crate) fn new() -> Self {
        Self {
            entries: DashMap::new(),
            next_id: AtomicU64::new(0),
        }
    }

    /// Reserves a key for a new anchor.
    pub(crate) fn allocate(&self) -> ViewId {
        ViewId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Inserts the association. O(1) amortized.
    pub(crate) fn register(&self, id: ViewId, anchor: Weak<ViewAnchor>) {
        debug_assert!(id != ViewId::DETACHED);
        self.entries.insert(id, anchor);
        log::trace!("registered view {id:?}");
    }

    /// Removes the association. Safe to call redundantly and after the sweep.
    pub(crate) fn unregister(&self, id: ViewId) {
        if id != ViewId::DETACHED {
            self.entries.remove(&id);
        }
    }

    /// Marks every registered anchor permanently invalid and clears the
    /// table. Runs at most once per graph, from the finalize path.
    ///
    /// The table is drained before any anchor is touched, so an anchor whose
    /// last reference dies during the sweep tears down against an already
    /// empty table instead of re-entering it.
    pub(crate) fn invalidate_all(&self) {
        let drained: Vec<Weak<ViewAnchor>> = self
            .entries
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        self.entries.clear();
        let mut marked = 0usize;
        for weak in drained {
            if let Some(anchor) = weak.upgrade() {
                anchor.observed.store(Generation::SENTINEL);
                marked += 1;
            }
        }
        log::debug!("invalidated {marked} outstanding views");
    }

    /// Number of registered anchors whose views are still alive.
    pub(crate) fn live_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.value().strong_count() > 0)
            .count()
    }
}
