//! GraphLeaseError: unified error type for graph-lease public APIs
//!
//! Every fallible operation in this library reports one of the kinds below.
//! None of them are retried internally and none are swallowed; a stale view
//! stays stale until the caller requests a fresh one from the handle.

use crate::graph::generation::Generation;
use std::fmt;
use thiserror::Error;

/// Unified error type for graph-lease operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphLeaseError {
    /// The view's observed generation no longer matches the graph, the graph
    /// was finalized, or the graph was dropped. A `current` of
    /// [`Generation::SENTINEL`] means the graph itself is gone.
    #[error("stale view: observed generation {observed}, graph at {current}")]
    StaleReference {
        /// Generation the view recorded when it was created.
        observed: Generation,
        /// The graph's generation at resolve time.
        current: Generation,
    },
    /// Mutation or view creation attempted on a finalized graph handle.
    #[error("operation attempted on a finalized graph")]
    UseAfterFinalize,
    /// A caller-supplied index exceeds the current element count.
    #[error("{kind} index {index} out of range (current count is {bound})")]
    IndexOutOfRange {
        /// Element family the index referred to.
        kind: ElementKind,
        /// The offending index.
        index: usize,
        /// Current element count for that family.
        bound: usize,
    },
    /// Adjacency storage failed an internal consistency check.
    #[error("adjacency storage inconsistent: {detail}")]
    StorageInconsistency {
        /// Which check failed.
        detail: &'static str,
    },
}

/// Which element family an index belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A vertex index.
    Vertex,
    /// An edge index.
    Edge,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Vertex => f.write_str("vertex"),
            ElementKind::Edge => f.write_str("edge"),
        }
    }
}
