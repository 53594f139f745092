//! # graph-lease
//!
//! graph-lease lets client code hold lightweight, non-owning views into a
//! mutable, index-addressed graph. Views never dangle: every structural
//! mutation bumps the graph's generation counter, and a view created before
//! the mutation fails its next resolve with a staleness error instead of
//! reading renumbered or freed storage.
//!
//! ## Features
//! - [`graph::handle::GraphHandle`], the sole strong owner of a graph's
//!   storage, generation counter, and view registry
//! - Single-element views ([`view::vertex::VertexView`],
//!   [`view::edge::EdgeView`]) and sequence views with lazily stored filter
//!   criteria ([`view::vertex::VertexSeqView`], [`view::edge::EdgeSeqView`])
//! - Acyclic ownership: views reference the graph weakly and the graph
//!   caches canonical views weakly, so dropping the handle reclaims the
//!   graph with no tracing collector involved
//! - Deterministic finalize with an idempotent invalidation sweep
//!
//! ## Usage
//! Add `graph-lease` as a dependency in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! graph-lease = "0.3"
//! ```
//!
//! ```
//! use graph_lease::prelude::*;
//!
//! let g = GraphHandle::from_edges(3, false, [
//!     (VertexId::new(0), VertexId::new(1)),
//!     (VertexId::new(1), VertexId::new(2)),
//! ]).unwrap();
//!
//! let edges = g.edges().unwrap();
//! assert_eq!(edges.count().unwrap(), 2);
//!
//! // Any structural mutation stales the view.
//! g.add_edge(VertexId::new(0), VertexId::new(2)).unwrap();
//! assert!(edges.resolve().is_err());
//! assert_eq!(g.edges().unwrap().count().unwrap(), 3);
//! ```
//!
//! ## Concurrency
//! One writer per graph: callers serialize mutation and finalize externally.
//! View resolution is read-only and may run concurrently with other
//! resolutions. The generation bump is the publication point of a mutation,
//! so an unsynchronized resolve can observe a staleness error but never
//! undefined behavior.

// Re-export our major subsystems:
pub mod debug_invariants;
pub mod graph;
pub mod lease_error;
pub mod registry;
pub mod view;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::graph::cache::InvalidateCache;
    pub use crate::graph::generation::Generation;
    pub use crate::graph::handle::{GraphCounts, GraphHandle, LifecycleState};
    pub use crate::graph::ids::{EdgeId, VertexId};
    pub use crate::graph::storage::{AdjacencyStore, Direction};
    pub use crate::lease_error::{ElementKind, GraphLeaseError};
    pub use crate::view::edge::{EdgeSeqIter, EdgeSeqView, EdgeView};
    pub use crate::view::filter::{EdgeProbe, VertexProbe};
    pub use crate::view::vertex::{VertexSeqIter, VertexSeqView, VertexView};
}
