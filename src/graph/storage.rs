//! Index-addressed adjacency storage.
//!
//! [`AdjacencyStore`] is the engine side of this crate: a compact edge list
//! plus per-vertex adjacency mirrors. Vertices and edges are dense indices,
//! and deleting elements compacts and renumbers the survivors. That
//! renumbering is exactly why indices held across a mutation must be
//! revalidated instead of dereferenced; the storage itself never checks
//! generations, it only promises that every index it hands out is in bounds
//! at the time it hands it out.
//!
//! Degree queries go through a lazily computed table in the manner of a
//! derived-topology cache: built on first use, dropped on every mutation.

use crate::debug_invariants::DebugInvariants;
use crate::graph::cache::InvalidateCache;
use crate::graph::ids::{EdgeId, VertexId};
use crate::lease_error::{ElementKind, GraphLeaseError};
use itertools::Itertools;
use once_cell::sync::OnceCell;

/// Traversal direction for degree and neighbor queries.
///
/// Undirected graphs treat every mode as [`Direction::All`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    /// Follow edges from source to target.
    Out,
    /// Follow edges from target to source.
    In,
    /// Both directions.
    All,
}

/// Per-vertex degree counts, built on demand.
#[derive(Clone, Debug, Default)]
struct DegreeTable {
    out: Vec<usize>,
    inbound: Vec<usize>,
}

/// Adjacency storage for one graph: an edge list with per-vertex mirrors.
///
/// Edge `i` of `edges` has id `EdgeId(i)`. For an edge `(u, v)`,
/// `adjacency_out[u]` holds `(v, id)` and `adjacency_in[v]` holds `(u, id)`,
/// regardless of directedness; undirected graphs differ only in how queries
/// combine the two sides. Self-loops therefore appear in both mirrors of the
/// same vertex.
#[derive(Clone, Debug)]
pub struct AdjacencyStore {
    directed: bool,
    vertex_count: usize,
    edges: Vec<(VertexId, VertexId)>,
    adjacency_out: Vec<Vec<(VertexId, EdgeId)>>,
    adjacency_in: Vec<Vec<(VertexId, EdgeId)>>,
    degrees: OnceCell<DegreeTable>,
}

impl AdjacencyStore {
    /// Creates storage for a graph with `n` isolated vertices.
    pub fn new(n: usize, directed: bool) -> Self {
        Self {
            directed,
            vertex_count: n,
            edges: Vec::new(),
            adjacency_out: vec![Vec::new(); n],
            adjacency_in: vec![Vec::new(); n],
            degrees: OnceCell::new(),
        }
    }

    /// Current vertex count.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Current edge count.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether edges are directed.
    #[inline]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Errors with [`GraphLeaseError::IndexOutOfRange`] unless `v` is in bounds.
    #[inline]
    pub fn check_vertex(&self, v: VertexId) -> Result<(), GraphLeaseError> {
        if v.index() < self.vertex_count {
            Ok(())
        } else {
            Err(GraphLeaseError::IndexOutOfRange {
                kind: ElementKind::Vertex,
                index: v.index(),
                bound: self.vertex_count,
            })
        }
    }

    /// Errors with [`GraphLeaseError::IndexOutOfRange`] unless `e` is in bounds.
    #[inline]
    pub fn check_edge(&self, e: EdgeId) -> Result<(), GraphLeaseError> {
        if e.index() < self.edges.len() {
            Ok(())
        } else {
            Err(GraphLeaseError::IndexOutOfRange {
                kind: ElementKind::Edge,
                index: e.index(),
                bound: self.edges.len(),
            })
        }
    }

    /// Appends `n` isolated vertices.
    pub fn add_vertices(&mut self, n: usize) {
        self.vertex_count += n;
        self.adjacency_out.resize_with(self.vertex_count, Vec::new);
        self.adjacency_in.resize_with(self.vertex_count, Vec::new);
        self.invalidate_cache();
        crate::debug_invariants!(self, "adjacency store");
    }

    /// Appends one edge and returns its id. Parallel edges and self-loops
    /// are permitted.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) -> Result<EdgeId, GraphLeaseError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        let id = EdgeId::new(self.edges.len());
        self.edges.push((u, v));
        self.adjacency_out[u.index()].push((v, id));
        self.adjacency_in[v.index()].push((u, id));
        self.invalidate_cache();
        crate::debug_invariants!(self, "adjacency store");
        Ok(id)
    }

    /// Removes the listed edges. Survivors are renumbered to stay dense, in
    /// their original relative order. Duplicate ids are tolerated; any
    /// out-of-range id fails the whole call before anything is removed.
    pub fn remove_edges(&mut self, ids: &[EdgeId]) -> Result<(), GraphLeaseError> {
        for &e in ids {
            self.check_edge(e)?;
        }
        let mut keep = vec![true; self.edges.len()];
        for doomed in ids.iter().map(|e| e.index()).sorted().dedup() {
            keep[doomed] = false;
        }
        let mut slot = 0;
        self.edges.retain(|_| {
            let kept = keep[slot];
            slot += 1;
            kept
        });
        self.rebuild_adjacency();
        self.invalidate_cache();
        crate::debug_invariants!(self, "adjacency store");
        Ok(())
    }

    /// Removes the listed vertices together with every incident edge.
    /// Surviving vertices and edges are renumbered to stay dense. Any
    /// out-of-range id fails the whole call before anything is removed.
    pub fn remove_vertices(&mut self, ids: &[VertexId]) -> Result<(), GraphLeaseError> {
        for &v in ids {
            self.check_vertex(v)?;
        }
        let mut keep = vec![true; self.vertex_count];
        for &v in ids {
            keep[v.index()] = false;
        }
        // Dense renumbering for the survivors.
        let mut remap = vec![usize::MAX; self.vertex_count];
        let mut next = 0;
        for (old, &kept) in keep.iter().enumerate() {
            if kept {
                remap[old] = next;
                next += 1;
            }
        }
        self.edges
            .retain(|&(u, v)| keep[u.index()] && keep[v.index()]);
        for (u, v) in self.edges.iter_mut() {
            *u = VertexId::new(remap[u.index()]);
            *v = VertexId::new(remap[v.index()]);
        }
        self.vertex_count = next;
        self.rebuild_adjacency();
        self.invalidate_cache();
        crate::debug_invariants!(self, "adjacency store");
        Ok(())
    }

    /// Degree of `v` in the given direction.
    pub fn degree(&self, v: VertexId, dir: Direction) -> Result<usize, GraphLeaseError> {
        self.check_vertex(v)?;
        Ok(self.degree_unchecked(v, dir))
    }

    /// Neighbors of `v` in the given direction, in adjacency order.
    /// With [`Direction::All`], out-neighbors come before in-neighbors.
    pub fn neighbors(&self, v: VertexId, dir: Direction) -> Result<Vec<VertexId>, GraphLeaseError> {
        self.check_vertex(v)?;
        Ok(self.neighbors_unchecked(v, dir))
    }

    /// Endpoints `(source, target)` of `e`.
    pub fn endpoints(&self, e: EdgeId) -> Result<(VertexId, VertexId), GraphLeaseError> {
        self.check_edge(e)?;
        Ok(self.edges[e.index()])
    }

    /// Degree lookup for ids already known to be in bounds (enumerated from
    /// `0..vertex_count`).
    pub(crate) fn degree_unchecked(&self, v: VertexId, dir: Direction) -> usize {
        let table = self.degree_table();
        let out = table.out[v.index()];
        let inbound = table.inbound[v.index()];
        if !self.directed {
            return out + inbound;
        }
        match dir {
            Direction::Out => out,
            Direction::In => inbound,
            Direction::All => out + inbound,
        }
    }

    /// Neighbor lookup for ids already known to be in bounds.
    pub(crate) fn neighbors_unchecked(&self, v: VertexId, dir: Direction) -> Vec<VertexId> {
        let outs = self.adjacency_out[v.index()].iter().map(|&(w, _)| w);
        let ins = self.adjacency_in[v.index()].iter().map(|&(w, _)| w);
        if !self.directed {
            return outs.chain(ins).collect();
        }
        match dir {
            Direction::Out => outs.collect(),
            Direction::In => ins.collect(),
            Direction::All => outs.chain(ins).collect(),
        }
    }

    /// Endpoint lookup for ids already known to be in bounds.
    pub(crate) fn endpoints_unchecked(&self, e: EdgeId) -> (VertexId, VertexId) {
        self.edges[e.index()]
    }

    fn degree_table(&self) -> &DegreeTable {
        self.degrees.get_or_init(|| DegreeTable {
            out: self.adjacency_out.iter().map(Vec::len).collect(),
            inbound: self.adjacency_in.iter().map(Vec::len).collect(),
        })
    }

    fn rebuild_adjacency(&mut self) {
        self.adjacency_out = vec![Vec::new(); self.vertex_count];
        self.adjacency_in = vec![Vec::new(); self.vertex_count];
        for (i, &(u, v)) in self.edges.iter().enumerate() {
            let id = EdgeId::new(i);
            self.adjacency_out[u.index()].push((v, id));
            self.adjacency_in[v.index()].push((u, id));
        }
    }
}

impl InvalidateCache for AdjacencyStore {
    #[inline]
    fn invalidate_cache(&mut self) {
        self.degrees.take();
    }
}

impl DebugInvariants for AdjacencyStore {
    fn validate_invariants(&self) -> Result<(), GraphLeaseError> {
        if self.adjacency_out.len() != self.vertex_count
            || self.adjacency_in.len() != self.vertex_count
        {
            return Err(GraphLeaseError::StorageInconsistency {
                detail: "adjacency mirror length differs from vertex count",
            });
        }
        for &(u, v) in &self.edges {
            self.check_vertex(u)?;
            self.check_vertex(v)?;
        }
        let mut mirrored = 0;
        for (src, outs) in self.adjacency_out.iter().enumerate() {
            for &(dst, id) in outs {
                let Ok((u, v)) = self.endpoints(id) else {
                    return Err(GraphLeaseError::StorageInconsistency {
                        detail: "adjacency entry names a nonexistent edge",
                    });
                };
                if u.index() != src || v != dst {
                    return Err(GraphLeaseError::StorageInconsistency {
                        detail: "outgoing adjacency entry disagrees with edge list",
                    });
                }
                mirrored += 1;
            }
        }
        if mirrored != self.edges.len() {
            return Err(GraphLeaseError::StorageInconsistency {
                detail: "outgoing adjacency entry count differs from edge count",
            });
        }
        let inbound: usize = self.adjacency_in.iter().map(Vec::len).sum();
        if inbound != self.edges.len() {
            return Err(GraphLeaseError::StorageInconsistency {
                detail: "incoming adjacency entry count differs from edge count",
            });
        }
        Ok(())
    }
}
