//! Edge/vertex selection sets.
//!
//! Selections are stored against vertex indices rather than half-edge
//! ids so they survive mesh rebuilds and are cheap to serialize for
//! operator re-execution.

use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::halfedge::{EdgeId, HalfEdgeMesh, VertexId};

/// Canonical undirected edge (smaller vertex index first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge(pub u32, pub u32);

impl Edge {
    /// Creates a canonical edge from two vertex indices.
    pub fn new(a: u32, b: u32) -> Self {
        if a < b { Edge(a, b) } else { Edge(b, a) }
    }
}

/// A set of selected mesh elements.
///
/// Selecting an edge also selects both endpoint vertices, mirroring
/// edit-mode selection flushing.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshSelection {
    /// Selected vertices.
    pub vertices: HashSet<u32>,
    /// Selected edges.
    pub edges: HashSet<Edge>,
}

impl MeshSelection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a single vertex.
    pub fn select_vertex(&mut self, v: u32) {
        self.vertices.insert(v);
    }

    /// Selects an edge and both of its endpoints.
    pub fn select_edge(&mut self, a: u32, b: u32) {
        self.edges.insert(Edge::new(a, b));
        self.vertices.insert(a);
        self.vertices.insert(b);
    }

    /// Selects every edge along a vertex path.
    pub fn select_path(&mut self, path: &[u32]) {
        for pair in path.windows(2) {
            self.select_edge(pair[0], pair[1]);
        }
    }

    /// Returns true if the vertex is selected.
    pub fn vertex_selected(&self, v: VertexId) -> bool {
        self.vertices.contains(&v.0)
    }

    /// Returns true if the edge is selected.
    pub fn edge_selected(&self, mesh: &HalfEdgeMesh, e: EdgeId) -> bool {
        let (a, b) = mesh.edge_verts(e);
        self.edges.contains(&Edge::new(a.0, b.0))
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty()
    }
}
