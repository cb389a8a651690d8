//! Arena half-edge mesh for interactive editing tools.
//!
//! Provides an indexed half-edge structure with polygon faces, linked
//! boundary loops and wire (faceless) edges, plus the adjacency queries
//! interactive tools need: one-ring iteration, radial stepping across
//! faces, manifold/boundary/wire classification.

mod halfedge;
mod primitives;
mod selection;

pub use halfedge::{
    EdgeId, Face, FaceId, HalfEdge, HalfEdgeId, HalfEdgeMesh, MeshBuilder, Vertex, VertexId,
};
pub use primitives::{grid, ngon_fan, tube};
pub use selection::{Edge, MeshSelection};
