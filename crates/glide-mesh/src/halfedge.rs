//! Half-edge mesh representation.
//!
//! Every edge is stored as two half-edges pointing in opposite
//! directions. Face half-edges are linked in cycles around their face;
//! edges bounding exactly one face get a boundary half-edge (face =
//! NULL) linked into boundary loops; wire edges are twin pairs with no
//! face on either side.
//!
//! All references are `u32` indices into arena vectors, so traversal is
//! bounds-checked and meshes are cheap to clone for tests.

use glam::Vec3;
use std::collections::HashMap;

/// Index for a half-edge in the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HalfEdgeId(pub u32);

/// Index for a vertex in the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VertexId(pub u32);

/// Index for a face in the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FaceId(pub u32);

/// Canonical identifier for an undirected edge.
///
/// This is the lower of the two half-edge indices of the pair, so the
/// same edge compares equal no matter which side it was reached from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EdgeId(pub u32);

/// Sentinel value for null references.
const NULL_ID: u32 = u32::MAX;

impl HalfEdgeId {
    /// Sentinel value representing no half-edge.
    pub const NULL: HalfEdgeId = HalfEdgeId(NULL_ID);

    /// Returns true if this is the null sentinel.
    pub fn is_null(self) -> bool {
        self.0 == NULL_ID
    }
}

impl VertexId {
    /// Sentinel value representing no vertex.
    pub const NULL: VertexId = VertexId(NULL_ID);

    /// Returns true if this is the null sentinel.
    pub fn is_null(self) -> bool {
        self.0 == NULL_ID
    }
}

impl FaceId {
    /// Sentinel value representing no face.
    pub const NULL: FaceId = FaceId(NULL_ID);

    /// Returns true if this is the null sentinel.
    pub fn is_null(self) -> bool {
        self.0 == NULL_ID
    }
}

/// A half-edge in the mesh.
#[derive(Debug, Clone, Copy, Default)]
pub struct HalfEdge {
    /// Next half-edge around the face (counter-clockwise).
    pub next: HalfEdgeId,
    /// Previous half-edge around the face.
    pub prev: HalfEdgeId,
    /// Twin half-edge (opposite direction).
    pub twin: HalfEdgeId,
    /// Vertex this half-edge points to (target).
    pub vertex: VertexId,
    /// Vertex this half-edge comes from (source).
    pub origin: VertexId,
    /// Face this half-edge belongs to (NULL for boundary and wire edges).
    pub face: FaceId,
}

/// A vertex in the mesh.
#[derive(Debug, Clone, Default)]
pub struct Vertex {
    /// Position in 3D space.
    pub position: Vec3,
    /// One outgoing half-edge from this vertex.
    pub halfedge: HalfEdgeId,
}

/// A face in the mesh.
#[derive(Debug, Clone, Default)]
pub struct Face {
    /// One half-edge on this face's boundary.
    pub halfedge: HalfEdgeId,
}

/// Half-edge mesh with polygon faces, boundary loops and wire edges.
#[derive(Debug, Clone, Default)]
pub struct HalfEdgeMesh {
    /// All half-edges.
    pub halfedges: Vec<HalfEdge>,
    /// All vertices.
    pub vertices: Vec<Vertex>,
    /// All faces.
    pub faces: Vec<Face>,
    /// Incident edges per vertex, in insertion order.
    vertex_edges: Vec<Vec<EdgeId>>,
    /// Face users per undirected vertex pair. Pairs with no entry are
    /// wire edges; entries above 2 mark non-manifold edges.
    face_users: HashMap<(u32, u32), u32>,
}

impl HalfEdgeMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts building a mesh vertex by vertex.
    pub fn builder() -> MeshBuilder {
        MeshBuilder::default()
    }

    // ==================== Element Access ====================

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns the position of a vertex.
    pub fn position(&self, v: VertexId) -> Vec3 {
        self.vertices[v.0 as usize].position
    }

    /// Writes a vertex position.
    pub fn set_position(&mut self, v: VertexId, co: Vec3) {
        self.vertices[v.0 as usize].position = co;
    }

    fn he(&self, he: HalfEdgeId) -> &HalfEdge {
        &self.halfedges[he.0 as usize]
    }

    // ==================== Edge Queries ====================

    /// Returns the canonical edge of a half-edge.
    pub fn edge_of(&self, he: HalfEdgeId) -> EdgeId {
        let twin = self.he(he).twin;
        if twin.is_null() || he.0 < twin.0 {
            EdgeId(he.0)
        } else {
            EdgeId(twin.0)
        }
    }

    /// Returns the canonical half-edge of an edge.
    pub fn edge_halfedge(&self, e: EdgeId) -> HalfEdgeId {
        HalfEdgeId(e.0)
    }

    /// Returns the two endpoints of an edge.
    pub fn edge_verts(&self, e: EdgeId) -> (VertexId, VertexId) {
        let he = self.he(HalfEdgeId(e.0));
        (he.origin, he.vertex)
    }

    /// Returns the endpoint of `e` that is not `v`.
    pub fn other_vert(&self, e: EdgeId, v: VertexId) -> VertexId {
        let (a, b) = self.edge_verts(e);
        debug_assert!(v == a || v == b);
        if v == a { b } else { a }
    }

    /// Returns the vector along `e` away from `v`.
    pub fn edge_vec(&self, e: EdgeId, v: VertexId) -> Vec3 {
        self.position(self.other_vert(e, v)) - self.position(v)
    }

    /// Returns the length of an edge.
    pub fn edge_length(&self, e: EdgeId) -> f32 {
        let (a, b) = self.edge_verts(e);
        self.position(a).distance(self.position(b))
    }

    /// Returns the squared length of an edge.
    pub fn edge_length_sq(&self, e: EdgeId) -> f32 {
        let (a, b) = self.edge_verts(e);
        self.position(a).distance_squared(self.position(b))
    }

    /// Returns the number of faces using an edge.
    pub fn edge_face_count(&self, e: EdgeId) -> u32 {
        let (a, b) = self.edge_verts(e);
        self.face_users
            .get(&pair_key(a.0, b.0))
            .copied()
            .unwrap_or(0)
    }

    /// Returns true if the edge bounds exactly one face.
    pub fn is_boundary_edge(&self, e: EdgeId) -> bool {
        self.edge_face_count(e) == 1
    }

    /// Returns true if the edge is shared by exactly two faces.
    pub fn is_manifold_edge(&self, e: EdgeId) -> bool {
        self.edge_face_count(e) == 2
    }

    /// Returns true if the edge has no faces at all.
    pub fn is_wire_edge(&self, e: EdgeId) -> bool {
        self.edge_face_count(e) == 0
    }

    // ==================== Loop (Face Corner) Queries ====================

    /// Returns a face half-edge using this edge, if any.
    pub fn edge_loop(&self, e: EdgeId) -> Option<HalfEdgeId> {
        let he = HalfEdgeId(e.0);
        if !self.he(he).face.is_null() {
            return Some(he);
        }
        let twin = self.he(he).twin;
        if !twin.is_null() && !self.he(twin).face.is_null() {
            return Some(twin);
        }
        None
    }

    /// Steps to the face loop on the other side of this loop's edge.
    ///
    /// Returns the input loop unchanged when the edge is a boundary, so
    /// `radial_next(l) == l` tests for a radial cycle of one.
    pub fn radial_next(&self, l: HalfEdgeId) -> HalfEdgeId {
        let twin = self.he(l).twin;
        if !twin.is_null() && !self.he(twin).face.is_null() {
            twin
        } else {
            l
        }
    }

    /// Within `l`'s face, returns the other face edge incident to `v`.
    ///
    /// `l` must be a face half-edge whose edge touches `v`.
    pub fn other_edge_loop(&self, l: HalfEdgeId, v: VertexId) -> HalfEdgeId {
        let he = self.he(l);
        debug_assert!(!he.face.is_null());
        if he.origin == v {
            he.prev
        } else {
            debug_assert_eq!(he.vertex, v);
            he.next
        }
    }

    /// Returns the half-edge of `f` whose origin is `v`, if any.
    pub fn face_corner(&self, f: FaceId, v: VertexId) -> Option<HalfEdgeId> {
        self.face_halfedges(f)
            .into_iter()
            .find(|&he| self.he(he).origin == v)
    }

    /// Returns all half-edges around a face.
    pub fn face_halfedges(&self, face: FaceId) -> Vec<HalfEdgeId> {
        let mut result = Vec::new();
        let start = self.faces[face.0 as usize].halfedge;
        if start.is_null() {
            return result;
        }
        let mut current = start;
        loop {
            result.push(current);
            current = self.he(current).next;
            if current == start || current.is_null() {
                break;
            }
        }
        result
    }

    /// Returns all vertices of a face in cycle order.
    pub fn face_vertices(&self, face: FaceId) -> Vec<VertexId> {
        self.face_halfedges(face)
            .into_iter()
            .map(|he| self.he(he).origin)
            .collect()
    }

    /// Returns the number of sides of a face.
    pub fn face_sides(&self, face: FaceId) -> usize {
        self.face_halfedges(face).len()
    }

    /// Computes the face normal with Newell's method (n-gon safe).
    pub fn face_normal(&self, face: FaceId) -> Vec3 {
        let verts = self.face_vertices(face);
        let mut normal = Vec3::ZERO;
        for (i, &v) in verts.iter().enumerate() {
            let a = self.position(v);
            let b = self.position(verts[(i + 1) % verts.len()]);
            normal += Vec3::new(
                (a.y - b.y) * (a.z + b.z),
                (a.z - b.z) * (a.x + b.x),
                (a.x - b.x) * (a.y + b.y),
            );
        }
        normal.normalize_or_zero()
    }

    // ==================== Vertex Queries ====================

    /// Returns the incident edges of a vertex, wire edges included.
    pub fn vertex_edges(&self, v: VertexId) -> &[EdgeId] {
        &self.vertex_edges[v.0 as usize]
    }

    /// Counts the incident edges that have at least one face.
    pub fn vert_edge_count_nonwire(&self, v: VertexId) -> usize {
        self.vertex_edges(v)
            .iter()
            .filter(|&&e| !self.is_wire_edge(e))
            .count()
    }

    /// Returns true if the vertex has exactly two incident edges.
    pub fn vert_is_edge_pair(&self, v: VertexId) -> bool {
        self.vertex_edges(v).len() == 2
    }
}

fn pair_key(a: u32, b: u32) -> (u32, u32) {
    if a < b { (a, b) } else { (b, a) }
}

/// Builder for constructing half-edge meshes from polygon soup.
#[derive(Debug, Clone, Default)]
pub struct MeshBuilder {
    positions: Vec<Vec3>,
    faces: Vec<Vec<u32>>,
    wires: Vec<(u32, u32)>,
}

impl MeshBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex and returns its index.
    pub fn vertex(&mut self, position: Vec3) -> u32 {
        self.positions.push(position);
        (self.positions.len() - 1) as u32
    }

    /// Adds a polygon face from vertex indices in CCW order.
    pub fn face(&mut self, indices: &[u32]) {
        debug_assert!(indices.len() >= 3);
        self.faces.push(indices.to_vec());
    }

    /// Adds a triangle face.
    pub fn triangle(&mut self, a: u32, b: u32, c: u32) {
        self.face(&[a, b, c]);
    }

    /// Adds a quad face.
    pub fn quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.face(&[a, b, c, d]);
    }

    /// Adds a wire edge with no face on either side.
    pub fn wire_edge(&mut self, a: u32, b: u32) {
        self.wires.push((a, b));
    }

    /// Builds the linked half-edge mesh.
    pub fn build(self) -> HalfEdgeMesh {
        let mut mesh = HalfEdgeMesh::new();

        for &co in &self.positions {
            mesh.vertices.push(Vertex {
                position: co,
                halfedge: HalfEdgeId::NULL,
            });
        }

        // Count face users per undirected edge up front so twin linking
        // can leave non-manifold fans unlinked.
        for face in &self.faces {
            for i in 0..face.len() {
                let key = pair_key(face[i], face[(i + 1) % face.len()]);
                *mesh.face_users.entry(key).or_insert(0) += 1;
            }
        }

        // Face half-edges, linked in cycles.
        let mut edge_map: HashMap<(u32, u32), HalfEdgeId> = HashMap::new();
        for face in &self.faces {
            let face_id = FaceId(mesh.faces.len() as u32);
            let n = face.len();
            let base = mesh.halfedges.len() as u32;

            for i in 0..n {
                let from = face[i];
                let to = face[(i + 1) % n];
                let he_id = HalfEdgeId(base + i as u32);

                mesh.halfedges.push(HalfEdge {
                    next: HalfEdgeId(base + ((i + 1) % n) as u32),
                    prev: HalfEdgeId(base + ((i + n - 1) % n) as u32),
                    twin: HalfEdgeId::NULL,
                    vertex: VertexId(to),
                    origin: VertexId(from),
                    face: face_id,
                });
                edge_map.entry((from, to)).or_insert(he_id);

                if mesh.vertices[from as usize].halfedge.is_null() {
                    mesh.vertices[from as usize].halfedge = he_id;
                }
            }

            mesh.faces.push(Face {
                halfedge: HalfEdgeId(base),
            });
        }

        // Twin linking, manifold pairs only. The radial step does not
        // care about winding, so when the neighbor face winds the edge
        // the same way the same-direction entry is the twin.
        for i in 0..mesh.halfedges.len() {
            if !mesh.halfedges[i].twin.is_null() {
                continue;
            }
            let (from, to) = (mesh.halfedges[i].origin.0, mesh.halfedges[i].vertex.0);
            if mesh.face_users[&pair_key(from, to)] != 2 {
                continue;
            }
            let twin = edge_map.get(&(to, from)).copied().or_else(|| {
                edge_map
                    .get(&(from, to))
                    .copied()
                    .filter(|&t| t.0 != i as u32)
            });
            if let Some(twin) = twin {
                mesh.halfedges[i].twin = twin;
                mesh.halfedges[twin.0 as usize].twin = HalfEdgeId(i as u32);
            }
        }

        // Boundary half-edges for single-face edges.
        let boundary: Vec<(u32, u32, HalfEdgeId)> = mesh
            .halfedges
            .iter()
            .enumerate()
            .filter(|(_, he)| {
                he.twin.is_null() && mesh.face_users[&pair_key(he.origin.0, he.vertex.0)] == 1
            })
            .map(|(i, he)| (he.origin.0, he.vertex.0, HalfEdgeId(i as u32)))
            .collect();

        for (from, to, he_id) in boundary {
            let boundary_id = HalfEdgeId(mesh.halfedges.len() as u32);
            mesh.halfedges.push(HalfEdge {
                next: HalfEdgeId::NULL,
                prev: HalfEdgeId::NULL,
                twin: he_id,
                vertex: VertexId(from),
                origin: VertexId(to),
                face: FaceId::NULL,
            });
            mesh.halfedges[he_id.0 as usize].twin = boundary_id;
        }

        mesh.link_boundary_edges();

        // Wire edges after boundary linking so they stay out of the
        // boundary loops.
        for &(a, b) in &self.wires {
            let he_a = HalfEdgeId(mesh.halfedges.len() as u32);
            let he_b = HalfEdgeId(he_a.0 + 1);
            mesh.halfedges.push(HalfEdge {
                next: HalfEdgeId::NULL,
                prev: HalfEdgeId::NULL,
                twin: he_b,
                vertex: VertexId(b),
                origin: VertexId(a),
                face: FaceId::NULL,
            });
            mesh.halfedges.push(HalfEdge {
                next: HalfEdgeId::NULL,
                prev: HalfEdgeId::NULL,
                twin: he_a,
                vertex: VertexId(a),
                origin: VertexId(b),
                face: FaceId::NULL,
            });
            if mesh.vertices[a as usize].halfedge.is_null() {
                mesh.vertices[a as usize].halfedge = he_a;
            }
            if mesh.vertices[b as usize].halfedge.is_null() {
                mesh.vertices[b as usize].halfedge = he_b;
            }
            mesh.face_users.entry(pair_key(a, b)).or_insert(0);
        }

        // Per-vertex incident edge lists, one entry per undirected edge.
        mesh.vertex_edges = vec![Vec::new(); mesh.vertices.len()];
        for i in 0..mesh.halfedges.len() {
            let he_id = HalfEdgeId(i as u32);
            let edge = mesh.edge_of(he_id);
            if edge.0 != i as u32 {
                continue;
            }
            let he = mesh.halfedges[i];
            // Non-manifold fans leave twins unlinked, so several
            // half-edges can map to the same vertex pair; keep one.
            let duplicate = mesh.vertex_edges[he.origin.0 as usize]
                .iter()
                .any(|&e| {
                    let (a, b) = mesh.edge_verts(e);
                    pair_key(a.0, b.0) == pair_key(he.origin.0, he.vertex.0)
                });
            if duplicate {
                continue;
            }
            mesh.vertex_edges[he.origin.0 as usize].push(edge);
            mesh.vertex_edges[he.vertex.0 as usize].push(edge);
        }

        mesh
    }
}

impl HalfEdgeMesh {
    /// Links boundary half-edges into loops.
    fn link_boundary_edges(&mut self) {
        let mut boundary_by_source: HashMap<u32, HalfEdgeId> = HashMap::new();
        for (i, he) in self.halfedges.iter().enumerate() {
            if he.face.is_null() {
                boundary_by_source.insert(he.origin.0, HalfEdgeId(i as u32));
            }
        }

        let mut links: Vec<(usize, HalfEdgeId)> = Vec::new();
        for (i, he) in self.halfedges.iter().enumerate() {
            if he.face.is_null() {
                if let Some(&next_id) = boundary_by_source.get(&he.vertex.0) {
                    links.push((i, next_id));
                }
            }
        }

        for (i, next_id) in links {
            self.halfedges[i].next = next_id;
            self.halfedges[next_id.0 as usize].prev = HalfEdgeId(i as u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_strip() -> HalfEdgeMesh {
        // Two quads sharing the edge v1-v4:
        // v2 -- v3 -- v5
        // |      |     |
        // v0 -- v1 -- v4  (y up, x right)
        let mut b = HalfEdgeMesh::builder();
        let v0 = b.vertex(Vec3::new(0.0, 0.0, 0.0));
        let v1 = b.vertex(Vec3::new(1.0, 0.0, 0.0));
        let v2 = b.vertex(Vec3::new(0.0, 1.0, 0.0));
        let v3 = b.vertex(Vec3::new(1.0, 1.0, 0.0));
        let v4 = b.vertex(Vec3::new(2.0, 0.0, 0.0));
        let v5 = b.vertex(Vec3::new(2.0, 1.0, 0.0));
        b.quad(v0, v1, v3, v2);
        b.quad(v1, v4, v5, v3);
        b.build()
    }

    #[test]
    fn test_build_quad_strip() {
        let mesh = quad_strip();
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.face_count(), 2);
        // 8 face half-edges + shared pair + 6 boundary half-edges
        assert_eq!(mesh.halfedges.len(), 14);
    }

    #[test]
    fn test_edge_classification() {
        let mesh = quad_strip();
        let shared = mesh
            .vertex_edges(VertexId(1))
            .iter()
            .copied()
            .find(|&e| mesh.other_vert(e, VertexId(1)) == VertexId(3))
            .unwrap();
        assert!(mesh.is_manifold_edge(shared));

        let rim = mesh
            .vertex_edges(VertexId(0))
            .iter()
            .copied()
            .find(|&e| mesh.other_vert(e, VertexId(0)) == VertexId(1))
            .unwrap();
        assert!(mesh.is_boundary_edge(rim));
    }

    #[test]
    fn test_radial_next_crosses_shared_edge() {
        let mesh = quad_strip();
        let shared = mesh
            .vertex_edges(VertexId(1))
            .iter()
            .copied()
            .find(|&e| mesh.other_vert(e, VertexId(1)) == VertexId(3))
            .unwrap();
        let l = mesh.edge_loop(shared).unwrap();
        let other = mesh.radial_next(l);
        assert_ne!(l, other);
        assert_ne!(mesh.halfedges[l.0 as usize].face, mesh.halfedges[other.0 as usize].face);
        // Boundary edge cycles back to itself.
        let rim = mesh
            .vertex_edges(VertexId(0))
            .iter()
            .copied()
            .find(|&e| mesh.other_vert(e, VertexId(0)) == VertexId(2))
            .unwrap();
        let l_rim = mesh.edge_loop(rim).unwrap();
        assert_eq!(mesh.radial_next(l_rim), l_rim);
    }

    #[test]
    fn test_same_wound_faces_link_radially() {
        // Second quad wound the other way, so the shared edge runs
        // v1 -> v3 in both faces.
        let mut b = HalfEdgeMesh::builder();
        let v0 = b.vertex(Vec3::new(0.0, 0.0, 0.0));
        let v1 = b.vertex(Vec3::new(1.0, 0.0, 0.0));
        let v2 = b.vertex(Vec3::new(0.0, 1.0, 0.0));
        let v3 = b.vertex(Vec3::new(1.0, 1.0, 0.0));
        let v4 = b.vertex(Vec3::new(2.0, 0.0, 0.0));
        let v5 = b.vertex(Vec3::new(2.0, 1.0, 0.0));
        b.quad(v0, v1, v3, v2);
        b.quad(v3, v5, v4, v1);
        let mesh = b.build();

        let shared = mesh
            .vertex_edges(VertexId(1))
            .iter()
            .copied()
            .find(|&e| mesh.other_vert(e, VertexId(1)) == VertexId(3))
            .unwrap();
        // Classification and the radial step must agree.
        assert!(mesh.is_manifold_edge(shared));
        let l = mesh.edge_loop(shared).unwrap();
        let other = mesh.radial_next(l);
        assert_ne!(l, other);
        assert_ne!(
            mesh.halfedges[l.0 as usize].face,
            mesh.halfedges[other.0 as usize].face
        );
        assert_eq!(mesh.radial_next(other), l);
    }

    #[test]
    fn test_other_edge_loop() {
        let mesh = quad_strip();
        let v1 = VertexId(1);
        let bottom = mesh
            .vertex_edges(v1)
            .iter()
            .copied()
            .find(|&e| mesh.other_vert(e, v1) == VertexId(0))
            .unwrap();
        let l = mesh.edge_loop(bottom).unwrap();
        let other = mesh.other_edge_loop(l, v1);
        // The other edge of that quad at v1 is v1-v3.
        let e_other = mesh.edge_of(other);
        assert_eq!(mesh.other_vert(e_other, v1), VertexId(3));
    }

    #[test]
    fn test_wire_edges() {
        let mut b = HalfEdgeMesh::builder();
        let v0 = b.vertex(Vec3::ZERO);
        let v1 = b.vertex(Vec3::X);
        let v2 = b.vertex(Vec3::new(2.0, 0.0, 0.0));
        b.wire_edge(v0, v1);
        b.wire_edge(v1, v2);
        let mesh = b.build();

        assert_eq!(mesh.vertex_edges(VertexId(1)).len(), 2);
        assert!(mesh.vert_is_edge_pair(VertexId(1)));
        let e = mesh.vertex_edges(VertexId(0))[0];
        assert!(mesh.is_wire_edge(e));
        assert_eq!(mesh.vert_edge_count_nonwire(VertexId(1)), 0);
        assert!(mesh.edge_loop(e).is_none());
    }

    #[test]
    fn test_non_manifold_edge_detected() {
        // Three triangles fanned around the same edge v0-v1.
        let mut b = HalfEdgeMesh::builder();
        let v0 = b.vertex(Vec3::ZERO);
        let v1 = b.vertex(Vec3::Y);
        let a = b.vertex(Vec3::X);
        let c = b.vertex(Vec3::Z);
        let d = b.vertex(Vec3::new(-1.0, 0.0, 0.0));
        b.triangle(v0, v1, a);
        b.triangle(v0, v1, c);
        b.triangle(v0, v1, d);
        let mesh = b.build();

        let e = mesh
            .vertex_edges(VertexId(0))
            .iter()
            .copied()
            .find(|&e| mesh.other_vert(e, VertexId(0)) == VertexId(1))
            .unwrap();
        assert_eq!(mesh.edge_face_count(e), 3);
        assert!(!mesh.is_manifold_edge(e));
        assert!(!mesh.is_boundary_edge(e));
    }

    #[test]
    fn test_face_normal_ngon() {
        let mut b = HalfEdgeMesh::builder();
        let ids: Vec<u32> = (0..5)
            .map(|i| {
                let a = i as f32 / 5.0 * std::f32::consts::TAU;
                b.vertex(Vec3::new(a.cos(), a.sin(), 0.0))
            })
            .collect();
        b.face(&ids);
        let mesh = b.build();
        let n = mesh.face_normal(FaceId(0));
        assert!((n - Vec3::Z).length() < 1e-6);
        assert_eq!(mesh.face_sides(FaceId(0)), 5);
    }

    #[test]
    fn test_face_corner() {
        let mesh = quad_strip();
        let l = mesh.face_corner(FaceId(0), VertexId(3)).unwrap();
        assert_eq!(mesh.halfedges[l.0 as usize].origin, VertexId(3));
        assert!(mesh.face_corner(FaceId(0), VertexId(4)).is_none());
    }
}
