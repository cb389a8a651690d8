//! Mesh primitives for tools and tests.

use glam::Vec3;

use crate::halfedge::HalfEdgeMesh;

/// Builds a planar quad grid in the XY plane.
///
/// `nx` by `ny` quads, unit spacing, vertex `(i, j)` at index
/// `j * (nx + 1) + i`.
pub fn grid(nx: u32, ny: u32) -> HalfEdgeMesh {
    let mut b = HalfEdgeMesh::builder();
    for j in 0..=ny {
        for i in 0..=nx {
            b.vertex(Vec3::new(i as f32, j as f32, 0.0));
        }
    }
    let stride = nx + 1;
    for j in 0..ny {
        for i in 0..nx {
            let v0 = j * stride + i;
            let v1 = v0 + 1;
            let v2 = v1 + stride;
            let v3 = v0 + stride;
            b.quad(v0, v1, v2, v3);
        }
    }
    b.build()
}

/// Builds an open-ended quad cylinder around the Z axis.
///
/// `segments` quads around, `rings` quads along Z. Ring `j` sits at
/// `z = j`, vertex `(i, j)` at index `j * segments + i`. Every
/// horizontal ring is a closed edge loop.
pub fn tube(segments: u32, rings: u32, radius: f32) -> HalfEdgeMesh {
    debug_assert!(segments >= 3);
    let mut b = HalfEdgeMesh::builder();
    for j in 0..=rings {
        for i in 0..segments {
            let a = i as f32 / segments as f32 * std::f32::consts::TAU;
            b.vertex(Vec3::new(radius * a.cos(), radius * a.sin(), j as f32));
        }
    }
    for j in 0..rings {
        for i in 0..segments {
            let i_next = (i + 1) % segments;
            let v0 = j * segments + i;
            let v1 = j * segments + i_next;
            let v2 = (j + 1) * segments + i_next;
            let v3 = (j + 1) * segments + i;
            b.quad(v0, v1, v2, v3);
        }
    }
    b.build()
}

/// Builds a single planar n-gon in the XY plane.
pub fn ngon_fan(sides: u32, radius: f32) -> HalfEdgeMesh {
    debug_assert!(sides >= 3);
    let mut b = HalfEdgeMesh::builder();
    let ids: Vec<u32> = (0..sides)
        .map(|i| {
            let a = i as f32 / sides as f32 * std::f32::consts::TAU;
            b.vertex(Vec3::new(radius * a.cos(), radius * a.sin(), 0.0))
        })
        .collect();
    b.face(&ids);
    b.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::halfedge::VertexId;

    #[test]
    fn test_grid_counts() {
        let mesh = grid(3, 2);
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.face_count(), 6);
        // Interior vertex has 4 edges, corner has 2.
        assert_eq!(mesh.vertex_edges(VertexId(5)).len(), 4);
        assert_eq!(mesh.vertex_edges(VertexId(0)).len(), 2);
    }

    #[test]
    fn test_tube_closed_rings() {
        let mesh = tube(6, 2, 1.0);
        assert_eq!(mesh.vertex_count(), 18);
        assert_eq!(mesh.face_count(), 12);
        // Middle-ring vertices are interior: all four edges manifold.
        for &e in mesh.vertex_edges(VertexId(7)) {
            assert!(mesh.is_manifold_edge(e));
        }
    }

    #[test]
    fn test_ngon() {
        let mesh = ngon_fan(6, 1.0);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.face_sides(crate::halfedge::FaceId(0)), 6);
    }
}
