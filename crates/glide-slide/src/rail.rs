//! Rail direction discovery.
//!
//! Given a vertex sitting between two edges of a slide loop, walks the
//! faces around the vertex to find the direction the vertex can slide
//! along on one side. The walk crosses faces through the shared-edge
//! relation until it reaches the far loop edge, averaging the
//! normalized spoke edges it passes so a single long edge cannot skew
//! the direction.

use glam::Vec3;
use glide_mesh::{EdgeId, HalfEdgeId, HalfEdgeMesh, VertexId};

use crate::math::{isect_line_plane, line_point_factor, scale_to_length};

/// Walks loop-adjacent faces from `l` around `v` until a loop on
/// `e_next` is found, returning that loop and the slide direction.
///
/// The direction's length encodes the slide distance for that side.
/// Returns `None` for the loop when the walk runs off a boundary; the
/// direction is still filled from whatever was accumulated.
pub fn walk_slide_dir(
    mesh: &HalfEdgeMesh,
    v: VertexId,
    l: HalfEdgeId,
    e_prev: EdgeId,
    e_next: EdgeId,
) -> (Option<HalfEdgeId>, Vec3) {
    let l_first = l;
    let mut l = l;
    let mut vec_accum = Vec3::ZERO;
    let mut vec_accum_len = 0.0f32;
    let mut steps = 0u32;

    let finish = |vec_accum: Vec3, vec_accum_len: f32, steps: u32| {
        if steps > 0 {
            scale_to_length(vec_accum, vec_accum_len / steps as f32)
        } else {
            vec_accum
        }
    };

    loop {
        l = mesh.other_edge_loop(l, v);

        if mesh.edge_of(l) == e_next {
            let dir = if steps > 0 {
                finish(vec_accum, vec_accum_len, steps)
            } else {
                // No spoke edge to average: slide along a direction
                // synthesized from the face we are attached to.
                boundary_dir(mesh, l_first, v, e_prev, e_next)
            };
            return (Some(l), dir);
        }

        // Accumulate the normalized spoke vector; near-degenerate
        // edges are dropped from the average entirely so they cannot
        // blow up the mean length.
        let spoke = mesh.edge_vec(mesh.edge_of(l), v);
        let len = spoke.length();
        if len > f32::EPSILON {
            vec_accum += spoke / len;
            vec_accum_len += len;
            steps += 1;
        }

        let l_other = mesh.other_edge_loop(l, v);
        if mesh.edge_of(l_other) == e_next {
            return (Some(l_other), finish(vec_accum, vec_accum_len, steps));
        }

        let l_radial = mesh.radial_next(l);
        if l_radial == l || l_radial == l_first {
            break;
        }
        l = l_radial;
    }

    (None, finish(vec_accum, vec_accum_len, steps))
}

/// Direction for a corner with no spoke edge to walk: both loop edges
/// belong to the same face.
fn boundary_dir(
    mesh: &HalfEdgeMesh,
    l: HalfEdgeId,
    v: VertexId,
    e_prev: EdgeId,
    e_next: EdgeId,
) -> Vec3 {
    let face = mesh.halfedges[l.0 as usize].face;
    let Some(corner) = mesh.face_corner(face, v) else {
        return Vec3::ZERO;
    };

    if mesh.face_sides(face) == 4 {
        // Sliding diagonally across the quad works well.
        let he = &mesh.halfedges[corner.0 as usize];
        let diagonal = mesh.halfedges[he.next.0 as usize].vertex;
        return mesh.position(diagonal) - mesh.position(v);
    }

    // N-gon: head into the face, perpendicular to the corner tangent,
    // reaching as far as the opposite boundary.
    let tangent = corner_tangent(mesh, corner, v);
    let dir = mesh.face_normal(face).cross(tangent);

    let dist = match opposite_co(mesh, corner, tangent) {
        Some(co) => mesh.position(v).distance(co),
        None => (mesh.edge_length(e_prev) + mesh.edge_length(e_next)) / 2.0,
    };
    scale_to_length(dir, dist)
}

/// Averaged direction of the two face edges meeting at the corner.
fn corner_tangent(mesh: &HalfEdgeMesh, corner: HalfEdgeId, v: VertexId) -> Vec3 {
    let he = &mesh.halfedges[corner.0 as usize];
    let co = mesh.position(v);
    let co_prev = mesh.position(mesh.halfedges[he.prev.0 as usize].origin);
    let co_next = mesh.position(he.vertex);
    ((co - co_prev).normalize_or_zero() + (co_next - co).normalize_or_zero()).normalize_or_zero()
}

/// Closest point where the plane through the corner vertex (normal
/// `plane_no`) crosses a non-adjacent boundary segment of the polygon.
///
/// Segments are tested in face-traversal order starting after the
/// corner; on an exact distance tie the first hit wins, which keeps the
/// result deterministic.
fn opposite_co(mesh: &HalfEdgeMesh, corner: HalfEdgeId, plane_no: Vec3) -> Option<Vec3> {
    let co_v = mesh.position(mesh.halfedges[corner.0 as usize].origin);
    let l_first = mesh.halfedges[corner.0 as usize].next;
    let l_last = mesh.halfedges[corner.0 as usize].prev;

    let mut best: Option<(f32, Vec3)> = None;
    let mut l_iter = l_first;
    while l_iter != l_last {
        let he = &mesh.halfedges[l_iter.0 as usize];
        let seg_a = mesh.position(he.origin);
        let seg_b = mesh.position(he.vertex);

        if let Some(hit) = isect_line_plane(seg_a, seg_b, co_v, plane_no) {
            let fac = line_point_factor(hit, seg_a, seg_b);
            // Allow slight overlap so float error cannot miss the hit.
            if fac > -f32::EPSILON && fac < 1.0 + f32::EPSILON {
                let dist = co_v.distance(hit);
                if best.map_or(true, |(d, _)| dist < d) {
                    best = Some((dist, hit));
                }
            }
        }
        l_iter = he.next;
    }

    best.map(|(_, co)| co)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_mesh::{grid, ngon_fan};

    fn edge_between(mesh: &HalfEdgeMesh, a: u32, b: u32) -> EdgeId {
        mesh.vertex_edges(VertexId(a))
            .iter()
            .copied()
            .find(|&e| mesh.other_vert(e, VertexId(a)) == VertexId(b))
            .expect("edge exists")
    }

    #[test]
    fn test_walk_across_interior_vertex() {
        // 2x2 grid, center vertex 4; vertical loop edges 1-4 and 4-7.
        let mesh = grid(2, 2);
        let v = VertexId(4);
        let e_prev = edge_between(&mesh, 1, 4);
        let e_next = edge_between(&mesh, 4, 7);
        let l = mesh.edge_loop(e_prev).unwrap();

        let (l_next, dir) = walk_slide_dir(&mesh, v, l, e_prev, e_next);
        assert!(l_next.is_some());
        // One spoke crossed on either side: direction along +-X, unit length.
        assert!(dir.length() > 0.99 && dir.length() < 1.01);
        assert!(dir.y.abs() < 1e-6);
        assert!(dir.x.abs() > 0.99);
    }

    #[test]
    fn test_quad_corner_uses_diagonal() {
        // Corner vertex of a single quad: both loop edges on one face.
        let mesh = grid(1, 1);
        let v = VertexId(0);
        let e_prev = edge_between(&mesh, 0, 1);
        let e_next = edge_between(&mesh, 0, 2);
        let l = mesh.edge_loop(e_prev).unwrap();

        let (l_next, dir) = walk_slide_dir(&mesh, v, l, e_prev, e_next);
        assert!(l_next.is_some());
        // Diagonal to the opposite corner (1, 1, 0).
        assert!((dir - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_ngon_corner_hits_opposite_side() {
        let mesh = ngon_fan(6, 1.0);
        let v = VertexId(0);
        let e_prev = edge_between(&mesh, 0, 1);
        let e_next = edge_between(&mesh, 0, 5);
        let l = mesh.edge_loop(e_prev).unwrap();

        let (l_next, dir) = walk_slide_dir(&mesh, v, l, e_prev, e_next);
        assert!(l_next.is_some());
        assert!(dir.length() > f32::EPSILON);
        assert!(dir.is_finite());
        // Hexagon corner at (1, 0): the inward probe spans the width, 2.
        assert!((dir.length() - 2.0).abs() < 1e-3);
        assert!(dir.x < 0.0);
    }

    #[test]
    fn test_degenerate_spokes_do_not_poison_average() {
        // Grid with a zero-length spoke: collapse vertex 5 onto 4.
        let mut mesh = grid(2, 2);
        mesh.set_position(VertexId(5), mesh.position(VertexId(4)));
        let v = VertexId(4);
        let e_prev = edge_between(&mesh, 1, 4);
        let e_next = edge_between(&mesh, 4, 7);
        let l = mesh.edge_loop(e_prev).unwrap();

        let (_, dir) = walk_slide_dir(&mesh, v, l, e_prev, e_next);
        assert!(dir.is_finite());
        let (_, dir_other) = walk_slide_dir(
            &mesh,
            v,
            mesh.radial_next(mesh.edge_loop(e_prev).unwrap()),
            e_prev,
            e_next,
        );
        assert!(dir_other.is_finite());
    }
}
