//! Slide-vertex construction.
//!
//! Walks the selected edge loops of a mesh and builds, for every
//! selected vertex, the pair of rail directions it can slide along.
//! Two builders exist: the double-sided one rides the faces flanking
//! the selection, the single-sided one follows the longest unselected
//! edge at each vertex and propagates directions across wire chains.

use std::collections::HashMap;

use glam::{Vec2, Vec3};
use glide_mesh::{EdgeId, HalfEdgeId, HalfEdgeMesh, MeshSelection, VertexId};

use crate::error::SlideError;
use crate::math::line_point_factor;
use crate::rail::walk_slide_dir;

/// One vertex of a slide loop with its two rails.
///
/// Rails are indexed 0/1 matching the two faces flanking the loop; a
/// side with no geometry keeps a null side vertex and a zero direction.
#[derive(Debug, Clone)]
pub struct SlideVert {
    /// The vertex being slid.
    pub vert: VertexId,
    /// Rest position, sampled when the slide began.
    pub co_orig: Vec3,
    /// Rail target vertex per side, used for clamped interpolation.
    pub side_vert: [VertexId; 2],
    /// Rail direction per side; length encodes the full-slide distance.
    pub dir_side: [Vec3; 2],
    /// Which discovered loop this vertex belongs to.
    pub loop_nr: usize,
    /// Projected length factor used by even mode.
    pub edge_len: f32,
}

impl SlideVert {
    fn new(vert: VertexId, co_orig: Vec3) -> Self {
        SlideVert {
            vert,
            co_orig,
            side_vert: [VertexId::NULL; 2],
            dir_side: [Vec3::ZERO; 2],
            loop_nr: 0,
            edge_len: 0.0,
        }
    }

    /// Returns true if the given side has a rail.
    pub fn has_side(&self, side: usize) -> bool {
        !self.side_vert[side].is_null() || self.dir_side[side] != Vec3::ZERO
    }
}

/// Per-mesh slide state: the slide vertices plus the screen-space
/// reference segment the input factor is measured against.
#[derive(Debug, Clone)]
pub struct SlideData {
    /// All slide vertices, grouped by ascending `loop_nr`.
    pub verts: Vec<SlideVert>,
    /// Number of distinct loops discovered.
    pub loop_count: usize,
    /// Index into `verts` of the vertex nearest the initial cursor.
    pub active: usize,
    /// Screen-space anchor of the input direction.
    pub mval_start: Vec2,
    /// Screen-space tip of the input direction.
    pub mval_end: Vec2,
}

impl SlideData {
    /// The active slide vertex.
    pub fn active_vert(&self) -> &SlideVert {
        &self.verts[self.active]
    }
}

const INDEX_UNSET: i32 = -1;
const INDEX_INVALID: i32 = -2;

fn get_other_edge(
    mesh: &HalfEdgeMesh,
    selection: &MeshSelection,
    v: VertexId,
    e: EdgeId,
) -> Option<EdgeId> {
    mesh.vertex_edges(v)
        .iter()
        .copied()
        .find(|&e_iter| e_iter != e && selection.edge_selected(mesh, e_iter))
}

/// True when sliding through `v` should keep walking across faces
/// rather than stop at the unselected edge `e_dir`.
fn vert_is_inner(mesh: &HalfEdgeMesh, v: VertexId, e_dir: EdgeId) -> bool {
    !mesh.is_boundary_edge(e_dir) && mesh.vert_edge_count_nonwire(v) == 2
}

fn sv_ensure(
    table: &mut [i32],
    verts: &mut Vec<SlideVert>,
    mesh: &HalfEdgeMesh,
    v: VertexId,
) -> usize {
    let slot = &mut table[v.0 as usize];
    debug_assert_ne!(*slot, INDEX_INVALID);
    if *slot == INDEX_UNSET {
        *slot = verts.len() as i32;
        verts.push(SlideVert::new(v, mesh.position(v)));
        verts.len() - 1
    } else {
        *slot as usize
    }
}

/// Checks that every selected vertex lies on an unambiguous edge path
/// and that every selected edge can be slid across, and returns each
/// vertex's representative selected edge.
fn validate_selection(
    mesh: &HalfEdgeMesh,
    selection: &MeshSelection,
) -> Result<HashMap<u32, EdgeId>, SlideError> {
    let mut vert_edge: HashMap<u32, EdgeId> = HashMap::new();
    let mut order: Vec<u32> = selection.vertices.iter().copied().collect();
    order.sort_unstable();

    for &vi in &order {
        let v = VertexId(vi);
        let mut numsel = 0u32;
        for &e in mesh.vertex_edges(v) {
            if selection.edge_selected(mesh, e) {
                vert_edge.insert(vi, e);
                numsel += 1;
            }
        }
        if numsel == 0 || numsel > 2 {
            return Err(SlideError::InvalidSelection {
                vertex: vi,
                selected_edges: numsel,
            });
        }
    }

    let mut edges: Vec<&glide_mesh::Edge> = selection.edges.iter().collect();
    edges.sort_unstable_by_key(|e| (e.0, e.1));
    for edge in edges {
        let v = VertexId(edge.0);
        let Some(e) = mesh
            .vertex_edges(v)
            .iter()
            .copied()
            .find(|&e| mesh.other_vert(e, v) == VertexId(edge.1))
        else {
            continue;
        };
        if !mesh.is_manifold_edge(e) && !mesh.is_boundary_edge(e) {
            return Err(SlideError::NonManifoldEdge {
                edge: (edge.0, edge.1),
            });
        }
    }

    Ok(vert_edge)
}

/// Builds slide vertices with a rail on each side of the selected
/// loops.
///
/// Loops are discovered by rewinding each tagged vertex to one end of
/// its selected chain (or around a cycle) and then walking forward,
/// carrying a face loop on each side. When one side's face run ends at
/// a boundary the walk continues one-sided and re-acquires the side
/// through the radial relation as soon as geometry reappears.
pub fn build_double_side(
    mesh: &HalfEdgeMesh,
    selection: &MeshSelection,
) -> Result<SlideData, SlideError> {
    let vert_edge = validate_selection(mesh, selection)?;

    let nv = mesh.vertex_count();
    let mut sv_table = vec![INDEX_INVALID; nv];
    let mut tag = vec![false; nv];
    let mut sv_tot = 0usize;
    for &vi in vert_edge.keys() {
        tag[vi as usize] = true;
        sv_table[vi as usize] = INDEX_UNSET;
        sv_tot += 1;
    }
    if sv_tot == 0 {
        return Err(SlideError::NoValidGeometry);
    }

    let mut verts: Vec<SlideVert> = Vec::with_capacity(sv_tot);
    let mut loop_nr = 0usize;

    while let Some(start) = tag.iter().position(|&t| t) {
        let mut v = VertexId(start as u32);
        let e_rewind_first = vert_edge[&v.0];
        let mut e = e_rewind_first;

        // Rewind to one end of the chain; a cycle rewinds all the way
        // around and stops where it started.
        loop {
            match get_other_edge(mesh, selection, v, e) {
                None => {
                    e = vert_edge[&v.0];
                    break;
                }
                Some(e_next) => {
                    e = e_next;
                    let v_next = mesh.other_vert(e, v);
                    if !tag[v_next.0 as usize] {
                        break;
                    }
                    v = v_next;
                }
            }
            if e == e_rewind_first {
                break;
            }
        }

        tag[v.0 as usize] = false;

        let Some(first_loop) = mesh.edge_loop(e) else {
            // Wire-only component, rejected earlier.
            continue;
        };
        let mut l_a = Some(first_loop);
        let mut l_b = {
            let r = mesh.radial_next(first_loop);
            (r != first_loop).then_some(r)
        };
        let mut l_a_prev: Option<HalfEdgeId> = None;
        let mut l_b_prev: Option<HalfEdgeId> = None;

        // Initial directions at the chain end.
        let mut vec_a = Vec3::ZERO;
        let mut vec_b = Vec3::ZERO;
        for (l_side, vec) in [(l_a, &mut vec_a), (l_b, &mut vec_b)] {
            let Some(l) = l_side else { continue };
            if let Some(e_sel) = get_other_edge(mesh, selection, v, e) {
                *vec = walk_slide_dir(mesh, v, l, e, e_sel).1;
            } else {
                let e_dir = mesh.edge_of(mesh.other_edge_loop(l, v));
                if vert_is_inner(mesh, v, e_dir) {
                    *vec = walk_slide_dir(mesh, v, l, e, e_dir).1;
                } else {
                    *vec = mesh.edge_vec(e_dir, v);
                }
            }
        }

        let walk_first_e = e;
        loop {
            let svi = sv_ensure(&mut sv_table, &mut verts, mesh, v);
            verts[svi].loop_nr = loop_nr;

            if let Some(l) = l_a.or(l_a_prev) {
                let l_side = mesh.other_edge_loop(l, v);
                verts[svi].side_vert[0] = mesh.other_vert(mesh.edge_of(l_side), v);
                verts[svi].dir_side[0] = vec_a;
            }
            if let Some(l) = l_b.or(l_b_prev) {
                let l_side = mesh.other_edge_loop(l, v);
                verts[svi].side_vert[1] = mesh.other_vert(mesh.edge_of(l_side), v);
                verts[svi].dir_side[1] = vec_b;
            }

            let v_prev = v;
            v = mesh.other_vert(e, v);
            let e_prev = e;

            match get_other_edge(mesh, selection, v, e) {
                None => {
                    // Terminal vertex of an open chain: rails come
                    // straight from the flanking faces.
                    let svi = sv_ensure(&mut sv_table, &mut verts, mesh, v);
                    verts[svi].loop_nr = loop_nr;

                    for (side, l_side) in [(0, l_a), (1, l_b)] {
                        let Some(l) = l_side else { continue };
                        let e_dir = mesh.edge_of(mesh.other_edge_loop(l, v));
                        verts[svi].side_vert[side] = mesh.other_vert(e_dir, v);
                        verts[svi].dir_side[side] = if vert_is_inner(mesh, v, e_dir) {
                            walk_slide_dir(mesh, v, l, e_prev, e_dir).1
                        } else {
                            mesh.edge_vec(e_dir, v)
                        };
                    }

                    tag[v.0 as usize] = false;
                    tag[v_prev.0 as usize] = false;
                    break;
                }
                Some(e_next) => e = e_next,
            }

            let l_a_ok_prev = l_a.is_some();
            let l_b_ok_prev = l_b.is_some();
            l_a_prev = l_a;
            l_b_prev = l_b;

            if let Some(l) = l_a {
                let (l_next, dir) = walk_slide_dir(mesh, v, l, e_prev, e);
                l_a = l_next;
                vec_a = dir;
            } else {
                vec_a = Vec3::ZERO;
            }
            if let Some(l) = l_b {
                let (l_next, dir) = walk_slide_dir(mesh, v, l, e_prev, e);
                l_b = l_next;
                vec_b = dir;
            } else {
                vec_b = Vec3::ZERO;
            }

            if l_a.is_none() || l_b.is_none() {
                if let (Some(l), None) = (l_b, l_a) {
                    // Side A ran off the mesh; try crossing back over
                    // from side B.
                    let r = mesh.radial_next(l);
                    l_a = (r != l).then_some(r);
                } else if let (Some(l), None) = (l_a, l_b) {
                    let r = mesh.radial_next(l);
                    l_b = (r != l).then_some(r);
                } else if l_a.is_none() && l_b.is_none() {
                    // Both sides lost (wire gap in the walk); re-seed
                    // from the next edge's faces.
                    if let Some(l) = mesh.edge_loop(e) {
                        let r = mesh.radial_next(l);
                        if l_a_ok_prev {
                            l_a = Some(l);
                            l_b = (r != l).then_some(r);
                        } else if l_b_ok_prev {
                            l_b = Some(l);
                            l_a = (r != l).then_some(r);
                        }
                    }
                }
                if !l_a_ok_prev {
                    if let Some(l) = l_a {
                        vec_a = walk_slide_dir(mesh, v, l, e, e_prev).1;
                    }
                }
                if !l_b_ok_prev {
                    if let Some(l) = l_b {
                        vec_b = walk_slide_dir(mesh, v, l, e, e_prev).1;
                    }
                }
            }

            tag[v.0 as usize] = false;
            tag[v_prev.0 as usize] = false;

            if e == walk_first_e || (l_a.is_none() && l_b.is_none()) {
                break;
            }
        }

        loop_nr += 1;
    }

    debug_assert_eq!(verts.len(), sv_tot);
    if verts.is_empty() {
        return Err(SlideError::NoValidGeometry);
    }

    Ok(SlideData {
        verts,
        loop_count: loop_nr,
        active: 0,
        mval_start: Vec2::ZERO,
        mval_end: Vec2::ZERO,
    })
}

/// Builds slide vertices with a single rail per vertex: the longest
/// unselected edge leaving it.
///
/// Selected vertices joined only by wire edges have no such edge; their
/// directions are interpolated between the two anchored ends of the
/// wire chain they sit on.
pub fn build_single_side(
    mesh: &HalfEdgeMesh,
    selection: &MeshSelection,
) -> Result<SlideData, SlideError> {
    let nv = mesh.vertex_count();

    let mut order: Vec<u32> = selection.vertices.iter().copied().collect();
    order.sort_unstable();

    let mut vert_edge: HashMap<u32, EdgeId> = HashMap::new();
    for &vi in &order {
        let v = VertexId(vi);
        let mut best: Option<(f32, EdgeId)> = None;
        for &e in mesh.vertex_edges(v) {
            if selection.edge_selected(mesh, e) {
                continue;
            }
            let len_sq = mesh.edge_length_sq(e);
            if best.map_or(true, |(best_len, _)| len_sq > best_len) {
                best = Some((len_sq, e));
            }
        }
        if let Some((_, e)) = best {
            vert_edge.insert(vi, e);
        }
    }
    if vert_edge.is_empty() {
        return Err(SlideError::NoValidGeometry);
    }

    let mut sv_table = vec![INDEX_UNSET; nv];
    let mut verts: Vec<SlideVert> = Vec::with_capacity(vert_edge.len());

    for &vi in &order {
        let Some(&e) = vert_edge.get(&vi) else { continue };
        let v = VertexId(vi);
        let other = mesh.other_vert(e, v);
        let mut sv = SlideVert::new(v, mesh.position(v));
        sv.side_vert[0] = other;
        sv.dir_side[0] = mesh.position(other) - mesh.position(v);
        sv_table[vi as usize] = verts.len() as i32;
        verts.push(sv);
    }

    let anchored = verts.len();
    if anchored != selection.vertices.len() {
        wire_chain_directions(mesh, selection, &mut verts, &mut sv_table, anchored);
    }

    Ok(SlideData {
        verts,
        loop_count: 1,
        active: 0,
        mval_start: Vec2::ZERO,
        mval_end: Vec2::ZERO,
    })
}

/// Fills directions for selected wire-chain vertices by walking out of
/// each anchored vertex and blending the two end directions along the
/// chain. Chains that never reach a second anchor are dropped.
fn wire_chain_directions(
    mesh: &HalfEdgeMesh,
    selection: &MeshSelection,
    verts: &mut Vec<SlideVert>,
    sv_table: &mut [i32],
    anchored: usize,
) {
    for i in 0..anchored {
        let v_anchor = verts[i].vert;
        let edges: Vec<EdgeId> = mesh.vertex_edges(v_anchor).to_vec();
        for e_start in edges {
            let chain_start = verts.len();
            let mut v = v_anchor;
            let mut e = e_start;
            let mut sv_end: Option<usize> = None;

            loop {
                let v_other = mesh.other_vert(e, v);
                // A chain ends at a vertex that already has a slide
                // vertex or that is not a plain two-edge link.
                let endpoint = u32::from(sv_table[v_other.0 as usize] != INDEX_UNSET)
                    + u32::from(!mesh.vert_is_edge_pair(v_other));

                if endpoint == 0
                    && selection.edge_selected(mesh, e)
                    && selection.vertex_selected(v_other)
                {
                    sv_table[v_other.0 as usize] = verts.len() as i32;
                    let mut sv = SlideVert::new(v_other, mesh.position(v_other));
                    sv.dir_side[0] = verts[i].dir_side[0];
                    verts.push(sv);

                    let Some(e_next) = mesh
                        .vertex_edges(v_other)
                        .iter()
                        .copied()
                        .find(|&e_iter| e_iter != e)
                    else {
                        break;
                    };
                    v = v_other;
                    e = e_next;
                } else {
                    if endpoint == 2 && verts.len() != chain_start {
                        let end = sv_table[v_other.0 as usize];
                        if (0..verts.len() as i32).contains(&end) {
                            sv_end = Some(end as usize);
                        }
                    }
                    break;
                }
            }

            if let Some(end) = sv_end {
                let co_src = mesh.position(verts[i].vert);
                let co_dst = mesh.position(verts[end].vert);
                let dir_src = verts[i].dir_side[0];
                let dir_dst = verts[end].dir_side[0];
                for j in chain_start..verts.len() {
                    let fac = line_point_factor(mesh.position(verts[j].vert), co_src, co_dst);
                    verts[j].dir_side[0] = dir_src.lerp(dir_dst, fac);
                }
            } else if verts.len() != chain_start {
                // Unanchored chain: discard the tentative verts but
                // keep their table slots marked so later walks from
                // other anchors stop at them instead of re-adding.
                for j in chain_start..verts.len() {
                    sv_table[verts[j].vert.0 as usize] = INDEX_INVALID;
                }
                verts.truncate(chain_start);
            }
        }
    }
}
