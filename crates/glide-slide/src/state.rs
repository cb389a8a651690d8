//! Screen-space interaction state.
//!
//! The slide factor is driven by the cursor, so after the slide
//! vertices are built each mesh gets a screen-space reference segment:
//! half the projected rail pair nearest the cursor, anchored at the
//! initial cursor position. Cursor motion along that segment maps
//! linearly onto the factor.

use glam::{Mat4, Vec2, Vec3};

use crate::math::dist_sq_to_segment_2d;
use crate::verts::{SlideData, SlideVert};
use glide_mesh::{HalfEdgeMesh, MeshSelection};

/// Projection from mesh space onto the screen.
pub trait Viewport {
    /// Projects a point to screen coordinates.
    fn project(&self, co: Vec3) -> Vec2;

    /// Whether the edge between the two points is visible. Occluded
    /// edges are skipped when choosing the reference direction.
    fn edge_visible(&self, _a: Vec3, _b: Vec3) -> bool {
        true
    }
}

/// Viewport backed by a combined view-projection matrix.
#[derive(Debug, Clone, Copy)]
pub struct MatrixViewport {
    /// Combined view-projection matrix.
    pub view_proj: Mat4,
    /// Target size in pixels.
    pub size: Vec2,
}

impl MatrixViewport {
    /// Creates a viewport from a view-projection matrix and pixel size.
    pub fn new(view_proj: Mat4, size: Vec2) -> Self {
        MatrixViewport { view_proj, size }
    }
}

impl Viewport for MatrixViewport {
    fn project(&self, co: Vec3) -> Vec2 {
        let clip = self.view_proj * co.extend(1.0);
        if clip.w.abs() <= f32::EPSILON {
            return Vec2::ZERO;
        }
        let ndc = Vec2::new(clip.x, clip.y) / clip.w;
        (ndc * 0.5 + 0.5) * self.size
    }
}

/// Projects both rail endpoints of a slide vertex.
///
/// A missing side vert projects the synthetic rail end instead.
fn pair_project<V: Viewport>(
    mesh: &HalfEdgeMesh,
    sv: &SlideVert,
    viewport: &V,
) -> (Vec2, Vec2) {
    let end = |side: usize| {
        if sv.side_vert[side].is_null() {
            sv.co_orig + sv.dir_side[side]
        } else {
            mesh.position(sv.side_vert[side])
        }
    };
    (viewport.project(end(0)), viewport.project(end(1)))
}

fn init_mval(data: &mut SlideData, cursor: Vec2, mut mval_dir: Vec2) {
    // Possible all of the edge loops are pointing directly at the view.
    if mval_dir.length_squared() < 0.1 {
        mval_dir = Vec2::new(0.0, 100.0);
    }
    data.mval_start = cursor;
    data.mval_end = cursor + mval_dir * 0.5;
}

/// Picks the screen-space reference segment for the slide and aligns
/// every loop's sides with it.
///
/// The projected rail pair nearest the cursor defines the direction;
/// visibility is probed per unselected cross edge so hidden geometry
/// does not steer the gesture. Loops whose own nearest pair points the
/// other way get their sides swapped so one cursor motion moves all
/// loops coherently. When every pair projects to nearly nothing (loops
/// pointing into the view) a screen-vertical fallback keeps the input
/// usable.
pub fn calc_mval_range<V: Viewport>(
    mesh: &HalfEdgeMesh,
    data: &mut SlideData,
    selection: &MeshSelection,
    viewport: &V,
    cursor: Vec2,
    use_occlude: bool,
    use_calc_direction: bool,
) {
    let mut mval_dir = Vec2::ZERO;
    let mut dist_best_sq = -1.0f32;
    let mut loop_dir = vec![Vec2::ZERO; data.loop_count];
    let mut loop_mindist = vec![-1.0f32; data.loop_count];

    for sv in &data.verts {
        // Search cross edges for a visible edge near the cursor, then
        // use the rail pair to build the screen vector.
        for &e in mesh.vertex_edges(sv.vert) {
            if selection.edge_selected(mesh, e) {
                continue;
            }

            let (ea, eb) = mesh.edge_verts(e);
            let is_visible =
                !use_occlude || viewport.edge_visible(mesh.position(ea), mesh.position(eb));
            if !is_visible && !use_calc_direction {
                continue;
            }

            let (sco_a, sco_b) = pair_project(mesh, sv, viewport);
            let dist_sq = dist_sq_to_segment_2d(cursor, sco_b, sco_a);

            if is_visible
                && (dist_best_sq == -1.0
                    || (dist_sq < dist_best_sq && (sco_b - sco_a).length_squared() > 0.1))
            {
                dist_best_sq = dist_sq;
                mval_dir = sco_b - sco_a;
            }

            if use_calc_direction {
                let nr = sv.loop_nr;
                if loop_mindist[nr] == -1.0 || dist_sq < loop_mindist[nr] {
                    loop_mindist[nr] = dist_sq;
                    loop_dir[nr] = sco_b - sco_a;
                }
            }
        }
    }

    if use_calc_direction {
        // Switch sides where a loop runs against the global direction.
        for sv in &mut data.verts {
            if loop_dir[sv.loop_nr].dot(mval_dir) < 0.0 {
                sv.side_vert.swap(0, 1);
                sv.dir_side.swap(0, 1);
            }
        }
    }

    init_mval(data, cursor, mval_dir);
}

/// Recomputes the reference segment from the active vertex after a
/// view change, keeping the gesture continuous.
pub fn reproject_input<V: Viewport>(
    mesh: &HalfEdgeMesh,
    data: &mut SlideData,
    viewport: &V,
    cursor: Vec2,
) {
    let (sco_a, sco_b) = pair_project(mesh, data.active_vert(), viewport);
    init_mval(data, cursor, sco_b - sco_a);
}

/// Prepares even-mode data: the rail-to-rail length of every slide
/// vertex and the active vertex the even profile is measured from,
/// chosen as the one nearest the cursor on screen.
pub fn calc_even<V: Viewport>(data: &mut SlideData, viewport: &V, cursor: Vec2) {
    let mut dist_min_sq = f32::MAX;
    for (i, sv) in data.verts.iter_mut().enumerate() {
        sv.edge_len = sv.dir_side[0].distance(sv.dir_side[1]);

        let proj = viewport.project(sv.co_orig);
        let dist_sq = cursor.distance_squared(proj);
        if dist_sq < dist_min_sq {
            dist_min_sq = dist_sq;
            data.active = i;
        }
    }
}

/// Maps a cursor position onto the slide factor.
///
/// 0 at `mval_start`, 1 at `mval_end`, linear beyond both.
pub fn factor_from_cursor(data: &SlideData, mval: Vec2) -> f32 {
    let dir = data.mval_end - data.mval_start;
    let len_sq = dir.length_squared();
    if len_sq <= f32::EPSILON {
        return 0.0;
    }
    (mval - data.mval_start).dot(dir) / len_sq
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verts::build_double_side;
    use glide_mesh::grid;

    /// Drops Z, mapping mesh XY straight onto the screen.
    struct TopView;

    impl Viewport for TopView {
        fn project(&self, co: Vec3) -> Vec2 {
            Vec2::new(co.x, co.y)
        }
    }

    /// Projects everything onto a single point.
    struct DegenerateView;

    impl Viewport for DegenerateView {
        fn project(&self, _co: Vec3) -> Vec2 {
            Vec2::ZERO
        }
    }

    fn column_slide() -> (HalfEdgeMesh, MeshSelection, SlideData) {
        let mesh = grid(4, 4);
        let mut sel = MeshSelection::new();
        sel.select_path(&[2, 7, 12, 17, 22]);
        let data = build_double_side(&mesh, &sel).unwrap();
        (mesh, sel, data)
    }

    #[test]
    fn test_mval_range_aligns_sides() {
        let mesh = grid(4, 4);
        let mut sel = MeshSelection::new();
        sel.select_path(&[1, 6, 11, 16, 21]);
        sel.select_path(&[3, 8, 13, 18, 23]);
        let mut data = build_double_side(&mesh, &sel).unwrap();

        let cursor = Vec2::new(2.0, 2.0);
        calc_mval_range(&mesh, &mut data, &sel, &TopView, cursor, false, true);

        // After alignment every side-0 rail points the same way.
        let sign = data.verts[0].dir_side[0].x.signum();
        for sv in &data.verts {
            assert!(sv.dir_side[0].x * sign > 0.0);
            assert!(sv.dir_side[1].x * sign < 0.0);
        }
        // Reference segment is half the projected rail pair, which
        // spans two grid units.
        assert_eq!(data.mval_start, cursor);
        let dir = data.mval_end - data.mval_start;
        assert!((dir.length() - 1.0).abs() < 1e-4);
        assert!(dir.y.abs() < 1e-5);
    }

    #[test]
    fn test_mval_range_fallback_when_view_aligned() {
        let (mesh, sel, mut data) = column_slide();
        let cursor = Vec2::new(7.0, 9.0);
        calc_mval_range(&mesh, &mut data, &sel, &DegenerateView, cursor, false, true);
        assert_eq!(data.mval_start, cursor);
        assert_eq!(data.mval_end, Vec2::new(7.0, 59.0));
    }

    #[test]
    fn test_reproject_input_follows_active_vert() {
        let (mesh, sel, mut data) = column_slide();
        let cursor = Vec2::new(2.0, 2.0);
        calc_mval_range(&mesh, &mut data, &sel, &TopView, cursor, false, true);
        calc_even(&mut data, &TopView, cursor);

        let cursor_moved = Vec2::new(30.0, 40.0);
        reproject_input(&mesh, &mut data, &TopView, cursor_moved);
        assert_eq!(data.mval_start, cursor_moved);
        // Still half the active vert's projected pair.
        assert!(((data.mval_end - data.mval_start).length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_factor_from_cursor() {
        let (_, _, mut data) = column_slide();
        data.mval_start = Vec2::new(10.0, 10.0);
        data.mval_end = Vec2::new(20.0, 10.0);

        assert_eq!(factor_from_cursor(&data, Vec2::new(10.0, 10.0)), 0.0);
        assert_eq!(factor_from_cursor(&data, Vec2::new(20.0, 10.0)), 1.0);
        assert_eq!(factor_from_cursor(&data, Vec2::new(15.0, 25.0)), 0.5);
        assert_eq!(factor_from_cursor(&data, Vec2::new(0.0, 10.0)), -1.0);

        // Degenerate segment never produces NaN.
        data.mval_end = data.mval_start;
        assert_eq!(factor_from_cursor(&data, Vec2::new(99.0, 99.0)), 0.0);
    }

    #[test]
    fn test_calc_even_active_and_lengths() {
        let (_, _, mut data) = column_slide();
        // Cursor over vertex 12, the column center at (2, 2).
        calc_even(&mut data, &TopView, Vec2::new(2.1, 2.1));

        assert_eq!(data.active_vert().vert.0, 12);
        for sv in &data.verts {
            // Opposite unit rails sit two units apart.
            assert!((sv.edge_len - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_matrix_viewport_projects_center() {
        let vp = MatrixViewport::new(
            Mat4::orthographic_rh(-1.0, 1.0, -1.0, 1.0, 0.1, 10.0),
            Vec2::new(200.0, 100.0),
        );
        let p = vp.project(Vec3::new(0.0, 0.0, -1.0));
        assert!((p - Vec2::new(100.0, 50.0)).length() < 1e-3);
    }
}
