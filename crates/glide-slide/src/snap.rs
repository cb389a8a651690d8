//! Snapping the slide factor to scene geometry.
//!
//! A snap point found in the scene is converted back into the signed
//! slide factor that places the active vertex on it (or as close as
//! the rail allows). Edge and face snap targets first re-project the
//! snap offset onto the rail axis so the vertex stays on its rail.

use glam::Vec3;

use crate::apply::SlideParams;
use crate::math::{closest_axis_factor, isect_line_plane, line_point_factor};
use crate::verts::SlideData;

/// Geometry the snap point was found on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapConstraint {
    /// Unconstrained point target; the snap point is used as-is.
    None,
    /// Edge target: a point on the edge and its direction.
    Edge { point: Vec3, dir: Vec3 },
    /// Face target: a point on the face and its normal.
    Face { point: Vec3, normal: Vec3 },
}

/// Factor that places the active vertex at `snap_point`.
///
/// The side is chosen from the current gesture: the sign of the factor
/// when clamped, the retained side when unclamped, and the nearer rail
/// half in even mode. The returned factor re-encodes that side the way
/// the apply step expects, so feeding it back reproduces the snapped
/// position.
pub fn snap_factor(
    data: &SlideData,
    params: &SlideParams,
    snap_point: Vec3,
    target: SnapConstraint,
) -> f32 {
    let sv = data.active_vert();
    let co_orig = sv.co_orig;
    let co_dest = [co_orig + sv.dir_side[0], co_orig + sv.dir_side[1]];
    let mut snap_point = snap_point;

    let mut t_mid = 0.0;
    let side = if !params.use_even {
        if params.clamp {
            usize::from(params.factor < 0.0)
        } else {
            params.side_unclamp
        }
    } else {
        t_mid = line_point_factor(Vec3::ZERO, sv.dir_side[0], sv.dir_side[1]);
        let t_snap = line_point_factor(snap_point, co_dest[0], co_dest[1]);
        usize::from(t_snap >= t_mid)
    };

    // Keep the vertex on its rail: slide the snap offset along the
    // rail axis to the closest point on the target geometry.
    match target {
        SnapConstraint::None => {}
        SnapConstraint::Edge { point, dir } => {
            let co_dir = (co_dest[side] - co_orig).normalize_or_zero();
            let lambda = closest_axis_factor(co_orig, co_dir, point, dir);
            snap_point = co_orig + co_dir * lambda;
        }
        SnapConstraint::Face { point, normal } => {
            let co_dir = (co_dest[side] - co_orig).normalize_or_zero();
            if let Some(hit) = isect_line_plane(co_orig, co_orig + co_dir, point, normal) {
                snap_point = hit;
            }
        }
    }

    let mut perc = line_point_factor(snap_point, co_orig, co_dest[side]);
    if !params.use_even {
        if side == 1 {
            perc = -perc;
        }
    } else {
        if side == 0 {
            perc = (1.0 - perc) * t_mid;
        } else {
            perc = perc * (1.0 - t_mid) + t_mid;
        }
        if params.flipped {
            perc = 1.0 - perc;
        }
        perc = 2.0 * perc - 1.0;
        if !params.flipped {
            perc = -perc;
        }
    }
    perc
}
