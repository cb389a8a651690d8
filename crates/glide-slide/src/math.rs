//! Line and segment helpers shared by the slide math.

use glam::{Vec2, Vec3};

/// Parameter of the closest point to `p` on the line through `a`/`b`.
///
/// Returns 0 when the line is degenerate.
pub fn line_point_factor(p: Vec3, a: Vec3, b: Vec3) -> f32 {
    let dir = b - a;
    let len_sq = dir.length_squared();
    if len_sq <= f32::EPSILON {
        0.0
    } else {
        (p - a).dot(dir) / len_sq
    }
}

/// Interpolates along the two-segment polyline `v1 -> v2 -> v3`.
///
/// The parameter is keyed at `v2`'s closest-point factor on `v1..v3`,
/// so `t` maps linearly onto each segment rather than onto arc length.
pub fn interp_line(v1: Vec3, v2: Vec3, v3: Vec3, t: f32) -> Vec3 {
    let t_mid = line_point_factor(v2, v1, v3);

    if t - t_mid < 0.0 {
        if t_mid.abs() < f32::EPSILON {
            v2
        } else {
            v1.lerp(v2, t / t_mid)
        }
    } else {
        let t_rest = 1.0 - t_mid;
        if t_rest.abs() < f32::EPSILON {
            v3
        } else {
            v2.lerp(v3, (t - t_mid) / t_rest)
        }
    }
}

/// Intersects the infinite line `p0..p1` with the plane through
/// `plane_co` with normal `plane_no`.
///
/// Returns `None` when the line runs parallel to the plane.
pub fn isect_line_plane(p0: Vec3, p1: Vec3, plane_co: Vec3, plane_no: Vec3) -> Option<Vec3> {
    let dir = p1 - p0;
    let denom = plane_no.dot(dir);
    if denom.abs() <= f32::EPSILON {
        return None;
    }
    let t = plane_no.dot(plane_co - p0) / denom;
    Some(p0 + dir * t)
}

/// Squared distance from `p` to the 2D segment `a..b`.
pub fn dist_sq_to_segment_2d(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let dir = b - a;
    let len_sq = dir.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance_squared(a);
    }
    let t = ((p - a).dot(dir) / len_sq).clamp(0.0, 1.0);
    p.distance_squared(a + dir * t)
}

/// Scales `v` to the given length, leaving zero vectors untouched.
pub fn scale_to_length(v: Vec3, length: f32) -> Vec3 {
    let len = v.length();
    if len <= f32::EPSILON {
        Vec3::ZERO
    } else {
        v * (length / len)
    }
}

/// Parameter along the axis `(origin, axis_dir)` of its closest
/// approach to the line `(co, line_dir)`.
///
/// Falls back to projecting `co` onto the axis when the lines are
/// near-parallel.
pub fn closest_axis_factor(origin: Vec3, axis_dir: Vec3, co: Vec3, line_dir: Vec3) -> f32 {
    let w = origin - co;
    let aa = axis_dir.dot(axis_dir);
    let bb = line_dir.dot(line_dir);
    let ab = axis_dir.dot(line_dir);
    let denom = aa * bb - ab * ab;
    if denom.abs() <= f32::EPSILON || aa <= f32::EPSILON {
        if aa <= f32::EPSILON {
            return 0.0;
        }
        return (co - origin).dot(axis_dir) / aa;
    }
    (ab * w.dot(line_dir) - bb * w.dot(axis_dir)) / denom
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_point_factor() {
        let a = Vec3::ZERO;
        let b = Vec3::new(2.0, 0.0, 0.0);
        assert_eq!(line_point_factor(Vec3::new(1.0, 5.0, 0.0), a, b), 0.5);
        assert_eq!(line_point_factor(Vec3::X, a, a), 0.0);
    }

    #[test]
    fn test_interp_line_asymmetric() {
        // Midpoint keyed off-center: v2 sits at factor 0.25.
        let v1 = Vec3::ZERO;
        let v2 = Vec3::new(1.0, 0.0, 0.0);
        let v3 = Vec3::new(4.0, 0.0, 0.0);
        assert!((interp_line(v1, v2, v3, 0.25) - v2).length() < 1e-6);
        assert!((interp_line(v1, v2, v3, 0.125) - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-6);
        assert!((interp_line(v1, v2, v3, 0.625) - Vec3::new(2.5, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_isect_line_plane() {
        let hit = isect_line_plane(Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0), Vec3::ZERO, Vec3::Y)
            .unwrap();
        assert!(hit.length() < 1e-6);
        assert!(isect_line_plane(Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Y).is_none());
    }

    #[test]
    fn test_dist_sq_to_segment_2d() {
        let a = Vec2::ZERO;
        let b = Vec2::new(2.0, 0.0);
        assert_eq!(dist_sq_to_segment_2d(Vec2::new(1.0, 1.0), a, b), 1.0);
        assert_eq!(dist_sq_to_segment_2d(Vec2::new(-2.0, 0.0), a, b), 4.0);
    }

    #[test]
    fn test_closest_axis_factor() {
        // Axis +X from origin, target line vertical through (2, 0, 0).
        let t = closest_axis_factor(Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0), Vec3::Y);
        assert!((t - 2.0).abs() < 1e-6);
    }
}
