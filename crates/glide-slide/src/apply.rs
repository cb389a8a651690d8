//! Applying a slide factor to the mesh.
//!
//! The factor is signed: positive slides every vertex along rail 0,
//! negative along rail 1, 1.0 being a full slide onto the rail target.
//! Unclamped mode instead keeps moving along whichever side was last
//! active, past the rail ends. Even mode abandons per-vertex factors
//! and moves the whole loop so the active vertex keeps a fixed distance
//! from its rail end, matching loop-cut placement.

use glam::Vec3;
use glide_mesh::HalfEdgeMesh;

use crate::math::interp_line;
use crate::verts::{SlideData, SlideVert};

/// Parameters of a slide gesture.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlideParams {
    /// Current signed slide factor.
    pub factor: f32,
    /// Side used while unclamped, retained from the last clamped drag.
    pub side_unclamp: usize,
    /// Keep an even distance from the rail end instead of
    /// proportional sliding.
    pub use_even: bool,
    /// Measure the even distance from the opposite rail end.
    pub flipped: bool,
    /// Clamp movement to the rail extents.
    pub clamp: bool,
}

impl Default for SlideParams {
    fn default() -> Self {
        SlideParams {
            factor: 0.0,
            side_unclamp: 0,
            use_even: false,
            flipped: false,
            clamp: true,
        }
    }
}

/// Position of one slide vertex at the given factor.
pub fn apply_elem(
    sv: &SlideVert,
    fac: f32,
    curr_length_fac: f32,
    side_unclamp: usize,
    use_clamp: bool,
    use_even: bool,
    use_flip: bool,
) -> Vec3 {
    if !use_even {
        if use_clamp {
            let side = usize::from(fac < 0.0);
            return sv.co_orig + sv.dir_side[side] * fac.abs();
        }
        let mut side = side_unclamp;
        if sv.dir_side[side] == Vec3::ZERO {
            side = 1 - side;
        }
        let fac_final = if side == usize::from(fac < 0.0) {
            fac.abs()
        } else {
            -fac.abs()
        };
        return sv.co_orig + sv.dir_side[side] * fac_final;
    }

    // Even mode slides along the straight rail-to-rail segment, so the
    // distance from the rail end is uniform along the loop.
    if sv.edge_len > f32::EPSILON {
        let fac_final = curr_length_fac.min(sv.edge_len) / sv.edge_len;
        let co_a = sv.co_orig + sv.dir_side[0];
        let co_b = sv.co_orig + sv.dir_side[1];
        if use_flip {
            interp_line(co_b, sv.co_orig, co_a, fac_final)
        } else {
            interp_line(co_a, sv.co_orig, co_b, fac_final)
        }
    } else {
        sv.co_orig
    }
}

/// One editable mesh taking part in the slide.
///
/// `data` is `None` when slide construction failed for this mesh; the
/// mesh then simply does not move.
#[derive(Debug)]
pub struct SlideContainer {
    /// The mesh being edited.
    pub mesh: HalfEdgeMesh,
    /// Slide state, when the mesh's selection produced any.
    pub data: Option<SlideData>,
}

/// A running slide over one or more meshes.
#[derive(Debug)]
pub struct SlideSession {
    /// Shared gesture parameters.
    pub params: SlideParams,
    /// Participating meshes.
    pub containers: Vec<SlideContainer>,
}

impl SlideSession {
    /// First container that built slide data; its active vertex drives
    /// even mode and snapping.
    pub fn first_valid(&self) -> Option<&SlideContainer> {
        self.containers.iter().find(|tc| tc.data.is_some())
    }

    /// Moves every slide vertex to its position at `factor`.
    pub fn set_factor(&mut self, factor: f32) {
        self.params.factor = factor;

        let use_clamp = self.params.clamp;
        let use_even = self.params.use_even;
        let use_flip = self.params.flipped;

        // The unclamped side is read before it is refreshed, so
        // toggling clamp off keeps the side of the previous drag.
        let side_unclamp = self.params.side_unclamp;
        let mut curr_length_fac = 0.0;
        if use_even {
            if let Some(data) = self.first_valid().and_then(|tc| tc.data.as_ref()) {
                let sv = data.active_vert();
                let dist = if use_flip { factor } else { -factor };
                curr_length_fac = sv.edge_len * ((dist + 1.0) / 2.0);
            }
        } else if use_clamp {
            self.params.side_unclamp = usize::from(factor < 0.0);
        }

        for tc in &mut self.containers {
            let Some(data) = &tc.data else { continue };
            for sv in &data.verts {
                let co = apply_elem(
                    sv,
                    factor,
                    curr_length_fac,
                    side_unclamp,
                    use_clamp,
                    use_even,
                    use_flip,
                );
                tc.mesh.set_position(sv.vert, co);
            }
        }
    }

    /// Restores every slide vertex to its rest position.
    pub fn reset(&mut self) {
        for tc in &mut self.containers {
            let Some(data) = &tc.data else { continue };
            for sv in &data.verts {
                tc.mesh.set_position(sv.vert, sv.co_orig);
            }
        }
    }
}
