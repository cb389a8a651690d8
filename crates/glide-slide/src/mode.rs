//! Transform-mode surface.
//!
//! Bundles the slide pipeline behind a [`TransformMode`] trait so an
//! interactive editor can drive it like any other transform: feed it a
//! scalar, forward key toggles, query snap and draw geometry. All
//! rendering and input mapping stay outside; this module only produces
//! the geometry and strings those systems consume.

use glam::{Vec2, Vec3};
use glide_mesh::{HalfEdgeMesh, MeshSelection};

use crate::apply::{apply_elem, SlideContainer, SlideParams, SlideSession};
use crate::error::SlideError;
use crate::math::interp_line;
use crate::snap::{snap_factor, SnapConstraint};
use crate::state::{calc_even, calc_mval_range, factor_from_cursor, reproject_input, Viewport};
use crate::verts::{build_double_side, build_single_side};

/// Key toggles a running slide reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    /// Toggle even mode.
    ToggleEven,
    /// Toggle the even-mode measuring end.
    ToggleFlipped,
    /// Toggle clamping to the rail extents.
    ToggleClamp,
}

/// Whether an event changed anything worth redrawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    /// Nothing changed.
    Nothing,
    /// Geometry or parameters changed.
    Hard,
}

/// Initial options of a slide operation.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlideOptions {
    /// Build rails on both sides of the selection; the single-sided
    /// variant follows unselected edges instead.
    pub double_side: bool,
    /// Start in even mode.
    pub use_even: bool,
    /// Start with the even measuring end flipped.
    pub flipped: bool,
    /// Start clamped.
    pub clamp: bool,
    /// Skip occluded edges when picking the screen direction.
    pub occlude: bool,
}

impl Default for SlideOptions {
    fn default() -> Self {
        SlideOptions {
            double_side: true,
            use_even: false,
            flipped: false,
            clamp: true,
            occlude: false,
        }
    }
}

/// Guide geometry for the on-screen hint, in mesh space.
#[derive(Debug, Clone, Default)]
pub struct DrawHint {
    /// Line segments to draw.
    pub guide_lines: Vec<[Vec3; 2]>,
    /// Even-mode position marker on the rail-to-rail polyline.
    pub marker: Option<Vec3>,
    /// Even-mode control point, the end the distance is measured from.
    pub control_point: Option<Vec3>,
}

/// An interactive transform the editor can drive.
pub trait TransformMode {
    /// Applies the input scalar to the geometry.
    fn transform(&mut self, value: f32);

    /// Reacts to a key toggle.
    fn handle_event(&mut self, event: ModeEvent) -> Redraw;

    /// Converts a scene snap point into a new input scalar, leaving
    /// `value` unchanged when the mode has nothing to snap.
    fn snap_apply(&self, snap_point: Vec3, constraint: SnapConstraint, value: f32) -> f32;

    /// Ranking metric for snap candidates on screen.
    fn snap_distance_sq(&self, a: Vec2, b: Vec2) -> f32 {
        a.distance_squared(b)
    }

    /// Guide geometry for drawing, if the mode has any.
    fn draw_hint(&self) -> Option<DrawHint>;

    /// Translation of the active element, for gizmo placement.
    fn matrix_delta(&self) -> Vec3;

    /// Header line describing the current state.
    fn status(&self) -> String;
}

/// The edge-slide transform mode.
#[derive(Debug)]
pub struct EdgeSlide {
    options: SlideOptions,
    session: SlideSession,
}

impl EdgeSlide {
    /// Builds slide data for every mesh and initializes the gesture at
    /// `cursor`.
    ///
    /// Meshes whose selection cannot slide are carried along unmoving;
    /// the operation only fails when no mesh builds, returning the
    /// last build error.
    pub fn init<V: Viewport>(
        meshes: Vec<(HalfEdgeMesh, MeshSelection)>,
        viewport: &V,
        cursor: Vec2,
        options: SlideOptions,
    ) -> Result<EdgeSlide, SlideError> {
        let params = SlideParams {
            use_even: options.use_even,
            // Measuring from the far end happens to fit the
            // single-sided rails best.
            flipped: if options.double_side {
                options.flipped
            } else {
                !options.flipped
            },
            clamp: options.clamp,
            ..Default::default()
        };

        let mut containers = Vec::with_capacity(meshes.len());
        let mut last_err = None;
        for (mesh, selection) in meshes {
            let built = if options.double_side {
                build_double_side(&mesh, &selection)
            } else {
                build_single_side(&mesh, &selection)
            };
            let data = match built {
                Ok(mut data) => {
                    calc_mval_range(
                        &mesh,
                        &mut data,
                        &selection,
                        viewport,
                        cursor,
                        options.occlude,
                        options.double_side,
                    );
                    calc_even(&mut data, viewport, cursor);
                    Some(data)
                }
                Err(err) => {
                    last_err = Some(err);
                    None
                }
            };
            containers.push(SlideContainer { mesh, data });
        }

        let session = SlideSession { params, containers };
        if session.first_valid().is_none() {
            return Err(last_err.unwrap_or(SlideError::NoValidGeometry));
        }
        Ok(EdgeSlide { options, session })
    }

    /// The options the slide was started with.
    pub fn options(&self) -> &SlideOptions {
        &self.options
    }

    /// The running session: parameters and per-mesh state.
    pub fn session(&self) -> &SlideSession {
        &self.session
    }

    /// Consumes the mode, yielding the slid meshes.
    pub fn into_session(self) -> SlideSession {
        self.session
    }

    /// Screen reference points of the driving mesh, for the external
    /// cursor-to-scalar mapping.
    pub fn reference_points(&self) -> Option<(Vec2, Vec2)> {
        let data = self.session.first_valid()?.data.as_ref()?;
        Some((data.mval_start, data.mval_end))
    }

    /// Input scalar for a cursor position.
    pub fn factor_from_cursor(&self, mval: Vec2) -> f32 {
        self.session
            .first_valid()
            .and_then(|tc| tc.data.as_ref())
            .map_or(0.0, |data| factor_from_cursor(data, mval))
    }

    /// Recomputes every mesh's screen reference after a view change.
    pub fn reproject<V: Viewport>(&mut self, viewport: &V, cursor: Vec2) {
        for tc in &mut self.session.containers {
            if let Some(data) = &mut tc.data {
                reproject_input(&tc.mesh, data, viewport, cursor);
            }
        }
    }
}

impl TransformMode for EdgeSlide {
    fn transform(&mut self, value: f32) {
        let factor = if self.session.params.clamp {
            value.clamp(-1.0, 1.0)
        } else {
            value
        };
        self.session.set_factor(factor);
    }

    fn handle_event(&mut self, event: ModeEvent) -> Redraw {
        let params = &mut self.session.params;
        match event {
            ModeEvent::ToggleEven => params.use_even = !params.use_even,
            ModeEvent::ToggleFlipped => params.flipped = !params.flipped,
            ModeEvent::ToggleClamp => params.clamp = !params.clamp,
        }
        Redraw::Hard
    }

    fn snap_apply(&self, snap_point: Vec3, constraint: SnapConstraint, value: f32) -> f32 {
        match self.session.first_valid().and_then(|tc| tc.data.as_ref()) {
            Some(data) => snap_factor(data, &self.session.params, snap_point, constraint),
            None => value,
        }
    }

    fn draw_hint(&self) -> Option<DrawHint> {
        let tc = self.session.first_valid()?;
        let data = tc.data.as_ref()?;
        let sv = data.active_vert();
        let params = &self.session.params;
        let mut hint = DrawHint::default();

        if params.use_even {
            let co_a = sv.co_orig + sv.dir_side[0];
            let co_b = sv.co_orig + sv.dir_side[1];
            for side in 0..2 {
                if !sv.side_vert[side].is_null() {
                    hint.guide_lines
                        .push([tc.mesh.position(sv.side_vert[side]), sv.co_orig]);
                }
            }
            let ctrl_side = usize::from(params.flipped);
            if !sv.side_vert[ctrl_side].is_null() {
                hint.control_point = Some(tc.mesh.position(sv.side_vert[ctrl_side]));
            }
            let fac = (params.factor + 1.0) / 2.0;
            hint.marker = Some(interp_line(co_b, sv.co_orig, co_a, fac));
        } else if !params.clamp {
            // Unclamped: show the full sliding axis of every vertex.
            for sv in &data.verts {
                let mut side = params.side_unclamp;
                if sv.dir_side[side] == Vec3::ZERO {
                    side = 1 - side;
                }
                let a = sv.dir_side[side] * 100.0;
                hint.guide_lines.push([sv.co_orig + a, sv.co_orig - a]);
            }
        } else {
            hint.guide_lines
                .push([sv.co_orig, sv.co_orig + sv.dir_side[params.side_unclamp]]);
        }
        Some(hint)
    }

    fn matrix_delta(&self) -> Vec3 {
        let Some(data) = self.session.first_valid().and_then(|tc| tc.data.as_ref()) else {
            return Vec3::ZERO;
        };
        let sv = data.active_vert();
        let p = &self.session.params;

        let mut curr_length_fac = 0.0;
        if p.use_even {
            let dist = if p.flipped { p.factor } else { -p.factor };
            curr_length_fac = sv.edge_len * ((dist + 1.0) / 2.0);
        }
        let final_co = apply_elem(
            sv,
            p.factor,
            curr_length_fac,
            p.side_unclamp,
            p.clamp,
            p.use_even,
            p.flipped,
        );
        final_co - sv.co_orig
    }

    fn status(&self) -> String {
        let p = &self.session.params;
        let on_off = |b: bool| if b { "ON" } else { "OFF" };
        let mut s = format!("Edge Slide: {:.4} (E)ven: {}, ", p.factor, on_off(p.use_even));
        if p.use_even {
            s.push_str(&format!("(F)lipped: {}, ", on_off(p.flipped)));
        }
        s.push_str(&format!("Alt or (C)lamp: {}", on_off(p.clamp)));
        s
    }
}
