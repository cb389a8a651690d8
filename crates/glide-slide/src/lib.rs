//! Interactive edge slide.
//!
//! Moves a selected edge loop along the faces flanking it: each
//! participating vertex gets a rail on either side, and a single signed
//! factor slides the whole loop between them. The crate covers the full
//! interactive pipeline: rail discovery, loop walking, screen-space
//! gesture state, per-frame application, snapping, and the
//! transform-mode surface an editor drives. Rendering, input mapping
//! and undo stay external; everything here is plain geometry.

mod apply;
mod error;
mod math;
mod mode;
mod rail;
mod snap;
mod state;
mod verts;

pub use apply::{apply_elem, SlideContainer, SlideParams, SlideSession};
pub use error::SlideError;
pub use math::{dist_sq_to_segment_2d, interp_line, line_point_factor};
pub use mode::{DrawHint, EdgeSlide, ModeEvent, Redraw, SlideOptions, TransformMode};
pub use rail::walk_slide_dir;
pub use snap::{snap_factor, SnapConstraint};
pub use state::{
    calc_even, calc_mval_range, factor_from_cursor, reproject_input, MatrixViewport, Viewport,
};
pub use verts::{build_double_side, build_single_side, SlideData, SlideVert};
