//! Error types for slide construction.

use thiserror::Error;

/// Errors raised while building slide data from a selection.
///
/// These are per-mesh: in a multi-object edit the operation proceeds
/// with the meshes that built successfully and only cancels when none
/// did.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlideError {
    /// A selected vertex has no selected incident edge, or more than
    /// two, so no unambiguous loop passes through it.
    #[error("invalid edge selection at vertex {vertex}: {selected_edges} selected edges")]
    InvalidSelection {
        /// Offending vertex index.
        vertex: u32,
        /// Number of selected edges incident to it.
        selected_edges: u32,
    },

    /// A selected edge is neither a boundary edge nor a two-manifold
    /// edge; sliding across it would not be predictable.
    #[error("selected edge ({0}, {1}) is non-manifold", .edge.0, .edge.1)]
    NonManifoldEdge {
        /// Offending edge as a vertex pair.
        edge: (u32, u32),
    },

    /// No slide vertex could be built from the selection.
    #[error("selection contains no geometry to slide")]
    NoValidGeometry,
}
