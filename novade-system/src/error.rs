//! Error types for the window-management engine.

use thiserror::Error;

use crate::ids::SurfaceId;

/// Errors produced by the engine's public operations.
///
/// Mirrors the shape of `window_mechanics::error::WindowManagerError` in this
/// codebase: one variant per failure mode, `Display` carrying enough detail
/// to log directly, and a `#[source]`/`#[from]` chain wherever one error
/// wraps another.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A surface or session handle that the engine does not (or no longer)
    /// know about. Most call sites treat this as a silent no-op per the
    /// "unknown surface/session" recovery policy rather than propagating it.
    #[error("unknown surface or session: {0}")]
    InvalidHandle(String),

    /// A client request described a surface configuration the engine
    /// rejects outright (e.g. a satellite surface with no parent).
    #[error("inconsistent surface specification: {0}")]
    InconsistentSpec(String),

    /// A requested state transition is not legal for the surface's type or
    /// current state.
    #[error("unsupported transition for surface {surface}: {reason}")]
    UnsupportedTransition {
        /// The surface the transition was requested for.
        surface: SurfaceId,
        /// Human-readable description of why the transition was rejected.
        reason: String,
    },

    /// Placement or layout computation could not produce a usable rectangle.
    #[error("layout calculation failed: {0}")]
    LayoutCalculation(String),

    /// A generic, otherwise-uncategorized engine failure.
    #[error("{0}")]
    Other(String),
}
