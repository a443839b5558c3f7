//! Error types for the measurement engine.
//!
//! Normal interaction artifacts (degenerate geometry, undo with nothing to
//! undo, deleting an unknown id) are not errors. These variants cover
//! caller-side contract violations and text parsing at the boundary.

use thiserror::Error;

/// Result type alias for engine operations.
pub type MeasureResult<T> = Result<T, MeasureError>;

/// Errors surfaced to callers of the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeasureError {
    /// A point was submitted while no measurement tool was armed.
    #[error("no measurement tool is active; select a tool before submitting points")]
    NoActiveTool,

    /// A point with NaN or infinite coordinates was submitted.
    #[error("point ({x}, {y}, {z}) has non-finite coordinates")]
    NonFinitePoint { x: f64, y: f64, z: f64 },

    /// Text did not name a supported unit.
    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    /// Text did not name a measurement tool.
    #[error("unknown measurement kind: {0}")]
    UnknownKind(String),
}
