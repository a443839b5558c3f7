//! Core library for interactive 3D measurements.
//!
//! A viewer feeds resolved world-space picks into a [`MeasurementEngine`],
//! which turns them into distance, area and angle measurements and keeps
//! the session's list of finished records.

pub mod capture;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod measurement;
pub mod store;
pub mod units;

pub use capture::{CaptureState, CaptureStateMachine, SessionSnapshot};
pub use config::EngineConfig;
pub use engine::MeasurementEngine;
pub use error::{MeasureError, MeasureResult};
pub use geometry::Point3;
pub use measurement::{Measurement, MeasurementId, MeasurementKind};
pub use store::{MeasurementStore, UndoOutcome};
pub use units::Unit;
