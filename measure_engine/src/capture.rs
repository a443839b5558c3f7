//! Multi-click capture state machine.
//!
//! The machine owns the points of the measurement currently being picked.
//! It is either [`CaptureState::Idle`] or awaiting more points for one
//! [`MeasurementKind`]. When enough points have been collected it evaluates
//! the measurement, returns a [`Completion`] and goes back to idle.
//!
//! ```text
//! Idle ──select_tool──> Awaiting(kind, [])
//! Awaiting ──submit_point──> Awaiting(kind, points + p)
//!          └─ complete ───> Idle  (Completion emitted)
//! any ──select_tool / cancel──> discard session
//! ```

use log::{debug, info};

use crate::error::{MeasureError, MeasureResult};
use crate::geometry::{self, Point3};
use crate::measurement::MeasurementKind;
use crate::units::{self, Unit};

/// Default distance from the first vertex within which an area capture is
/// considered closed, in scene units.
pub const DEFAULT_CLOSURE_THRESHOLD: f64 = 0.1;

/// Current state of the capture.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CaptureState {
    /// No tool armed.
    #[default]
    Idle,
    /// A tool is armed and collecting points.
    Awaiting {
        kind: MeasurementKind,
        points: Vec<Point3>,
    },
}

/// Kind and progress of the active capture, for UI prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub kind: MeasurementKind,
    pub point_count: usize,
}

/// Evaluated result of a finished capture, ready to become a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub kind: MeasurementKind,
    pub points: Vec<Point3>,
    pub value: f64,
    pub unit: Unit,
}

/// Collects picked points for the armed tool and decides completion.
#[derive(Debug, Clone)]
pub struct CaptureStateMachine {
    state: CaptureState,
    closure_threshold: f64,
}

impl Default for CaptureStateMachine {
    fn default() -> Self {
        Self::new(DEFAULT_CLOSURE_THRESHOLD)
    }
}

impl CaptureStateMachine {
    /// Creates an idle machine using `closure_threshold` for area closure.
    pub fn new(closure_threshold: f64) -> Self {
        Self {
            state: CaptureState::Idle,
            closure_threshold,
        }
    }

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    pub fn closure_threshold(&self) -> f64 {
        self.closure_threshold
    }

    /// Kind and point count of the active session, `None` when idle.
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        match &self.state {
            CaptureState::Idle => None,
            CaptureState::Awaiting { kind, points } => Some(SessionSnapshot {
                kind: *kind,
                point_count: points.len(),
            }),
        }
    }

    /// Points captured so far in the active session.
    pub fn points(&self) -> &[Point3] {
        match &self.state {
            CaptureState::Idle => &[],
            CaptureState::Awaiting { points, .. } => points,
        }
    }

    /// Arms `kind`, discarding any unfinished session.
    pub fn select_tool(&mut self, kind: MeasurementKind) {
        if let CaptureState::Awaiting { kind: old, points } = &self.state {
            if !points.is_empty() {
                debug!(
                    "Discarding unfinished {} capture with {} point(s)",
                    old,
                    points.len()
                );
            }
        }
        self.state = CaptureState::Awaiting {
            kind,
            points: Vec::new(),
        };
        info!("Measurement tool armed: {}", kind);
    }

    /// Appends a picked point and returns the completion if the session
    /// finished.
    ///
    /// `unit` is the display unit active right now; it is only used when
    /// this point completes the measurement.
    pub fn submit_point(&mut self, point: Point3, unit: Unit) -> MeasureResult<Option<Completion>> {
        let CaptureState::Awaiting { kind, points } = &mut self.state else {
            return Err(MeasureError::NoActiveTool);
        };
        if !point.is_finite() {
            return Err(MeasureError::NonFinitePoint {
                x: point.x,
                y: point.y,
                z: point.z,
            });
        }
        points.push(point);
        debug!("Captured {} point {}: {:?}", kind, points.len(), point);

        let done = match kind {
            MeasurementKind::Distance => points.len() == 2,
            MeasurementKind::Angle => points.len() == 3,
            MeasurementKind::Area => {
                let closes = points.len() > 3
                    && geometry::distance(points[0], point) < self.closure_threshold;
                if closes {
                    // the closing click duplicates the first vertex
                    points.pop();
                    debug!("Area closed with {} vertices", points.len());
                }
                closes
            }
        };

        Ok(if done { Some(self.complete(unit)) } else { None })
    }

    /// Finishes an area capture without a closure click.
    ///
    /// Returns `None` (and keeps the session) unless an area session with
    /// at least three points is active.
    pub fn finish_area(&mut self, unit: Unit) -> Option<Completion> {
        let ready = matches!(
            &self.state,
            CaptureState::Awaiting { kind: MeasurementKind::Area, points }
                if points.len() >= MeasurementKind::Area.min_points()
        );
        ready.then(|| self.complete(unit))
    }

    /// Replaces the session with an area capture holding `vertices`, as if
    /// each had been picked, but without testing for closure.
    ///
    /// Used for polygons that arrive all at once (files, scripts) where a
    /// vertex near the first one is real geometry, not a closure click. No
    /// state changes if any vertex has non-finite coordinates.
    pub fn load_area(&mut self, vertices: &[Point3]) -> MeasureResult<()> {
        if let Some(p) = vertices.iter().find(|p| !p.is_finite()) {
            return Err(MeasureError::NonFinitePoint {
                x: p.x,
                y: p.y,
                z: p.z,
            });
        }
        self.state = CaptureState::Awaiting {
            kind: MeasurementKind::Area,
            points: vertices.to_vec(),
        };
        debug!("Loaded area capture with {} vertices", vertices.len());
        Ok(())
    }

    /// Removes the most recent point of the active session.
    ///
    /// Returns `false` when there was no point to remove; the tool stays
    /// armed either way.
    pub fn cancel_last_point(&mut self) -> bool {
        match &mut self.state {
            CaptureState::Awaiting { points, .. } => points.pop().is_some(),
            CaptureState::Idle => false,
        }
    }

    /// Abandons the active session and returns to idle.
    pub fn cancel(&mut self) -> bool {
        let was_active = matches!(self.state, CaptureState::Awaiting { .. });
        self.state = CaptureState::Idle;
        was_active
    }

    fn complete(&mut self, unit: Unit) -> Completion {
        let CaptureState::Awaiting { kind, points } = std::mem::take(&mut self.state) else {
            unreachable!("complete is only called while awaiting points");
        };
        let value = evaluate(kind, &points, unit);
        Completion {
            kind,
            points,
            value,
            unit,
        }
    }
}

/// Computes the measured value of `points` in `unit` (degrees for angles).
fn evaluate(kind: MeasurementKind, points: &[Point3], unit: Unit) -> f64 {
    match kind {
        MeasurementKind::Distance => units::from_base(geometry::distance(points[0], points[1]), unit),
        MeasurementKind::Area => units::area_from_base(geometry::polygon_area(points), unit),
        MeasurementKind::Angle => geometry::angle_at(points[0], points[1], points[2]),
    }
}
