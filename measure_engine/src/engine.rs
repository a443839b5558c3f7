//! Facade consumed by the viewer and panel UI.
//!
//! [`MeasurementEngine`] owns the capture state machine, the measurement
//! store, the active unit and the configuration. All state changes go
//! through `&mut self` methods, so other holders only ever observe complete
//! transitions. Completion listeners run after the store has been updated.

use std::fmt;

use chrono::Utc;
use log::{debug, info, warn};

use crate::capture::{CaptureStateMachine, Completion, SessionSnapshot};
use crate::config::EngineConfig;
use crate::error::MeasureResult;
use crate::geometry::Point3;
use crate::measurement::{Measurement, MeasurementId, MeasurementKind};
use crate::store::{MeasurementStore, UndoOutcome};
use crate::units::Unit;

/// Callback invoked once per finalized measurement.
pub type CompletionListener = Box<dyn FnMut(&Measurement)>;

/// Interactive measurement engine.
pub struct MeasurementEngine {
    config: EngineConfig,
    capture: CaptureStateMachine,
    store: MeasurementStore,
    active_unit: Unit,
    next_id: u64,
    listeners: Vec<CompletionListener>,
}

impl fmt::Debug for MeasurementEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeasurementEngine")
            .field("config", &self.config)
            .field("capture", &self.capture)
            .field("store", &self.store)
            .field("active_unit", &self.active_unit)
            .field("next_id", &self.next_id)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for MeasurementEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MeasurementEngine {
    /// Creates an engine with default settings.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates an engine using `config`.
    ///
    /// A non-finite or negative closure threshold is replaced by the
    /// default, since it would make area closure impossible.
    pub fn with_config(mut config: EngineConfig) -> Self {
        if !config.is_valid() {
            let fallback = EngineConfig::default().closure_threshold;
            warn!(
                "Invalid closure threshold {}, using {}",
                config.closure_threshold, fallback
            );
            config.closure_threshold = fallback;
        }
        Self {
            config,
            capture: CaptureStateMachine::new(config.closure_threshold),
            store: MeasurementStore::new(),
            active_unit: config.default_unit,
            next_id: 1,
            listeners: Vec::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Registers a listener called for every measurement that completes
    /// from now on.
    pub fn on_measurement_complete<F>(&mut self, listener: F)
    where
        F: FnMut(&Measurement) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Arms a measurement tool, discarding any unfinished capture.
    pub fn select_tool(&mut self, kind: MeasurementKind) {
        self.capture.select_tool(kind);
    }

    /// Feeds one picked world-space point into the active capture.
    ///
    /// Returns the finalized measurement if this point completed it.
    /// Submitting without an armed tool, or with non-finite coordinates, is
    /// an error and leaves all state untouched.
    pub fn submit_point(&mut self, point: Point3) -> MeasureResult<Option<Measurement>> {
        let completion = self.capture.submit_point(point, self.active_unit)?;
        Ok(completion.map(|c| self.finalize(c)))
    }

    /// Finishes an area capture of at least three points without a closure
    /// click. Does nothing otherwise.
    pub fn finish_area(&mut self) -> Option<Measurement> {
        match self.capture.finish_area(self.active_unit) {
            Some(c) => Some(self.finalize(c)),
            None => {
                debug!("Finish ignored: no area capture with three or more points");
                None
            }
        }
    }

    /// Measures the area of a polygon whose vertices are all known up front.
    ///
    /// Unlike picking the vertices one by one, no vertex is treated as a
    /// closure click. A trailing vertex equal to the first one closes the
    /// ring explicitly and is dropped. Returns `None` when fewer than three
    /// vertices remain; the loaded capture then stays active.
    pub fn area_from_points(&mut self, vertices: &[Point3]) -> MeasureResult<Option<Measurement>> {
        let ring = match vertices {
            [first, rest @ .., last] if !rest.is_empty() && first == last => {
                &vertices[..vertices.len() - 1]
            }
            _ => vertices,
        };
        self.capture.load_area(ring)?;
        Ok(self.finish_area())
    }

    /// Abandons the in-progress capture and disarms the tool.
    pub fn cancel_capture(&mut self) -> bool {
        let cancelled = self.capture.cancel();
        if cancelled {
            debug!("Capture cancelled");
        }
        cancelled
    }

    /// Removes the last capture point, or failing that the newest
    /// measurement.
    pub fn undo(&mut self) -> UndoOutcome {
        self.store.undo(&mut self.capture)
    }

    /// Removes every measurement and resets the capture.
    pub fn clear_all(&mut self) {
        let removed = self.store.clear();
        self.capture.cancel();
        info!("Cleared {} measurement(s)", removed);
    }

    /// Deletes a measurement by id. Unknown ids are ignored.
    pub fn delete_measurement(&mut self, id: MeasurementId) -> Option<Measurement> {
        let removed = self.store.delete_by_id(id);
        if removed.is_some() {
            info!("Deleted measurement {}", id);
        } else {
            debug!("Delete ignored: no measurement {}", id);
        }
        removed
    }

    /// Attaches or removes the user label of a measurement.
    pub fn set_label(&mut self, id: MeasurementId, label: Option<String>) -> bool {
        match self.store.get_mut(id) {
            Some(m) => {
                m.set_label(label);
                true
            }
            None => false,
        }
    }

    /// Changes the unit used by measurements completed from now on.
    /// Existing measurements keep the unit they were created with.
    pub fn set_active_unit(&mut self, unit: Unit) {
        if self.active_unit != unit {
            info!("Active unit changed from {} to {}", self.active_unit, unit);
        }
        self.active_unit = unit;
    }

    pub fn active_unit(&self) -> Unit {
        self.active_unit
    }

    /// Kind and point count of the in-progress capture.
    pub fn active_session(&self) -> Option<SessionSnapshot> {
        self.capture.snapshot()
    }

    /// Points of the in-progress capture, for preview geometry.
    pub fn session_points(&self) -> &[Point3] {
        self.capture.points()
    }

    /// Copy of all measurements in creation order.
    pub fn list_measurements(&self) -> Vec<Measurement> {
        self.store.snapshot()
    }

    pub fn measurement(&self, id: MeasurementId) -> Option<&Measurement> {
        self.store.get(id)
    }

    fn finalize(&mut self, completion: Completion) -> Measurement {
        let id = MeasurementId(self.next_id);
        self.next_id += 1;
        let measurement = Measurement::new(
            id,
            completion.kind,
            completion.points,
            completion.value,
            completion.unit,
            Utc::now(),
        );
        if !self.store.add(measurement.clone()) {
            warn!("Measurement {} was not stored; listeners not notified", id);
            return measurement;
        }
        info!(
            "Measurement {} completed: {} {}",
            id,
            measurement.kind(),
            measurement.formatted_value()
        );
        for listener in &mut self.listeners {
            listener(&measurement);
        }
        measurement
    }
}
