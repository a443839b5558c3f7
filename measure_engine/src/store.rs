//! Ordered, in-memory collection of finalized measurements.

use log::{debug, warn};

use crate::capture::CaptureStateMachine;
use crate::measurement::{Measurement, MeasurementId};

/// What an undo request removed.
#[derive(Debug, Clone, PartialEq)]
pub enum UndoOutcome {
    /// The last point of the in-progress capture was removed.
    SessionPoint,
    /// The most recently added measurement was removed.
    Measurement(Measurement),
    /// There was nothing to undo.
    Nothing,
}

/// Measurements in creation order.
#[derive(Debug, Clone, Default)]
pub struct MeasurementStore {
    measurements: Vec<Measurement>,
}

impl std::ops::Deref for MeasurementStore {
    type Target = [Measurement];
    fn deref(&self) -> &Self::Target {
        &self.measurements
    }
}

impl MeasurementStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            measurements: Vec::new(),
        }
    }

    /// Appends a measurement.
    ///
    /// Returns `false` and leaves the store untouched if a measurement with
    /// the same id is already present.
    pub fn add(&mut self, measurement: Measurement) -> bool {
        if self.get(measurement.id()).is_some() {
            warn!("Rejected duplicate measurement id {}", measurement.id());
            return false;
        }
        self.measurements.push(measurement);
        true
    }

    /// Removes the measurement with the given id, if present.
    pub fn delete_by_id(&mut self, id: MeasurementId) -> Option<Measurement> {
        let idx = self.measurements.iter().position(|m| m.id() == id)?;
        Some(self.measurements.remove(idx))
    }

    /// Removes every measurement and returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.measurements.len();
        self.measurements.clear();
        count
    }

    /// Undoes the most recent user action.
    ///
    /// A point of the in-progress capture takes precedence; only when the
    /// capture holds no points is the newest measurement removed.
    pub fn undo(&mut self, capture: &mut CaptureStateMachine) -> UndoOutcome {
        if capture.cancel_last_point() {
            debug!("Undo removed a capture point");
            return UndoOutcome::SessionPoint;
        }
        match self.measurements.pop() {
            Some(m) => {
                debug!("Undo removed measurement {}", m.id());
                UndoOutcome::Measurement(m)
            }
            None => UndoOutcome::Nothing,
        }
    }

    /// Retrieves a measurement by id.
    pub fn get(&self, id: MeasurementId) -> Option<&Measurement> {
        self.measurements.iter().find(|m| m.id() == id)
    }

    pub(crate) fn get_mut(&mut self, id: MeasurementId) -> Option<&mut Measurement> {
        self.measurements.iter_mut().find(|m| m.id() == id)
    }

    /// Owned copy of all measurements in creation order.
    pub fn snapshot(&self) -> Vec<Measurement> {
        self.measurements.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point3;
    use crate::measurement::MeasurementKind;
    use crate::units::Unit;
    use chrono::Utc;

    fn record(id: u64) -> Measurement {
        Measurement::new(
            MeasurementId(id),
            MeasurementKind::Distance,
            vec![Point3::new(0.0, 0.0, 0.0), Point3::new(id as f64, 0.0, 0.0)],
            id as f64,
            Unit::Meter,
            Utc::now(),
        )
    }

    #[test]
    fn add_keeps_creation_order() {
        let mut store = MeasurementStore::new();
        for id in [3, 1, 2] {
            assert!(store.add(record(id)));
        }
        let ids: Vec<u64> = store.iter().map(|m| m.id().0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut store = MeasurementStore::new();
        assert!(store.add(record(1)));
        assert!(!store.add(record(1)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_is_idempotent() {
        let mut store = MeasurementStore::new();
        store.add(record(1));
        store.add(record(2));
        assert_eq!(store.delete_by_id(MeasurementId(1)).map(|m| m.id().0), Some(1));
        assert!(store.delete_by_id(MeasurementId(1)).is_none());
        assert!(store.delete_by_id(MeasurementId(42)).is_none());
        assert_eq!(store.len(), 1);
        assert!(store.get(MeasurementId(2)).is_some());
    }

    #[test]
    fn clear_reports_count() {
        let mut store = MeasurementStore::new();
        store.add(record(1));
        store.add(record(2));
        assert_eq!(store.clear(), 2);
        assert!(store.is_empty());
        assert_eq!(store.clear(), 0);
    }

    #[test]
    fn undo_prefers_session_points() {
        let mut store = MeasurementStore::new();
        store.add(record(1));
        let mut capture = CaptureStateMachine::default();
        capture.select_tool(MeasurementKind::Area);
        capture
            .submit_point(Point3::new(0.0, 0.0, 0.0), Unit::Meter)
            .unwrap();

        assert_eq!(store.undo(&mut capture), UndoOutcome::SessionPoint);
        assert_eq!(store.len(), 1);
        assert_eq!(capture.snapshot().unwrap().point_count, 0);

        match store.undo(&mut capture) {
            UndoOutcome::Measurement(m) => assert_eq!(m.id(), MeasurementId(1)),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(store.is_empty());
        assert_eq!(store.undo(&mut capture), UndoOutcome::Nothing);
    }
}
