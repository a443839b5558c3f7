//! Finalized measurement records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MeasureError;
use crate::geometry::Point3;
use crate::units::Unit;

/// Measurement tool / record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementKind {
    /// Straight-line distance between two points.
    Distance,
    /// Planar area of a closed polygon of three or more points.
    Area,
    /// Angle at a vertex between two rays (end, vertex, end).
    Angle,
}

impl MeasurementKind {
    /// Minimum number of points a finalized record of this kind holds.
    pub const fn min_points(self) -> usize {
        match self {
            MeasurementKind::Distance => 2,
            MeasurementKind::Area => 3,
            MeasurementKind::Angle => 3,
        }
    }

    /// Identifier used in logs, scripts and serialized records.
    pub const fn name(self) -> &'static str {
        match self {
            MeasurementKind::Distance => "distance",
            MeasurementKind::Area => "area",
            MeasurementKind::Angle => "angle",
        }
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MeasurementKind {
    type Err = MeasureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distance" => Ok(MeasurementKind::Distance),
            "area" => Ok(MeasurementKind::Area),
            "angle" => Ok(MeasurementKind::Angle),
            _ => Err(MeasureError::UnknownKind(s.to_string())),
        }
    }
}

/// Identifier issued by the engine for each finalized measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementId(pub u64);

impl fmt::Display for MeasurementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A completed measurement.
///
/// `value` is expressed in `unit`, the unit that was active when the
/// measurement completed. Angles are always in degrees; `unit` is still
/// recorded for them so every record carries the same shape. Apart from
/// the user label, records never change once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    id: MeasurementId,
    kind: MeasurementKind,
    points: Vec<Point3>,
    value: f64,
    unit: Unit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    created_at: DateTime<Utc>,
}

impl Measurement {
    pub(crate) fn new(
        id: MeasurementId,
        kind: MeasurementKind,
        points: Vec<Point3>,
        value: f64,
        unit: Unit,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind,
            points,
            value,
            unit,
            label: None,
            created_at,
        }
    }

    pub fn id(&self) -> MeasurementId {
        self.id
    }

    pub fn kind(&self) -> MeasurementKind {
        self.kind
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }

    /// Value rendered for display, e.g. `5.000 m`, `0.500 m²` or `90.0°`.
    pub fn formatted_value(&self) -> String {
        match self.kind {
            MeasurementKind::Distance => format!("{:.3} {}", self.value, self.unit),
            MeasurementKind::Area => format!("{:.3} {}²", self.value, self.unit),
            MeasurementKind::Angle => format!("{:.1}°", self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(kind: MeasurementKind, value: f64, unit: Unit) -> Measurement {
        Measurement::new(
            MeasurementId(7),
            kind,
            vec![Point3::new(0.0, 0.0, 0.0); kind.min_points()],
            value,
            unit,
            Utc::now(),
        )
    }

    #[test]
    fn formatted_values() {
        assert_eq!(
            sample(MeasurementKind::Distance, 5.0, Unit::Meter).formatted_value(),
            "5.000 m"
        );
        assert_eq!(
            sample(MeasurementKind::Area, 0.5, Unit::Foot).formatted_value(),
            "0.500 ft²"
        );
        assert_eq!(
            sample(MeasurementKind::Angle, 90.0, Unit::Inch).formatted_value(),
            "90.0°"
        );
    }

    #[test]
    fn kind_parsing() {
        assert_eq!("Area".parse::<MeasurementKind>().unwrap(), MeasurementKind::Area);
        assert_eq!(
            "volume".parse::<MeasurementKind>(),
            Err(MeasureError::UnknownKind("volume".into()))
        );
    }

    #[test]
    fn json_shape() {
        let mut m = sample(MeasurementKind::Distance, 1.25, Unit::Centimeter);
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["kind"], "distance");
        assert_eq!(json["unit"], "cm");
        assert!(json.get("label").is_none());

        m.set_label(Some("door width".into()));
        let text = serde_json::to_string(&m).unwrap();
        let back: Measurement = serde_json::from_str(&text).unwrap();
        assert_eq!(back.label(), Some("door width"));
        assert_eq!(back, m);
    }
}
