//! Length and area unit conversion.
//!
//! Meters are the base unit. Scene coordinates are assumed to be meters, so
//! raw kernel results are converted with [`from_base`] / [`area_from_base`]
//! into whatever unit is active when a measurement completes.

use std::fmt;
use std::str::FromStr;

use crate::error::MeasureError;

/// Supported display units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum Unit {
    #[default]
    #[serde(rename = "m")]
    Meter,
    #[serde(rename = "cm")]
    Centimeter,
    #[serde(rename = "mm")]
    Millimeter,
    #[serde(rename = "ft")]
    Foot,
    #[serde(rename = "in")]
    Inch,
}

impl Unit {
    /// Every supported unit.
    pub const ALL: [Unit; 5] = [
        Unit::Meter,
        Unit::Centimeter,
        Unit::Millimeter,
        Unit::Foot,
        Unit::Inch,
    ];

    /// Length of one of this unit in meters.
    pub const fn meters(self) -> f64 {
        match self {
            Unit::Meter => 1.0,
            Unit::Centimeter => 0.01,
            Unit::Millimeter => 0.001,
            Unit::Foot => 0.3048,
            Unit::Inch => 0.0254,
        }
    }

    /// Short symbol used for display and serialization.
    pub const fn symbol(self) -> &'static str {
        match self {
            Unit::Meter => "m",
            Unit::Centimeter => "cm",
            Unit::Millimeter => "mm",
            Unit::Foot => "ft",
            Unit::Inch => "in",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = MeasureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(Unit::Meter),
            "cm" | "centimeter" | "centimeters" | "centimetre" | "centimetres" => {
                Ok(Unit::Centimeter)
            }
            "mm" | "millimeter" | "millimeters" | "millimetre" | "millimetres" => {
                Ok(Unit::Millimeter)
            }
            "ft" | "foot" | "feet" => Ok(Unit::Foot),
            "in" | "inch" | "inches" => Ok(Unit::Inch),
            _ => Err(MeasureError::UnknownUnit(s.to_string())),
        }
    }
}

/// Converts a length expressed in `unit` to meters.
pub fn to_base(value: f64, unit: Unit) -> f64 {
    value * unit.meters()
}

/// Converts a length in meters to `unit`.
pub fn from_base(meters: f64, unit: Unit) -> f64 {
    meters / unit.meters()
}

/// Converts an area expressed in square `unit` to square meters.
pub fn area_to_base(value: f64, unit: Unit) -> f64 {
    value * unit.meters().powi(2)
}

/// Converts an area in square meters to square `unit`.
pub fn area_from_base(square_meters: f64, unit: Unit) -> f64 {
    square_meters / unit.meters().powi(2)
}

/// Converts a length between two units.
pub fn convert(value: f64, from: Unit, to: Unit) -> f64 {
    from_base(to_base(value, from), to)
}

/// Converts an area between two units.
pub fn convert_area(value: f64, from: Unit, to: Unit) -> f64 {
    area_from_base(area_to_base(value, from), to)
}
