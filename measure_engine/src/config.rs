//! Engine configuration.

use std::io;

use serde::{Deserialize, Serialize};

use crate::capture::DEFAULT_CLOSURE_THRESHOLD;
use crate::units::Unit;

/// Tunable engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Distance to the first vertex, in scene units, below which an area
    /// click closes the polygon.
    pub closure_threshold: f64,
    /// Unit active when the engine is created.
    pub default_unit: Unit,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            closure_threshold: DEFAULT_CLOSURE_THRESHOLD,
            default_unit: Unit::Meter,
        }
    }
}

impl EngineConfig {
    /// Returns `true` if the threshold is a finite, non-negative distance.
    pub fn is_valid(&self) -> bool {
        self.closure_threshold.is_finite() && self.closure_threshold >= 0.0
    }
}

/// Reads an [`EngineConfig`] from a JSON file. Missing fields take their
/// default values.
pub fn read_config_json(path: &str) -> io::Result<EngineConfig> {
    let contents = std::fs::read_to_string(path)?;
    let config: EngineConfig = serde_json::from_str(&contents)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    if !config.is_valid() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "closure_threshold must be a non-negative number, got {}",
                config.closure_threshold
            ),
        ));
    }
    Ok(config)
}

/// Writes an [`EngineConfig`] as pretty JSON.
pub fn write_config_json(path: &str, config: &EngineConfig) -> io::Result<()> {
    let json = serde_json::to_string_pretty(config).map_err(io::Error::other)?;
    std::fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.closure_threshold, 0.1);
        assert_eq!(cfg.default_unit, Unit::Meter);
        assert!(cfg.is_valid());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let cfg: EngineConfig = serde_json::from_str(r#"{"default_unit":"ft"}"#).unwrap();
        assert_eq!(cfg.default_unit, Unit::Foot);
        assert_eq!(cfg.closure_threshold, 0.1);
    }

    #[test]
    fn invalid_thresholds() {
        let mut cfg = EngineConfig::default();
        cfg.closure_threshold = -1.0;
        assert!(!cfg.is_valid());
        cfg.closure_threshold = f64::NAN;
        assert!(!cfg.is_valid());
    }
}
