//! Trajectory generation settings

use crate::error::TrajectoryError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Corner radius of blended runs (same unit as waypoint positions)
pub const DEFAULT_CORNER_RADIUS: f64 = 3.0;
/// Equivalent radius of blended runs
pub const DEFAULT_CORNER_EQUIVALENT_RADIUS: f64 = 3.0;
/// Equivalent radius of isolated straight segments
pub const DEFAULT_LINE_EQUIVALENT_RADIUS: f64 = 1.0;

/// How `Wait` waypoints contribute to the trajectory
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WaitPolicy {
    /// No geometry and no time
    #[default]
    Skip,
    /// Stand still at the previous frame for the given time
    Dwell { seconds: f64 },
}

/// Settings used when regenerating a trajectory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrajectoryConfig {
    pub corner_radius: f64,
    pub corner_equivalent_radius: f64,
    pub line_equivalent_radius: f64,
    pub wait_policy: WaitPolicy,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        TrajectoryConfig {
            corner_radius: DEFAULT_CORNER_RADIUS,
            corner_equivalent_radius: DEFAULT_CORNER_EQUIVALENT_RADIUS,
            line_equivalent_radius: DEFAULT_LINE_EQUIVALENT_RADIUS,
            wait_policy: WaitPolicy::Skip,
        }
    }
}

impl TrajectoryConfig {
    /// Parse settings from TOML; missing keys keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self, TrajectoryError> {
        let config: TrajectoryConfig =
            toml::from_str(text).map_err(|e| TrajectoryError::Config(e.to_string()))?;
        config.validate().map_err(TrajectoryError::Config)?;
        Ok(config)
    }

    /// Serialize settings to TOML
    pub fn to_toml_string(&self) -> Result<String, TrajectoryError> {
        toml::to_string(self).map_err(|e| TrajectoryError::Config(e.to_string()))
    }

    /// Check that all values are usable
    pub fn validate(&self) -> Result<(), String> {
        if !(self.corner_radius.is_finite() && self.corner_radius > 0.0) {
            return Err("Corner radius must be positive".to_string());
        }
        if !(self.corner_equivalent_radius.is_finite() && self.corner_equivalent_radius > 0.0) {
            return Err("Corner equivalent radius must be positive".to_string());
        }
        if !(self.line_equivalent_radius.is_finite() && self.line_equivalent_radius > 0.0) {
            return Err("Line equivalent radius must be positive".to_string());
        }
        if let WaitPolicy::Dwell { seconds } = self.wait_policy {
            if !(seconds.is_finite() && seconds >= 0.0) {
                return Err("Dwell time must be non-negative".to_string());
            }
        }
        Ok(())
    }

    /// Configure from a parameter map
    ///
    /// Recognized keys: `corner_radius`, `corner_equivalent_radius`,
    /// `line_equivalent_radius` and `dwell_time` (switches `Wait` waypoints to
    /// dwelling). Nothing is changed when a value is rejected.
    pub fn configure(&mut self, params: &HashMap<String, f64>) -> Result<(), String> {
        let mut updated = self.clone();

        if let Some(&corner_radius) = params.get("corner_radius") {
            if corner_radius <= 0.0 {
                return Err("Corner radius must be positive".to_string());
            }
            updated.corner_radius = corner_radius;
        }

        if let Some(&eq_radius) = params.get("corner_equivalent_radius") {
            if eq_radius <= 0.0 {
                return Err("Corner equivalent radius must be positive".to_string());
            }
            updated.corner_equivalent_radius = eq_radius;
        }

        if let Some(&eq_radius) = params.get("line_equivalent_radius") {
            if eq_radius <= 0.0 {
                return Err("Line equivalent radius must be positive".to_string());
            }
            updated.line_equivalent_radius = eq_radius;
        }

        if let Some(&seconds) = params.get("dwell_time") {
            if seconds < 0.0 {
                return Err("Dwell time must be non-negative".to_string());
            }
            updated.wait_policy = WaitPolicy::Dwell { seconds };
        }

        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrajectoryConfig::default();
        assert_eq!(config.corner_radius, 3.0);
        assert_eq!(config.corner_equivalent_radius, 3.0);
        assert_eq!(config.line_equivalent_radius, 1.0);
        assert_eq!(config.wait_policy, WaitPolicy::Skip);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let text = r#"
            corner_radius = 5.0

            [wait_policy]
            mode = "dwell"
            seconds = 0.5
        "#;
        let config = TrajectoryConfig::from_toml_str(text).unwrap();
        assert_eq!(config.corner_radius, 5.0);
        assert_eq!(config.line_equivalent_radius, 1.0);
        assert_eq!(config.wait_policy, WaitPolicy::Dwell { seconds: 0.5 });
    }

    #[test]
    fn test_toml_round_trip() {
        let config = TrajectoryConfig {
            wait_policy: WaitPolicy::Dwell { seconds: 2.0 },
            ..Default::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(TrajectoryConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_toml_rejects_invalid_values() {
        let err = TrajectoryConfig::from_toml_str("corner_radius = -1.0").unwrap_err();
        assert!(matches!(err, TrajectoryError::Config(_)));
    }

    #[test]
    fn test_configure_params() {
        let mut config = TrajectoryConfig::default();
        let mut params = HashMap::new();
        params.insert("corner_radius".to_string(), 1.5);
        params.insert("dwell_time".to_string(), 0.25);
        config.configure(&params).unwrap();

        assert_eq!(config.corner_radius, 1.5);
        assert_eq!(config.wait_policy, WaitPolicy::Dwell { seconds: 0.25 });
    }

    #[test]
    fn test_configure_rejects_and_keeps_state() {
        let mut config = TrajectoryConfig::default();
        let mut params = HashMap::new();
        params.insert("line_equivalent_radius".to_string(), 2.0);
        params.insert("corner_radius".to_string(), 0.0);

        assert!(config.configure(&params).is_err());
        assert_eq!(config, TrajectoryConfig::default());
    }
}
