//! Planner configuration — footprint bounds, packing slack, heights,
//! and the per-floor behavior switches.
//!
//! ```
//! use floorplan_logic::config::{validate_config, PlannerConfig};
//!
//! let config = PlannerConfig::default();
//! assert_eq!(config.max_dimension, 50.0);
//! assert!(validate_config(&config).is_empty());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{footprint, heights};

/// How rooms on different floors share the packing plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloorPacking {
    /// Each floor is packed on its own, starting at the origin.
    #[default]
    PerFloor,
    /// All rooms are packed together in one coordinate space, then split
    /// by floor. Floors end up side by side instead of stacked.
    Shared,
}

/// Which floors draw a given door or window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningReplay {
    /// Every door and window is drawn on every floor.
    #[default]
    AllFloors,
    /// Openings are drawn only on the floor whose rooms produced them.
    OwnFloor,
}

/// Tunables for validation, packing and scene emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Upper clamp for positions and extents; also the exterior wall line.
    pub max_dimension: f32,
    /// Lower clamp for room extents.
    pub min_dimension: f32,
    /// Row width is `sqrt(total_area * packing_slack)`.
    pub packing_slack: f32,
    pub floor_height: f32,
    pub room_height: f32,
    pub floor_packing: FloorPacking,
    pub opening_replay: OpeningReplay,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_dimension: footprint::MAX_DIMENSION,
            min_dimension: footprint::MIN_DIMENSION,
            packing_slack: footprint::PACKING_SLACK,
            floor_height: heights::FLOOR_HEIGHT,
            room_height: heights::ROOM_HEIGHT,
            floor_packing: FloorPacking::default(),
            opening_replay: OpeningReplay::default(),
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("min_dimension must be positive, got {0}")]
    NonPositiveMinDimension(f32),
    #[error("max_dimension {max} is below min_dimension {min}")]
    InvertedDimensions { min: f32, max: f32 },
    /// Slack below 1.0 would ask for a row narrower than the room area.
    #[error("packing_slack must be at least 1.0, got {0}")]
    SlackTooSmall(f32),
    #[error("floor_height must be positive, got {0}")]
    NonPositiveFloorHeight(f32),
    #[error("room_height must be positive, got {0}")]
    NonPositiveRoomHeight(f32),
}

/// Validate a planner configuration, returning all errors found.
pub fn validate_config(config: &PlannerConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if !(config.min_dimension > 0.0) {
        errors.push(ConfigError::NonPositiveMinDimension(config.min_dimension));
    }
    if !(config.max_dimension >= config.min_dimension) {
        errors.push(ConfigError::InvertedDimensions {
            min: config.min_dimension,
            max: config.max_dimension,
        });
    }
    if !(config.packing_slack >= 1.0) {
        errors.push(ConfigError::SlackTooSmall(config.packing_slack));
    }
    if !(config.floor_height > 0.0) {
        errors.push(ConfigError::NonPositiveFloorHeight(config.floor_height));
    }
    if !(config.room_height > 0.0) {
        errors.push(ConfigError::NonPositiveRoomHeight(config.room_height));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = PlannerConfig::default();
        assert!(validate_config(&config).is_empty());
        assert_eq!(config.floor_packing, FloorPacking::PerFloor);
        assert_eq!(config.opening_replay, OpeningReplay::AllFloors);
    }

    #[test]
    fn test_inverted_dimensions() {
        let config = PlannerConfig {
            min_dimension: 10.0,
            max_dimension: 5.0,
            ..Default::default()
        };
        let errors = validate_config(&config);
        assert_eq!(
            errors,
            vec![ConfigError::InvertedDimensions {
                min: 10.0,
                max: 5.0
            }]
        );
    }

    #[test]
    fn test_multiple_errors_reported() {
        let config = PlannerConfig {
            min_dimension: 0.0,
            packing_slack: 0.5,
            floor_height: 0.0,
            room_height: -1.0,
            ..Default::default()
        };
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ConfigError::SlackTooSmall(0.5)));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PlannerConfig =
            serde_json::from_str(r#"{"floor_packing": "shared", "max_dimension": 30.0}"#)
                .unwrap();
        assert_eq!(config.floor_packing, FloorPacking::Shared);
        assert_eq!(config.max_dimension, 30.0);
        assert_eq!(config.floor_height, 3.1);
    }

    #[test]
    fn test_error_messages() {
        let config = PlannerConfig {
            min_dimension: 10.0,
            max_dimension: 5.0,
            ..Default::default()
        };
        let messages: Vec<String> = validate_config(&config)
            .iter()
            .map(|e| e.to_string())
            .collect();
        assert_eq!(messages, vec!["max_dimension 5 is below min_dimension 10"]);
        assert_eq!(
            ConfigError::SlackTooSmall(0.5).to_string(),
            "packing_slack must be at least 1.0, got 0.5"
        );
    }
}
