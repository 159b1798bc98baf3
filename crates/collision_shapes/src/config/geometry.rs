//! Tunable geometry and raycast defaults

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::physics::collision::DEFAULT_ELLIPSE_SAMPLES;

/// Geometry settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Boundary samples for ellipses built from this config
    pub ellipse_sample_count: usize,
    /// Raycast bounds
    pub raycast: RaycastConfig,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            ellipse_sample_count: DEFAULT_ELLIPSE_SAMPLES,
            raycast: RaycastConfig::default(),
        }
    }
}

impl Config for GeometryConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.ellipse_sample_count < 3 {
            return Err(ConfigError::Invalid(format!(
                "ellipse_sample_count must be at least 3, got {}",
                self.ellipse_sample_count
            )));
        }
        self.raycast.validate()
    }
}

/// Bounds for reflecting and full raycasts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaycastConfig {
    /// Maximum number of hits in a reflection chain
    pub max_reflections: usize,
    /// Total length a full raycast may travel
    pub max_length: f64,
}

impl Default for RaycastConfig {
    fn default() -> Self {
        Self {
            max_reflections: 8,
            max_length: 1000.0,
        }
    }
}

impl Config for RaycastConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_length.is_finite() || self.max_length < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "max_length must be finite and non-negative, got {}",
                self.max_length
            )));
        }
        Ok(())
    }
}
