//! Actor movement tuning
//!
//! Loaded from JSON so feel can be adjusted without recompiling. Missing
//! fields fall back to the defaults in `consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Configuration and level loading errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Value out of range
    #[error("Invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Movement constants for the controllable actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorTuning {
    /// Horizontal speed ceiling (pixels/s)
    pub max_speed: f32,
    /// Horizontal acceleration toward the desired speed (pixels/s²)
    pub accel: f32,
    /// Gravity (pixels/s², positive is down)
    pub gravity: f32,
    /// Fall speed ceiling (pixels/s)
    pub terminal_velocity: f32,
    /// Upward launch speed of a jump (pixels/s)
    pub jump_speed: f32,
    /// Extra gravity fraction applied while rising with jump released
    pub jump_cut_factor: f32,
}

impl Default for ActorTuning {
    fn default() -> Self {
        Self {
            max_speed: ACTOR_MAX_SPEED,
            accel: ACTOR_ACCEL,
            gravity: GRAVITY,
            terminal_velocity: TERMINAL_VELOCITY,
            jump_speed: ACTOR_JUMP_SPEED,
            jump_cut_factor: JUMP_CUT_FACTOR,
        }
    }
}

impl ActorTuning {
    /// Parse from a JSON string and validate
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load from a JSON file and validate
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&contents)?;
        log::info!("Loaded actor tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject constants that would make the integrator misbehave
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("max_speed", self.max_speed),
            ("accel", self.accel),
            ("terminal_velocity", self.terminal_velocity),
            ("jump_speed", self.jump_speed),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be finite and > 0, got {value}"),
                });
            }
        }

        let non_negative = [
            ("gravity", self.gravity),
            ("jump_cut_factor", self.jump_cut_factor),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be finite and >= 0, got {value}"),
                });
            }
        }

        Ok(())
    }
}
