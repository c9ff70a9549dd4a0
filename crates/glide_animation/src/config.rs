//! Timing configuration
//!
//! Constants used by the typed interpolators to derive a natural duration from
//! their endpoints. Can be tuned per product from a TOML file:
//!
//! ```toml
//! min_move_duration = 0.25
//! max_speed_scalar = 6.0
//! ```
//!
//! Missing keys keep their defaults.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Duration constants for position, angle and scale interpolation
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Duration of any short move, in seconds
    pub min_move_duration: f64,
    /// Moves shorter than this share of the viewport's shorter side are short moves
    pub min_speed_scalar: f64,
    /// Long moves travel this many viewport sides per second
    pub max_speed_scalar: f64,
    /// Seconds needed to rotate by a quarter turn
    pub quarter_turn_duration: f64,
    /// Scale ratio covered per second
    pub zoom_speed: f64,
}

impl TimingConfig {
    pub const DEFAULT: TimingConfig = TimingConfig {
        min_move_duration: 0.2,
        min_speed_scalar: 0.2,
        max_speed_scalar: 7.0,
        quarter_turn_duration: 0.5,
        // Resize 2.0 times in 0.3 seconds.
        zoom_speed: 2.0 / 0.3,
    };

    /// Parse a config from a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: TimingConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!("Loaded timing config from {}", path.display());
        Ok(config)
    }

    /// Check that every constant is finite and positive
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("min_move_duration", self.min_move_duration),
            ("min_speed_scalar", self.min_speed_scalar),
            ("max_speed_scalar", self.max_speed_scalar),
            ("quarter_turn_duration", self.quarter_turn_duration),
            ("zoom_speed", self.zoom_speed),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("expected a positive number, got {value}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
