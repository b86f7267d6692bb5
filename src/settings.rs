//! Display and pacing configuration
//!
//! Defaults come from `consts`. An optional JSON file can override them;
//! gameplay tuning (speeds, roster thresholds) stays compile-time constant.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Explicit context passed into the session and each level at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Game-space dimensions (top-left origin)
    pub width: f32,
    pub height: f32,
    /// Loop cadence in ticks per second
    pub tick_rate: u32,
    /// Cadence of the single pause tick after a terminal outcome
    pub settle_rate: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            tick_rate: TICK_RATE,
            settle_rate: SETTLE_RATE,
        }
    }
}

impl Settings {
    /// Load overrides from a JSON file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let settings = Settings::default();
        assert_eq!(settings.width, 900.0);
        assert_eq!(settings.height, 700.0);
        assert_eq!(settings.tick_rate, 60);
        assert_eq!(settings.settle_rate, 1);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"tick_rate": 30}"#).unwrap();
        assert_eq!(settings.tick_rate, 30);
        assert_eq!(settings.width, 900.0);
    }
}
