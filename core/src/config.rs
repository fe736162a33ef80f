//! Engine configuration
//!
//! Every section has sensible defaults so hosts only override what they need.
//! Configuration is plain serde data and can be read from JSON.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::temporal::playback::Speed;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Bounds applied to every step generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorLimits {
    /// Largest number of steps a single trace may hold
    pub max_steps: usize,
}

impl GeneratorLimits {
    pub const DEFAULT_MAX_STEPS: usize = 1_000;

    pub fn with_max_steps(max_steps: usize) -> Self {
        Self { max_steps }
    }
}

impl Default for GeneratorLimits {
    fn default() -> Self {
        Self {
            max_steps: Self::DEFAULT_MAX_STEPS,
        }
    }
}

/// Playback timing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Tick interval at 1x speed, in milliseconds
    pub base_interval_ms: u64,

    /// Speed a freshly created controller starts with
    pub initial_speed: Speed,

    /// Pending commands a driver buffers before senders wait
    pub command_buffer: usize,
}

impl PlaybackConfig {
    pub fn base_interval(&self) -> Duration {
        Duration::from_millis(self.base_interval_ms)
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            base_interval_ms: 1_000,
            initial_speed: Speed::Normal,
            command_buffer: 32,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub playback: PlaybackConfig,
    pub limits: GeneratorLimits,
}

impl EngineConfig {
    /// Parses and validates a JSON document; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // 4x divides the base interval by four; anything shorter would round to zero.
        if self.playback.base_interval_ms < 4 {
            return Err(ConfigError::InvalidValue {
                field: "playback.base_interval_ms",
                reason: format!("must be at least 4, got {}", self.playback.base_interval_ms),
            });
        }
        if self.playback.command_buffer == 0 {
            return Err(ConfigError::InvalidValue {
                field: "playback.command_buffer",
                reason: "must be positive".to_string(),
            });
        }
        if self.limits.max_steps == 0 {
            return Err(ConfigError::InvalidValue {
                field: "limits.max_steps",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.playback.base_interval(), Duration::from_secs(1));
        assert_eq!(config.limits.max_steps, GeneratorLimits::DEFAULT_MAX_STEPS);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(r#"{ "limits": { "max_steps": 50 } }"#).unwrap();
        assert_eq!(config.limits.max_steps, 50);
        assert_eq!(config.playback, PlaybackConfig::default());
    }

    #[test]
    fn test_speed_is_read_from_json() {
        let config =
            EngineConfig::from_json(r#"{ "playback": { "initial_speed": "2x", "base_interval_ms": 400 } }"#)
                .unwrap();
        assert_eq!(config.playback.initial_speed, Speed::Double);
        assert_eq!(config.playback.base_interval(), Duration::from_millis(400));
    }

    #[test]
    fn test_rejects_zero_budget() {
        let err = EngineConfig::from_json(r#"{ "limits": { "max_steps": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "limits.max_steps", .. }));
    }

    #[test]
    fn test_rejects_tiny_interval() {
        let err = EngineConfig::from_json(r#"{ "playback": { "base_interval_ms": 1 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(EngineConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }
}
