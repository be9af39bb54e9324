//! Per-container settings.
//!
//! Each section carries serde defaults so a partial file only overrides what
//! it names.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation;

/// Command queue (bounded deque) settings.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CommandQueueConfig {
    /// Maximum number of queued security commands. Fixed for the lifetime of
    /// the queue.
    #[validate(range(min = 1, max = 4096))]
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_capacity() -> usize {
    5
}

impl Default for CommandQueueConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

/// Sensor rotation (circular list) settings.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct RotationConfig {
    /// Steps walked by a rotation when the caller does not give a count.
    #[validate(range(min = 1, max = 10_000))]
    #[serde(default = "default_steps")]
    pub default_steps: usize,
}

fn default_steps() -> usize {
    6
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            default_steps: default_steps(),
        }
    }
}

/// Device grouping (tree) settings.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct DeviceTreeConfig {
    /// Name of the root group.
    #[validate(length(min = 1, max = 64), custom(function = validation::validate_not_blank))]
    #[serde(default = "default_root")]
    pub root: String,
}

fn default_root() -> String {
    "Home".into()
}

impl Default for DeviceTreeConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

/// Logging and metrics.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct TelemetryConfig {
    /// Fallback `tracing` filter when `RUST_LOG` is unset.
    #[validate(custom(function = validation::validate_log_filter))]
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Print Prometheus metrics after a run.
    #[serde(default)]
    pub metrics: bool,
}

fn default_log_filter() -> String {
    "info".into()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            metrics: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        CommandQueueConfig::default().validate().expect("commands");
        RotationConfig::default().validate().expect("rotation");
        DeviceTreeConfig::default().validate().expect("devices");
        TelemetryConfig::default().validate().expect("telemetry");
    }

    #[test]
    fn zero_capacity_rejected() {
        let config = CommandQueueConfig { capacity: 0 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn blank_root_rejected() {
        let config = DeviceTreeConfig { root: "  ".into() };
        assert!(config.validate().is_err());
    }
}
