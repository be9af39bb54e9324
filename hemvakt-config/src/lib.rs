//! # Hemvakt Configuration
//!
//! Layered configuration for the Hemvakt toolkit.
//!
//! ## Features
//! - **Layering**: defaults, YAML files, then `HEMVAKT_*` environment variables
//! - **Validation**: every section is checked with `validator` after merging

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod error;
mod sections;
mod validation;

pub use error::ConfigError;
pub use sections::{CommandQueueConfig, DeviceTreeConfig, RotationConfig, TelemetryConfig};

const BASE_FILE: &str = "config/hemvakt.yaml";
const ENV_PREFIX: &str = "HEMVAKT_";

/// Top-level configuration container.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone)]
pub struct HemvaktConfig {
    #[validate(nested)]
    #[serde(default)]
    pub commands: CommandQueueConfig,

    #[validate(nested)]
    #[serde(default)]
    pub rotation: RotationConfig,

    #[validate(nested)]
    #[serde(default)]
    pub devices: DeviceTreeConfig,

    #[validate(nested)]
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl HemvaktConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/hemvakt.yaml`, if present
    /// 3. `config/<HEMVAKT_ENV>.yaml`, if present (`HEMVAKT_ENV` defaults to `local`)
    /// 4. `HEMVAKT_*` environment variables, `__` separating sections
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(HemvaktConfig::default()));

        if Path::new(BASE_FILE).exists() {
            figment = figment.merge(Yaml::file(BASE_FILE));
        }

        let env = std::env::var("HEMVAKT_ENV").unwrap_or_else(|_| "local".into());
        let env_file = format!("config/{env}.yaml");
        if Path::new(&env_file).exists() {
            figment = figment.merge(Yaml::file(env_file));
        }

        Self::extract(figment)
    }

    /// Load configuration from a specific file, still honouring environment
    /// overrides.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(path)));
        }

        let figment = Figment::from(Serialized::defaults(HemvaktConfig::default()))
            .merge(Yaml::file(path));
        Self::extract(figment)
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn default_config_validates() {
        let config = HemvaktConfig::default();
        config.validate().expect("Default config should validate");
        assert_eq!(config.commands.capacity, 5);
        assert_eq!(config.devices.root, "Home");
    }

    #[test]
    fn file_then_environment_override() {
        Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file(
                "config/hemvakt.yaml",
                "commands:\n  capacity: 3\ndevices:\n  root: Cabin\n",
            )?;
            jail.set_env("HEMVAKT_COMMANDS__CAPACITY", "8");

            let config = HemvaktConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.commands.capacity, 8);
            assert_eq!(config.devices.root, "Cabin");
            assert_eq!(config.rotation.default_steps, 6);
            Ok(())
        });
    }

    #[test]
    fn environment_specific_file() {
        Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file("config/staging.yaml", "rotation:\n  default_steps: 12\n")?;
            jail.set_env("HEMVAKT_ENV", "staging");

            let config = HemvaktConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.rotation.default_steps, 12);
            Ok(())
        });
    }

    #[test]
    fn invalid_values_are_reported_with_section_path() {
        Jail::expect_with(|jail| {
            jail.create_file("bad.yaml", "commands:\n  capacity: 0\n")?;

            let err = HemvaktConfig::load_from_path("bad.yaml").unwrap_err();
            assert!(matches!(err, ConfigError::Validation(_)));
            assert!(err.to_string().contains("commands.capacity"));
            Ok(())
        });
    }

    #[test]
    fn missing_file() {
        let err = HemvaktConfig::load_from_path("does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }
}
