//! # groundctl Configuration
//!
//! Layered settings for the groundctl operator console.
//!
//! ## Features
//! - **Layering**: defaults, YAML files, then `GROUNDCTL_*` environment variables
//! - **Validation**: retry budget, region list and log level are checked on load
//!
//! The operator still picks the region interactively; settings only supply
//! the list offered.

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod client;
mod error;
mod regions;
mod telemetry;
mod validation;

pub use client::ClientConfig;
pub use error::ConfigError;
pub use regions::{default_regions, RegionChoice};
pub use telemetry::TelemetryConfig;

const BASE_FILE: &str = "config/groundctl.yaml";
const ENV_PREFIX: &str = "GROUNDCTL_";

/// Top‑level settings container.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct GroundctlConfig {
    /// Remote client retry and endpoint settings.
    #[validate(nested)]
    #[serde(default)]
    pub client: ClientConfig,

    /// Regions offered by the region selector, in display order.
    #[validate(length(min = 1))]
    #[validate(nested)]
    #[serde(default = "default_regions")]
    pub regions: Vec<RegionChoice>,

    /// Logging settings.
    #[validate(nested)]
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl Default for GroundctlConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            regions: default_regions(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl GroundctlConfig {
    /// Load settings from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/groundctl.yaml`, if present
    /// 3. `config/<GROUNDCTL_ENV>.yaml`, if `GROUNDCTL_ENV` is set and the file exists
    /// 4. `GROUNDCTL_*` environment variables (`__` separates nested keys)
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(GroundctlConfig::default()));

        if Path::new(BASE_FILE).exists() {
            figment = figment.merge(Yaml::file(BASE_FILE));
        }

        if let Ok(env) = std::env::var("GROUNDCTL_ENV") {
            let env_file = format!("config/{}.yaml", env);
            if Path::new(&env_file).exists() {
                figment = figment.merge(Yaml::file(env_file));
            }
        }

        Self::extract(figment)
    }

    /// Load settings from an explicit file, still honouring environment overrides.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(path)));
        }

        let figment = Figment::from(Serialized::defaults(GroundctlConfig::default()))
            .merge(Yaml::file(path));
        Self::extract(figment)
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}
