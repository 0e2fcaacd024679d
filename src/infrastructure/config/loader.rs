use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Reporter global name cannot be empty")]
    EmptyReporterGlobal,

    #[error("Finished field name cannot be empty")]
    EmptyFinishedField,

    #[error("Invalid step_limit: {0}. Must be at least 1")]
    InvalidStepLimit(usize),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .quiesce/config.yaml (project config)
    /// 3. .quiesce/local.yaml (project local overrides, optional)
    /// 4. Environment variables (QUIESCE_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".quiesce/config.yaml"))
            .merge(Yaml::file(".quiesce/local.yaml"))
            .merge(Env::prefixed("QUIESCE_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honoring environment overrides
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("QUIESCE_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        if config.completion.reporter_global.trim().is_empty() {
            return Err(ConfigError::EmptyReporterGlobal);
        }

        if config.completion.finished_field.trim().is_empty() {
            return Err(ConfigError::EmptyFinishedField);
        }

        if config.virtual_clock.step_limit == 0 {
            return Err(ConfigError::InvalidStepLimit(
                config.virtual_clock.step_limit,
            ));
        }

        Ok(())
    }
}
