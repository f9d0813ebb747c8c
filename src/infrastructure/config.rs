use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid workers: {0}. Must be between 1 and 64")]
    InvalidWorkers(usize),

    #[error("Queue name cannot be empty")]
    EmptyQueueName,

    #[error("Invalid max_attempts: {0}. Cannot be 0")]
    InvalidMaxAttempts(u32),

    #[error("Sweeper provider cannot be empty")]
    EmptySweepProvider,

    #[error("Invalid sweep interval: {0}. Must be positive")]
    InvalidSweepInterval(u64),

    #[error("Invalid staleness threshold: {0}. Must be positive")]
    InvalidStalenessThreshold(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. tracksync.yaml (project config)
    /// 3. Environment variables (`TRACKSYNC_*` prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file("tracksync.yaml"))
            .merge(Env::prefixed("TRACKSYNC_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
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
        if config.workers == 0 || config.workers > 64 {
            return Err(ConfigError::InvalidWorkers(config.workers));
        }

        if config.queue.name.is_empty() {
            return Err(ConfigError::EmptyQueueName);
        }

        if config.queue.max_attempts == 0 {
            return Err(ConfigError::InvalidMaxAttempts(config.queue.max_attempts));
        }

        if config.sweeper.provider.is_empty() {
            return Err(ConfigError::EmptySweepProvider);
        }

        if config.sweeper.interval_secs == 0 {
            return Err(ConfigError::InvalidSweepInterval(
                config.sweeper.interval_secs,
            ));
        }

        if config.sweeper.staleness_threshold_secs == 0 {
            return Err(ConfigError::InvalidStalenessThreshold(
                config.sweeper.staleness_threshold_secs,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}
