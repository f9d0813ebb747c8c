use serde::{Deserialize, Serialize};

/// Main configuration structure for tracksync
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Number of queue worker tasks (1-64)
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Queue configuration
    #[serde(default)]
    pub queue: QueueConfig,

    /// Subscription sweeper configuration
    #[serde(default)]
    pub sweeper: SweeperConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

const fn default_workers() -> usize {
    4
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            queue: QueueConfig::default(),
            sweeper: SweeperConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Queue configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct QueueConfig {
    /// Logical queue name all integration jobs ride on
    #[serde(default = "default_queue_name")]
    pub name: String,

    /// Attempt budget applied to every job kind
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_queue_name() -> String {
    "integrations".to_string()
}

const fn default_max_attempts() -> u32 {
    5
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            name: default_queue_name(),
            max_attempts: default_max_attempts(),
        }
    }
}

/// Subscription sweeper configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SweeperConfig {
    /// Provider whose subscriptions get swept
    #[serde(default = "default_sweep_provider")]
    pub provider: String,

    /// Seconds between sweep cycles
    #[serde(default = "default_sweep_interval_secs")]
    pub interval_secs: u64,

    /// Seconds a subscription may go unchecked before a health check
    #[serde(default = "default_staleness_threshold_secs")]
    pub staleness_threshold_secs: u64,
}

fn default_sweep_provider() -> String {
    "vsts".to_string()
}

const fn default_sweep_interval_secs() -> u64 {
    60 * 60
}

const fn default_staleness_threshold_secs() -> u64 {
    6 * 60 * 60
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            provider: default_sweep_provider(),
            interval_secs: default_sweep_interval_secs(),
            staleness_threshold_secs: default_staleness_threshold_secs(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
