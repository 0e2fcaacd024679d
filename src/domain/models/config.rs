use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for quiesce
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Completion predicate configuration
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Virtual clock configuration for scenario runs
    #[serde(default)]
    pub virtual_clock: VirtualClockConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console format
    #[serde(default)]
    pub format: LogFormat,

    /// Directory for log files (if None, logs only go to stderr)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Log file rotation policy
    #[serde(default)]
    pub rotation: RotationPolicy,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    /// Compact human-readable lines
    #[default]
    Pretty,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    #[default]
    Daily,
    Hourly,
    Never,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_dir: None,
            rotation: RotationPolicy::default(),
        }
    }
}

/// Completion predicate configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CompletionConfig {
    /// Global holding the test framework's reporter object
    #[serde(default = "default_reporter_global")]
    pub reporter_global: String,

    /// Field on the reporter that turns truthy when the suite is done
    #[serde(default = "default_finished_field")]
    pub finished_field: String,

    /// Also report completion when no intercepted timer is outstanding.
    ///
    /// Off by default: the predicate normally reports framework completion only.
    #[serde(default)]
    pub include_outstanding_timers: bool,
}

fn default_reporter_global() -> String {
    "reporter".to_string()
}

fn default_finished_field() -> String {
    "finished".to_string()
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            reporter_global: default_reporter_global(),
            finished_field: default_finished_field(),
            include_outstanding_timers: false,
        }
    }
}

/// Virtual clock configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VirtualClockConfig {
    /// Maximum callbacks run by a single advance before giving up
    #[serde(default = "default_step_limit")]
    pub step_limit: usize,
}

const fn default_step_limit() -> usize {
    10_000
}

impl Default for VirtualClockConfig {
    fn default() -> Self {
        Self {
            step_limit: default_step_limit(),
        }
    }
}
