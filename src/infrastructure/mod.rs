//! Infrastructure layer module
//!
//! - Configuration management (figment: defaults, YAML, environment)
//! - Logging infrastructure (tracing-subscriber, tracing-appender)

pub mod config;
pub mod logging;
