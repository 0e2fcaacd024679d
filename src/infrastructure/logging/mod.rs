//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - JSON or pretty console output
//! - Optional rolling log files via tracing-appender

pub mod logger;

pub use logger::LoggerImpl;
