//! Domain layer for the quiesce instrumentation core
//!
//! This module contains the data model (timer identifiers, callbacks, the page's
//! global scope, configuration, scenarios) and the port traits that adapters
//! implement.

pub mod error;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use error::{ScenarioError, TimerError};
