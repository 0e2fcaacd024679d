//! Quiesce - outstanding timer tracking and page completion detection
//!
//! An automation harness that snapshots a page (coverage counters, DOM state)
//! must know when the page's timer-driven work and its in-page test framework
//! are done. Quiesce provides the in-page half of that contract:
//!
//! - a timer interceptor that wraps the page's schedule/cancel primitives and
//!   records which timers are outstanding, and
//! - a completion predicate the harness polls, backed by framework probes.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models and port traits (`TimerProvider`, `CompletionProbe`)
//! - **Service Layer** (`services`): interceptor, outstanding set, predicate, page context
//! - **Adapters** (`adapters`): virtual-clock and tokio timer providers, probes
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```
//! use quiesce::adapters::VirtualTimerProvider;
//! use quiesce::domain::models::CompletionConfig;
//! use quiesce::domain::ports::TimerProvider;
//! use quiesce::services::PageContext;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let page = PageContext::attach(Arc::new(VirtualTimerProvider::new()));
//! page.install_timer_interceptor();
//! page.install_configured_completion_monitor(&CompletionConfig::default());
//!
//! let id = page.timers().set_timeout(Box::new(|| {}), Duration::from_millis(10)).unwrap();
//! assert!(page.outstanding_timers().unwrap().contains(&id));
//! assert!(!page.completed());
//!
//! page.globals().set("reporter", serde_json::json!({ "finished": true }));
//! assert!(page.completed());
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::{
    FnProbe, OutstandingTimersProbe, ReporterFinishedProbe, TokioTimerProvider,
    VirtualTimerProvider,
};
pub use domain::models::{Config, GlobalScope, Scenario, ScenarioStep, TimerId, TimerKind};
pub use domain::ports::{CompletionProbe, TimerProvider};
pub use domain::{ScenarioError, TimerError};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    CompletionPredicate, OutstandingTimerSet, PageContext, ScenarioRunner, TimerInterceptor,
};
