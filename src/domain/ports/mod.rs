//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces that adapters must implement:
//! - TimerProvider: the page's schedule/cancel timer primitives
//! - CompletionProbe: a test framework's "finished" signal
//!
//! Services depend only on these traits, so the same interceptor and predicate
//! work over a virtual clock in tests and real tokio timers in production.

pub mod completion_probe;
pub mod timer_provider;

pub use completion_probe::CompletionProbe;
pub use timer_provider::TimerProvider;
