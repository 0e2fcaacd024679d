//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use quiesce::adapters::VirtualTimerProvider;
use quiesce::services::PageContext;

/// A fresh page over a virtual clock, returning the provider for driving time
#[allow(dead_code)]
pub fn virtual_page() -> (Arc<VirtualTimerProvider>, PageContext<VirtualTimerProvider>) {
    let provider = Arc::new(VirtualTimerProvider::new());
    let page = PageContext::attach(Arc::clone(&provider));
    (provider, page)
}

/// Shared log that callbacks can append to
#[allow(dead_code)]
pub fn call_log<T>() -> Arc<Mutex<Vec<T>>> {
    Arc::new(Mutex::new(Vec::new()))
}

/// Path to a file under tests/fixtures
#[allow(dead_code)]
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}
