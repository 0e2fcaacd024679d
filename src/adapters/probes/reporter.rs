//! Probe for frameworks that publish a reporter object with a finished flag.

use std::sync::Arc;

use crate::domain::models::{is_truthy, GlobalScope};
use crate::domain::ports::CompletionProbe;

/// Reads `<reporter>.<finished>` from the page's global scope.
///
/// This is how a Jasmine-style runner exposes completion: its reporter object
/// sets `finished` once the suite is done. A missing reporter, a missing field,
/// or a falsy value all read as "not complete"; any truthy value reads as
/// complete.
#[derive(Debug, Clone)]
pub struct ReporterFinishedProbe {
    globals: Arc<GlobalScope>,
    reporter: String,
    field: String,
}

impl ReporterFinishedProbe {
    pub fn new(
        globals: Arc<GlobalScope>,
        reporter: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self {
            globals,
            reporter: reporter.into(),
            field: field.into(),
        }
    }

    /// Probe for the conventional `reporter.finished` flag
    pub fn jasmine(globals: Arc<GlobalScope>) -> Self {
        Self::new(globals, "reporter", "finished")
    }
}

impl CompletionProbe for ReporterFinishedProbe {
    fn name(&self) -> &str {
        "reporter_finished"
    }

    fn is_complete(&self) -> bool {
        self.globals
            .lookup(&[self.reporter.as_str(), self.field.as_str()])
            .is_some_and(|flag| is_truthy(&flag))
    }
}
