//! Adapter turning any closure into a completion probe.

use std::fmt;

use crate::domain::ports::CompletionProbe;

/// Probe backed by a closure, for frameworks without a dedicated adapter
pub struct FnProbe<F> {
    name: String,
    check: F,
}

impl<F> FnProbe<F>
where
    F: Fn() -> bool + Send + Sync,
{
    pub fn new(name: impl Into<String>, check: F) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

impl<F> CompletionProbe for FnProbe<F>
where
    F: Fn() -> bool + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn is_complete(&self) -> bool {
        (self.check)()
    }
}

impl<F> fmt::Debug for FnProbe<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnProbe").field("name", &self.name).finish()
    }
}
