//! Opt-in probe that treats an empty outstanding set as completion.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use crate::domain::ports::CompletionProbe;
use crate::services::outstanding_timers::OutstandingTimerSet;

/// Complete when no intercepted timer is outstanding.
///
/// Fired one-shot timers stay outstanding until cancelled, so a page that lets
/// its timeouts run out without clearing them never satisfies this probe.
#[derive(Debug)]
pub struct OutstandingTimersProbe<Id> {
    outstanding: Arc<OutstandingTimerSet<Id>>,
}

impl<Id> OutstandingTimersProbe<Id> {
    pub fn new(outstanding: Arc<OutstandingTimerSet<Id>>) -> Self {
        Self { outstanding }
    }
}

impl<Id> CompletionProbe for OutstandingTimersProbe<Id>
where
    Id: Clone + Eq + Hash + Debug + Send + Sync,
{
    fn name(&self) -> &str {
        "outstanding_timers"
    }

    fn is_complete(&self) -> bool {
        self.outstanding.is_empty()
    }
}
