//! Decorator over a [`TimerProvider`] that records every schedule and cancel.

use std::sync::Arc;
use std::time::Duration;

use tracing::trace;

use crate::domain::error::TimerError;
use crate::domain::models::{OnceCallback, RepeatingCallback, TimerKind};
use crate::domain::ports::TimerProvider;
use crate::services::outstanding_timers::OutstandingTimerSet;

/// Wraps the page's timer primitives so every call is observed.
///
/// The interceptor captures the original provider when it is built, so calls
/// always reach the real implementation. Callbacks, delays and returned
/// identifiers pass through untouched; errors from the original provider are
/// returned as-is and leave the bookkeeping unchanged.
pub struct TimerInterceptor<P: TimerProvider> {
    original: Arc<P>,
    outstanding: Arc<OutstandingTimerSet<P::Id>>,
}

impl<P: TimerProvider> TimerInterceptor<P> {
    /// Wrap `original` with an empty outstanding set
    pub fn new(original: Arc<P>) -> Self {
        Self {
            original,
            outstanding: Arc::new(OutstandingTimerSet::new()),
        }
    }

    /// The timers scheduled through this interceptor and not yet cancelled
    pub fn outstanding(&self) -> &Arc<OutstandingTimerSet<P::Id>> {
        &self.outstanding
    }

    /// The provider calls are forwarded to
    pub fn original(&self) -> &Arc<P> {
        &self.original
    }

    fn track(&self, kind: TimerKind, id: P::Id) -> P::Id {
        let outstanding = self.outstanding.insert(id.clone());
        trace!(timer_id = ?id, kind = %kind, outstanding, "timer scheduled");
        id
    }

    fn untrack(&self, kind: TimerKind, id: &P::Id, cancelled: bool) -> bool {
        let outstanding = self.outstanding.remove(id);
        trace!(timer_id = ?id, kind = %kind, cancelled, outstanding, "timer cancelled");
        cancelled
    }
}

impl<P: TimerProvider> TimerProvider for TimerInterceptor<P> {
    type Id = P::Id;

    fn set_timeout(&self, callback: OnceCallback, delay: Duration) -> Result<Self::Id, TimerError> {
        let id = self.original.set_timeout(callback, delay)?;
        Ok(self.track(TimerKind::Once, id))
    }

    fn clear_timeout(&self, id: &Self::Id) -> Result<bool, TimerError> {
        let cancelled = self.original.clear_timeout(id)?;
        Ok(self.untrack(TimerKind::Once, id, cancelled))
    }

    fn set_interval(
        &self,
        callback: RepeatingCallback,
        period: Duration,
    ) -> Result<Self::Id, TimerError> {
        let id = self.original.set_interval(callback, period)?;
        Ok(self.track(TimerKind::Repeating, id))
    }

    fn clear_interval(&self, id: &Self::Id) -> Result<bool, TimerError> {
        let cancelled = self.original.clear_interval(id)?;
        Ok(self.untrack(TimerKind::Repeating, id, cancelled))
    }
}
