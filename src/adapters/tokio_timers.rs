//! Real timers backed by a tokio runtime.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::trace;

use crate::domain::error::TimerError;
use crate::domain::models::{OnceCallback, RepeatingCallback, TimerId, TimerKind};
use crate::domain::ports::TimerProvider;

type TaskMap = Arc<Mutex<HashMap<TimerId, JoinHandle<()>>>>;

/// Longest interval period honored. Larger periods are clamped so the
/// interval's own deadline arithmetic cannot overflow.
const MAX_PERIOD: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Timer provider that spawns one tokio task per timer.
///
/// Cancelling aborts the task. A one-shot timer drops its own handle after it
/// fires, so cancelling it afterwards reports `false`.
#[derive(Debug)]
pub struct TokioTimerProvider {
    handle: Handle,
    next_id: AtomicU64,
    tasks: TaskMap,
}

impl TokioTimerProvider {
    /// Provider on the runtime the caller is running in
    pub fn current() -> Result<Self, TimerError> {
        let handle = Handle::try_current().map_err(|_| TimerError::RuntimeUnavailable)?;
        Ok(Self::with_handle(handle))
    }

    pub fn with_handle(handle: Handle) -> Self {
        Self {
            handle,
            next_id: AtomicU64::new(0),
            tasks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn lock(tasks: &TaskMap) -> MutexGuard<'_, HashMap<TimerId, JoinHandle<()>>> {
        tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_id(&self) -> TimerId {
        TimerId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Number of timers still owned by the runtime
    pub fn active(&self) -> usize {
        Self::lock(&self.tasks).len()
    }

    fn cancel(&self, id: TimerId, kind: TimerKind) -> bool {
        let handle = Self::lock(&self.tasks).remove(&id);
        let cancelled = handle.is_some_and(|handle| {
            let running = !handle.is_finished();
            handle.abort();
            running
        });
        trace!(timer_id = %id, kind = %kind, cancelled, "tokio timer cancelled");
        cancelled
    }
}

impl TimerProvider for TokioTimerProvider {
    type Id = TimerId;

    fn set_timeout(&self, callback: OnceCallback, delay: Duration) -> Result<TimerId, TimerError> {
        let id = self.next_id();
        let tasks = Arc::clone(&self.tasks);

        // Hold the map lock across spawn so the task cannot remove its own
        // entry before it is inserted.
        let mut map = Self::lock(&self.tasks);
        let handle = self.handle.spawn(async move {
            time::sleep(delay).await;
            Self::lock(&tasks).remove(&id);
            trace!(timer_id = %id, "tokio timeout fired");
            callback();
        });
        map.insert(id, handle);
        Ok(id)
    }

    fn clear_timeout(&self, id: &TimerId) -> Result<bool, TimerError> {
        Ok(self.cancel(*id, TimerKind::Once))
    }

    fn set_interval(
        &self,
        mut callback: RepeatingCallback,
        period: Duration,
    ) -> Result<TimerId, TimerError> {
        let id = self.next_id();
        let period = period.clamp(Duration::from_millis(1), MAX_PERIOD);

        let handle = self.handle.spawn(async move {
            // `sleep` clamps its own deadline; the interval's first tick is immediate.
            time::sleep(period).await;
            let mut ticker = time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                trace!(timer_id = %id, "tokio interval ticked");
                callback();
            }
        });
        Self::lock(&self.tasks).insert(id, handle);
        Ok(id)
    }

    fn clear_interval(&self, id: &TimerId) -> Result<bool, TimerError> {
        Ok(self.cancel(*id, TimerKind::Repeating))
    }
}

impl Drop for TokioTimerProvider {
    fn drop(&mut self) {
        for (_, handle) in Self::lock(&self.tasks).drain() {
            handle.abort();
        }
    }
}
