//! Deterministic timer provider driven by a virtual millisecond clock.
//!
//! Nothing fires until the owner calls [`VirtualTimerProvider::advance`],
//! [`VirtualTimerProvider::run_due`] or [`VirtualTimerProvider::flush`].
//! Timers fire in due-time order, ties broken by scheduling order.
//! Callbacks run without the queue lock held, so they may schedule and cancel
//! timers on the same provider.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::trace;

use crate::domain::error::TimerError;
use crate::domain::models::{
    OnceCallback, PendingTimer, RepeatingCallback, TimerId, TimerKind,
};
use crate::domain::ports::TimerProvider;

const DEFAULT_STEP_LIMIT: usize = 10_000;

enum Callback {
    Once(OnceCallback),
    Repeating(RepeatingCallback),
}

struct ScheduledTimer {
    id: TimerId,
    due_at_ms: u64,
    order: u64,
    period_ms: Option<u64>,
    callback: Callback,
}

impl ScheduledTimer {
    const fn kind(&self) -> TimerKind {
        match self.callback {
            Callback::Once(_) => TimerKind::Once,
            Callback::Repeating(_) => TimerKind::Repeating,
        }
    }
}

struct Running {
    id: TimerId,
    kind: TimerKind,
    cancelled: bool,
}

#[derive(Default)]
struct ClockState {
    now_ms: u64,
    next_id: u64,
    next_order: u64,
    queue: Vec<ScheduledTimer>,
    running: Option<Running>,
}

impl ClockState {
    fn push(&mut self, due_at_ms: u64, period_ms: Option<u64>, callback: Callback) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.push_with_id(id, due_at_ms, period_ms, callback);
        id
    }

    fn push_with_id(
        &mut self,
        id: TimerId,
        due_at_ms: u64,
        period_ms: Option<u64>,
        callback: Callback,
    ) {
        self.next_order += 1;
        self.queue.push(ScheduledTimer {
            id,
            due_at_ms,
            order: self.next_order,
            period_ms,
            callback,
        });
    }

    fn next_index(&self, due_limit: Option<u64>) -> Option<usize> {
        self.queue
            .iter()
            .enumerate()
            .filter(|(_, timer)| due_limit.is_none_or(|limit| timer.due_at_ms <= limit))
            .min_by_key(|(_, timer)| (timer.due_at_ms, timer.order))
            .map(|(idx, _)| idx)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|timer| timer.id != id);
        let removed = self.queue.len() < before;

        // A repeating timer cancelling itself from its own callback is
        // not in the queue while it runs.
        let running_cancelled = match self.running.as_mut() {
            Some(running)
                if running.id == id && running.kind == TimerKind::Repeating && !running.cancelled =>
            {
                running.cancelled = true;
                true
            }
            _ => false,
        };

        removed || running_cancelled
    }
}

/// Timer provider over a virtual clock
pub struct VirtualTimerProvider {
    state: Mutex<ClockState>,
    step_limit: usize,
}

impl Default for VirtualTimerProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualTimerProvider {
    pub fn new() -> Self {
        Self::with_step_limit(DEFAULT_STEP_LIMIT)
    }

    /// Provider that fails a drain after `step_limit` callbacks
    pub fn with_step_limit(step_limit: usize) -> Self {
        Self {
            state: Mutex::new(ClockState::default()),
            step_limit: step_limit.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ClockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current virtual time in milliseconds since the provider was created
    pub fn now_ms(&self) -> u64 {
        self.lock().now_ms
    }

    /// Timers waiting in the queue, in firing order
    pub fn pending(&self) -> Vec<PendingTimer> {
        let state = self.lock();
        let mut timers: Vec<(u64, PendingTimer)> = state
            .queue
            .iter()
            .map(|timer| {
                (
                    timer.order,
                    PendingTimer {
                        id: timer.id,
                        kind: timer.kind(),
                        due_at_ms: timer.due_at_ms,
                        period_ms: timer.period_ms,
                    },
                )
            })
            .collect();
        timers.sort_by_key(|(order, timer)| (timer.due_at_ms, *order));
        timers.into_iter().map(|(_, timer)| timer).collect()
    }

    /// Move the clock forward by `delta`, firing everything that comes due.
    ///
    /// Returns the number of callbacks that ran.
    pub fn advance(&self, delta: Duration) -> Result<usize, TimerError> {
        let delta_ms = duration_ms(delta);
        let now_ms = self.now_ms();
        let target = now_ms
            .checked_add(delta_ms)
            .ok_or(TimerError::ClockOverflow { now_ms, delta_ms })?;

        let ran = self.drain(Some(target))?;
        let mut state = self.lock();
        state.now_ms = state.now_ms.max(target);
        trace!(delta_ms, now_ms = state.now_ms, ran, "virtual clock advanced");
        Ok(ran)
    }

    /// Fire the timers already due at the current time
    pub fn run_due(&self) -> Result<usize, TimerError> {
        let now_ms = self.now_ms();
        self.drain(Some(now_ms))
    }

    /// Fire timers until the queue is empty, jumping the clock as needed.
    ///
    /// A live repeating timer never lets the queue empty, so this ends in
    /// [`TimerError::StepLimitExceeded`] unless it is cancelled along the way.
    pub fn flush(&self) -> Result<usize, TimerError> {
        self.drain(None)
    }

    fn drain(&self, due_limit: Option<u64>) -> Result<usize, TimerError> {
        let mut steps = 0usize;

        loop {
            let timer = {
                let mut state = self.lock();
                let Some(idx) = state.next_index(due_limit) else {
                    break;
                };
                steps += 1;
                if steps > self.step_limit {
                    return Err(TimerError::StepLimitExceeded {
                        limit: self.step_limit,
                    });
                }

                let timer = state.queue.remove(idx);
                state.now_ms = state.now_ms.max(timer.due_at_ms);
                state.running = Some(Running {
                    id: timer.id,
                    kind: timer.kind(),
                    cancelled: false,
                });
                trace!(
                    timer_id = %timer.id,
                    kind = %timer.kind(),
                    now_ms = state.now_ms,
                    "virtual timer fired"
                );
                timer
            };

            let ScheduledTimer {
                id,
                due_at_ms,
                period_ms,
                callback,
                ..
            } = timer;

            match callback {
                Callback::Once(callback) => {
                    let _running = RunningSlot(self);
                    callback();
                }
                Callback::Repeating(mut callback) => {
                    let _running = RunningSlot(self);
                    callback();
                    let mut state = self.lock();
                    let cancelled = state.running.take().is_some_and(|r| r.cancelled);
                    if !cancelled {
                        let period = period_ms.unwrap_or(1);
                        state.push_with_id(
                            id,
                            due_at_ms.saturating_add(period),
                            period_ms,
                            Callback::Repeating(callback),
                        );
                    }
                }
            }
        }

        Ok(steps)
    }
}

/// Clears the running slot when a callback returns or unwinds
struct RunningSlot<'a>(&'a VirtualTimerProvider);

impl Drop for RunningSlot<'_> {
    fn drop(&mut self) {
        self.0.lock().running = None;
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl TimerProvider for VirtualTimerProvider {
    type Id = TimerId;

    fn set_timeout(&self, callback: OnceCallback, delay: Duration) -> Result<TimerId, TimerError> {
        let mut state = self.lock();
        let due_at_ms = state.now_ms.saturating_add(duration_ms(delay));
        Ok(state.push(due_at_ms, None, Callback::Once(callback)))
    }

    fn clear_timeout(&self, id: &TimerId) -> Result<bool, TimerError> {
        Ok(self.lock().cancel(*id))
    }

    fn set_interval(
        &self,
        callback: RepeatingCallback,
        period: Duration,
    ) -> Result<TimerId, TimerError> {
        // Browsers clamp zero periods; without it one tick would spin forever.
        let period_ms = duration_ms(period).max(1);
        let mut state = self.lock();
        let due_at_ms = state.now_ms.saturating_add(period_ms);
        Ok(state.push(due_at_ms, Some(period_ms), Callback::Repeating(callback)))
    }

    fn clear_interval(&self, id: &TimerId) -> Result<bool, TimerError> {
        Ok(self.lock().cancel(*id))
    }
}

impl fmt::Debug for VirtualTimerProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("VirtualTimerProvider")
            .field("now_ms", &state.now_ms)
            .field("pending", &state.queue.len())
            .field("step_limit", &self.step_limit)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn recorder() -> (Arc<Mutex<Vec<&'static str>>>, impl Fn(&'static str) -> OnceCallback) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let make = move |name: &'static str| -> OnceCallback {
            let sink = Arc::clone(&sink);
            Box::new(move || sink.lock().unwrap().push(name))
        };
        (log, make)
    }

    #[test]
    fn test_ids_are_sequential() {
        let timers = VirtualTimerProvider::new();
        let a = timers.set_timeout(Box::new(|| {}), Duration::ZERO).unwrap();
        let b = timers.set_interval(Box::new(|| {}), Duration::ZERO).unwrap();
        assert_eq!((a, b), (TimerId(1), TimerId(2)));
    }

    #[test]
    fn test_fires_in_due_then_schedule_order() {
        let timers = VirtualTimerProvider::new();
        let (log, make) = recorder();

        timers.set_timeout(make("late"), Duration::from_millis(20)).unwrap();
        timers.set_timeout(make("first"), Duration::from_millis(10)).unwrap();
        timers.set_timeout(make("second"), Duration::from_millis(10)).unwrap();

        assert_eq!(timers.advance(Duration::from_millis(15)).unwrap(), 2);
        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
        assert_eq!(timers.now_ms(), 15);

        assert_eq!(timers.advance(Duration::from_millis(5)).unwrap(), 1);
        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "late"]);
    }

    #[test]
    fn test_cancel_unknown_returns_false() {
        let timers = VirtualTimerProvider::new();
        assert!(!timers.clear_timeout(&TimerId(99)).unwrap());
        assert!(!timers.clear_interval(&TimerId(99)).unwrap());
    }

    #[test]
    fn test_interval_rearms_until_cancelled() {
        let timers = VirtualTimerProvider::new();
        let id = timers
            .set_interval(Box::new(|| {}), Duration::from_millis(10))
            .unwrap();

        assert_eq!(timers.advance(Duration::from_millis(30)).unwrap(), 3);
        let pending = timers.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, id);
        assert_eq!(pending[0].due_at_ms, 40);
        assert_eq!(pending[0].period_ms, Some(10));

        assert!(timers.clear_interval(&id).unwrap());
        assert!(timers.pending().is_empty());
    }

    #[test]
    fn test_callback_can_reschedule() {
        let timers = Arc::new(VirtualTimerProvider::new());
        let (log, make) = recorder();

        let nested = make("nested");
        let inner = Arc::clone(&timers);
        timers
            .set_timeout(
                Box::new(move || {
                    inner.set_timeout(nested, Duration::from_millis(5)).unwrap();
                }),
                Duration::from_millis(5),
            )
            .unwrap();

        assert_eq!(timers.advance(Duration::from_millis(10)).unwrap(), 2);
        assert_eq!(*log.lock().unwrap(), vec!["nested"]);
    }

    #[test]
    fn test_interval_cancels_itself() {
        let timers = Arc::new(VirtualTimerProvider::new());
        let ticks = Arc::new(Mutex::new(0u32));

        let inner = Arc::clone(&timers);
        let counter = Arc::clone(&ticks);
        timers
            .set_interval(
                Box::new(move || {
                    let mut ticks = counter.lock().unwrap();
                    *ticks += 1;
                    if *ticks == 2 {
                        assert!(inner.clear_interval(&TimerId(1)).unwrap());
                    }
                }),
                Duration::from_millis(10),
            )
            .unwrap();

        timers.advance(Duration::from_millis(100)).unwrap();
        assert_eq!(*ticks.lock().unwrap(), 2);
        assert!(timers.pending().is_empty());
    }

    #[test]
    fn test_flush_hits_step_limit_on_live_interval() {
        let timers = VirtualTimerProvider::with_step_limit(5);
        timers
            .set_interval(Box::new(|| {}), Duration::from_millis(1))
            .unwrap();

        assert_eq!(
            timers.flush(),
            Err(TimerError::StepLimitExceeded { limit: 5 })
        );
    }

    #[test]
    fn test_flush_jumps_clock() {
        let timers = VirtualTimerProvider::new();
        timers
            .set_timeout(Box::new(|| {}), Duration::from_millis(250))
            .unwrap();

        assert_eq!(timers.flush().unwrap(), 1);
        assert_eq!(timers.now_ms(), 250);
    }

    #[test]
    fn test_run_due_fires_zero_delay() {
        let timers = VirtualTimerProvider::new();
        timers.set_timeout(Box::new(|| {}), Duration::ZERO).unwrap();
        timers
            .set_timeout(Box::new(|| {}), Duration::from_millis(1))
            .unwrap();

        assert_eq!(timers.run_due().unwrap(), 1);
        assert_eq!(timers.pending().len(), 1);
    }

    #[test]
    fn test_panicking_interval_leaves_no_running_timer() {
        let timers = VirtualTimerProvider::new();
        let id = timers
            .set_interval(Box::new(|| panic!("tick failed")), Duration::from_millis(10))
            .unwrap();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            timers.advance(Duration::from_millis(10))
        }));
        assert!(result.is_err());

        // The timer was neither re-armed nor left marked as running.
        assert!(timers.pending().is_empty());
        assert!(!timers.clear_interval(&id).unwrap());

        timers
            .set_timeout(Box::new(|| {}), Duration::from_millis(5))
            .unwrap();
        assert_eq!(timers.advance(Duration::from_millis(5)).unwrap(), 1);
    }
}
