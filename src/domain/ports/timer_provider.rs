use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::error::TimerError;
use crate::domain::models::{OnceCallback, RepeatingCallback};

/// Port for a page's timer primitives following hexagonal architecture
///
/// The four entry points mirror what a page script can call: schedule-once,
/// cancel-once, schedule-repeating, cancel-repeating. Implementations own the
/// actual clock; decorators (such as the timer interceptor) implement the same
/// trait so page code cannot tell whether it is talking to the raw provider or
/// a wrapped one.
///
/// The trait is object safe: page code typically holds a
/// `&dyn TimerProvider<Id = ...>`.
///
/// # Examples
///
/// ```
/// use quiesce::adapters::VirtualTimerProvider;
/// use quiesce::domain::ports::TimerProvider;
/// use std::time::Duration;
///
/// let timers = VirtualTimerProvider::new();
/// let id = timers.set_timeout(Box::new(|| {}), Duration::from_millis(10)).unwrap();
/// assert!(timers.clear_timeout(&id).unwrap());
/// ```
pub trait TimerProvider: Send + Sync {
    /// Opaque handle returned by scheduling, used to cancel later
    type Id: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    /// Schedule `callback` to run once after `delay`
    fn set_timeout(&self, callback: OnceCallback, delay: Duration) -> Result<Self::Id, TimerError>;

    /// Cancel a one-shot timer.
    ///
    /// Unknown, fired, or already-cancelled identifiers are not an error; the
    /// returned flag says whether anything was actually cancelled.
    fn clear_timeout(&self, id: &Self::Id) -> Result<bool, TimerError>;

    /// Schedule `callback` to run every `period` until cancelled
    fn set_interval(
        &self,
        callback: RepeatingCallback,
        period: Duration,
    ) -> Result<Self::Id, TimerError>;

    /// Cancel a repeating timer. Same contract as [`TimerProvider::clear_timeout`].
    fn clear_interval(&self, id: &Self::Id) -> Result<bool, TimerError>;
}

impl<P: TimerProvider + ?Sized> TimerProvider for Arc<P> {
    type Id = P::Id;

    fn set_timeout(&self, callback: OnceCallback, delay: Duration) -> Result<Self::Id, TimerError> {
        (**self).set_timeout(callback, delay)
    }

    fn clear_timeout(&self, id: &Self::Id) -> Result<bool, TimerError> {
        (**self).clear_timeout(id)
    }

    fn set_interval(
        &self,
        callback: RepeatingCallback,
        period: Duration,
    ) -> Result<Self::Id, TimerError> {
        (**self).set_interval(callback, period)
    }

    fn clear_interval(&self, id: &Self::Id) -> Result<bool, TimerError> {
        (**self).clear_interval(id)
    }
}
