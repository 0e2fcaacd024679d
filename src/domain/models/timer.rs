use serde::{Deserialize, Serialize};
use std::fmt;

/// Callback run once when a one-shot timer fires.
///
/// Any arguments the page wants forwarded to the callback are captured by the
/// closure, so passing the box through unchanged forwards them unchanged.
pub type OnceCallback = Box<dyn FnOnce() + Send + 'static>;

/// Callback run on every tick of a repeating timer.
pub type RepeatingCallback = Box<dyn FnMut() + Send + 'static>;

/// Which pair of primitives a timer belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    /// Scheduled with `set_timeout`, fires once
    Once,
    /// Scheduled with `set_interval`, fires until cancelled
    Repeating,
}

impl TimerKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Once => "once",
            Self::Repeating => "repeating",
        }
    }
}

impl fmt::Display for TimerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timer identifier handed out by the virtual and tokio providers.
///
/// Providers are free to use any hashable identifier; this is the one the
/// bundled adapters share. Identifiers start at 1 and never repeat within a
/// provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerId(pub u64);

impl TimerId {
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TimerId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A timer still waiting in a provider's own queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingTimer {
    pub id: TimerId,
    pub kind: TimerKind,
    pub due_at_ms: u64,
    /// Period for repeating timers
    pub period_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_kind_as_str() {
        assert_eq!(TimerKind::Once.as_str(), "once");
        assert_eq!(TimerKind::Repeating.to_string(), "repeating");
    }

    #[test]
    fn test_timer_id_serializes_as_number() {
        let json = serde_json::to_string(&TimerId(42)).unwrap();
        assert_eq!(json, "42");
        assert_eq!(TimerId::from(7).get(), 7);
    }
}
