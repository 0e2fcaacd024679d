use thiserror::Error;

/// Errors raised by a timer provider's scheduling or cancellation entry points.
///
/// The interceptor never produces these itself; it only propagates whatever
/// the wrapped provider returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    #[error("Timer step limit exceeded: more than {limit} callbacks ran in one drain")]
    StepLimitExceeded { limit: usize },

    #[error("No async runtime available to schedule the timer on")]
    RuntimeUnavailable,

    #[error("Virtual clock overflow: {now_ms}ms + {delta_ms}ms")]
    ClockOverflow { now_ms: u64, delta_ms: u64 },
}

/// Errors raised while checking or running a scripted scenario
#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("Unknown timer label: {0}")]
    UnknownLabel(String),

    #[error("Timer label used twice: {0}")]
    DuplicateLabel(String),

    #[error("Scenario has no steps")]
    Empty,

    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),
}
