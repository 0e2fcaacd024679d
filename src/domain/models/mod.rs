//! Domain models
//!
//! Plain data shared by the ports, services and adapters.

pub mod config;
pub mod global_scope;
pub mod scenario;
pub mod timer;

pub use config::{
    CompletionConfig, Config, LogFormat, LoggingConfig, RotationPolicy, VirtualClockConfig,
};
pub use global_scope::{is_truthy, GlobalScope};
pub use scenario::{GlobalAssignment, Scenario, ScenarioStep};
pub use timer::{OnceCallback, PendingTimer, RepeatingCallback, TimerId, TimerKind};
