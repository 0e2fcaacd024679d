//! Service layer
//!
//! - `OutstandingTimerSet`: which intercepted timers are still scheduled
//! - `TimerInterceptor`: decorator recording every schedule/cancel call
//! - `CompletionPredicate`: OR over framework completion probes
//! - `PageContext`: the per-page shared namespace tying them together
//! - `ScenarioRunner`: deterministic scripted runs on a virtual clock

pub mod completion_predicate;
pub mod outstanding_timers;
pub mod page_context;
pub mod scenario_runner;
pub mod timer_interceptor;

pub use completion_predicate::CompletionPredicate;
pub use outstanding_timers::OutstandingTimerSet;
pub use page_context::PageContext;
pub use scenario_runner::{ScenarioReport, ScenarioRunner, StepReport};
pub use timer_interceptor::TimerInterceptor;
