//! Adapters implementing the domain ports
//!
//! - `VirtualTimerProvider`: deterministic virtual-clock timers
//! - `TokioTimerProvider`: real timers on a tokio runtime
//! - `probes`: completion probe implementations

pub mod probes;
pub mod tokio_timers;
pub mod virtual_clock;

pub use probes::{FnProbe, OutstandingTimersProbe, ReporterFinishedProbe};
pub use tokio_timers::TokioTimerProvider;
pub use virtual_clock::VirtualTimerProvider;
