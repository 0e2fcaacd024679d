//! Completion probe adapters
//!
//! - `ReporterFinishedProbe`: reporter object with a finished flag (shipped default)
//! - `OutstandingTimersProbe`: empty outstanding set (opt-in)
//! - `FnProbe`: any closure

pub mod function;
pub mod outstanding;
pub mod reporter;

pub use function::FnProbe;
pub use outstanding::OutstandingTimersProbe;
pub use reporter::ReporterFinishedProbe;
