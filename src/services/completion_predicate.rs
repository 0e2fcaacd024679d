//! The "is the page done?" oracle polled by an automation harness.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::domain::ports::CompletionProbe;

/// Logical OR over a fixed list of framework probes.
///
/// Evaluation is synchronous and read-only. With no probe reporting done
/// (including the case of no probes at all) the answer is `false`.
#[derive(Clone, Default)]
pub struct CompletionPredicate {
    probes: Vec<Arc<dyn CompletionProbe>>,
}

impl CompletionPredicate {
    pub fn new(probes: Vec<Arc<dyn CompletionProbe>>) -> Self {
        Self { probes }
    }

    /// Append another framework probe
    #[must_use]
    pub fn with_probe(mut self, probe: Arc<dyn CompletionProbe>) -> Self {
        self.probes.push(probe);
        self
    }

    /// Names of the registered probes, in evaluation order
    pub fn probe_names(&self) -> Vec<&str> {
        self.probes.iter().map(|p| p.name()).collect()
    }

    /// Whether any probe reports its framework as finished
    pub fn completed(&self) -> bool {
        self.probes.iter().any(|probe| {
            let complete = probe.is_complete();
            trace!(probe = probe.name(), complete, "completion probe evaluated");
            complete
        })
    }
}

impl fmt::Debug for CompletionPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionPredicate")
            .field("probes", &self.probe_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct Flag {
        name: &'static str,
        done: AtomicBool,
    }

    impl Flag {
        fn new(name: &'static str, done: bool) -> Arc<Self> {
            Arc::new(Self {
                name,
                done: AtomicBool::new(done),
            })
        }
    }

    impl CompletionProbe for Flag {
        fn name(&self) -> &str {
            self.name
        }

        fn is_complete(&self) -> bool {
            self.done.load(Ordering::SeqCst)
        }
    }

    #[test]
    fn test_no_probes_is_not_complete() {
        assert!(!CompletionPredicate::default().completed());
    }

    #[test]
    fn test_or_across_probes() {
        let a = Flag::new("a", false);
        let b = Flag::new("b", false);
        let predicate = CompletionPredicate::default()
            .with_probe(a.clone())
            .with_probe(b.clone());

        assert_eq!(predicate.probe_names(), vec!["a", "b"]);
        assert!(!predicate.completed());

        b.done.store(true, Ordering::SeqCst);
        assert!(predicate.completed());

        b.done.store(false, Ordering::SeqCst);
        a.done.store(true, Ordering::SeqCst);
        assert!(predicate.completed());
    }
}
