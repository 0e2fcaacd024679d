//! The per-page shared namespace: one instance per page attach.
//!
//! Holds the page's timer provider, its global scope, and two independent
//! install-once slots: the timer interceptor (with its outstanding set) and
//! the completion predicate. Everything a harness or page script touches
//! goes through this object instead of ambient globals.

use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::adapters::probes::{OutstandingTimersProbe, ReporterFinishedProbe};
use crate::domain::models::{CompletionConfig, GlobalScope};
use crate::domain::ports::{CompletionProbe, TimerProvider};
use crate::services::completion_predicate::CompletionPredicate;
use crate::services::outstanding_timers::OutstandingTimerSet;
use crate::services::timer_interceptor::TimerInterceptor;

/// Shared namespace for one page load
pub struct PageContext<P: TimerProvider> {
    id: Uuid,
    attached_at: DateTime<Utc>,
    provider: Arc<P>,
    globals: Arc<GlobalScope>,
    interceptor: OnceLock<Arc<TimerInterceptor<P>>>,
    predicate: OnceLock<CompletionPredicate>,
}

impl<P: TimerProvider> PageContext<P> {
    /// Attach to a page whose timers are served by `provider`
    pub fn attach(provider: Arc<P>) -> Self {
        Self::with_globals(provider, Arc::new(GlobalScope::new()))
    }

    /// Attach with an existing global scope (e.g. one a framework already populated)
    pub fn with_globals(provider: Arc<P>, globals: Arc<GlobalScope>) -> Self {
        let id = Uuid::new_v4();
        debug!(page_id = %id, "page context attached");
        Self {
            id,
            attached_at: Utc::now(),
            provider,
            globals,
            interceptor: OnceLock::new(),
            predicate: OnceLock::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn attached_at(&self) -> DateTime<Utc> {
        self.attached_at
    }

    pub fn globals(&self) -> &Arc<GlobalScope> {
        &self.globals
    }

    /// The unwrapped provider
    pub fn provider(&self) -> &Arc<P> {
        &self.provider
    }

    /// Wrap the page's timer primitives.
    ///
    /// The first call captures the provider and creates an empty outstanding
    /// set; every later call is a no-op returning the same interceptor.
    pub fn install_timer_interceptor(&self) -> &Arc<TimerInterceptor<P>> {
        let mut installed_now = false;
        let interceptor = self.interceptor.get_or_init(|| {
            installed_now = true;
            Arc::new(TimerInterceptor::new(Arc::clone(&self.provider)))
        });

        if installed_now {
            debug!(page_id = %self.id, "timer interceptor installed");
        } else {
            debug!(page_id = %self.id, "timer interceptor already installed, skipping");
        }

        interceptor
    }

    pub fn is_interceptor_installed(&self) -> bool {
        self.interceptor.get().is_some()
    }

    /// The timer entry points page code should call.
    ///
    /// Before installation this is the raw provider, afterwards the interceptor.
    pub fn timers(&self) -> &dyn TimerProvider<Id = P::Id> {
        if let Some(interceptor) = self.interceptor.get() {
            return interceptor.as_ref();
        }
        self.provider.as_ref()
    }

    /// The outstanding set, or `None` while the interceptor is not installed
    pub fn outstanding_timers(&self) -> Option<&Arc<OutstandingTimerSet<P::Id>>> {
        self.interceptor.get().map(|interceptor| interceptor.outstanding())
    }

    /// Define the completion predicate from `probes`.
    ///
    /// Only the first call has an effect; later calls return the existing
    /// predicate and drop their probes.
    pub fn install_completion_monitor<I>(&self, probes: I) -> &CompletionPredicate
    where
        I: IntoIterator<Item = Arc<dyn CompletionProbe>>,
    {
        let mut installed_now = false;
        let predicate = self.predicate.get_or_init(|| {
            installed_now = true;
            CompletionPredicate::new(probes.into_iter().collect())
        });

        if installed_now {
            debug!(
                page_id = %self.id,
                probes = ?predicate.probe_names(),
                "completion monitor installed"
            );
        } else {
            debug!(page_id = %self.id, "completion monitor already installed, skipping");
        }

        predicate
    }

    pub fn completion_predicate(&self) -> Option<&CompletionPredicate> {
        self.predicate.get()
    }

    /// Whether the page reports completion. `false` until a monitor is installed.
    pub fn completed(&self) -> bool {
        self.predicate.get().is_some_and(CompletionPredicate::completed)
    }

    /// Install the completion monitor described by `config`.
    ///
    /// Always registers the reporter probe. The outstanding-timers probe is
    /// registered only when enabled and the interceptor is already installed.
    pub fn install_configured_completion_monitor(
        &self,
        config: &CompletionConfig,
    ) -> &CompletionPredicate {
        let mut probes: Vec<Arc<dyn CompletionProbe>> = vec![Arc::new(
            ReporterFinishedProbe::new(
                Arc::clone(&self.globals),
                config.reporter_global.clone(),
                config.finished_field.clone(),
            ),
        )];

        if config.include_outstanding_timers {
            match self.outstanding_timers() {
                Some(set) => probes.push(Arc::new(OutstandingTimersProbe::new(Arc::clone(set)))),
                None => warn!(
                    page_id = %self.id,
                    "outstanding timer probe requested before interceptor install, skipping"
                ),
            }
        }

        self.install_completion_monitor(probes)
    }
}
