//! Runs a scripted scenario against a page on a virtual clock.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::adapters::VirtualTimerProvider;
use crate::domain::error::ScenarioError;
use crate::domain::models::{
    Config, GlobalAssignment, OnceCallback, Scenario, ScenarioStep, TimerId,
};
use crate::services::page_context::PageContext;

/// Page state observed right after one step
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub step: String,
    pub now_ms: u64,
    /// Sorted outstanding identifiers; `None` while the interceptor is absent
    pub outstanding: Option<Vec<TimerId>>,
    /// Timers still queued in the provider itself
    pub pending: usize,
    pub completed: bool,
    /// Provider's answer for cancel steps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled: Option<bool>,
    /// Callbacks run by advance steps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fired: Option<usize>,
}

/// Result of a full scenario run
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub page_id: Uuid,
    pub attached_at: DateTime<Utc>,
    pub steps: Vec<StepReport>,
    pub labels: HashMap<String, TimerId>,
}

impl ScenarioReport {
    /// State after the last step
    pub fn last(&self) -> Option<&StepReport> {
        self.steps.last()
    }

    pub fn completed(&self) -> bool {
        self.last().is_some_and(|step| step.completed)
    }
}

/// Drives a fresh page through a scenario, one step at a time
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    config: Config,
}

impl ScenarioRunner {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn run(&self, scenario: &Scenario) -> Result<ScenarioReport, ScenarioError> {
        scenario.validate()?;

        let provider = Arc::new(VirtualTimerProvider::with_step_limit(
            self.config.virtual_clock.step_limit,
        ));
        let page = PageContext::attach(Arc::clone(&provider));
        info!(
            scenario = %scenario.name,
            page_id = %page.id(),
            steps = scenario.steps.len(),
            "running scenario"
        );

        let mut labels: HashMap<String, TimerId> = HashMap::new();
        let mut reports = Vec::with_capacity(scenario.steps.len());

        for (index, step) in scenario.steps.iter().enumerate() {
            let mut cancelled = None;
            let mut fired = None;

            match step {
                ScenarioStep::InstallInterceptor => {
                    page.install_timer_interceptor();
                }
                ScenarioStep::InstallCompletionMonitor => {
                    page.install_configured_completion_monitor(&self.config.completion);
                }
                ScenarioStep::ScheduleOnce {
                    label,
                    delay_ms,
                    sets,
                } => {
                    let callback = assignment_callback(&page, sets.clone());
                    let id = page
                        .timers()
                        .set_timeout(callback, Duration::from_millis(*delay_ms))?;
                    labels.insert(label.clone(), id);
                }
                ScenarioStep::ScheduleRepeating { label, period_ms } => {
                    let id = page
                        .timers()
                        .set_interval(Box::new(|| {}), Duration::from_millis(*period_ms))?;
                    labels.insert(label.clone(), id);
                }
                ScenarioStep::CancelOnce { label } => {
                    let id = lookup(&labels, label)?;
                    cancelled = Some(page.timers().clear_timeout(&id)?);
                }
                ScenarioStep::CancelRepeating { label } => {
                    let id = lookup(&labels, label)?;
                    cancelled = Some(page.timers().clear_interval(&id)?);
                }
                ScenarioStep::CancelId { id } => {
                    cancelled = Some(page.timers().clear_timeout(&TimerId(*id))?);
                }
                ScenarioStep::Advance { ms } => {
                    fired = Some(provider.advance(Duration::from_millis(*ms))?);
                }
                ScenarioStep::SetGlobal { name, value } => {
                    page.globals().set(name.clone(), value.clone());
                }
            }

            let report = StepReport {
                index,
                step: step.describe(),
                now_ms: provider.now_ms(),
                outstanding: page.outstanding_timers().map(|set| set.sorted()),
                pending: provider.pending().len(),
                completed: page.completed(),
                cancelled,
                fired,
            };
            debug!(
                index,
                step = %report.step,
                outstanding = ?report.outstanding,
                completed = report.completed,
                "scenario step applied"
            );
            reports.push(report);
        }

        let report = ScenarioReport {
            name: scenario.name.clone(),
            page_id: page.id(),
            attached_at: page.attached_at(),
            steps: reports,
            labels,
        };
        info!(
            scenario = %report.name,
            completed = report.completed(),
            "scenario finished"
        );
        Ok(report)
    }
}

fn lookup(labels: &HashMap<String, TimerId>, label: &str) -> Result<TimerId, ScenarioError> {
    labels
        .get(label)
        .copied()
        .ok_or_else(|| ScenarioError::UnknownLabel(label.to_string()))
}

fn assignment_callback(
    page: &PageContext<VirtualTimerProvider>,
    assignment: Option<GlobalAssignment>,
) -> OnceCallback {
    let Some(GlobalAssignment { name, value }) = assignment else {
        return Box::new(|| {});
    };
    let globals = Arc::clone(page.globals());
    Box::new(move || globals.set(name, value))
}
