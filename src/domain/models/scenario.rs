//! Scripted page activity used to exercise the instrumentation deterministically.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use crate::domain::error::ScenarioError;

/// A named, ordered list of page operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub steps: Vec<ScenarioStep>,
}

/// Assignment of a value to a page global
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalAssignment {
    pub name: String,
    pub value: Value,
}

/// One operation performed by the page or the harness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Wrap the page's timer primitives
    InstallInterceptor,
    /// Define the completion predicate on the namespace
    InstallCompletionMonitor,
    ScheduleOnce {
        label: String,
        delay_ms: u64,
        /// Global the timer assigns when it fires
        #[serde(default)]
        sets: Option<GlobalAssignment>,
    },
    ScheduleRepeating {
        label: String,
        period_ms: u64,
    },
    CancelOnce {
        label: String,
    },
    CancelRepeating {
        label: String,
    },
    /// Cancel a raw identifier, known or not
    CancelId {
        id: u64,
    },
    /// Move the virtual clock forward, firing due timers
    Advance {
        ms: u64,
    },
    SetGlobal {
        name: String,
        value: Value,
    },
}

impl ScenarioStep {
    /// Short human-readable description
    pub fn describe(&self) -> String {
        match self {
            Self::InstallInterceptor => "install interceptor".to_string(),
            Self::InstallCompletionMonitor => "install completion monitor".to_string(),
            Self::ScheduleOnce { label, delay_ms, .. } => {
                format!("schedule once {label} +{delay_ms}ms")
            }
            Self::ScheduleRepeating { label, period_ms } => {
                format!("schedule repeating {label} every {period_ms}ms")
            }
            Self::CancelOnce { label } => format!("cancel once {label}"),
            Self::CancelRepeating { label } => format!("cancel repeating {label}"),
            Self::CancelId { id } => format!("cancel id {id}"),
            Self::Advance { ms } => format!("advance {ms}ms"),
            Self::SetGlobal { name, value } => format!("set {name} = {value}"),
        }
    }
}

impl Scenario {
    /// Check that every cancelled label was scheduled earlier and that no
    /// label is scheduled twice.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.steps.is_empty() {
            return Err(ScenarioError::Empty);
        }

        let mut labels = HashSet::new();
        for step in &self.steps {
            match step {
                ScenarioStep::ScheduleOnce { label, .. }
                | ScenarioStep::ScheduleRepeating { label, .. } => {
                    if !labels.insert(label.as_str()) {
                        return Err(ScenarioError::DuplicateLabel(label.clone()));
                    }
                }
                ScenarioStep::CancelOnce { label } | ScenarioStep::CancelRepeating { label } => {
                    if !labels.contains(label.as_str()) {
                        return Err(ScenarioError::UnknownLabel(label.clone()));
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
name: finish later
steps:
  - op: install_interceptor
  - op: schedule_once
    label: t1
    delay_ms: 100
    sets:
      name: reporter
      value:
        finished: true
  - op: schedule_repeating
    label: poll
    period_ms: 25
  - op: cancel_repeating
    label: poll
  - op: advance
    ms: 100
";

        let scenario: Scenario = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(scenario.name, "finish later");
        assert_eq!(scenario.steps.len(), 5);
        assert_eq!(scenario.steps[0], ScenarioStep::InstallInterceptor);
        match &scenario.steps[1] {
            ScenarioStep::ScheduleOnce { label, delay_ms, sets } => {
                assert_eq!(label, "t1");
                assert_eq!(*delay_ms, 100);
                let sets = sets.as_ref().expect("assignment should parse");
                assert_eq!(sets.name, "reporter");
                assert_eq!(sets.value, serde_json::json!({"finished": true}));
            }
            other => panic!("Expected ScheduleOnce, got {other:?}"),
        }
        assert!(scenario.validate().is_ok());
    }

    #[test]
    fn test_validate_unknown_label() {
        let scenario = Scenario {
            name: "bad".to_string(),
            description: None,
            steps: vec![ScenarioStep::CancelOnce {
                label: "ghost".to_string(),
            }],
        };

        match scenario.validate() {
            Err(ScenarioError::UnknownLabel(label)) => assert_eq!(label, "ghost"),
            other => panic!("Expected UnknownLabel, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_duplicate_label() {
        let scenario = Scenario {
            name: "dup".to_string(),
            description: None,
            steps: vec![
                ScenarioStep::ScheduleOnce {
                    label: "t1".to_string(),
                    delay_ms: 1,
                    sets: None,
                },
                ScenarioStep::ScheduleRepeating {
                    label: "t1".to_string(),
                    period_ms: 1,
                },
            ],
        };

        assert!(matches!(
            scenario.validate(),
            Err(ScenarioError::DuplicateLabel(_))
        ));
    }

    #[test]
    fn test_validate_empty() {
        let scenario = Scenario {
            name: "empty".to_string(),
            description: None,
            steps: vec![],
        };
        assert!(matches!(scenario.validate(), Err(ScenarioError::Empty)));
    }

    #[test]
    fn test_describe() {
        let step = ScenarioStep::ScheduleOnce {
            label: "t1".to_string(),
            delay_ms: 10,
            sets: None,
        };
        assert_eq!(step.describe(), "schedule once t1 +10ms");
        assert_eq!(ScenarioStep::CancelId { id: 99 }.describe(), "cancel id 99");
    }
}
