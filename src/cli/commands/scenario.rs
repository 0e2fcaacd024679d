//! Scenario CLI commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use comfy_table::{presets, Attribute, Cell, ContentArrangement, Table};
use std::path::{Path, PathBuf};

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, Scenario};
use crate::services::{ScenarioReport, ScenarioRunner};

#[derive(Args, Debug)]
pub struct ScenarioArgs {
    #[command(subcommand)]
    pub command: ScenarioCommands,
}

#[derive(Subcommand, Debug)]
pub enum ScenarioCommands {
    /// Run a scenario and print the page state after every step
    Run {
        /// Path to the scenario YAML file
        file: PathBuf,
    },
    /// Parse and validate a scenario without running it
    Check {
        /// Path to the scenario YAML file
        file: PathBuf,
    },
}

/// Read and parse a scenario file
pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario {}", path.display()))?;
    serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse scenario {}", path.display()))
}

#[derive(Debug, serde::Serialize)]
pub struct ScenarioRunOutput {
    #[serde(flatten)]
    pub report: ScenarioReport,
    pub completed: bool,
}

impl CommandOutput for ScenarioRunOutput {
    fn to_human(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL_CONDENSED)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("#").add_attribute(Attribute::Bold),
                Cell::new("Step").add_attribute(Attribute::Bold),
                Cell::new("Time (ms)").add_attribute(Attribute::Bold),
                Cell::new("Outstanding").add_attribute(Attribute::Bold),
                Cell::new("Queued").add_attribute(Attribute::Bold),
                Cell::new("Completed").add_attribute(Attribute::Bold),
            ]);

        for step in &self.report.steps {
            let outstanding = step.outstanding.as_ref().map_or_else(
                || "-".to_string(),
                |ids| {
                    let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
                    format!("{{{}}}", ids.join(", "))
                },
            );
            table.add_row(vec![
                Cell::new(step.index),
                Cell::new(&step.step),
                Cell::new(step.now_ms),
                Cell::new(outstanding),
                Cell::new(step.pending),
                Cell::new(if step.completed { "yes" } else { "no" }),
            ]);
        }

        format!(
            "Scenario: {}\nPage: {} (attached {})\n{table}\nCompleted: {}",
            self.report.name,
            self.report.page_id,
            self.report.attached_at.to_rfc3339(),
            if self.completed { "yes" } else { "no" }
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, serde::Serialize)]
pub struct ScenarioCheckOutput {
    pub name: String,
    pub steps: usize,
    pub valid: bool,
}

impl CommandOutput for ScenarioCheckOutput {
    fn to_human(&self) -> String {
        format!("Scenario '{}' is valid ({} steps)", self.name, self.steps)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: ScenarioArgs, json_mode: bool, config: &Config) -> Result<()> {
    match args.command {
        ScenarioCommands::Run { file } => {
            let scenario = load_scenario(&file)?;
            let report = ScenarioRunner::new(config.clone())
                .run(&scenario)
                .with_context(|| format!("Scenario '{}' failed", scenario.name))?;
            let completed = report.completed();
            output(&ScenarioRunOutput { report, completed }, json_mode);
        }
        ScenarioCommands::Check { file } => {
            let scenario = load_scenario(&file)?;
            scenario
                .validate()
                .with_context(|| format!("Scenario '{}' is invalid", scenario.name))?;
            output(
                &ScenarioCheckOutput {
                    name: scenario.name,
                    steps: scenario.steps.len(),
                    valid: true,
                },
                json_mode,
            );
        }
    }

    Ok(())
}
