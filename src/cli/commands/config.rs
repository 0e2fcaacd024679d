//! Configuration CLI commands.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration after all overrides
    Show,
}

#[derive(Debug, serde::Serialize)]
pub struct ConfigShowOutput {
    #[serde(flatten)]
    pub config: Config,
}

impl CommandOutput for ConfigShowOutput {
    fn to_human(&self) -> String {
        serde_yaml::to_string(&self.config)
            .unwrap_or_else(|e| format!("Failed to render configuration: {e}"))
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or_default()
    }
}

pub fn execute(args: ConfigArgs, json_mode: bool, config: &Config) -> Result<()> {
    match args.command {
        ConfigCommands::Show => output(
            &ConfigShowOutput {
                config: config.clone(),
            },
            json_mode,
        ),
    }

    Ok(())
}
