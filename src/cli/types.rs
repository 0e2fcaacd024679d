use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::config::ConfigArgs;
use crate::cli::commands::scenario::ScenarioArgs;

#[derive(Parser, Debug)]
#[command(name = "quiesce")]
#[command(about = "Quiesce - outstanding timer tracking and page completion detection", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this file instead of .quiesce/
    #[arg(short, long, global = true, env = "QUIESCE_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run or check scripted page scenarios
    Scenario(ScenarioArgs),
    /// Inspect configuration
    Config(ConfigArgs),
}
