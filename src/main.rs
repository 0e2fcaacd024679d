//! Quiesce CLI entry point.

use clap::Parser;

use quiesce::cli::{self, Cli, Commands};
use quiesce::infrastructure::logging::LoggerImpl;

fn main() {
    let cli = Cli::parse();

    let config = match cli::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => cli::handle_error(err, cli.json),
    };

    let _logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => cli::handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Scenario(args) => cli::commands::scenario::execute(args, cli.json, &config),
        Commands::Config(args) => cli::commands::config::execute(args, cli.json, &config),
    };

    if let Err(err) = result {
        cli::handle_error(err, cli.json);
    }
}
