use clap::Parser;
use quiesce::cli::commands::config::ConfigCommands;
use quiesce::cli::commands::scenario::ScenarioCommands;
use quiesce::cli::{Cli, Commands};
use std::path::PathBuf;

#[test]
fn test_parse_scenario_run() {
    let cli = Cli::try_parse_from(["quiesce", "scenario", "run", "page.yaml"]).unwrap();

    assert!(!cli.json);
    match cli.command {
        Commands::Scenario(args) => match args.command {
            ScenarioCommands::Run { file } => assert_eq!(file, PathBuf::from("page.yaml")),
            other => panic!("Expected run, got {other:?}"),
        },
        other => panic!("Expected scenario command, got {other:?}"),
    }
}

#[test]
fn test_parse_scenario_check_with_global_json_flag() {
    let cli = Cli::try_parse_from(["quiesce", "scenario", "check", "page.yaml", "--json"]).unwrap();

    assert!(cli.json);
    match cli.command {
        Commands::Scenario(args) => {
            assert!(matches!(args.command, ScenarioCommands::Check { .. }));
        }
        other => panic!("Expected scenario command, got {other:?}"),
    }
}

#[test]
fn test_parse_config_show_with_config_file() {
    let cli = Cli::try_parse_from(["quiesce", "-c", "custom.yaml", "config", "show"]).unwrap();

    assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
    match cli.command {
        Commands::Config(args) => assert!(matches!(args.command, ConfigCommands::Show)),
        other => panic!("Expected config command, got {other:?}"),
    }
}

#[test]
fn test_scenario_run_requires_file() {
    assert!(Cli::try_parse_from(["quiesce", "scenario", "run"]).is_err());
}

#[test]
fn test_unknown_subcommand_rejected() {
    assert!(Cli::try_parse_from(["quiesce", "serve"]).is_err());
}
