// Integration tests for logging functionality
// Note: the logger installs a global subscriber, so this binary holds a
// single test.

use std::fs;

use quiesce::domain::models::{LogFormat, LoggingConfig, RotationPolicy};
use quiesce::infrastructure::logging::LoggerImpl;
use quiesce::{Scenario, ScenarioRunner};
use tempfile::TempDir;

#[test]
fn test_logging_writes_structured_file() {
    let temp_dir = TempDir::new().unwrap();

    let config = LoggingConfig {
        level: "debug".to_string(),
        format: LogFormat::Json,
        log_dir: Some(temp_dir.path().to_path_buf()),
        rotation: RotationPolicy::Never,
    };

    let logger = LoggerImpl::init(&config).unwrap();

    let scenario: Scenario = serde_yaml::from_str(
        "name: logged\nsteps:\n  - op: install_interceptor\n  - op: schedule_once\n    label: a\n    delay_ms: 5\n",
    )
    .unwrap();
    ScenarioRunner::default().run(&scenario).unwrap();

    // Dropping the guard flushes the non-blocking writer.
    drop(logger);

    let contents = fs::read_to_string(temp_dir.path().join("quiesce.log")).unwrap();
    assert!(contents.contains("logger initialized"));
    assert!(contents.contains("running scenario"));
    assert!(contents.contains("timer interceptor installed"));

    for line in contents.lines().filter(|line| !line.is_empty()) {
        let entry: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(entry.get("level").is_some());
    }
}
