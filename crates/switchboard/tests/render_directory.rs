//! Resolve a directory and render it the way the binary does.

use std::collections::HashMap;
use std::fs;

use switchboard::{list_scenarios, render, OutputFormat};
use switchboard_config::{ConfigLoader, DirectorySource, DocumentLayout, DocumentRole};

#[test]
fn test_render_resolved_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("main.yaml"),
        r#"
system:
  name: switchboard
  version: "1.0.0"
  environment: development
services:
  core_orchestrator:
    host: 127.0.0.1
    port: 8001
    workers: 2
database:
  host: localhost
  port: 5432
  name: switchboard
  username: "${DB_USER}"
"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("integration_examples.yaml"),
        r#"
local_scenario:
  name: Local Development Setup
  services:
    core_orchestrator:
      workers: 1
"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("providers.yaml"),
        "providers:\n  claude:\n    type: web\n    enabled: true\n    priority: 1\n",
    )
    .unwrap();

    let env = HashMap::from([("DB_USER".to_string(), "svc".to_string())]);
    let config = ConfigLoader::from_dir(dir.path())
        .with_scenario("Local Development Setup")
        .with_environment(env)
        .load()
        .unwrap();

    let summary = render(&config, OutputFormat::Summary).unwrap();
    assert!(summary.contains("System: switchboard v1.0.0 (development)"));
    assert!(summary.contains("Core Orchestrator: 127.0.0.1:8001 (workers: 1)"));
    assert!(summary.contains("Database: [REDACTED]@localhost:5432/switchboard"));
    assert!(summary.contains("  - claude (web) - Priority: 1"));
    assert!(!summary.contains("svc"));

    let json = render(&config, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["services"]["core_orchestrator"]["workers"], 1);
    assert_eq!(value["providers"][0]["name"], "claude");
}

#[test]
fn test_custom_bundle_is_listed_and_applied() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("main.yaml"),
        "system:\n  name: switchboard\n  environment: development\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("ci_scenarios.yaml"),
        "ci_scenario:\n  name: CI\n  system:\n    environment: ci\n",
    )
    .unwrap();

    let source = DirectorySource::new(dir.path());
    assert_eq!(list_scenarios(&source, "ci_scenarios.yaml").unwrap(), vec!["CI"]);
    assert!(list_scenarios(&source, "integration_examples.yaml").is_err());

    let layout = DocumentLayout::default().with(DocumentRole::ScenarioBundle, "ci_scenarios.yaml");
    let config = ConfigLoader::from_dir(dir.path())
        .with_layout(layout)
        .with_scenario("CI")
        .with_environment(HashMap::new())
        .load()
        .unwrap();
    assert_eq!(config.system.environment, "ci");
}
