//! Switchboard - Entry point
//!
//! Resolves the deployment configuration once and prints it.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use switchboard::{list_scenarios, render, OutputFormat};
use switchboard_config::{ConfigLoader, DirectorySource, DocumentLayout, DocumentRole};
use switchboard_telemetry::{bootstrap_subscriber, init_logging, LogConfig, LogOutput};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "switchboard",
    version,
    about = "Resolve a Switchboard deployment configuration",
    long_about = r#"Resolve a Switchboard deployment configuration

The configuration directory holds the base document (main.yaml), the scenario
bundle (integration_examples.yaml) and the optional domain documents
(providers.yaml, stealth_profiles.yaml, ui.yaml, security.yaml).

Secret fields may reference environment variables as ${NAME}. Printed output
is always redacted.

EXAMPLES:
    switchboard --config-dir ./config
    switchboard --scenario "Local Development Setup" --format yaml
    switchboard --bundle ci_scenarios.yaml --list-scenarios
    SWITCHBOARD_SCENARIO="Production Cluster" switchboard --format json"#
)]
struct Args {
    /// Directory containing the configuration documents
    #[arg(short, long, env = "SWITCHBOARD_CONFIG_DIR", default_value = "config")]
    config_dir: PathBuf,

    /// Scenario bundle document inside the configuration directory
    #[arg(long, env = "SWITCHBOARD_BUNDLE", default_value = "integration_examples.yaml")]
    bundle: String,

    /// Scenario to apply from the scenario bundle
    #[arg(short, long, env = "SWITCHBOARD_SCENARIO")]
    scenario: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    format: OutputFormat,

    /// Log level, overriding the configured one (e.g. "debug")
    #[arg(long)]
    log_level: Option<String>,

    /// List the scenarios defined in the scenario bundle and exit
    #[arg(long)]
    list_scenarios: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    if args.list_scenarios {
        let source = DirectorySource::new(&args.config_dir);
        for scenario in list_scenarios(&source, &args.bundle)? {
            println!("{scenario}");
        }
        return Ok(());
    }

    let layout = DocumentLayout::default().with(DocumentRole::ScenarioBundle, args.bundle.as_str());
    let mut loader = ConfigLoader::from_dir(&args.config_dir).with_layout(layout);
    if let Some(scenario) = &args.scenario {
        loader = loader.with_scenario(scenario.as_str());
    }

    // Events emitted during resolution go to stderr until the configured
    // subscriber is known.
    let bootstrap = bootstrap_subscriber(args.log_level.as_deref().unwrap_or("warn"))?;
    let config = tracing::subscriber::with_default(bootstrap, || loader.load())
        .with_context(|| {
            format!(
                "failed to resolve configuration from {}",
                args.config_dir.display()
            )
        })?;
    let config = Arc::new(config);

    let mut log_config = LogConfig::from_settings(&config.logging, &config.system.name)
        .context("invalid logging section")?;
    if let Some(level) = &args.log_level {
        log_config = log_config.with_level(level.as_str());
    }
    // Keep stdout clean for machine-readable output
    if args.format != OutputFormat::Summary && log_config.output == LogOutput::Stdout {
        log_config.output = LogOutput::Stderr;
    }
    init_logging(&log_config)?;

    info!(
        version = switchboard::VERSION,
        environment = %config.system.environment,
        scenario = args.scenario.as_deref().unwrap_or("none"),
        "configuration ready"
    );

    println!("{}", render(&config, args.format)?);
    Ok(())
}
