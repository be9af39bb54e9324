use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use hemvakt_config::HemvaktConfig;
use hemvakt_telemetry::{EventLogger, MetricsRecorder};
use tracing::info;

use crate::scenario::{Household, Scenario};

const DEMO_SCENARIO: &str = include_str!("../scenarios/demo.yaml");

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a scenario file and print its transcript
    Run(RunArgs),
    /// Run the built-in scenario covering every container
    Demo(DemoArgs),
    /// Load and validate the configuration, then print it
    CheckConfig(ConfigArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Configuration file; defaults to config/hemvakt.yaml plus environment
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Scenario YAML file
    pub scenario: PathBuf,
    #[command(flatten)]
    pub config: ConfigArgs,
    /// Print Prometheus metrics after the run
    #[arg(long)]
    pub metrics: bool,
}

#[derive(Args, Debug, Clone)]
pub struct DemoArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
    /// Print Prometheus metrics after the run
    #[arg(long)]
    pub metrics: bool,
}

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Run(args) => {
            let config = load_config(args.config.config.as_deref())?;
            let scenario = Scenario::load(&args.scenario)?;
            run_scenario(&config, &scenario, args.metrics)
        }
        Commands::Demo(args) => {
            let config = load_config(args.config.config.as_deref())?;
            let scenario = Scenario::from_yaml(DEMO_SCENARIO).context("built-in demo scenario")?;
            run_scenario(&config, &scenario, args.metrics)
        }
        Commands::CheckConfig(args) => {
            let config = load_config(args.config.as_deref())?;
            println!("Configuration OK");
            println!("{config:#?}");
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<HemvaktConfig> {
    let config = match path {
        Some(path) => HemvaktConfig::load_from_path(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => HemvaktConfig::load().context("loading configuration")?,
    };
    Ok(config)
}

fn run_scenario(config: &HemvaktConfig, scenario: &Scenario, metrics: bool) -> anyhow::Result<()> {
    EventLogger::init(&config.telemetry.log_filter);

    let recorder = if metrics || config.telemetry.metrics {
        Some(MetricsRecorder::new().context("registering metrics")?)
    } else {
        None
    };

    let mut household = Household::new(config, recorder.clone())?;
    info!(
        scenario = scenario.name.as_deref().unwrap_or("unnamed"),
        steps = scenario.steps.len(),
        "Running scenario"
    );
    for line in household.run(scenario) {
        println!("{line}");
    }

    if let Some(recorder) = recorder {
        print!("{}", recorder.gather_metrics().context("encoding metrics")?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_arguments() {
        let cli = Cli::try_parse_from([
            "hemvakt",
            "run",
            "home.yaml",
            "--config",
            "cabin.yaml",
            "--metrics",
        ])
        .unwrap();

        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.scenario, PathBuf::from("home.yaml"));
                assert_eq!(args.config.config, Some(PathBuf::from("cabin.yaml")));
                assert!(args.metrics);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn demo_scenario_parses() {
        let scenario = Scenario::from_yaml(DEMO_SCENARIO).unwrap();
        assert!(!scenario.steps.is_empty());
    }
}
