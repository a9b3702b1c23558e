use anyhow::Context;
use clap::Parser;
use env_logger::Builder;
use log::{LevelFilter, info};
use std::path::PathBuf;

mod analyzer;
mod common;
mod output;

use crate::analyzer::{analyze, extract, load_log};
use crate::common::VerifierConfig;
use crate::output::{RunSummary, save_chart, save_summary};

const DEFAULT_LOG_PATH: &str = "../simulation/simulation_K5_MIXED_RW.txt";

/// Verify the totals reported by a shared memory network simulation.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Simulation log to analyze, or `-` for stdin
    #[arg(default_value = DEFAULT_LOG_PATH)]
    log_path: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the chart and summary files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Skip rendering the bar chart
    #[arg(long)]
    no_chart: bool,

    /// Also write a JSON summary
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Config file (or defaults) with command line overrides applied.
    fn resolve_config(&self) -> anyhow::Result<VerifierConfig> {
        let mut config = match &self.config {
            Some(path) => VerifierConfig::load(path).map_err(anyhow::Error::msg).with_context(|| format!("Config {}", path.display()))?,
            None => VerifierConfig::default(),
        };
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if self.no_chart {
            config.chart.enabled = false;
        }
        if self.json {
            config.json_summary = true;
        }
        Ok(config)
    }
}

/// Global and crate log levels; `--verbose` only raises the crate's own level.
fn log_levels(verbose: bool) -> (LevelFilter, LevelFilter) {
    let crate_level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    (LevelFilter::Info, crate_level)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logging setup
    let (global_level, crate_level) = log_levels(args.verbose);
    Builder::new()
        .filter_level(global_level)
        .filter(Some("shared_memory_verifier"), crate_level)
        .init();

    let config = args.resolve_config()?;

    let text = load_log(&args.log_path).with_context(|| format!("Cannot analyze {}", args.log_path.display()))?;
    let record = extract(&text);
    drop(text);

    let analysis = analyze(&record);
    let summary = config.json_summary.then(|| RunSummary::new(&record, &analysis));
    let (report, efficiency) = analysis.into_parts();
    print!("{}", report);

    if config.chart.enabled {
        save_chart(&record, efficiency, &config.chart, &config.output_dir)?;
    }
    if let Some(summary) = summary {
        save_summary(&summary, &config.output_dir)?;
    }

    info!("Verification of {} finished", record.test_type);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_levels() {
        assert_eq!(log_levels(false), (LevelFilter::Info, LevelFilter::Info));
        assert_eq!(log_levels(true), (LevelFilter::Info, LevelFilter::Debug));
    }

    #[test]
    fn test_cli_overrides_config() {
        let args = Args::parse_from(["shared-memory-verifier", "run.txt", "--no-chart", "--json", "-o", "plots"]);
        let config = args.resolve_config().unwrap();
        assert!(!config.chart.enabled);
        assert!(config.json_summary);
        assert_eq!(config.output_dir, PathBuf::from("plots"));
        assert_eq!(args.log_path, PathBuf::from("run.txt"));
    }

    #[test]
    fn test_default_log_path() {
        let args = Args::parse_from(["shared-memory-verifier"]);
        assert_eq!(args.log_path, PathBuf::from(DEFAULT_LOG_PATH));
        assert_eq!(args.resolve_config().unwrap(), VerifierConfig::default());
    }
}
