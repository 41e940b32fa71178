//! CAPE Multiplier CLI
//!
//! Prints a multiplier telling you how much money to spend on buying stock.
//! Set `RUST_LOG=debug` to trace each stage of the mapping.

use anyhow::{bail, Context, Result};
use cape_multiplier::{
    CalibrationBounds, CalibrationOverrides, MultiplierEngine, MultiplierSchedule,
};
use clap::Parser;
use log::info;
use serde::Serialize;
use std::io;
use std::path::PathBuf;

/// Default current Shiller PE when none is given
const DEFAULT_CAPE: f64 = 27.77;

/// Print a multiplier telling you how much money to spend on buying stock
///
/// CAPE is the Shiller cyclically adjusted price/earnings ratio
/// (see http://www.multpl.com/shiller-pe/table). The multiplier is near 1 while
/// CAPE sits near its 5-year high and climbs toward 10 as CAPE falls toward
/// its 5-year low.
#[derive(Parser, Debug)]
#[command(name = "cape-multiplier", version, about, long_about)]
struct Cli {
    /// Current Shiller PE (CAPE) value
    #[arg(
        short = 'c',
        long = "shiller-pe",
        visible_alias = "cape",
        default_value_t = DEFAULT_CAPE,
        allow_negative_numbers = true
    )]
    cape: f64,

    /// Directory holding min.txt / max.txt with the CAPE 5-year low and high
    #[arg(long, default_value = ".")]
    calibration_dir: PathBuf,

    /// JSON file with index_min / index_max overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the CAPE 5-year low
    #[arg(long, allow_negative_numbers = true)]
    index_min: Option<f64>,

    /// Override the CAPE 5-year high
    #[arg(long, allow_negative_numbers = true)]
    index_max: Option<f64>,

    /// Baseline amount to scale by the multiplier
    #[arg(short, long)]
    amount: Option<f64>,

    /// Print a JSON report instead of the bare multiplier
    #[arg(long)]
    json: bool,

    /// Print a CSV schedule of STEPS+1 points across the calibrated window instead
    #[arg(long, value_name = "STEPS", conflicts_with_all = ["json", "amount"])]
    schedule: Option<usize>,
}

#[derive(Serialize)]
struct Report {
    cape: f64,
    #[serde(flatten)]
    bounds: CalibrationBounds,
    multiplier: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    invest: Option<f64>,
}

/// Files, then the JSON config, then explicit flags
fn load_bounds(cli: &Cli) -> Result<CalibrationBounds> {
    let mut overrides = CalibrationOverrides::from_dir(&cli.calibration_dir)
        .context("failed to load calibration files")?;

    if let Some(path) = &cli.config {
        let from_json = CalibrationOverrides::from_json_file(path)?;
        overrides = overrides.merge(from_json);
    }

    overrides = overrides.merge(CalibrationOverrides::new(cli.index_min, cli.index_max));

    overrides.resolve().context("invalid calibration bounds")
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let bounds = load_bounds(&cli)?;
    info!(
        "index window [{}, {}], multiplier range [{}, {}]",
        bounds.index_min(),
        bounds.index_max(),
        bounds.mult_min(),
        bounds.mult_max()
    );
    let engine = MultiplierEngine::new(bounds);

    if let Some(steps) = cli.schedule {
        let schedule = MultiplierSchedule::across_window(&engine, steps)
            .context("failed to build multiplier schedule")?;
        schedule.write_csv(io::stdout().lock())?;
        return Ok(());
    }

    if let Some(amount) = cli.amount {
        if !amount.is_finite() {
            bail!("amount must be finite, got {}", amount);
        }
    }

    let multiplier = engine
        .compute(cli.cape)
        .with_context(|| format!("cannot compute multiplier for CAPE {}", cli.cape))?;
    let invest = cli.amount.map(|amount| multiplier * amount);

    if cli.json {
        let report = Report {
            cape: cli.cape,
            bounds,
            multiplier,
            amount: cli.amount,
            invest,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", multiplier);
        if let (Some(amount), Some(invest)) = (cli.amount, invest) {
            println!("{:.2} x {} => invest {:.2}", amount, multiplier, invest);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn empty_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("cape_multiplier_cli_{}_{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_cape() {
        let cli = Cli::try_parse_from(["cape-multiplier"]).unwrap();
        assert_eq!(cli.cape, 27.77);
        assert!(cli.schedule.is_none());
    }

    #[test]
    fn test_cape_aliases() {
        for args in [
            ["cape-multiplier", "--shiller-pe", "30.5"],
            ["cape-multiplier", "--cape", "30.5"],
            ["cape-multiplier", "-c", "30.5"],
        ] {
            let cli = Cli::try_parse_from(args).unwrap();
            assert_eq!(cli.cape, 30.5);
        }
    }

    #[test]
    fn test_rejects_non_numeric_cape() {
        assert!(Cli::try_parse_from(["cape-multiplier", "--cape", "high"]).is_err());
    }

    #[test]
    fn test_schedule_conflicts_with_json() {
        assert!(Cli::try_parse_from(["cape-multiplier", "--schedule", "10", "--json"]).is_err());
    }

    #[test]
    fn test_flags_override_calibration_files() {
        let dir = empty_dir("flags");
        std::fs::write(dir.join("min.txt"), "20.0").unwrap();
        std::fs::write(dir.join("max.txt"), "36.0").unwrap();

        let cli = Cli::try_parse_from([
            "cape-multiplier",
            "--calibration-dir",
            dir.to_str().unwrap(),
            "--index-max",
            "33.0",
        ])
        .unwrap();

        let bounds = load_bounds(&cli).unwrap();
        assert_eq!(bounds.index_min(), 20.0);
        assert_eq!(bounds.index_max(), 33.0);
    }

    #[test]
    fn test_json_config_sits_between_files_and_flags() {
        let dir = empty_dir("json");
        std::fs::write(dir.join("min.txt"), "20.0").unwrap();
        let config = dir.join("calibration.json");
        std::fs::write(&config, r#"{"index_min": 19.0, "index_max": 40.0}"#).unwrap();

        let cli = Cli::try_parse_from([
            "cape-multiplier",
            "--calibration-dir",
            dir.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
            "--index-max",
            "38.0",
        ])
        .unwrap();

        let bounds = load_bounds(&cli).unwrap();
        assert_eq!(bounds.index_min(), 19.0);
        assert_eq!(bounds.index_max(), 38.0);
    }

    #[test]
    fn test_defaults_without_sources() {
        let dir = empty_dir("defaults");
        let cli = Cli::try_parse_from([
            "cape-multiplier",
            "--calibration-dir",
            dir.to_str().unwrap(),
        ])
        .unwrap();

        assert_eq!(load_bounds(&cli).unwrap(), CalibrationBounds::default());
    }

    #[test]
    fn test_reversed_flags_fail() {
        let dir = empty_dir("reversed");
        let cli = Cli::try_parse_from([
            "cape-multiplier",
            "--calibration-dir",
            dir.to_str().unwrap(),
            "--index-min",
            "40",
        ])
        .unwrap();

        assert!(load_bounds(&cli).is_err());
    }

    #[test]
    fn test_report_json_shape() {
        let report = Report {
            cape: 27.77,
            bounds: CalibrationBounds::default(),
            multiplier: 1.5,
            amount: Some(1000.0),
            invest: Some(1500.0),
        };
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["cape"], 27.77);
        assert_eq!(value["index_min"], 21.90);
        assert_eq!(value["mult_max"], 10.0);
        assert_eq!(value["invest"], 1500.0);
    }
}
