//! Tariff pipeline batch job
//!
//! Rebuilds the extended dataset and the chronological train/test splits
//! when either split file is missing (or unconditionally under `--force`),
//! then trains the gradient boosted regressor and reports the evaluation
//! metrics.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use tariff::config::PipelineConfig;
use tariff::data::{
    extend_records, load_bookings, load_split, split_by_cutoff, write_extended, write_split,
    HolidayCalendar,
};
use tariff::evaluation::train_and_evaluate;
use tariff::regressor::{GbdtParams, GbdtRegressor};

#[derive(Parser)]
#[command(name = "tariff-pipeline")]
#[command(author, version, about = "Hotel booking tariff prediction pipeline", long_about = None)]
struct Args {
    /// Directory holding the booking data files
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Regenerate the extended dataset and splits even if they exist
    #[arg(long)]
    force: bool,
}

fn regenerate_datasets(config: &PipelineConfig) -> Result<()> {
    let records = load_bookings(&config.raw_path)
        .with_context(|| format!("failed to load bookings from {:?}", config.raw_path))?;
    info!("Loaded {} booking records", records.len());

    let calendar = HolidayCalendar::build(
        &config.holiday_rules,
        config.window_start_year,
        config.window_end_year,
    );
    info!(
        "Holiday window covers {} dates in {}..={}",
        calendar.len(),
        config.window_start_year,
        config.window_end_year
    );

    let extended = extend_records(&records, &calendar).context("feature derivation failed")?;
    write_extended(&extended, &config.extended_path)
        .with_context(|| format!("failed to write {:?}", config.extended_path))?;

    let (train, test) = split_by_cutoff(&extended, config.cutoff);
    info!(
        "Split at {}: {} train rows, {} test rows",
        config.cutoff,
        train.len(),
        test.len()
    );
    write_split(&train, &config.train_path)
        .with_context(|| format!("failed to write {:?}", config.train_path))?;
    write_split(&test, &config.test_path)
        .with_context(|| format!("failed to write {:?}", config.test_path))?;

    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let args = Args::parse();
    let config = PipelineConfig::with_data_dir(&args.data_dir);

    if args.force || !config.splits_exist() {
        info!("Regenerating extended dataset and splits");
        regenerate_datasets(&config)?;
    } else {
        info!("Reusing existing split files");
    }

    let train = load_split(&config.train_path)
        .with_context(|| format!("failed to load {:?}", config.train_path))?;
    let test = load_split(&config.test_path)
        .with_context(|| format!("failed to load {:?}", config.test_path))?;

    let mut regressor = GbdtRegressor::new(GbdtParams::default());
    let report = train_and_evaluate(&mut regressor, &train, &test, &config.feature_columns)
        .context("training/evaluation failed")?;

    for feature in &report.importances {
        info!(
            "Name: {}; Importance: {:.10}",
            feature.name, feature.importance
        );
    }
    info!("Rounded-prediction accuracy: {:.4}", report.rounded_accuracy);
    info!("RMSE: {:.4}", report.rmse);
    info!("Score: {:.4}", report.score);

    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(&config.report_path, json)
        .with_context(|| format!("failed to write {:?}", config.report_path))?;
    info!("Report written to {:?}", config.report_path);

    Ok(())
}
