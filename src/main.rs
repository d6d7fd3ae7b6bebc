//! RosterViz - Employee CSV Analysis & Chart Generator
//!
//! Loads an employee roster CSV, derives ages from birth dates, and renders
//! gender / age-category distribution charts as PNG images.

mod charts;
mod data;
mod stats;

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueHint};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use charts::ChartRenderer;
use data::{DataLoader, DataProcessor, AGE_CATEGORY_COLUMN};
use stats::StatsCalculator;

#[derive(Parser, Debug)]
#[command(version, about = "Employee roster chart generator", long_about = None)]
struct Cli {
    /// Input roster CSV
    #[arg(default_value = "employees.csv", value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Directory for the rendered PNG charts
    #[arg(short, long, default_value = "charts", value_hint = ValueHint::DirPath)]
    out_dir: PathBuf,

    /// Birth-date column name
    #[arg(long, default_value = "birth_date")]
    birth_col: String,

    /// Gender column name
    #[arg(long, default_value = "gender")]
    gender_col: String,

    /// Birth-date format (chrono strftime syntax)
    #[arg(long, default_value = "%Y.%m.%d")]
    date_format: String,

    /// Do not open the rendered charts in the system viewer
    #[arg(long, action = ArgAction::SetTrue)]
    no_open: bool,

    /// Verbose logging
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let mut loader = DataLoader::new();
    loader
        .load_csv(&cli.input)
        .with_context(|| format!("cannot load roster from {}", cli.input.display()))?;
    info!(rows = loader.get_row_count(), "CSV file loaded");
    debug!(columns = ?loader.get_columns(), "inferred schema");

    let df = loader.get_dataframe().context("no data loaded")?;
    let df = DataProcessor::add_age_columns(df, &cli.birth_col, &cli.date_format)
        .context("cannot derive age columns")?;

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("cannot create output directory {}", cli.out_dir.display()))?;

    let gender_counts = StatsCalculator::value_counts(&df, &cli.gender_col)?;
    let band_counts = StatsCalculator::value_counts(&df, AGE_CATEGORY_COLUMN)?;
    let breakdown = StatsCalculator::gender_by_band(&df, &cli.gender_col)?;

    let gender_png = cli.out_dir.join("gender_distribution.png");
    let bands_png = cli.out_dir.join("age_categories.png");
    let grid_png = cli.out_dir.join("gender_by_age.png");

    ChartRenderer::render_gender_distribution(&gender_counts, &gender_png)?;
    ChartRenderer::render_age_categories(&band_counts, &bands_png)?;
    ChartRenderer::render_gender_pie_grid(&breakdown, &grid_png)?;
    info!(dir = %cli.out_dir.display(), "charts rendered");

    if !cli.no_open {
        for path in [&gender_png, &bands_png, &grid_png] {
            open::that(path).with_context(|| format!("cannot open {}", path.display()))?;
        }
    }

    Ok(())
}
