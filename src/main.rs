//! Marginal Cost Engine CLI
//!
//! Loads a configuration snapshot plus block and schedule CSVs, and prints
//! engine output as JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use marginal_cost_engine::block::{load_blocks, load_schedule, Block, ScheduleEntry};
use marginal_cost_engine::config::DEFAULT_CONFIG_PATH;
use marginal_cost_engine::projection::CashflowCsvRow;
use marginal_cost_engine::{CostEngine, EngineConfig};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about = "Marginal production cost and project cash-flow engine")]
struct Cli {
    /// Configuration snapshot (JSON), data/config.json when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the derived rate tables
    Rates,
    /// Cost every block in a CSV file
    Cost {
        #[arg(long)]
        blocks: PathBuf,
    },
    /// Run the full projection and print the summary
    Project {
        #[arg(long)]
        blocks: PathBuf,
        #[arg(long)]
        schedule: PathBuf,
        /// Also write the monthly cash flows here
        #[arg(long)]
        cashflow_csv: Option<PathBuf>,
    },
    /// Rerun the projection with one variable scaled
    Sensitivity {
        #[arg(long)]
        blocks: PathBuf,
        #[arg(long)]
        schedule: PathBuf,
        /// discount_rate, equipment_cost or labor_cost
        #[arg(long)]
        variable: String,
        /// Percent changes, e.g. -10,0,10
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, default_values_t = [-10.0, 0.0, 10.0])]
        variations: Vec<f64>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::from_json_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::load_default()
            .with_context(|| format!("Failed to load config {}", DEFAULT_CONFIG_PATH))?,
    };
    let engine = CostEngine::new(config).context("Failed to build engine")?;

    match cli.cmd {
        Command::Rates => print_json(engine.rates()),
        Command::Cost { blocks } => {
            let blocks = read_blocks(&blocks)?;
            let results = engine.calculate_batch(&blocks)?;
            print_json(&results)
        }
        Command::Project {
            blocks,
            schedule,
            cashflow_csv,
        } => {
            let blocks = read_blocks(&blocks)?;
            let schedule = read_schedule(&schedule)?;
            let projection = engine.project(&blocks, &schedule)?;

            if let Some(path) = cashflow_csv {
                let mut writer = csv::Writer::from_path(&path)
                    .with_context(|| format!("Unable to create {}", path.display()))?;
                for period in &projection.periods {
                    writer.serialize(CashflowCsvRow::from(period))?;
                }
                writer.flush()?;
                eprintln!("Cash flows written to: {}", path.display());
            }

            print_json(&projection.summary)
        }
        Command::Sensitivity {
            blocks,
            schedule,
            variable,
            variations,
        } => {
            let blocks = read_blocks(&blocks)?;
            let schedule = read_schedule(&schedule)?;
            let points = engine.sensitivity(&blocks, &schedule, &variable, &variations)?;
            print_json(&points)
        }
    }
}

fn read_blocks(path: &Path) -> Result<Vec<Block>> {
    load_blocks(path).with_context(|| format!("Failed to load blocks from {}", path.display()))
}

fn read_schedule(path: &Path) -> Result<Vec<ScheduleEntry>> {
    load_schedule(path).with_context(|| format!("Failed to load schedule from {}", path.display()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
