mod commands;
mod view;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use planner_core::date::{to_key, today};
use planner_core::time::parse_human_date;
use planner_core::{FileKeyValueStore, PlannerConfig, PlannerRepository, PlannerStore};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::commands::Commands;

#[derive(Parser)]
#[command(name = "planner")]
#[command(about = "A personal daily planner", long_about = None)]
struct Cli {
    /// Directory holding the planner database (default: ~/.planner)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Day to work on: today, tom, yesterday, +3d, -1w, fri, 2025-01-31
    #[arg(long, short, global = true, default_value = "today")]
    date: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = PlannerConfig::new(cli.data_dir)?;
    let kv = FileKeyValueStore::from_config(&config)?;
    let date = parse_human_date(&cli.date, today())?;

    let mut store = PlannerStore::open(PlannerRepository::from_config(kv, &config), to_key(date));
    debug!(date_key = store.date_key(), source = ?store.load_source(), "opened planner");

    match cli.command.unwrap_or(Commands::Day) {
        Commands::Day => view::print_day(&store),
        Commands::Week => view::print_week(&store, date),
        command => {
            let message = commands::run(&mut store, command)?;
            store.save_now()?;
            println!("{}", message);
        }
    }

    Ok(())
}
