//! SupplyTrack CLI
//!
//! Command-line front end for the order store

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use supplytrack_core::logging_facility::{self, Profile};
use supplytrack_store::config::DEFAULT_DB_FILE;
use supplytrack_store::{OrderStore, StoreConfig};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "supplytrack")]
#[command(about = "SupplyTrack - Purchase order and part delivery tracking", long_about = None)]
struct Cli {
    /// Path to the SQLite database file
    #[arg(long, global = true, env = "SUPPLYTRACK_DB", default_value = DEFAULT_DB_FILE)]
    db: PathBuf,

    /// Log output format (logs go to stderr)
    #[arg(
        long,
        global = true,
        env = "SUPPLYTRACK_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Pretty
    )]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

impl From<LogFormat> for Profile {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Pretty => Profile::Development,
            LogFormat::Json => Profile::Production,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Order operations
    Order(commands::order::OrderArgs),
    /// Part operations
    Part(commands::part::PartArgs),
    /// Delivery deviation report grouped by order name
    Report(commands::report::ReportArgs),
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = OrderStore::open_with(&StoreConfig::file(&cli.db))?;

    let result = match cli.command {
        Commands::Order(args) => commands::order::execute(args, &mut store),
        Commands::Part(args) => commands::part::execute(args, &mut store),
        Commands::Report(args) => commands::report::execute(args, &store),
    };

    store.close()?;
    result
}

fn main() {
    let cli = Cli::parse();
    logging_facility::init(cli.log_format.into());

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
