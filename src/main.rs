//! Coin Vending Engine CLI
//!
//! Command-line interface for running coin deposits and purchases from CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --catalog catalog.csv operations.csv > holdings.csv
//! cargo run -- --strategy sync --catalog catalog.csv operations.csv > holdings.csv
//! cargo run -- --catalog catalog.csv --products-out stock.csv operations.csv > holdings.csv
//! cargo run -- --batch-size 2000 --max-concurrent 8 --catalog catalog.csv operations.csv
//! ```
//!
//! The program stocks the engine from the catalog file, applies every operation
//! of the input file and prints the final coin holdings of each buyer to stdout.
//! Logs go to stderr; set `RUST_LOG=debug` to trace each purchase.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, invalid catalog, output not writable, etc.)

use coin_vending_engine::cli;
use coin_vending_engine::io::{read_catalog, write_products_csv};
use coin_vending_engine::strategy;
use std::fs::File;
use std::process;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &cli::CliArgs) -> Result<(), String> {
    let catalog = read_catalog(&args.catalog_file).map_err(|e| e.to_string())?;

    let strategy = {
        let config = if args.strategy == cli::StrategyType::Async {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy.clone(), config)
    };

    let mut output = std::io::stdout();
    let products = strategy.process(&args.input_file, &catalog, &mut output)?;

    if let Some(path) = &args.products_out {
        let mut file = File::create(path)
            .map_err(|e| format!("Failed to create file '{}': {}", path.display(), e))?;
        write_products_csv(&products, &mut file)?;
    }

    Ok(())
}

fn main() {
    init_tracing();
    let args = cli::parse_args();

    if let Err(e) = run(&args) {
        error!(error = %e, "processing failed");
        process::exit(1);
    }
}
