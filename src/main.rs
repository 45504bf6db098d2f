//! Command-line interface for orderbook-datagen
//!
//! # Usage Examples
//!
//! ```bash
//! # Generate 1B rows of CSV with a 20M-row warmup prefix
//! orderbook-datagen generate --rows 1000000000 --warmup-rows 20000000
//!
//! # Settings from a YAML file, overriding the row count
//! orderbook-datagen generate --config run.yaml --rows 5000000
//!
//! # Resume a failed run after 3,000,000 committed rows
//! orderbook-datagen generate --rows 7000000 --start-id 3000001 \
//!   --output synthetic_order_book_10000000.csv --append
//! ```
//!
//! Set `RUST_LOG=info` for progress output.

use clap::{Parser, Subcommand};
use order_populate::{EstimateArgs, GenerateArgs};
use orderbook_datagen::{run_estimate, run_generate};

#[derive(Parser)]
#[command(name = "orderbook-datagen")]
#[command(about = "Generate large synthetic order-book datasets in bounded memory")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an order-book file
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Print available memory and the batch size it allows
    Estimate {
        #[command(flatten)]
        args: EstimateArgs,
    },
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { args } => {
            if let Some(report) = run_generate(args)? {
                println!(
                    "Wrote {} rows to {} ({} bytes, seed={})",
                    report.metrics.rows_written,
                    report.output_path.display(),
                    report.file_size_bytes,
                    report.seed
                );
            }
        }
        Commands::Estimate { args } => run_estimate(args)?,
    }

    Ok(())
}
