//! CLI argument definitions for the order populator.

use clap::Args;
use order_core::{ConfigError, GenerationConfig, OutputFormat};
use std::path::PathBuf;

/// Arguments for generating an order-book file.
///
/// Values given here override those from `--config`.
#[derive(Args, Clone, Debug, Default)]
pub struct GenerateArgs {
    /// Path to a YAML run config
    #[arg(long, short = 'c', env = "ORDERBOOK_DATAGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of rows to generate
    #[arg(long, short = 'n')]
    pub rows: Option<u64>,

    /// Leading rows generated as LIMIT orders only
    #[arg(long)]
    pub warmup_rows: Option<u64>,

    /// Rows per batch (default: derived from available memory)
    #[arg(long)]
    pub batch_size: Option<u32>,

    /// Output format: csv or jsonl
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Compress output with gzip
    #[arg(long)]
    pub compress: bool,

    /// Output file (default: synthetic_order_book_<rows>.<ext>[.gz])
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Random seed (same seed and settings = same data)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Include the symbol column
    #[arg(long)]
    pub include_symbol: bool,

    /// Prepend a "<rows>,<warmup_rows>" metadata line
    #[arg(long)]
    pub metadata_line: bool,

    /// Id of the first generated row
    #[arg(long)]
    pub start_id: Option<u64>,

    /// Append to an existing output file instead of truncating it
    #[arg(long)]
    pub append: bool,

    /// Validate configuration and print the plan without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateArgs {
    /// Build the run config: file values first, then flag overrides.
    pub fn to_config(&self) -> Result<GenerationConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => GenerationConfig::from_file(path)?,
            None => GenerationConfig::default(),
        };

        if let Some(rows) = self.rows {
            config.total_rows = rows;
        }
        if let Some(warmup_rows) = self.warmup_rows {
            config.warmup_rows = warmup_rows;
        }
        if let Some(batch_size) = self.batch_size {
            config.batch_size = Some(batch_size);
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(start_id) = self.start_id {
            config.start_id = start_id;
        }
        config.compressed |= self.compress;
        config.include_symbol |= self.include_symbol;
        config.metadata_line |= self.metadata_line;

        Ok(config)
    }
}

/// Arguments for printing a batch size estimate.
#[derive(Args, Clone, Debug)]
pub struct EstimateArgs {
    /// Number of rows the run would generate
    #[arg(long, short = 'n')]
    pub rows: u64,
}
