//! Command handlers.

use crate::output::{default_output_path, OutputSink};
use anyhow::Context;
use order_populate::resources::{self, SystemMemory};
use order_populate::{EstimateArgs, GenerateArgs, OrderPopulator, PopulateMetrics};
use std::path::PathBuf;

/// Outcome of a completed (non dry-run) generate command.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub output_path: PathBuf,
    pub metrics: PopulateMetrics,
    /// Size of the output file on disk after completion
    pub file_size_bytes: u64,
    /// Seed that reproduces the run
    pub seed: u64,
}

/// Run the generate command. Returns `None` for a dry run.
pub fn run_generate(args: GenerateArgs) -> anyhow::Result<Option<GenerateReport>> {
    let config = args
        .to_config()
        .context("Failed to load generation config")?;
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&config));
    let compressed = config.compressed;

    let populator = OrderPopulator::new(config).context("Invalid generation config")?;
    let config = populator.config();

    tracing::info!("Output file: {}", output_path.display());
    tracing::info!(
        "Format: {}{}",
        config.format,
        if compressed { " (compressed)" } else { "" }
    );

    if args.dry_run {
        tracing::info!(
            "[DRY-RUN] Would generate {} rows ({} warmup, {} main) from id {}",
            config.total_rows,
            config.warmup_rows,
            config.main_rows(),
            config.start_id
        );
        tracing::info!(
            "[DRY-RUN] Batch size: {} (seed={})",
            populator.batch_size(),
            populator.seed()
        );
        tracing::info!("[DRY-RUN] Configuration validated successfully");
        return Ok(None);
    }

    let opened = OutputSink::open(&output_path, compressed, args.append)
        .with_context(|| format!("Failed to open output file {output_path:?}"))?;
    let mut sink = opened.sink;
    // An appended file already carries its header and metadata line.
    let mut populator = populator.with_preamble(!opened.had_content);
    let seed = populator.seed();

    let metrics = match populator.populate(&mut sink) {
        Ok(metrics) => metrics,
        Err(e) => {
            // Close out what was committed so the file stays readable.
            if let Err(finish_err) = sink.finish() {
                tracing::warn!("Failed to finalize output after error: {}", finish_err);
            }
            return Err(e).with_context(|| {
                format!("Failed to generate orders into {output_path:?} (seed={seed})")
            });
        }
    };

    sink.finish()
        .with_context(|| format!("Failed to finalize output file {output_path:?}"))?;

    let file_size_bytes = std::fs::metadata(&output_path)
        .with_context(|| format!("Failed to read size of {output_path:?}"))?
        .len();

    tracing::info!(
        "Done! File written: {} ({} rows, {} bytes)",
        output_path.display(),
        metrics.rows_written,
        file_size_bytes
    );

    Ok(Some(GenerateReport {
        output_path,
        metrics,
        file_size_bytes,
        seed,
    }))
}

/// Run the estimate command: print available memory and the derived batch size.
pub fn run_estimate(args: EstimateArgs) -> anyhow::Result<()> {
    let estimate = resources::estimate(args.rows, &SystemMemory);

    match estimate.available_gb {
        Some(gb) => println!("Available RAM: {gb:.2} GB"),
        None => println!("Available RAM: unknown"),
    }
    println!("Batch size: {}", estimate.batch_size);
    Ok(())
}
