//! Order populator: runs the warmup and main phases into one sink.

use crate::error::PopulatorError;
use crate::progress::ProgressReporter;
use crate::resources::{self, MemoryProbe, SystemMemory};
use crate::sequencer::{Phase, PhaseSequencer};
use crate::serializer::serializer_for;
use crate::writer::StreamWriter;
use order_core::GenerationConfig;
use order_generator::OrderGenerator;
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::info;

/// Metrics from a populate operation.
#[derive(Debug, Clone, Default)]
pub struct PopulateMetrics {
    /// Number of rows written.
    pub rows_written: u64,
    /// Rows written in LIMIT-only mode.
    pub warmup_rows: u64,
    /// Rows written in mixed mode.
    pub main_rows: u64,
    /// Number of batches written.
    pub batch_count: u64,
    /// Rows per batch used for the run.
    pub batch_size: u32,
    /// Serialized bytes handed to the sink, before compression.
    pub bytes_written: u64,
    /// Largest single serialized batch.
    pub peak_batch_bytes: usize,
    /// Total time taken.
    pub total_duration: Duration,
    /// Time spent generating data.
    pub generation_duration: Duration,
    /// Time spent serializing and writing data.
    pub write_duration: Duration,
}

impl PopulateMetrics {
    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Calculate bytes per second.
    pub fn bytes_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.bytes_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Generates a full order-book dataset into a caller-supplied sink.
pub struct OrderPopulator {
    config: GenerationConfig,
    generator: OrderGenerator,
    batch_size: u32,
    write_preamble: bool,
}

impl OrderPopulator {
    /// Create a populator, sizing batches from system memory when the config
    /// does not fix a batch size.
    pub fn new(config: GenerationConfig) -> Result<Self, PopulatorError> {
        Self::with_memory_probe(config, &SystemMemory)
    }

    /// Create a populator using `probe` for batch sizing.
    ///
    /// The config is validated here, so an invalid config never reaches a sink.
    pub fn with_memory_probe<P: MemoryProbe + ?Sized>(
        config: GenerationConfig,
        probe: &P,
    ) -> Result<Self, PopulatorError> {
        config.validate()?;

        let batch_size = match config.batch_size {
            Some(size) => size,
            None => resources::estimate(config.total_rows, probe).batch_size,
        };
        let generator =
            OrderGenerator::new(&config).map_err(|e| PopulatorError::from_generator(e, 0))?;

        Ok(Self {
            config,
            generator,
            batch_size,
            write_preamble: true,
        })
    }

    /// Set whether the metadata line and header are written. Disable when
    /// appending to a file that already has them.
    pub fn with_preamble(mut self, write_preamble: bool) -> Self {
        self.write_preamble = write_preamble;
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn batch_size(&self) -> u32 {
        self.batch_size
    }

    /// Seed of the RNG, for reproducing the run.
    pub fn seed(&self) -> u64 {
        self.generator.seed()
    }

    /// Generate every row into `sink`.
    pub fn populate<W: Write>(&mut self, sink: &mut W) -> Result<PopulateMetrics, PopulatorError> {
        self.populate_with_progress(sink, |_| {})
    }

    /// Generate every row into `sink`, calling `on_progress` after each
    /// committed batch.
    pub fn populate_with_progress<W, F>(
        &mut self,
        sink: &mut W,
        mut on_progress: F,
    ) -> Result<PopulateMetrics, PopulatorError>
    where
        W: Write,
        F: FnMut(&ProgressReporter),
    {
        let start_time = Instant::now();
        let mut metrics = PopulateMetrics {
            batch_size: self.batch_size,
            ..PopulateMetrics::default()
        };

        info!(
            "Generating {} rows ({} warmup) as {} with batch size {} (seed={})",
            self.config.total_rows,
            self.config.warmup_rows,
            self.config.format,
            self.batch_size,
            self.generator.seed()
        );

        let mut writer = StreamWriter::new(
            sink,
            serializer_for(self.config.format, self.config.include_symbol),
        )
        .with_preamble(self.write_preamble);
        if self.config.metadata_line {
            writer = writer.with_metadata_line(self.config.total_rows, self.config.warmup_rows);
        }

        let mut sequencer = PhaseSequencer::from_config(&self.config, self.batch_size);
        let mut progress = ProgressReporter::new(self.config.total_rows);
        let mut generation_time = Duration::ZERO;
        let mut write_time = Duration::ZERO;

        while let Some(plan) = sequencer.next_batch() {
            let gen_start = Instant::now();
            let batch = self
                .generator
                .synthesize(plan.start_id, plan.count, plan.mode)
                .map_err(|e| PopulatorError::from_generator(e, writer.rows_committed()))?;
            generation_time += gen_start.elapsed();

            let write_start = Instant::now();
            writer.write_batch(batch)?;
            write_time += write_start.elapsed();

            let rows = u64::from(plan.count);
            match plan.phase {
                Phase::Warmup => metrics.warmup_rows += rows,
                _ => metrics.main_rows += rows,
            }
            progress.advance(rows);
            on_progress(&progress);
        }

        metrics.rows_written = writer.rows_committed();
        metrics.batch_count = writer.batches_committed();
        metrics.bytes_written = writer.bytes_committed();
        metrics.peak_batch_bytes = writer.peak_batch_bytes();
        metrics.total_duration = start_time.elapsed();
        metrics.generation_duration = generation_time;
        metrics.write_duration = write_time;

        info!(
            "Generation complete: {} rows in {} batches, {} bytes in {:?} ({:.2} rows/sec)",
            metrics.rows_written,
            metrics.batch_count,
            metrics.bytes_written,
            metrics.total_duration,
            metrics.rows_per_second()
        );

        Ok(metrics)
    }
}
