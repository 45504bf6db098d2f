//! Batched, memory-bounded order-book file populator.
//!
//! This crate writes synthetic order records to any [`std::io::Write`] sink in
//! batches, so peak memory is proportional to one batch rather than the whole
//! dataset:
//!
//! ```text
//! GenerationConfig
//!    │
//!    ├─ resources   ── batch size from available memory
//!    │
//!    └─ OrderPopulator
//!          │ loop
//!          ├─ PhaseSequencer   ── next (start_id, count, mode)
//!          ├─ OrderGenerator   ── Batch
//!          ├─ StreamWriter     ── header once, then rows, append-only
//!          └─ ProgressReporter ── rows_completed / total_rows
//! ```
//!
//! # Example
//!
//! ```ignore
//! use order_core::GenerationConfig;
//! use order_populate::OrderPopulator;
//!
//! let config = GenerationConfig::new(1_000_000).with_warmup_rows(200_000);
//! let mut populator = OrderPopulator::new(config)?;
//!
//! let mut file = std::io::BufWriter::new(std::fs::File::create("orders.csv")?);
//! let metrics = populator.populate(&mut file)?;
//! ```

pub mod args;
mod error;
mod populator;
pub mod progress;
pub mod resources;
pub mod sequencer;
pub mod serializer;
pub mod writer;

pub use args::{EstimateArgs, GenerateArgs};
pub use error::PopulatorError;
pub use populator::{OrderPopulator, PopulateMetrics};
pub use progress::ProgressReporter;
pub use resources::{estimate_batch_size, MemoryProbe, ResourceEstimate, SystemMemory};
pub use sequencer::{BatchPlan, Phase, PhaseSequencer};
pub use serializer::{serializer_for, BatchSerializer, DelimitedSerializer, LinesSerializer};
pub use writer::StreamWriter;
