//! Synthetic order-book dataset generator.
//!
//! Produces very large CSV or JSON-lines files of simulated exchange orders
//! while keeping peak memory proportional to one batch.
//!
//! # Crates
//!
//! - `order_core` - Order records, batches, and run configuration
//! - `order_generator` - Seeded batch synthesizer
//! - `order_populate` - Batch sizing, phase sequencing, and streaming writes
//!
//! This crate adds the file side: output naming, truncate/append, gzip, and
//! the command handlers used by the binary.
//!
//! # CLI Usage
//!
//! ```bash
//! # 100M rows, first 20M LIMIT-only, batch size derived from free memory
//! orderbook-datagen generate --rows 100000000 --warmup-rows 20000000
//!
//! # Compressed JSON lines with a fixed seed
//! orderbook-datagen generate --rows 1000000 --format jsonl --compress --seed 42
//!
//! # Show the batch size that would be used
//! orderbook-datagen estimate --rows 1000000000
//! ```

pub mod output;
pub mod run;

pub use output::{default_output_path, OutputSink};
pub use run::{run_estimate, run_generate, GenerateReport};
