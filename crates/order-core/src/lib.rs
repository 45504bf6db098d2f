//! Core types for the synthetic order-book data generator.
//!
//! This crate provides the foundational types shared by the generator and
//! the populator:
//!
//! - [`OrderRecord`] - A single synthetic exchange order
//! - [`Batch`] - A transient, owned group of records handed to a writer
//! - [`GenerationMode`] - Warmup (`LimitOnly`) vs. main (`Mixed`) generation
//! - [`OutputFormat`] - Delimited (CSV) vs. line-delimited JSON output
//! - [`GenerationConfig`] - Run parameters loaded from YAML or built in code
//!
//! # Architecture
//!
//! ```text
//! order-core (this crate)
//!    │
//!    ├─── order-generator  (synthesizes batches of OrderRecord)
//!    │
//!    └─── order-populate   (sequences phases, serializes batches to a sink)
//! ```
//!
//! # Example
//!
//! ```rust
//! use order_core::{GenerationConfig, OutputFormat};
//!
//! let config = GenerationConfig::from_yaml(r#"
//! total_rows: 1000
//! warmup_rows: 200
//! format: csv
//! "#).unwrap();
//!
//! config.validate().unwrap();
//! assert_eq!(config.main_rows(), 800);
//! assert_eq!(config.format, OutputFormat::Delimited);
//! ```

pub mod config;
pub mod types;

// Re-exports for convenience
pub use config::{ConfigError, GenerationConfig, DEFAULT_SYMBOLS};
pub use types::{Batch, GenerationMode, OrderRecord, OrderType, OutputFormat, Price, Side};
