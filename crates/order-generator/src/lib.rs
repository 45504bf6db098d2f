//! Order record synthesizer for the synthetic order-book data generator.
//!
//! This crate provides [`OrderSynthesizer`], which turns a start id, a count
//! and a [`GenerationMode`](order_core::GenerationMode) into one
//! [`Batch`](order_core::Batch), and [`OrderGenerator`], which pairs a
//! synthesizer with an explicitly seeded RNG.
//!
//! # Architecture
//!
//! ```text
//! GenerationConfig
//!        │
//!        ▼
//! ┌──────────────────┐
//! │  OrderGenerator  │
//! │                  │
//! │  - seed          │
//! │  - rng (StdRng)  │
//! │  - synthesizer   │
//! └────────┬─────────┘
//!          │  synthesize(start_id, count, mode)
//!          ▼
//!    Batch { OrderRecord { id, symbol?, side, price, quantity, type } }
//! ```
//!
//! Only `id` (and `type` in `LimitOnly` mode) is deterministic. Every other
//! field is drawn from the RNG, so two runs match only when they share a seed.
//!
//! # Example
//!
//! ```rust
//! use order_core::{GenerationConfig, GenerationMode, OrderType};
//! use order_generator::OrderGenerator;
//!
//! let config = GenerationConfig::new(100).with_seed(42);
//! let mut generator = OrderGenerator::new(&config).unwrap();
//!
//! let batch = generator.synthesize(1, 10, GenerationMode::LimitOnly).unwrap();
//! assert_eq!(batch.len(), 10);
//! assert!(batch.iter().all(|r| r.order_type == OrderType::Limit));
//! ```

pub mod generator;
pub mod generators;
pub mod synthesizer;

// Re-exports for convenience
pub use generator::OrderGenerator;
pub use synthesizer::{GeneratorError, OrderSynthesizer};
