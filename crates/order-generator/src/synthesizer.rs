//! Batch synthesis of order records.

use crate::generators::{generate_one_of, generate_price, generate_quantity};
use order_core::{
    Batch, ConfigError, GenerationConfig, GenerationMode, OrderRecord, OrderType, Price, Side,
};
use rand::Rng;
use std::sync::Arc;

/// Error type for synthesis operations.
///
/// Outside of configuration problems these indicate a caller bug: the phase
/// sequencer never asks for an empty batch or an id range past `u64::MAX`.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Requested batch has no records
    #[error("batch count must be greater than 0")]
    EmptyBatch,

    #[error("start_id must be at least 1")]
    InvalidStartId,

    #[error("id range starting at {start_id} with {count} records overflows u64")]
    IdOverflow { start_id: u64, count: u32 },

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Produces batches of order records from configured field distributions.
///
/// The synthesizer holds no RNG of its own; the caller passes one in, which
/// keeps seeding an explicit decision.
#[derive(Debug, Clone)]
pub struct OrderSynthesizer {
    /// Tickers, `None` when the symbol column is disabled
    symbols: Option<Vec<Arc<str>>>,
    price_min: Price,
    price_max: Price,
    quantity_min: u32,
    quantity_max: u32,
}

impl OrderSynthesizer {
    /// Build a synthesizer from a validated configuration.
    pub fn from_config(config: &GenerationConfig) -> Result<Self, GeneratorError> {
        config.validate()?;
        let (price_min, price_max) = config.price_bounds()?;
        let symbols = config
            .include_symbol
            .then(|| config.symbols.iter().map(|s| Arc::from(s.as_str())).collect());

        Ok(Self {
            symbols,
            price_min,
            price_max,
            quantity_min: config.quantity_min,
            quantity_max: config.quantity_max,
        })
    }

    /// Whether records carry a symbol.
    pub fn includes_symbol(&self) -> bool {
        self.symbols.is_some()
    }

    pub fn price_bounds(&self) -> (Price, Price) {
        (self.price_min, self.price_max)
    }

    pub fn quantity_bounds(&self) -> (u32, u32) {
        (self.quantity_min, self.quantity_max)
    }

    /// Produce exactly `count` records with ids `start_id..start_id + count`.
    pub fn synthesize<R: Rng>(
        &self,
        rng: &mut R,
        start_id: u64,
        count: u32,
        mode: GenerationMode,
    ) -> Result<Batch, GeneratorError> {
        if count == 0 {
            return Err(GeneratorError::EmptyBatch);
        }
        if start_id == 0 {
            return Err(GeneratorError::InvalidStartId);
        }
        // The last id is start_id + count - 1; it must be representable.
        if start_id.checked_add(u64::from(count) - 1).is_none() {
            return Err(GeneratorError::IdOverflow { start_id, count });
        }

        let records = (0..u64::from(count))
            .map(|offset| self.next_record(rng, start_id + offset, mode))
            .collect();

        Ok(Batch::new(mode, records))
    }

    /// Generate a single record. Fields are drawn in column order.
    fn next_record<R: Rng>(&self, rng: &mut R, id: u64, mode: GenerationMode) -> OrderRecord {
        let symbol = self
            .symbols
            .as_deref()
            .and_then(|symbols| generate_one_of(rng, symbols))
            .cloned();
        let side = *generate_one_of(rng, &Side::ALL).unwrap_or(&Side::Buy);
        let price = generate_price(rng, self.price_min, self.price_max);
        let quantity = generate_quantity(rng, self.quantity_min, self.quantity_max);
        let order_type = *generate_one_of(rng, mode.order_types()).unwrap_or(&OrderType::Limit);

        OrderRecord {
            id,
            symbol,
            side,
            price,
            quantity,
            order_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn synthesizer(include_symbol: bool) -> OrderSynthesizer {
        let config = GenerationConfig::new(1000).with_symbol(include_symbol);
        OrderSynthesizer::from_config(&config).unwrap()
    }

    #[test]
    fn test_synthesize_ids_are_contiguous() {
        let mut rng = StdRng::seed_from_u64(42);
        let batch = synthesizer(false)
            .synthesize(&mut rng, 11, 7, GenerationMode::Mixed)
            .unwrap();

        assert_eq!(batch.len(), 7);
        let ids: Vec<u64> = batch.iter().map(|r| r.id).collect();
        assert_eq!(ids, (11..18).collect::<Vec<_>>());
    }

    #[test]
    fn test_limit_only_mode() {
        let mut rng = StdRng::seed_from_u64(42);
        let batch = synthesizer(false)
            .synthesize(&mut rng, 1, 500, GenerationMode::LimitOnly)
            .unwrap();

        assert_eq!(batch.mode(), GenerationMode::LimitOnly);
        assert!(batch.iter().all(|r| r.order_type == OrderType::Limit));
    }

    #[test]
    fn test_mixed_mode_produces_both_types() {
        let mut rng = StdRng::seed_from_u64(42);
        let batch = synthesizer(false)
            .synthesize(&mut rng, 1, 500, GenerationMode::Mixed)
            .unwrap();

        assert!(batch.iter().any(|r| r.order_type == OrderType::Limit));
        assert!(batch.iter().any(|r| r.order_type == OrderType::Ioc));
        assert!(batch.iter().any(|r| r.side == Side::Buy));
        assert!(batch.iter().any(|r| r.side == Side::Sell));
    }

    #[test]
    fn test_fields_within_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let synth = synthesizer(true);
        let (price_min, price_max) = synth.price_bounds();
        let batch = synth
            .synthesize(&mut rng, 1, 1000, GenerationMode::Mixed)
            .unwrap();

        for record in &batch {
            assert!(record.price >= price_min && record.price <= price_max);
            assert!((1..=100).contains(&record.quantity));
            let symbol = record.symbol.as_deref().unwrap();
            assert!(["AAPL", "GOOG", "MSFT", "TSLA"].contains(&symbol));
        }
    }

    #[test]
    fn test_symbol_omitted_when_disabled() {
        let mut rng = StdRng::seed_from_u64(42);
        let synth = synthesizer(false);
        assert!(!synth.includes_symbol());

        let batch = synth
            .synthesize(&mut rng, 1, 10, GenerationMode::Mixed)
            .unwrap();
        assert!(batch.iter().all(|r| r.symbol.is_none()));
    }

    #[test]
    fn test_same_seed_same_batch() {
        let synth = synthesizer(true);
        let mut rng1 = StdRng::seed_from_u64(9);
        let mut rng2 = StdRng::seed_from_u64(9);

        let batch1 = synth.synthesize(&mut rng1, 1, 50, GenerationMode::Mixed).unwrap();
        let batch2 = synth.synthesize(&mut rng2, 1, 50, GenerationMode::Mixed).unwrap();
        assert_eq!(batch1, batch2);
    }

    #[test]
    fn test_invalid_parameters() {
        let mut rng = StdRng::seed_from_u64(42);
        let synth = synthesizer(false);

        assert!(matches!(
            synth.synthesize(&mut rng, 1, 0, GenerationMode::Mixed),
            Err(GeneratorError::EmptyBatch)
        ));
        assert!(matches!(
            synth.synthesize(&mut rng, 0, 5, GenerationMode::Mixed),
            Err(GeneratorError::InvalidStartId)
        ));
        assert!(matches!(
            synth.synthesize(&mut rng, u64::MAX - 1, 5, GenerationMode::Mixed),
            Err(GeneratorError::IdOverflow { .. })
        ));

        // The very last representable id is fine
        let batch = synth
            .synthesize(&mut rng, u64::MAX, 1, GenerationMode::Mixed)
            .unwrap();
        assert_eq!(batch.last_id(), Some(u64::MAX));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = OrderSynthesizer::from_config(&GenerationConfig::new(0));
        assert!(matches!(
            result,
            Err(GeneratorError::Config(ConfigError::ZeroRows))
        ));
    }
}
