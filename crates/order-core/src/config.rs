//! Run configuration for a generation run.
//!
//! A [`GenerationConfig`] is built from a YAML file, from CLI flags, or both
//! (flags override file values). It is validated once, before any output is
//! written.

use crate::types::{OutputFormat, Price};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tickers drawn from when the symbol column is enabled.
pub const DEFAULT_SYMBOLS: [&str; 4] = ["AAPL", "GOOG", "MSFT", "TSLA"];

// ============================================================================
// Error Types
// ============================================================================

/// Error type for configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading config file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("total_rows must be greater than 0")]
    ZeroRows,

    #[error("warmup_rows ({warmup_rows}) exceeds total_rows ({total_rows})")]
    WarmupExceedsTotal { warmup_rows: u64, total_rows: u64 },

    #[error("batch_size must be greater than 0")]
    ZeroBatchSize,

    #[error("start_id must be at least 1")]
    ZeroStartId,

    #[error("id range starting at {start_id} with {total_rows} rows overflows u64")]
    IdOverflow { start_id: u64, total_rows: u64 },

    #[error("invalid price bounds: min={min}, max={max}")]
    InvalidPriceBounds { min: f64, max: f64 },

    #[error("invalid quantity bounds: min={min}, max={max}")]
    InvalidQuantityBounds { min: u32, max: u32 },

    #[error("include_symbol is set but the symbol set is empty")]
    EmptySymbolSet,

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),

    #[error("Unknown generation mode: {0}")]
    UnknownMode(String),
}

// ============================================================================
// Configuration
// ============================================================================

/// Parameters for a single generation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationConfig {
    /// Number of records to produce
    #[serde(default)]
    pub total_rows: u64,

    /// Leading records generated in LIMIT-only mode
    #[serde(default)]
    pub warmup_rows: u64,

    /// Rows per batch; derived from available memory when absent
    #[serde(default)]
    pub batch_size: Option<u32>,

    #[serde(default)]
    pub format: OutputFormat,

    /// Whether the sink should be gzip-compressed
    #[serde(default)]
    pub compressed: bool,

    /// Emit the `symbol` column
    #[serde(default)]
    pub include_symbol: bool,

    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,

    #[serde(default = "default_price_min")]
    pub price_min: f64,

    #[serde(default = "default_price_max")]
    pub price_max: f64,

    #[serde(default = "default_quantity_min")]
    pub quantity_min: u32,

    #[serde(default = "default_quantity_max")]
    pub quantity_max: u32,

    /// Id of the first record
    #[serde(default = "default_start_id")]
    pub start_id: u64,

    /// Prepend a `<total_rows>,<warmup_rows>` line before any header or data
    #[serde(default)]
    pub metadata_line: bool,

    /// RNG seed; an entropy-seeded RNG is used when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_symbols() -> Vec<String> {
    DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect()
}

fn default_price_min() -> f64 {
    9.50
}

fn default_price_max() -> f64 {
    10.50
}

fn default_quantity_min() -> u32 {
    1
}

fn default_quantity_max() -> u32 {
    100
}

fn default_start_id() -> u64 {
    1
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            total_rows: 0,
            warmup_rows: 0,
            batch_size: None,
            format: OutputFormat::default(),
            compressed: false,
            include_symbol: false,
            symbols: default_symbols(),
            price_min: default_price_min(),
            price_max: default_price_max(),
            quantity_min: default_quantity_min(),
            quantity_max: default_quantity_max(),
            start_id: default_start_id(),
            metadata_line: false,
            seed: None,
        }
    }
}

impl GenerationConfig {
    /// Create a config for `total_rows` records with default settings.
    pub fn new(total_rows: u64) -> Self {
        Self {
            total_rows,
            ..Self::default()
        }
    }

    pub fn with_warmup_rows(mut self, warmup_rows: u64) -> Self {
        self.warmup_rows = warmup_rows;
        self
    }

    pub fn with_batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_symbol(mut self, include_symbol: bool) -> Self {
        self.include_symbol = include_symbol;
        self
    }

    pub fn with_metadata_line(mut self, metadata_line: bool) -> Self {
        self.metadata_line = metadata_line;
        self
    }

    pub fn with_start_id(mut self, start_id: u64) -> Self {
        self.start_id = start_id;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load config from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse config from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Rows generated after the warmup prefix.
    pub fn main_rows(&self) -> u64 {
        self.total_rows.saturating_sub(self.warmup_rows)
    }

    /// One past the last id of the run.
    pub fn end_id(&self) -> u64 {
        self.start_id.saturating_add(self.total_rows)
    }

    /// Price bounds snapped inward onto the cent grid.
    pub fn price_bounds(&self) -> Result<(Price, Price), ConfigError> {
        let invalid = || ConfigError::InvalidPriceBounds {
            min: self.price_min,
            max: self.price_max,
        };
        if !self.price_min.is_finite()
            || !self.price_max.is_finite()
            || self.price_min < 0.0
            || self.price_max < 0.0
        {
            return Err(invalid());
        }

        let min = snap_to_cents(self.price_min, f64::ceil);
        let max = snap_to_cents(self.price_max, f64::floor);
        if min > max || max > u64::MAX as f64 {
            return Err(invalid());
        }
        Ok((Price::from_cents(min as u64), Price::from_cents(max as u64)))
    }

    /// Check every invariant the run depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_rows == 0 {
            return Err(ConfigError::ZeroRows);
        }
        if self.warmup_rows > self.total_rows {
            return Err(ConfigError::WarmupExceedsTotal {
                warmup_rows: self.warmup_rows,
                total_rows: self.total_rows,
            });
        }
        if self.batch_size == Some(0) {
            return Err(ConfigError::ZeroBatchSize);
        }
        if self.start_id == 0 {
            return Err(ConfigError::ZeroStartId);
        }
        if self.start_id.checked_add(self.total_rows).is_none() {
            return Err(ConfigError::IdOverflow {
                start_id: self.start_id,
                total_rows: self.total_rows,
            });
        }
        self.price_bounds()?;
        if self.quantity_min == 0 || self.quantity_min > self.quantity_max {
            return Err(ConfigError::InvalidQuantityBounds {
                min: self.quantity_min,
                max: self.quantity_max,
            });
        }
        if self.include_symbol && self.symbols.is_empty() {
            return Err(ConfigError::EmptySymbolSet);
        }
        Ok(())
    }
}

/// Scale to cents, tolerating representation error for values already on the grid.
fn snap_to_cents(value: f64, round_off_grid: fn(f64) -> f64) -> f64 {
    let scaled = value * 100.0;
    let nearest = scaled.round();
    if (scaled - nearest).abs() < 1e-6 {
        nearest
    } else {
        round_off_grid(scaled)
    }
}
