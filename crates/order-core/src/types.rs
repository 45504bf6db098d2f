//! Order record and batch types.
//!
//! These are the values that flow from the synthesizer to the writers. A
//! [`Batch`] owns its records and is consumed by the writer that serializes it,
//! so no more than one batch is alive at a time.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// All sides, in the order they are sampled from.
    pub const ALL: [Side; 2] = [Side::Buy, Side::Sell];

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderType {
    /// Resting limit order
    Limit,
    /// Immediate-or-cancel
    Ioc,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Limit => "LIMIT",
            OrderType::Ioc => "IOC",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A price with exactly two fractional digits, stored as integer cents.
///
/// Keeping prices on the cent grid makes the rendered form (`9.87`, `10.00`)
/// independent of floating point formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(u64);

impl Price {
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> u64 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Generation mode, which controls the `type` value set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Warmup phase: every record is a LIMIT order.
    LimitOnly,
    /// Main phase: LIMIT or IOC, drawn uniformly per record.
    Mixed,
}

impl GenerationMode {
    /// Order types that may be produced in this mode.
    pub fn order_types(&self) -> &'static [OrderType] {
        match self {
            GenerationMode::LimitOnly => &[OrderType::Limit],
            GenerationMode::Mixed => &[OrderType::Limit, OrderType::Ioc],
        }
    }
}

impl FromStr for GenerationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "limit_only" | "limit-only" | "warmup" => Ok(GenerationMode::LimitOnly),
            "mixed" | "main" => Ok(GenerationMode::Mixed),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

/// Output serialization kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Comma-delimited rows with a single header row.
    #[default]
    #[serde(rename = "csv", alias = "delimited")]
    Delimited,
    /// One JSON object per line, no header.
    #[serde(rename = "jsonl", alias = "lines", alias = "json")]
    Lines,
}

impl OutputFormat {
    /// File extension used when deriving a default output name.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Delimited => "csv",
            OutputFormat::Lines => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Delimited => f.write_str("csv"),
            OutputFormat::Lines => f.write_str("jsonl"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" | "delimited" => Ok(OutputFormat::Delimited),
            "jsonl" | "json" | "lines" => Ok(OutputFormat::Lines),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}

/// One synthetic exchange order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub id: u64,
    /// Ticker, present only when the run includes the symbol column.
    pub symbol: Option<Arc<str>>,
    pub side: Side,
    pub price: Price,
    pub quantity: u32,
    pub order_type: OrderType,
}

impl OrderRecord {
    /// Column names in output order.
    pub fn field_names(include_symbol: bool) -> Vec<&'static str> {
        let mut names = vec!["id"];
        if include_symbol {
            names.push("symbol");
        }
        names.extend(["side", "price", "quantity", "type"]);
        names
    }
}

/// A transient group of records produced by one synthesizer call.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    mode: GenerationMode,
    records: Vec<OrderRecord>,
}

impl Batch {
    pub fn new(mode: GenerationMode, records: Vec<OrderRecord>) -> Self {
        Self { mode, records }
    }

    pub fn mode(&self) -> GenerationMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first_id(&self) -> Option<u64> {
        self.records.first().map(|r| r.id)
    }

    pub fn last_id(&self) -> Option<u64> {
        self.records.last().map(|r| r.id)
    }

    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OrderRecord> {
        self.records.iter()
    }
}

impl IntoIterator for Batch {
    type Item = OrderRecord;
    type IntoIter = std::vec::IntoIter<OrderRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a OrderRecord;
    type IntoIter = std::slice::Iter<'a, OrderRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
