//! Error types for the order populator.

use crate::serializer::SerializeError;
use order_core::ConfigError;
use order_generator::GeneratorError;
use thiserror::Error;

/// Errors that abort a populate run.
///
/// Every variant raised after writing began carries the number of rows that
/// were fully written and flushed before the failure.
#[derive(Error, Debug)]
pub enum PopulatorError {
    /// Invalid run parameters, raised before anything is written.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// Writing to or flushing the sink failed.
    #[error("Sink write failed after {rows_committed} committed rows: {source}")]
    SinkWrite {
        rows_committed: u64,
        #[source]
        source: std::io::Error,
    },

    /// Serializing a batch into memory failed.
    #[error("Serialization failed after {rows_committed} committed rows: {source}")]
    Serialize {
        rows_committed: u64,
        #[source]
        source: SerializeError,
    },

    /// The synthesizer rejected a batch request.
    #[error("Synthesis failed after {rows_committed} committed rows: {source}")]
    Synthesis {
        rows_committed: u64,
        #[source]
        source: GeneratorError,
    },
}

impl PopulatorError {
    /// Build from a generator error, routing config problems to
    /// [`PopulatorError::InvalidConfiguration`].
    pub fn from_generator(error: GeneratorError, rows_committed: u64) -> Self {
        match error {
            GeneratorError::Config(e) => PopulatorError::InvalidConfiguration(e),
            source => PopulatorError::Synthesis {
                rows_committed,
                source,
            },
        }
    }

    /// Rows written before the failure. Always 0 for configuration errors.
    pub fn rows_committed(&self) -> u64 {
        match self {
            PopulatorError::InvalidConfiguration(_) => 0,
            PopulatorError::SinkWrite { rows_committed, .. }
            | PopulatorError::Serialize { rows_committed, .. }
            | PopulatorError::Synthesis { rows_committed, .. } => *rows_committed,
        }
    }
}
