//! Batch sizing from available system memory.
//!
//! The estimate is deliberately coarse: roughly two million order rows fit in
//! one gigabyte of working memory once serialized, and the result is clamped
//! so that tiny hosts still make progress and large hosts do not build huge
//! batches.

use tracing::{info, warn};

/// Calibrated rows that fit in one gigabyte of available memory.
pub const ROWS_PER_GB: u64 = 2_097_152;

/// Smallest batch size derived from memory.
pub const MIN_BATCH: u32 = 10_000;

/// Largest batch size derived from memory.
pub const MAX_BATCH: u32 = 5_000_000;

/// Batch size used when available memory cannot be determined.
pub const FALLBACK_BATCH: u32 = MIN_BATCH;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Error type for memory introspection.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("available memory could not be determined")]
    MemoryUnavailable,
}

/// Source of the available-memory snapshot.
pub trait MemoryProbe {
    /// Bytes of memory currently available to new allocations.
    fn available_bytes(&self) -> Result<u64, ResourceError>;
}

/// Reads available memory from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemMemory;

impl MemoryProbe for SystemMemory {
    fn available_bytes(&self) -> Result<u64, ResourceError> {
        let mut sys = sysinfo::System::new();
        sys.refresh_memory();
        // sysinfo reports 0 on platforms it cannot read.
        match sys.available_memory() {
            0 => Err(ResourceError::MemoryUnavailable),
            bytes => Ok(bytes),
        }
    }
}

/// Result of a batch size estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceEstimate {
    /// Available memory in GB, `None` if introspection failed
    pub available_gb: Option<f64>,
    pub batch_size: u32,
}

/// Derive a batch size from the row target and available memory.
///
/// `min(total_rows, available_gb * ROWS_PER_GB)` is clamped to
/// `[MIN_BATCH, MAX_BATCH]` and then capped at `total_rows`, so a run smaller
/// than `MIN_BATCH` is written as a single batch. Never returns 0.
pub fn estimate_batch_size(total_rows: u64, available_gb: f64) -> u32 {
    let by_memory = if available_gb.is_finite() && available_gb > 0.0 {
        // Float to int casts saturate.
        (available_gb * ROWS_PER_GB as f64) as u64
    } else {
        0
    };

    let safe_batch = total_rows.min(by_memory);
    let clamped = safe_batch.clamp(u64::from(MIN_BATCH), u64::from(MAX_BATCH));
    // Bounded by MAX_BATCH, so the cast is lossless.
    clamped.min(total_rows).max(1) as u32
}

/// Available memory reported by `probe`, in gigabytes.
pub fn available_gb<P: MemoryProbe + ?Sized>(probe: &P) -> Result<f64, ResourceError> {
    Ok(probe.available_bytes()? as f64 / BYTES_PER_GB)
}

/// Estimate a batch size, falling back to [`FALLBACK_BATCH`] when memory
/// introspection fails.
pub fn estimate<P: MemoryProbe + ?Sized>(total_rows: u64, probe: &P) -> ResourceEstimate {
    match available_gb(probe) {
        Ok(gb) => {
            let batch_size = estimate_batch_size(total_rows, gb);
            info!("Available RAM: {:.2} GB, batch size: {}", gb, batch_size);
            ResourceEstimate {
                available_gb: Some(gb),
                batch_size,
            }
        }
        Err(e) => {
            let batch_size = u64::from(FALLBACK_BATCH).min(total_rows).max(1) as u32;
            warn!("{e}; using fallback batch size {batch_size}");
            ResourceEstimate {
                available_gb: None,
                batch_size,
            }
        }
    }
}
