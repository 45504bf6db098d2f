//! Run progress tracking.

use tracing::info;

/// Log every this many percent of `total_rows`.
const REPORT_STEP_PERCENT: u64 = 10;

/// Monotonic count of completed rows, capped at `total_rows`.
///
/// Purely an observer: nothing in the run reads it back to make decisions.
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    total_rows: u64,
    rows_completed: u64,
    /// Next percentage at which a progress line is logged
    next_report_percent: u64,
}

impl ProgressReporter {
    pub fn new(total_rows: u64) -> Self {
        Self {
            total_rows,
            rows_completed: 0,
            next_report_percent: REPORT_STEP_PERCENT,
        }
    }

    /// Record `rows_completed_delta` more rows as done.
    pub fn advance(&mut self, rows_completed_delta: u64) {
        self.rows_completed = self
            .rows_completed
            .saturating_add(rows_completed_delta)
            .min(self.total_rows);

        let percent = self.percent();
        if percent >= self.next_report_percent {
            info!(
                "Progress: {}/{} rows ({}%)",
                self.rows_completed, self.total_rows, percent
            );
            self.next_report_percent = (percent / REPORT_STEP_PERCENT + 1) * REPORT_STEP_PERCENT;
        }
    }

    pub fn rows_completed(&self) -> u64 {
        self.rows_completed
    }

    pub fn total_rows(&self) -> u64 {
        self.total_rows
    }

    /// Completed fraction in `[0.0, 1.0]`.
    pub fn fraction(&self) -> f64 {
        if self.total_rows == 0 {
            1.0
        } else {
            self.rows_completed as f64 / self.total_rows as f64
        }
    }

    /// Completed whole percent in `[0, 100]`.
    pub fn percent(&self) -> u64 {
        if self.total_rows == 0 {
            100
        } else {
            (u128::from(self.rows_completed) * 100 / u128::from(self.total_rows)) as u64
        }
    }

    pub fn is_complete(&self) -> bool {
        self.rows_completed == self.total_rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_accumulates() {
        let mut progress = ProgressReporter::new(25);
        progress.advance(7);
        progress.advance(7);
        assert_eq!(progress.rows_completed(), 14);
        assert_eq!(progress.percent(), 56);
        assert!(!progress.is_complete());

        progress.advance(11);
        assert!(progress.is_complete());
        assert_eq!(progress.fraction(), 1.0);
    }

    #[test]
    fn test_capped_at_total() {
        let mut progress = ProgressReporter::new(10);
        progress.advance(8);
        progress.advance(8);
        assert_eq!(progress.rows_completed(), 10);

        progress.advance(u64::MAX);
        assert_eq!(progress.rows_completed(), 10);
    }

    #[test]
    fn test_report_threshold_moves_forward() {
        let mut progress = ProgressReporter::new(1000);
        progress.advance(250);
        assert_eq!(progress.next_report_percent, 30);
        progress.advance(10);
        assert_eq!(progress.next_report_percent, 30);
        progress.advance(740);
        assert_eq!(progress.next_report_percent, 110);
    }

    #[test]
    fn test_percent_on_huge_totals() {
        let mut progress = ProgressReporter::new(u64::MAX);
        progress.advance(u64::MAX / 2);
        assert_eq!(progress.percent(), 49);
    }
}
