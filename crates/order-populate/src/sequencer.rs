//! Two-phase batch sequencing.
//!
//! A run moves through `Init -> Warmup -> Main -> Done`. Warmup is skipped
//! when `warmup_rows == 0` and main is skipped when every row is warmup. Ids
//! continue across the phase boundary without reset, gap or overlap.

use order_core::{GenerationConfig, GenerationMode};
use std::fmt;
use tracing::info;

/// Sequencer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    Warmup,
    Main,
    Done,
}

impl Phase {
    /// Generation mode used for batches in this phase.
    pub fn mode(&self) -> Option<GenerationMode> {
        match self {
            Phase::Warmup => Some(GenerationMode::LimitOnly),
            Phase::Main => Some(GenerationMode::Mixed),
            Phase::Init | Phase::Done => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Init => f.write_str("init"),
            Phase::Warmup => f.write_str("warmup"),
            Phase::Main => f.write_str("main"),
            Phase::Done => f.write_str("done"),
        }
    }
}

/// One unit of work handed out by the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    pub phase: Phase,
    pub start_id: u64,
    pub count: u32,
    pub mode: GenerationMode,
}

/// Hands out batch plans covering `start_id..start_id + total_rows` in order.
#[derive(Debug, Clone)]
pub struct PhaseSequencer {
    total_rows: u64,
    warmup_rows: u64,
    batch_size: u32,
    phase: Phase,
    /// Next id to assign
    current_id: u64,
    warmup_emitted: u64,
    main_emitted: u64,
}

impl PhaseSequencer {
    /// Create a sequencer. `batch_size` of 0 is treated as 1.
    ///
    /// Callers validate the config first; `warmup_rows` is capped at
    /// `total_rows` so the sequencer can never emit more than `total_rows`.
    pub fn new(start_id: u64, total_rows: u64, warmup_rows: u64, batch_size: u32) -> Self {
        Self {
            total_rows,
            warmup_rows: warmup_rows.min(total_rows),
            batch_size: batch_size.max(1),
            phase: Phase::Init,
            current_id: start_id,
            warmup_emitted: 0,
            main_emitted: 0,
        }
    }

    pub fn from_config(config: &GenerationConfig, batch_size: u32) -> Self {
        Self::new(
            config.start_id,
            config.total_rows,
            config.warmup_rows,
            batch_size,
        )
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_id(&self) -> u64 {
        self.current_id
    }

    pub fn rows_emitted(&self) -> u64 {
        self.warmup_emitted + self.main_emitted
    }

    pub fn main_rows(&self) -> u64 {
        self.total_rows - self.warmup_rows
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Plan the next batch and advance past it, or `None` once all rows are
    /// handed out.
    pub fn next_batch(&mut self) -> Option<BatchPlan> {
        loop {
            let remaining = match self.phase {
                Phase::Init => {
                    let next = if self.warmup_rows > 0 {
                        Phase::Warmup
                    } else if self.total_rows > 0 {
                        Phase::Main
                    } else {
                        Phase::Done
                    };
                    self.transition(next);
                    continue;
                }
                Phase::Warmup => self.warmup_rows - self.warmup_emitted,
                Phase::Main => self.main_rows() - self.main_emitted,
                Phase::Done => return None,
            };

            if remaining == 0 {
                let next = match self.phase {
                    Phase::Warmup if self.main_rows() > 0 => Phase::Main,
                    _ => Phase::Done,
                };
                self.transition(next);
                continue;
            }

            let count = remaining.min(u64::from(self.batch_size)) as u32;
            let plan = BatchPlan {
                phase: self.phase,
                start_id: self.current_id,
                count,
                mode: self.phase.mode()?,
            };

            self.current_id += u64::from(count);
            match self.phase {
                Phase::Warmup => self.warmup_emitted += u64::from(count),
                _ => self.main_emitted += u64::from(count),
            }
            return Some(plan);
        }
    }

    fn transition(&mut self, next: Phase) {
        match next {
            Phase::Warmup => info!("Starting warmup phase: {} rows", self.warmup_rows),
            Phase::Main => info!(
                "Starting main phase: {} rows from id {}",
                self.main_rows(),
                self.current_id
            ),
            Phase::Done => info!("All {} rows sequenced", self.rows_emitted()),
            Phase::Init => {}
        }
        self.phase = next;
    }
}

impl Iterator for PhaseSequencer {
    type Item = BatchPlan;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_batch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plans(start_id: u64, total: u64, warmup: u64, batch: u32) -> Vec<BatchPlan> {
        PhaseSequencer::new(start_id, total, warmup, batch).collect()
    }

    #[test]
    fn test_warmup_then_main() {
        let plans = plans(1, 25, 10, 7);
        let summary: Vec<(Phase, u64, u32)> =
            plans.iter().map(|p| (p.phase, p.start_id, p.count)).collect();

        assert_eq!(
            summary,
            vec![
                (Phase::Warmup, 1, 7),
                (Phase::Warmup, 8, 3),
                (Phase::Main, 11, 7),
                (Phase::Main, 18, 7),
                (Phase::Main, 25, 1),
            ]
        );
        assert!(plans[..2].iter().all(|p| p.mode == GenerationMode::LimitOnly));
        assert!(plans[2..].iter().all(|p| p.mode == GenerationMode::Mixed));
    }

    #[test]
    fn test_ids_contiguous_across_phases() {
        for batch in [1, 3, 7, 10, 1000] {
            let plans = plans(1, 100, 37, batch);
            let mut expected = 1;
            for plan in &plans {
                assert_eq!(plan.start_id, expected);
                expected += u64::from(plan.count);
            }
            assert_eq!(expected, 101);
        }
    }

    #[test]
    fn test_no_warmup_goes_straight_to_main() {
        let mut sequencer = PhaseSequencer::new(1, 5, 0, 10);
        assert_eq!(sequencer.phase(), Phase::Init);

        let plan = sequencer.next_batch().unwrap();
        assert_eq!(plan.phase, Phase::Main);
        assert_eq!(plan.count, 5);
        assert!(sequencer.next_batch().is_none());
        assert!(sequencer.is_done());
    }

    #[test]
    fn test_all_warmup_skips_main() {
        let plans = plans(1, 12, 12, 5);
        assert_eq!(plans.len(), 3);
        assert!(plans.iter().all(|p| p.phase == Phase::Warmup));
        assert_eq!(plans.iter().map(|p| u64::from(p.count)).sum::<u64>(), 12);
    }

    #[test]
    fn test_custom_start_id() {
        let mut sequencer = PhaseSequencer::new(1001, 10, 4, 3);
        let plans: Vec<_> = sequencer.by_ref().collect();

        assert_eq!(plans.first().unwrap().start_id, 1001);
        assert_eq!(sequencer.current_id(), 1011);
        assert_eq!(sequencer.rows_emitted(), 10);
    }

    #[test]
    fn test_never_exceeds_total() {
        let mut sequencer = PhaseSequencer::new(1, 10, 50, 4);
        let emitted: u64 = sequencer.by_ref().map(|p| u64::from(p.count)).sum();
        assert_eq!(emitted, 10);
        assert!(sequencer.next_batch().is_none());
    }

    #[test]
    fn test_zero_rows_is_immediately_done() {
        let mut sequencer = PhaseSequencer::new(1, 0, 0, 10);
        assert!(sequencer.next_batch().is_none());
        assert!(sequencer.is_done());
    }

    #[test]
    fn test_huge_batch_size_on_huge_run() {
        let mut sequencer = PhaseSequencer::new(1, 10_000_000_000, 0, u32::MAX);
        let plan = sequencer.next_batch().unwrap();
        assert_eq!(plan.count, u32::MAX);
        assert_eq!(sequencer.current_id(), 1 + u64::from(u32::MAX));
    }
}
