//! Round, level and lifetime progress counters
//!
//! Owned by the simulation and mutated only by the tick progression; the
//! lifetime totals are mirrored to a `ProgressStore` on every round outcome.

use serde::{Deserialize, Serialize};

/// Progress counters carried across rounds and levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    /// Current level (1-based)
    pub level: u32,
    /// Consecutive successful rounds on this level
    pub round: u32,
    /// Lifetime wins across all sessions
    pub total_wins: u64,
    /// Lifetime failures across all sessions
    pub total_fails: u64,
}

impl ProgressState {
    pub fn starting_at(level: u32) -> Self {
        Self {
            level,
            round: 0,
            total_wins: 0,
            total_fails: 0,
        }
    }

    /// Resume from persisted lifetime totals
    pub fn with_totals(level: u32, total_wins: u64, total_fails: u64) -> Self {
        Self {
            level,
            round: 0,
            total_wins,
            total_fails,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_state() {
        let p = ProgressState::starting_at(3);
        assert_eq!(p.level, 3);
        assert_eq!(p.round, 0);
        assert_eq!(p.total_wins, 0);
        assert_eq!(p.total_fails, 0);
    }

    #[test]
    fn test_resume_keeps_totals() {
        let p = ProgressState::with_totals(1, 12, 30);
        assert_eq!(p.total_wins, 12);
        assert_eq!(p.total_fails, 30);
        assert_eq!(p.round, 0);
    }
}
