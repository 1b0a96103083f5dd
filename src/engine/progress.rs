//! Session score and win condition

use bitvec::prelude::*;

use crate::spatial::{Grid, Position};

/// Score plus the set of receptors still waiting to be marked
///
/// Built once from a fully populated grid. Receptors are tracked by position
/// in a fixed list, with a bit per receptor for "not yet marked"; the set only
/// ever shrinks through [`Progress::receptor_marked`].
#[derive(Debug, Clone)]
pub struct Progress {
    score: i64,
    receptors: Vec<Position>,
    unmarked: BitVec,
}

impl Progress {
    /// Scan `grid` and start tracking every receptor on it
    pub fn new(grid: &Grid) -> Self {
        let receptors = grid.receptor_positions();
        let unmarked = bitvec![1; receptors.len()];
        tracing::debug!(receptors = receptors.len(), "tracking progress");
        Self {
            score: 0,
            receptors,
            unmarked,
        }
    }

    /// Current score
    pub const fn score(&self) -> i64 {
        self.score
    }

    /// Add points to the score, saturating at the `i64` bounds
    pub const fn add_score(&mut self, points: i64) {
        self.score = self.score.saturating_add(points);
    }

    /// Overwrite the score
    pub const fn set_score(&mut self, score: i64) {
        self.score = score;
    }

    /// Record that the receptor at `position` has been marked
    ///
    /// Untracked or already-marked receptors are ignored.
    pub fn receptor_marked(&mut self, position: Position) {
        if let Some(index) = self.receptors.iter().position(|&p| p == position) {
            self.unmarked.set(index, false);
        }
    }

    /// Follow a placement over a tracked position
    ///
    /// A fresh receptor starts unmarked again; any other behaviour no longer
    /// holds up the win.
    pub fn tile_replaced(&mut self, position: Position, receptor: bool) {
        if let Some(index) = self.receptors.iter().position(|&p| p == position) {
            self.unmarked.set(index, receptor);
        }
    }

    /// Number of receptors being tracked
    pub const fn tracked(&self) -> usize {
        self.receptors.len()
    }

    /// Number of tracked receptors not yet marked
    pub fn unmarked_count(&self) -> usize {
        self.unmarked.count_ones()
    }

    /// Whether the receptor at `position` is tracked and still unmarked
    pub fn is_unmarked(&self, position: Position) -> bool {
        self.receptors
            .iter()
            .position(|&p| p == position)
            .and_then(|index| self.unmarked.get(index).as_deref().copied())
            .unwrap_or(false)
    }

    /// Every tracked receptor has been marked
    pub fn is_won(&self) -> bool {
        self.unmarked.not_any()
    }
}
