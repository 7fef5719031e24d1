use serde::{Deserialize, Serialize};

use crate::BOARD_SIZE;

/// Points per cleared line.
const LINE_POINTS: usize = 100;

/// Extra points per line beyond the first in a single placement.
const MULTI_LINE_BONUS: usize = 50;

/// Most lines a single placement can clear: every row and every column.
pub const MAX_LINES_PER_PLACEMENT: usize = 2 * BOARD_SIZE;

/// Score for a placement that cleared `lines > 0` lines, given the streak value
/// *after* this placement was counted.
///
/// `base = lines × 100`, `bonus = (lines − 1) × 50` and the streak multiplier is
/// `1 + (streak − 1) × 0.25`. The multiplier is applied in quarters so the result is
/// the exact floor of the product.
///
/// ```
/// use gridsurge_engine::clear_score;
///
/// assert_eq!(clear_score(2, 1), 250);
/// assert_eq!(clear_score(1, 3), 150);
/// assert_eq!(clear_score(3, 2), 500);
/// ```
#[must_use]
pub fn clear_score(lines: usize, streak: u32) -> usize {
    if lines == 0 {
        return 0;
    }
    let base = lines * LINE_POINTS;
    let bonus = (lines - 1) * MULTI_LINE_BONUS;
    let quarters = usize::try_from(streak.max(1)).unwrap_or(usize::MAX).saturating_add(3);
    (base + bonus).saturating_mul(quarters) / 4
}

/// Cumulative statistics of a session.
///
/// - **Score**: placement rewards plus line-clear points; never decreases
/// - **Blocks placed**: number of accepted placements
/// - **Lines cleared**: rows and columns cleared, summed over all placements
/// - **Line clear distribution**: placements counted by how many lines they cleared
///
/// # Example
///
/// ```
/// use gridsurge_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// assert_eq!(stats.record_placement(3, 0, 0), 3);
/// assert_eq!(stats.record_placement(2, 2, 1), 250);
///
/// assert_eq!(stats.score(), 253);
/// assert_eq!(stats.blocks_placed(), 2);
/// assert_eq!(stats.lines_cleared(), 2);
/// assert_eq!(stats.line_clear_counter()[2], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    score: usize,
    blocks_placed: usize,
    lines_cleared: usize,
    line_clear_counter: [usize; MAX_LINES_PER_PLACEMENT + 1],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            blocks_placed: 0,
            lines_cleared: 0,
            line_clear_counter: [0; MAX_LINES_PER_PLACEMENT + 1],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn blocks_placed(&self) -> usize {
        self.blocks_placed
    }

    #[must_use]
    pub const fn lines_cleared(&self) -> usize {
        self.lines_cleared
    }

    /// Placements counted by number of lines cleared; index 0 counts misses.
    #[must_use]
    pub const fn line_clear_counter(&self) -> &[usize; MAX_LINES_PER_PLACEMENT + 1] {
        &self.line_clear_counter
    }

    /// Updates statistics after an accepted placement and returns the score delta.
    ///
    /// # Arguments
    ///
    /// * `cells` - Number of cells in the placed piece
    /// * `lines` - Lines cleared by the placement
    /// * `streak` - Streak value after the placement was recorded
    ///
    /// A non-clearing placement earns one point per cell; a clearing one earns
    /// [`clear_score`].
    pub fn record_placement(&mut self, cells: usize, lines: usize, streak: u32) -> usize {
        self.blocks_placed += 1;
        if let Some(slot) = self.line_clear_counter.get_mut(lines) {
            *slot += 1;
        }

        let delta = if lines == 0 {
            cells
        } else {
            self.lines_cleared += lines;
            clear_score(lines, streak)
        };
        self.score += delta;
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_score_examples() {
        assert_eq!(clear_score(1, 1), 100);
        assert_eq!(clear_score(2, 1), 250);
        assert_eq!(clear_score(1, 3), 150);
        assert_eq!(clear_score(1, 2), 125);
        assert_eq!(clear_score(2, 2), 312);
        assert_eq!(clear_score(4, 5), 1100);
        assert_eq!(clear_score(0, 4), 0);
    }

    #[test]
    fn test_clear_score_matches_float_formula() {
        for lines in 1..=MAX_LINES_PER_PLACEMENT {
            for streak in 1..30u32 {
                let base = (lines * 100 + (lines - 1) * 50) as f64;
                let expected = (base * (1.0 + f64::from(streak - 1) * 0.25)).floor() as usize;
                assert_eq!(clear_score(lines, streak), expected, "{lines} lines @ {streak}");
            }
        }
    }

    #[test]
    fn test_non_clearing_placement_scores_cells() {
        let mut stats = GameStats::new();
        assert_eq!(stats.record_placement(5, 0, 3), 5);
        assert_eq!(stats.score(), 5);
        assert_eq!(stats.lines_cleared(), 0);
        assert_eq!(stats.line_clear_counter()[0], 1);
    }

    #[test]
    fn test_score_never_decreases() {
        let mut stats = GameStats::new();
        let mut last = 0;
        for (cells, lines, streak) in [(1, 0, 0), (4, 1, 1), (2, 0, 1), (3, 3, 2), (1, 0, 0)] {
            stats.record_placement(cells, lines, streak);
            assert!(stats.score() >= last);
            last = stats.score();
        }
        assert_eq!(stats.blocks_placed(), 5);
        assert_eq!(stats.lines_cleared(), 4);
    }

    #[test]
    fn test_full_board_clear_is_counted() {
        let mut stats = GameStats::new();
        stats.record_placement(1, MAX_LINES_PER_PLACEMENT, 1);
        assert_eq!(stats.line_clear_counter()[MAX_LINES_PER_PLACEMENT], 1);
    }
}
