use serde::{Deserialize, Serialize};

/// Number of non-clearing placements tolerated after a clear by default.
pub const DEFAULT_STREAK_LEEWAY: u32 = 2;

/// Combo streak with a leeway window.
///
/// Every clearing placement extends the streak by one and refills the leeway.
/// A non-clearing placement during a streak consumes one unit of leeway; the
/// placement that exhausts it ends the streak.
///
/// # Example
///
/// ```
/// use gridsurge_engine::Streak;
///
/// let mut streak = Streak::new(2);
/// streak.record(1);
/// streak.record(2);
/// assert_eq!(streak.count(), 2);
///
/// assert!(!streak.record(0).ended);
/// assert!(streak.record(0).ended);
/// assert_eq!(streak.count(), 0);
/// assert_eq!(streak.max(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    count: u32,
    leeway: u32,
    max: u32,
    grace: u32,
}

/// Outcome of recording one placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakUpdate {
    /// Streak value after the placement.
    pub streak: u32,
    /// The placement used up the last unit of leeway and voided the streak.
    pub ended: bool,
}

impl Default for Streak {
    fn default() -> Self {
        Self::new(DEFAULT_STREAK_LEEWAY)
    }
}

impl Streak {
    /// Creates an idle streak whose leeway is refilled to `grace` after each clear.
    #[must_use]
    pub const fn new(grace: u32) -> Self {
        Self {
            count: 0,
            leeway: 0,
            max: 0,
            grace,
        }
    }

    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    #[must_use]
    pub const fn leeway(&self) -> u32 {
        self.leeway
    }

    /// Longest streak reached so far.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.count > 0
    }

    /// Updates the streak for a placement that cleared `lines` lines.
    pub fn record(&mut self, lines: usize) -> StreakUpdate {
        if lines > 0 {
            self.count += 1;
            self.leeway = self.grace;
            self.max = self.max.max(self.count);
            return StreakUpdate {
                streak: self.count,
                ended: false,
            };
        }

        let mut ended = false;
        if self.count > 0 {
            self.leeway = self.leeway.saturating_sub(1);
            if self.leeway == 0 {
                self.count = 0;
                ended = true;
            }
        }
        StreakUpdate {
            streak: self.count,
            ended,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(lines: &[usize]) -> Vec<(u32, u32, bool)> {
        let mut streak = Streak::default();
        lines
            .iter()
            .map(|&l| {
                let update = streak.record(l);
                assert_eq!(update.streak, streak.count());
                (streak.count(), streak.leeway(), update.ended)
            })
            .collect()
    }

    #[test]
    fn test_idle_miss_is_noop() {
        assert_eq!(run(&[0, 0, 0]), vec![(0, 0, false); 3]);
    }

    #[test]
    fn test_clear_two_then_two_misses() {
        assert_eq!(
            run(&[1, 2, 0, 0]),
            vec![(1, 2, false), (2, 2, false), (2, 1, false), (0, 0, true)]
        );
    }

    #[test]
    fn test_clear_within_leeway_continues() {
        assert_eq!(
            run(&[1, 0, 3, 0, 1]),
            vec![
                (1, 2, false),
                (1, 1, false),
                (2, 2, false),
                (2, 1, false),
                (3, 2, false)
            ]
        );
    }

    #[test]
    fn test_restart_after_end() {
        let mut streak = Streak::default();
        for lines in [1, 1, 1, 0, 0] {
            streak.record(lines);
        }
        assert_eq!(streak.count(), 0);
        assert_eq!(streak.max(), 3);
        assert_eq!(streak.record(2).streak, 1);
        assert_eq!(streak.max(), 3);
    }

    #[test]
    fn test_custom_grace() {
        let mut streak = Streak::new(1);
        streak.record(1);
        let update = streak.record(0);
        assert!(update.ended);
        assert_eq!(update.streak, 0);
    }
}
