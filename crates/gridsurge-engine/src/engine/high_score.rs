use std::{error::Error, fmt};

/// Error type returned by [`HighScoreStore`] implementations.
pub type StoreError = Box<dyn Error + Send + Sync>;

/// External persistence for the best score.
///
/// The session reads the stored value when a game starts and writes only when a
/// finished game exceeds it. Failures are reported to the session, which logs them
/// and carries on: a broken store never stops play.
pub trait HighScoreStore: fmt::Debug {
    fn load(&self) -> Result<usize, StoreError>;

    fn save(&mut self, score: usize) -> Result<(), StoreError>;
}

/// Keeps the high score in memory for the lifetime of the store.
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScore {
    best: usize,
}

impl MemoryHighScore {
    #[must_use]
    pub fn new(best: usize) -> Self {
        Self { best }
    }

    #[must_use]
    pub fn best(&self) -> usize {
        self.best
    }
}

impl HighScoreStore for MemoryHighScore {
    fn load(&self) -> Result<usize, StoreError> {
        Ok(self.best)
    }

    fn save(&mut self, score: usize) -> Result<(), StoreError> {
        self.best = score;
        Ok(())
    }
}
