use serde::{Deserialize, Serialize};

use crate::{Board, Piece};

use super::{GameStats, Streak};

/// Lifecycle of a session.
///
/// `NotStarted → Playing → GameOver`; a restart goes back to `Playing` from either
/// of the other states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, derive_more::IsVariant)]
pub enum SessionState {
    #[default]
    NotStarted,
    Playing,
    GameOver,
}

/// Authoritative snapshot of a game.
///
/// Owned and mutated by [`GameSession`](super::GameSession) only; presentation
/// collaborators get shared references and read whatever they need to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) queue: Vec<Piece>,
    pub(crate) stats: GameStats,
    pub(crate) streak: Streak,
    pub(crate) high_score: usize,
    pub(crate) session_state: SessionState,
}

impl GameState {
    pub(crate) fn new(streak_leeway: u32, high_score: usize) -> Self {
        Self {
            board: Board::EMPTY,
            queue: Vec::new(),
            stats: GameStats::new(),
            streak: Streak::new(streak_leeway),
            high_score,
            session_state: SessionState::NotStarted,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Pieces currently offered, in slot order.
    #[must_use]
    pub fn queue(&self) -> &[Piece] {
        &self.queue
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn streak(&self) -> &Streak {
        &self.streak
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    /// Best score known to the session: the stored value, or this game's score once
    /// it finished above it.
    #[must_use]
    pub fn high_score(&self) -> usize {
        self.high_score
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        !self.session_state.is_not_started()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.session_state.is_game_over()
    }
}
