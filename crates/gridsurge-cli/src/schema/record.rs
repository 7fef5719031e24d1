use chrono::{DateTime, Utc};
use gridsurge_engine::{Board, GameStats, Piece, PieceSeed};
use serde::{Deserialize, Serialize};

/// Recorded automated game with enough metadata to reproduce it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedGame {
    /// Timestamp when recording was created (ISO 8601 format)
    pub recorded_at: DateTime<Utc>,
    /// Random seed used for piece generation
    pub seed: PieceSeed,
    /// Planner strategy that chose the placements
    pub strategy: String,
    /// Final game statistics
    pub final_stats: GameStats,
    /// Longest streak reached during the game
    pub max_streak: u32,
    /// Accepted placements in order
    pub turns: Vec<TurnRecord>,
}

/// A single accepted placement and the board it was made on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Turn number (0-indexed)
    pub turn: usize,
    /// Board state before the piece was placed
    pub before_placement: Board,
    /// Queue slot the piece was taken from
    pub slot: usize,
    /// The piece that was placed
    pub piece: Piece,
    /// Origin the piece was placed at
    pub origin: (i32, i32),
    /// Lines cleared by the placement
    pub lines_cleared: usize,
    /// Points earned by the placement
    pub score_delta: usize,
}
