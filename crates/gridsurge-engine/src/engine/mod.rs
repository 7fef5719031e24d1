//! Turn sequencing and session state.
//!
//! This module orchestrates the [`core`](crate::core) data structures into a playable
//! game:
//!
//! - [`GameSession`] - the state machine that accepts or rejects placements
//! - [`GameState`] - read-only snapshot handed to presentation layers
//! - [`GameStats`] - score, lines cleared and placement counters
//! - [`Streak`] - consecutive-clear multiplier with leeway
//! - [`PieceGenerator`] - weighted random piece drawing
//! - [`PieceSeed`] - seed for deterministic piece generation
//! - [`HighScoreStore`] - persistence seam for the best score
//!
//! # Game Flow
//!
//! 1. [`GameSession::restart`] empties the board and deals a batch of pieces
//! 2. The player proposes a queue slot and an origin
//! 3. The piece is written, full rows and columns are cleared and scored
//! 4. The batch is redealt once every piece has been used
//! 5. Repeat until no queued piece fits anywhere
//!
//! # Example
//!
//! ```
//! use gridsurge_engine::{EngineConfig, GameSession, MemoryHighScore};
//!
//! let mut session =
//!     GameSession::new(EngineConfig::default(), Box::new(MemoryHighScore::default())).unwrap();
//! session.restart();
//!
//! for _ in 0..50 {
//!     let state = session.state();
//!     if state.is_game_over() {
//!         break;
//!     }
//!     let (slot, origin) = state
//!         .queue()
//!         .iter()
//!         .enumerate()
//!         .find_map(|(slot, piece)| state.board().valid_origins(piece).next().map(|o| (slot, o)))
//!         .unwrap();
//!     session.propose_placement(slot, origin.0, origin.1).unwrap();
//! }
//!
//! println!("final score: {}", session.state().score());
//! ```

pub use self::{
    game_session::*, game_state::*, game_stats::*, high_score::*, piece_generator::*, streak::*,
};

mod game_session;
mod game_state;
mod game_stats;
mod high_score;
mod piece_generator;
mod streak;
