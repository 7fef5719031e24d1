//! Rules engine for an 8×8 block-placement puzzle.
//!
//! The crate is split in two layers:
//!
//! - [`core`] - leaf data: the [`ShapeCatalog`], instantiated [`Piece`]s and the [`Board`]
//! - [`engine`] - turn sequencing on top of the data: piece generation, streak scoring
//!   and the [`GameSession`] state machine
//!
//! Everything is synchronous. A turn either completes atomically or is rejected before
//! any mutation happens, so the [`GameState`] snapshot is always consistent.

pub use self::{config::*, core::*, engine::*};

pub mod config;
pub mod core;
pub mod engine;

/// Proposed placement leaves the board or overlaps an occupied cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece does not fit at origin ({x}, {y})")]
pub struct InvalidPlacementError {
    pub x: i32,
    pub y: i32,
}

/// Invalid shape catalog or engine settings.
///
/// Raised at construction time; a session never starts with a bad configuration.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigurationError {
    #[display("shape catalog is empty")]
    EmptyCatalog,
    #[display("shape #{index} has no cells")]
    EmptyShape { index: usize },
    #[display("shape #{index} lists cell ({x}, {y}) more than once")]
    DuplicateCell { index: usize, x: u8, y: u8 },
    #[display("shape #{index} has zero selection weight")]
    ZeroWeight { index: usize },
    #[display("shape #{index} does not fit on an empty board")]
    ShapeTooLarge { index: usize },
    #[display("color count must be at least 1")]
    NoColors,
    #[display("color count {count} exceeds the palette limit of {}", MAX_COLORS)]
    TooManyColors { count: usize },
    #[display("queue size must be at least 1")]
    ZeroQueueSize,
    #[display("streak leeway must be at least 1")]
    ZeroStreakLeeway,
}

/// Rejected placement proposal.
///
/// Rejections never touch the game state.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum TurnError {
    #[display("session is not accepting placements")]
    #[from(ignore)]
    NotPlaying,
    #[display("queue slot {slot} is empty (queue holds {len} pieces)")]
    #[from(ignore)]
    EmptyQueueReference { slot: usize, len: usize },
    #[display("invalid placement")]
    InvalidPlacement(InvalidPlacementError),
}
