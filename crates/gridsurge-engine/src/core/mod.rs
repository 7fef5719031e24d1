pub use self::{board::*, piece::*, shape::*};

pub(crate) mod board;
pub(crate) mod piece;
pub(crate) mod shape;

/// Width and height of the square board.
pub const BOARD_SIZE: usize = 8;

/// Upper bound on the number of distinct colors a piece can carry.
///
/// Color indices are rendered as a single hex digit in the board text form.
pub const MAX_COLORS: usize = 16;
