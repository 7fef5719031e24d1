use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::InvalidPlacementError;

use super::{
    BOARD_SIZE,
    piece::{ColorIndex, Piece},
};

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Cell {
    #[default]
    Empty,
    /// Occupied by a placed piece of the given color.
    Filled(ColorIndex),
}

impl Cell {
    /// Character used for this cell in the board text form.
    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Filled(color) => char::from_digit(u32::from(color), 16).unwrap_or('?'),
        }
    }

    fn from_char(ch: char) -> Option<Self> {
        if ch == '.' {
            return Some(Cell::Empty);
        }
        let digit = ch.to_digit(16)?;
        let color = ColorIndex::try_from(digit).ok()?;
        Some(Cell::Filled(color))
    }
}

/// One row of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardRow {
    cells: [Cell; BOARD_SIZE],
}

impl BoardRow {
    const EMPTY: Self = Self {
        cells: [Cell::Empty; BOARD_SIZE],
    };

    #[must_use]
    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.cells
    }

    fn is_filled(&self) -> bool {
        self.cells.iter().all(|c| c.is_filled())
    }
}

/// Rows and columns that were fully occupied at check time.
///
/// Produced once per placement by [`Board::detect_full_lines`] and consumed by the
/// scoring step. Both sets can be non-empty at the same time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearEvent {
    rows: ArrayVec<u8, BOARD_SIZE>,
    columns: ArrayVec<u8, BOARD_SIZE>,
}

impl ClearEvent {
    #[must_use]
    pub fn rows(&self) -> &[u8] {
        &self.rows
    }

    #[must_use]
    pub fn columns(&self) -> &[u8] {
        &self.columns
    }

    /// Number of cleared rows plus number of cleared columns.
    #[must_use]
    pub fn total_lines(&self) -> usize {
        self.rows.len() + self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_lines() == 0
    }

    /// Every board position covered by a cleared row or column, each exactly once.
    pub fn cleared_positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..BOARD_SIZE)
            .flat_map(|y| (0..BOARD_SIZE).map(move |x| (x, y)))
            .filter(|&(x, y)| {
                self.rows.iter().any(|&r| usize::from(r) == y)
                    || self.columns.iter().any(|&c| usize::from(c) == x)
            })
    }
}

/// The 8×8 occupancy grid.
///
/// Line clearing is occupancy based: a row or column is full when all eight of its
/// cells are filled, whatever their colors. Cleared cells become empty in place;
/// nothing shifts.
///
/// The board has a compact text form used by `Display`, `FromStr` and serde:
/// eight rows joined by `/`, `.` for an empty cell and a lowercase hex digit for
/// the color of a filled one.
///
/// # Example
///
/// ```
/// use gridsurge_engine::{Board, Piece};
///
/// let mut board = Board::EMPTY;
/// let domino = Piece::new(vec![(0, 0), (1, 0)], 3);
///
/// assert!(board.can_place(&domino, 6, 0));
/// assert!(!board.can_place(&domino, 7, 0));
///
/// board.apply(&domino, 6, 0).unwrap();
/// assert!(!board.can_place(&domino, 6, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [BoardRow; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const SIZE: usize = BOARD_SIZE;

    pub const EMPTY: Self = Self {
        rows: [BoardRow::EMPTY; BOARD_SIZE],
    };

    pub fn rows(&self) -> impl Iterator<Item = &BoardRow> {
        self.rows.iter()
    }

    /// Returns the cell at `(x, y)`, or `None` when outside the board.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        let (x, y) = board_index(x, y)?;
        Some(self.rows[y].cells[x])
    }

    /// Number of filled cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .filter(|c| c.is_filled())
            .count()
    }

    /// Checks whether every cell of `piece` lands on an empty in-bounds cell when
    /// dropped at origin `(x, y)`.
    #[must_use]
    pub fn can_place(&self, piece: &Piece, x: i32, y: i32) -> bool {
        piece
            .positions_at(x, y)
            .all(|(px, py)| matches!(self.cell(px, py), Some(Cell::Empty)))
    }

    /// Writes the piece's color into every cell it covers at origin `(x, y)`.
    ///
    /// The board is left untouched when the placement is not legal.
    pub fn apply(&mut self, piece: &Piece, x: i32, y: i32) -> Result<(), InvalidPlacementError> {
        if !self.can_place(piece, x, y) {
            return Err(InvalidPlacementError { x, y });
        }
        for (px, py) in piece.positions_at(x, y) {
            if let Some((px, py)) = board_index(px, py) {
                self.rows[py].cells[px] = Cell::Filled(piece.color());
            }
        }
        Ok(())
    }

    /// Scans all rows and columns for lines with every cell filled.
    #[must_use]
    pub fn detect_full_lines(&self) -> ClearEvent {
        let mut event = ClearEvent::default();
        for (y, row) in (0u8..).zip(&self.rows) {
            if row.is_filled() {
                event.rows.push(y);
            }
        }
        for x in 0..BOARD_SIZE {
            if self.rows.iter().all(|row| row.cells[x].is_filled()) {
                #[expect(clippy::cast_possible_truncation)]
                event.columns.push(x as u8);
            }
        }
        event
    }

    /// Empties every cell in the event's rows and columns.
    ///
    /// Returns the number of cells that were actually emptied. Intersections of a
    /// cleared row and a cleared column count once.
    pub fn clear(&mut self, event: &ClearEvent) -> usize {
        let mut cleared = 0;
        for (x, y) in event.cleared_positions() {
            let cell = &mut self.rows[y].cells[x];
            if cell.is_filled() {
                cleared += 1;
            }
            *cell = Cell::Empty;
        }
        cleared
    }

    /// Iterates over every origin in `[0, 8) × [0, 8)` where `piece` fits.
    pub fn valid_origins<'a>(&'a self, piece: &'a Piece) -> impl Iterator<Item = (i32, i32)> + 'a {
        #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
        let size = BOARD_SIZE as i32;
        (0..size)
            .flat_map(move |y| (0..size).map(move |x| (x, y)))
            .filter(move |&(x, y)| self.can_place(piece, x, y))
    }

    #[must_use]
    pub fn has_any_valid_placement(&self, piece: &Piece) -> bool {
        self.valid_origins(piece).next().is_some()
    }

    /// Returns `true` when no piece in `queue` fits anywhere on the board.
    ///
    /// An empty queue is terminal by this definition; sessions refill the queue
    /// before asking.
    #[must_use]
    pub fn is_terminal(&self, queue: &[Piece]) -> bool {
        queue.iter().all(|piece| !self.has_any_valid_placement(piece))
    }
}

fn board_index(x: i32, y: i32) -> Option<(usize, usize)> {
    let x = usize::try_from(x).ok()?;
    let y = usize::try_from(y).ok()?;
    (x < BOARD_SIZE && y < BOARD_SIZE).then_some((x, y))
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            for cell in row.cells {
                write!(f, "{}", cell.to_char())?;
            }
        }
        Ok(())
    }
}

/// Malformed board text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardParseError {
    #[display("expected {BOARD_SIZE} rows, got {count}")]
    RowCount { count: usize },
    #[display("row {row} has {count} cells, expected {BOARD_SIZE}")]
    RowLength { row: usize, count: usize },
    #[display("invalid cell {ch:?} at ({x}, {row})")]
    InvalidCell { row: usize, x: usize, ch: char },
}

/// Parses the text form.
///
/// Every hex digit is accepted as a color, up to [`MAX_COLORS`](crate::MAX_COLORS).
/// The text knows nothing of a configured `color_count`: sessions build their boards
/// from placed pieces only and never ingest parsed ones.
impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('/').collect();
        if parts.len() != BOARD_SIZE {
            return Err(BoardParseError::RowCount { count: parts.len() });
        }

        let mut board = Board::EMPTY;
        for (row, part) in parts.iter().enumerate() {
            let count = part.chars().count();
            if count != BOARD_SIZE {
                return Err(BoardParseError::RowLength { row, count });
            }
            for (x, ch) in part.chars().enumerate() {
                let cell =
                    Cell::from_char(ch).ok_or(BoardParseError::InvalidCell { row, x, ch })?;
                board.rows[row].cells[x] = cell;
            }
        }
        Ok(board)
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
