use serde::{Deserialize, Serialize};

use super::shape::{CellOffset, Shape};

/// Index into the color palette, in `0..color_count`.
pub type ColorIndex = u8;

/// Names of the default six-color palette, indexed by [`ColorIndex`].
pub const DEFAULT_PALETTE: [&str; 6] = ["red", "orange", "yellow", "green", "blue", "purple"];

/// A playable piece: a shape's cells together with an assigned color.
///
/// Pieces own a copy of their cell offsets, so nothing handed out by the generator
/// aliases the catalog.
///
/// # Example
///
/// ```
/// use gridsurge_engine::Piece;
///
/// let piece = Piece::new(vec![(0, 0), (1, 0), (1, 1)], 2);
/// assert_eq!(piece.len(), 3);
/// assert_eq!(piece.bounds(), (2, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    cells: Vec<CellOffset>,
    color: ColorIndex,
}

impl Piece {
    #[must_use]
    pub fn new(cells: Vec<CellOffset>, color: ColorIndex) -> Self {
        Self { cells, color }
    }

    #[must_use]
    pub fn from_shape(shape: &Shape, color: ColorIndex) -> Self {
        Self::new(shape.cells().to_vec(), color)
    }

    #[must_use]
    pub fn cells(&self) -> &[CellOffset] {
        &self.cells
    }

    #[must_use]
    pub fn color(&self) -> ColorIndex {
        self.color
    }

    /// Number of cells the piece occupies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Width and height of the bounding box, measured from offset `(0, 0)`.
    #[must_use]
    pub fn bounds(&self) -> (usize, usize) {
        self.cells.iter().fold((0, 0), |(w, h), &(x, y)| {
            (w.max(usize::from(x) + 1), h.max(usize::from(y) + 1))
        })
    }

    /// Board positions covered when the piece is dropped at `(x, y)`.
    ///
    /// Positions may fall outside the board; bounds are checked by the board.
    pub fn positions_at(&self, x: i32, y: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells
            .iter()
            .map(move |&(dx, dy)| (x + i32::from(dx), y + i32::from(dy)))
    }
}
