use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::ConfigurationError;

use super::BOARD_SIZE;

/// A cell offset `(x, y)` relative to a piece origin.
pub type CellOffset = (u8, u8);

/// A piece shape with its selection weight.
///
/// Cells are stored normalized: the smallest offset on each axis is zero, so the
/// origin space `[0, 8) × [0, 8)` covers every position the shape can occupy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    cells: Vec<CellOffset>,
    weight: u32,
}

impl Shape {
    #[must_use]
    pub fn new(cells: Vec<CellOffset>, weight: u32) -> Self {
        Self { cells, weight }
    }

    #[must_use]
    pub fn cells(&self) -> &[CellOffset] {
        &self.cells
    }

    #[must_use]
    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// Width and height of the shape's bounding box.
    #[must_use]
    pub fn extent(&self) -> (usize, usize) {
        let width = self.cells.iter().map(|&(x, _)| usize::from(x) + 1).max();
        let height = self.cells.iter().map(|&(_, y)| usize::from(y) + 1).max();
        (width.unwrap_or(0), height.unwrap_or(0))
    }

    fn normalize(&mut self) {
        let min_x = self.cells.iter().map(|&(x, _)| x).min().unwrap_or(0);
        let min_y = self.cells.iter().map(|&(_, y)| y).min().unwrap_or(0);
        for (x, y) in &mut self.cells {
            *x -= min_x;
            *y -= min_y;
        }
    }
}

// (cells, weight), in draw order.
#[rustfmt::skip]
const DEFAULT_SHAPES: &[(&[CellOffset], u32)] = &[
    // single
    (&[(0, 0)], 22),
    // dominoes
    (&[(0, 0), (1, 0)], 16),
    (&[(0, 0), (0, 1)], 16),
    // straight lines
    (&[(0, 0), (1, 0), (2, 0)], 12),
    (&[(0, 0), (0, 1), (0, 2)], 12),
    (&[(0, 0), (1, 0), (2, 0), (3, 0)], 4),
    (&[(0, 0), (0, 1), (0, 2), (0, 3)], 4),
    (&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)], 1),
    (&[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)], 1),
    // square
    (&[(0, 0), (1, 0), (0, 1), (1, 1)], 12),
    // small corners
    (&[(0, 0), (0, 1), (1, 1)], 10),
    (&[(1, 0), (0, 1), (1, 1)], 10),
    (&[(0, 0), (1, 0), (0, 1)], 10),
    (&[(0, 0), (1, 0), (1, 1)], 10),
    // L / J
    (&[(0, 0), (0, 1), (0, 2), (1, 2)], 3),
    (&[(0, 0), (0, 1), (0, 2), (1, 0)], 3),
    (&[(0, 0), (1, 0), (2, 0), (2, 1)], 3),
    (&[(0, 0), (1, 0), (2, 0), (0, 1)], 3),
    (&[(0, 0), (1, 0), (1, 1), (1, 2)], 3),
    (&[(0, 0), (0, 1), (1, 0), (2, 0)], 3),
    (&[(1, 0), (1, 1), (1, 2), (0, 2)], 3),
    // T
    (&[(0, 0), (1, 0), (2, 0), (1, 1)], 4),
    (&[(1, 0), (0, 1), (1, 1), (1, 2)], 4),
    (&[(1, 0), (0, 1), (1, 1), (2, 1)], 4),
    (&[(0, 0), (0, 1), (0, 2), (1, 1)], 4),
    // S / Z
    (&[(0, 0), (1, 0), (1, 1), (2, 1)], 4),
    (&[(1, 0), (0, 1), (1, 1), (0, 2)], 4),
    (&[(0, 1), (1, 0), (1, 1), (2, 0)], 4),
    (&[(0, 0), (0, 1), (1, 1), (1, 2)], 4),
    // diagonals
    (&[(0, 0), (1, 1)], 10),
    (&[(1, 0), (0, 1)], 10),
    (&[(0, 0), (1, 1), (2, 2)], 3),
    (&[(2, 0), (1, 1), (0, 2)], 3),
    // plus
    (&[(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)], 2),
    // extra corners
    (&[(0, 0), (1, 0), (1, 1)], 8),
    (&[(0, 0), (0, 1), (1, 0)], 8),
];

/// Read-only table of weighted shapes the piece generator draws from.
///
/// A catalog can only be built through [`ShapeCatalog::new`] (or deserialized, which
/// goes through the same validation), so every catalog in circulation satisfies:
///
/// - at least one shape
/// - every shape is non-empty, has distinct cells and fits on an empty board
/// - every weight is positive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Shape>", into = "Vec<Shape>")]
pub struct ShapeCatalog {
    shapes: Vec<Shape>,
    total_weight: u64,
}

impl Default for ShapeCatalog {
    fn default() -> Self {
        let shapes = DEFAULT_SHAPES
            .iter()
            .map(|&(cells, weight)| Shape::new(cells.to_vec(), weight))
            .collect();
        Self::new(shapes).expect("built-in shape catalog must be valid")
    }
}

impl TryFrom<Vec<Shape>> for ShapeCatalog {
    type Error = ConfigurationError;

    fn try_from(shapes: Vec<Shape>) -> Result<Self, Self::Error> {
        Self::new(shapes)
    }
}

impl From<ShapeCatalog> for Vec<Shape> {
    fn from(catalog: ShapeCatalog) -> Self {
        catalog.shapes
    }
}

impl ShapeCatalog {
    /// Validates and normalizes a list of shapes.
    pub fn new(mut shapes: Vec<Shape>) -> Result<Self, ConfigurationError> {
        if shapes.is_empty() {
            return Err(ConfigurationError::EmptyCatalog);
        }

        for (index, shape) in shapes.iter_mut().enumerate() {
            if shape.cells.is_empty() {
                return Err(ConfigurationError::EmptyShape { index });
            }
            if shape.weight == 0 {
                return Err(ConfigurationError::ZeroWeight { index });
            }
            let mut seen = HashSet::with_capacity(shape.cells.len());
            for &(x, y) in &shape.cells {
                if !seen.insert((x, y)) {
                    return Err(ConfigurationError::DuplicateCell { index, x, y });
                }
            }
            shape.normalize();
            let (width, height) = shape.extent();
            if width > BOARD_SIZE || height > BOARD_SIZE {
                return Err(ConfigurationError::ShapeTooLarge { index });
            }
        }

        let total_weight = shapes.iter().map(|s| u64::from(s.weight)).sum();
        Ok(Self {
            shapes,
            total_weight,
        })
    }

    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Sum of all selection weights. Always positive.
    #[must_use]
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Picks the shape at `point` on the cumulative weight line.
    ///
    /// `point` is expected in `[0, total_weight)`. Weights are subtracted in catalog
    /// order and the first shape that brings the remainder to zero or below wins.
    #[must_use]
    pub fn pick(&self, point: f64) -> &Shape {
        let mut remainder = point;
        for shape in &self.shapes {
            remainder -= f64::from(shape.weight);
            if remainder <= 0.0 {
                return shape;
            }
        }
        // Only reachable through floating-point rounding at the very end of the line.
        &self.shapes[self.shapes.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = ShapeCatalog::default();
        assert_eq!(catalog.len(), DEFAULT_SHAPES.len());
        assert_eq!(catalog.total_weight(), 237);
        for shape in catalog.shapes() {
            assert!(!shape.cells().is_empty());
            assert!(shape.weight() > 0);
        }
    }

    #[test]
    fn test_rejects_empty_catalog() {
        assert_eq!(
            ShapeCatalog::new(vec![]),
            Err(ConfigurationError::EmptyCatalog)
        );
    }

    #[test]
    fn test_rejects_zero_weight() {
        let shapes = vec![Shape::new(vec![(0, 0)], 1), Shape::new(vec![(0, 0)], 0)];
        assert_eq!(
            ShapeCatalog::new(shapes),
            Err(ConfigurationError::ZeroWeight { index: 1 })
        );
    }

    #[test]
    fn test_rejects_empty_shape() {
        let shapes = vec![Shape::new(vec![], 3)];
        assert_eq!(
            ShapeCatalog::new(shapes),
            Err(ConfigurationError::EmptyShape { index: 0 })
        );
    }

    #[test]
    fn test_rejects_duplicate_cells() {
        let shapes = vec![Shape::new(vec![(0, 0), (1, 0), (0, 0)], 3)];
        assert_eq!(
            ShapeCatalog::new(shapes),
            Err(ConfigurationError::DuplicateCell {
                index: 0,
                x: 0,
                y: 0
            })
        );
    }

    #[test]
    fn test_rejects_shape_wider_than_board() {
        let cells = (0..9).map(|x| (x, 0)).collect();
        let shapes = vec![Shape::new(cells, 1)];
        assert_eq!(
            ShapeCatalog::new(shapes),
            Err(ConfigurationError::ShapeTooLarge { index: 0 })
        );
    }

    #[test]
    fn test_normalizes_offsets() {
        let shapes = vec![Shape::new(vec![(2, 3), (3, 4)], 1)];
        let catalog = ShapeCatalog::new(shapes).unwrap();
        assert_eq!(catalog.shapes()[0].cells(), &[(0, 0), (1, 1)]);
        assert_eq!(catalog.shapes()[0].extent(), (2, 2));
    }

    #[test]
    fn test_pick_uses_cumulative_weights() {
        let shapes = vec![
            Shape::new(vec![(0, 0)], 2),
            Shape::new(vec![(0, 0), (1, 0)], 3),
            Shape::new(vec![(0, 0), (0, 1)], 5),
        ];
        let catalog = ShapeCatalog::new(shapes).unwrap();

        assert_eq!(catalog.pick(0.0).cells().len(), 1);
        assert_eq!(catalog.pick(1.5).cells().len(), 1);
        // boundary belongs to the first shape reaching it
        assert_eq!(catalog.pick(2.0).cells().len(), 1);
        assert_eq!(catalog.pick(2.5).cells(), &[(0, 0), (1, 0)]);
        assert_eq!(catalog.pick(5.0).cells(), &[(0, 0), (1, 0)]);
        assert_eq!(catalog.pick(9.99).cells(), &[(0, 0), (0, 1)]);
        assert_eq!(catalog.pick(10.5).cells(), &[(0, 0), (0, 1)]);
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"[{"cells": [[0, 0]], "weight": 0}]"#;
        let result: Result<ShapeCatalog, _> = serde_json::from_str(json);
        assert!(result.is_err());

        let json = r#"[{"cells": [[1, 1], [2, 1]], "weight": 4}]"#;
        let catalog: ShapeCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.total_weight(), 4);
        assert_eq!(catalog.shapes()[0].cells(), &[(0, 0), (1, 0)]);
    }
}
