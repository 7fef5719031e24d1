//! Engine settings.
//!
//! [`EngineConfig`] is plain data with serde support so it can be read from a JSON
//! file. Missing fields take their defaults, which reproduce the classic game:
//!
//! ```json
//! {
//!   "queue_size": 3,
//!   "streak_leeway": 2,
//!   "color_count": 6,
//!   "shapes": [{ "cells": [[0, 0]], "weight": 22 }, "..."]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    ConfigurationError, DEFAULT_PALETTE, DEFAULT_STREAK_LEEWAY, MAX_COLORS, ShapeCatalog,
};

/// Number of pieces offered per batch by default.
pub const DEFAULT_QUEUE_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Pieces offered per batch. The batch is rebuilt once every piece is used.
    pub queue_size: usize,
    /// Non-clearing placements tolerated after a clear before the streak ends.
    pub streak_leeway: u32,
    /// Number of colors pieces are drawn with.
    pub color_count: usize,
    /// Weighted shapes to draw pieces from.
    pub shapes: ShapeCatalog,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            queue_size: DEFAULT_QUEUE_SIZE,
            streak_leeway: DEFAULT_STREAK_LEEWAY,
            color_count: DEFAULT_PALETTE.len(),
            shapes: ShapeCatalog::default(),
        }
    }
}

impl EngineConfig {
    /// Checks the settings the shape catalog does not validate by itself.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.queue_size == 0 {
            return Err(ConfigurationError::ZeroQueueSize);
        }
        if self.streak_leeway == 0 {
            return Err(ConfigurationError::ZeroStreakLeeway);
        }
        if self.color_count == 0 {
            return Err(ConfigurationError::NoColors);
        }
        if self.color_count > MAX_COLORS {
            return Err(ConfigurationError::TooManyColors {
                count: self.color_count,
            });
        }
        Ok(())
    }
}
