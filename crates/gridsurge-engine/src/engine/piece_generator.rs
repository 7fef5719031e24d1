use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ColorIndex, ConfigurationError, MAX_COLORS, Piece, ShapeCatalog};

/// Draws pieces from a weighted [`ShapeCatalog`] and assigns them random colors.
///
/// # Weighted Draw
///
/// Each draw picks a uniform point in `[0, total_weight)` and walks the catalog in
/// order, subtracting weights until the remainder reaches zero or below. The color is
/// an independent uniform draw in `[0, color_count)`.
///
/// The random source is any [`Rng`]; sessions use a seeded [`Pcg32`] so that a
/// [`PieceSeed`] reproduces the whole piece sequence.
///
/// # Example
///
/// ```
/// use gridsurge_engine::{PieceGenerator, PieceSeed, ShapeCatalog};
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
/// let mut generator = PieceGenerator::with_seed(ShapeCatalog::default(), 6, seed).unwrap();
///
/// let mut queue = Vec::new();
/// generator.fill_queue(&mut queue, 3);
/// assert_eq!(queue.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct PieceGenerator<R = Pcg32> {
    rng: R,
    catalog: ShapeCatalog,
    color_count: u8,
}

/// Seed for deterministic piece generation.
///
/// This is a 128-bit (16-byte) seed used to initialize the random number
/// generator for piece generation. Using the same seed will produce the same
/// sequence of pieces, enabling:
///
/// - Reproducible sessions for debugging
/// - Recording and replay of automated play
/// - Deterministic testing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Expands a small integer into a full seed, for tests and command-line use.
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Self(u128::from(value).to_be_bytes())
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

/// Malformed seed text: anything but exactly 32 hex digits.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed {input:?}: expected 32 hex digits")]
pub struct ParsePieceSeedError {
    input: String,
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePieceSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

impl PieceGenerator<Pcg32> {
    /// Creates a generator backed by a [`Pcg32`] seeded with `seed`.
    pub fn with_seed(
        catalog: ShapeCatalog,
        color_count: usize,
        seed: PieceSeed,
    ) -> Result<Self, ConfigurationError> {
        Self::with_rng(catalog, color_count, Pcg32::from_seed(seed.0))
    }
}

impl<R> PieceGenerator<R>
where
    R: Rng,
{
    /// Creates a generator drawing from an arbitrary random source.
    ///
    /// Fails when `color_count` is zero or exceeds [`MAX_COLORS`]. The catalog itself
    /// is already validated by construction.
    pub fn with_rng(
        catalog: ShapeCatalog,
        color_count: usize,
        rng: R,
    ) -> Result<Self, ConfigurationError> {
        if color_count == 0 {
            return Err(ConfigurationError::NoColors);
        }
        let color_count = u8::try_from(color_count)
            .ok()
            .filter(|&c| usize::from(c) <= MAX_COLORS)
            .ok_or(ConfigurationError::TooManyColors { count: color_count })?;
        Ok(Self {
            rng,
            catalog,
            color_count,
        })
    }

    #[must_use]
    pub fn catalog(&self) -> &ShapeCatalog {
        &self.catalog
    }

    /// Draws one piece.
    pub fn draw(&mut self) -> Piece {
        // total weight is bounded by catalog size × u32::MAX, well inside f64 precision
        #[expect(clippy::cast_precision_loss)]
        let total = self.catalog.total_weight() as f64;
        let point = self.rng.random::<f64>() * total;
        let shape = self.catalog.pick(point);
        let color: ColorIndex = self.rng.random_range(0..self.color_count);
        tracing::trace!(cells = shape.cells().len(), color, "drew piece");
        Piece::from_shape(shape, color)
    }

    /// Appends freshly drawn pieces until `queue` holds `target_size` pieces.
    pub fn fill_queue(&mut self, queue: &mut Vec<Piece>, target_size: usize) {
        while queue.len() < target_size {
            queue.push(self.draw());
        }
    }
}
