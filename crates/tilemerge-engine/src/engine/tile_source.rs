use std::fmt::Write as _;

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Source of randomness for tile insertion.
///
/// [`Grid::random_insert`](crate::Grid::random_insert) asks the source which empty cell
/// to fill and which value to place there. Implementations decide the distribution;
/// [`RandomTiles`] is the one used in play, tests supply scripted sequences.
pub trait TileSource {
    /// Picks one of `empty_count` empty cells, returning an index in `0..empty_count`.
    ///
    /// Only called with `empty_count > 0`.
    fn pick_cell(&mut self, empty_count: usize) -> usize;

    /// Picks the value of the new tile (2 or 4).
    fn pick_value(&mut self) -> u32;
}

impl<T> TileSource for &mut T
where
    T: TileSource + ?Sized,
{
    fn pick_cell(&mut self, empty_count: usize) -> usize {
        (**self).pick_cell(empty_count)
    }

    fn pick_value(&mut self) -> u32 {
        (**self).pick_value()
    }
}

/// Seed for deterministic tile placement.
///
/// This is a 128-bit (16-byte) seed used to initialize the random number generator
/// behind [`RandomTiles`]. The same seed produces the same sequence of insertions for the
/// same sequence of moves, which makes scripted games reproducible.
///
/// Serialized as 32 hexadecimal digits.
///
/// # Example
///
/// ```
/// use rand::Rng as _;
/// use tilemerge_engine::{RandomTiles, TileSeed, TileSource as _};
///
/// let seed: TileSeed = rand::rng().random();
/// let mut a = RandomTiles::with_seed(seed);
/// let mut b = RandomTiles::with_seed(seed);
///
/// assert_eq!(a.pick_cell(16), b.pick_cell(16));
/// assert_eq!(a.pick_value(), b.pick_value());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSeed([u8; 16]);

impl TileSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        let num = u128::from_be_bytes(self.0);
        let mut hex_str = String::with_capacity(2 * self.0.len());
        // writing to a String cannot fail
        let _ = write!(&mut hex_str, "{num:032x}");
        hex_str
    }

    pub fn from_hex(hex_str: &str) -> Result<Self, ParseSeedError> {
        if hex_str.len() != 32 || !hex_str.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseSeedError {
                input: hex_str.to_owned(),
            });
        }
        let num = u128::from_str_radix(hex_str, 16).map_err(|_| ParseSeedError {
            input: hex_str.to_owned(),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed: expected 32 hex digits, got {input:?}")]
pub struct ParseSeedError {
    pub input: String,
}

impl std::str::FromStr for TileSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for TileSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for TileSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        Self::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `TileSeed` values using the standard random distribution.
impl Distribution<TileSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> TileSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        TileSeed(seed)
    }
}

/// Tile source backed by a seeded PCG generator.
///
/// Cells are chosen uniformly among the empty ones. A new tile is a 4 with
/// probability [`Self::FOUR_PERCENT`]% and a 2 otherwise.
#[derive(Debug, Clone)]
pub struct RandomTiles {
    rng: Pcg32,
    seed: TileSeed,
}

impl Default for RandomTiles {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomTiles {
    pub const FOUR_PERCENT: u32 = 10;

    /// Creates a tile source with a random seed.
    ///
    /// For deterministic placement, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed.
    #[must_use]
    pub fn with_seed(seed: TileSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
            seed,
        }
    }

    #[must_use]
    pub fn seed(&self) -> TileSeed {
        self.seed
    }
}

impl TileSource for RandomTiles {
    fn pick_cell(&mut self, empty_count: usize) -> usize {
        self.rng.random_range(0..empty_count)
    }

    fn pick_value(&mut self) -> u32 {
        if self.rng.random_range(0..100) < Self::FOUR_PERCENT {
            4
        } else {
            2
        }
    }
}

/// Tile source replaying fixed sequences, cycling when exhausted.
///
/// Cell picks are reduced modulo the number of empty cells, so any sequence is valid for
/// any grid. Useful for reproducible games independent of the PRNG.
///
/// ```
/// use tilemerge_engine::{ScriptedTiles, TileSource as _};
///
/// let mut tiles = ScriptedTiles::new(vec![0, 5], vec![2, 4]);
/// assert_eq!(tiles.pick_cell(3), 0);
/// assert_eq!(tiles.pick_cell(3), 2);
/// assert_eq!(tiles.pick_value(), 2);
/// assert_eq!(tiles.pick_value(), 4);
/// assert_eq!(tiles.pick_value(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedTiles {
    cells: Vec<usize>,
    values: Vec<u32>,
    next_cell: usize,
    next_value: usize,
}

impl ScriptedTiles {
    /// Creates a scripted source. Empty sequences fall back to the first cell and a 2.
    #[must_use]
    pub fn new(cells: Vec<usize>, values: Vec<u32>) -> Self {
        Self {
            cells,
            values,
            next_cell: 0,
            next_value: 0,
        }
    }
}

impl TileSource for ScriptedTiles {
    fn pick_cell(&mut self, empty_count: usize) -> usize {
        if self.cells.is_empty() {
            return 0;
        }
        let pick = self.cells[self.next_cell % self.cells.len()];
        self.next_cell += 1;
        pick % empty_count
    }

    fn pick_value(&mut self) -> u32 {
        if self.values.is_empty() {
            return 2;
        }
        let value = self.values[self.next_value % self.values.len()];
        self.next_value += 1;
        value
    }
}
