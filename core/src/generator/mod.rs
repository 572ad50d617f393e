use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

/// Source of randomness for mine placement.
///
/// Production code uses [`RandomSampler`]; tests plug in scripted samplers to get
/// fixed layouts out of [`Board::generate`].
pub trait MineSampler {
    /// Uniform value in `[low, high)`, or `low` when the range is empty.
    fn fraction(&mut self, low: f64, high: f64) -> f64;

    /// Uniform coordinates within a board of the given `(cols, rows)` size.
    fn coords(&mut self, size: Coord2) -> Coord2;
}

impl<S: MineSampler + ?Sized> MineSampler for &mut S {
    fn fraction(&mut self, low: f64, high: f64) -> f64 {
        (**self).fraction(low, high)
    }

    fn coords(&mut self, size: Coord2) -> Coord2 {
        (**self).coords(size)
    }
}

/// Maps a raw difficulty value onto the range of mine densities a board is drawn from.
///
/// Difficulty is clamped into `[0, max]`. At `0` the mine fraction is drawn from
/// `[min_fraction.0, max_fraction.0)`, at `max` from `[min_fraction.1, max_fraction.1)`,
/// with linear interpolation in between.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyCurve {
    /// Difficulty gained per campaign level.
    pub step_per_level: u32,
    pub max: u32,
    pub min_fraction: (f64, f64),
    pub max_fraction: (f64, f64),
}

impl Default for DifficultyCurve {
    fn default() -> Self {
        Self {
            step_per_level: 5,
            max: 100,
            min_fraction: (0.10, 0.20),
            max_fraction: (0.12, 0.25),
        }
    }
}

impl DifficultyCurve {
    pub fn validate(&self) -> Result<()> {
        if self.max == 0 {
            return Err(ConfigError::ZeroDifficultyRange);
        }

        let fractions = [
            self.min_fraction.0,
            self.min_fraction.1,
            self.max_fraction.0,
            self.max_fraction.1,
        ];
        if let Some(&bad) = fractions.iter().find(|f| !(0.0..1.0).contains(*f)) {
            return Err(ConfigError::FractionOutOfRange(bad));
        }

        for (min, max) in [
            (self.min_fraction.0, self.max_fraction.0),
            (self.min_fraction.1, self.max_fraction.1),
        ] {
            if min > max {
                return Err(ConfigError::InvertedFractions { min, max });
            }
        }

        Ok(())
    }

    pub const fn for_level(&self, level: u32) -> u32 {
        level.saturating_mul(self.step_per_level)
    }

    /// The `(min, max)` mine fraction for a difficulty value.
    pub fn fractions(&self, difficulty: u32) -> (f64, f64) {
        let t = f64::from(difficulty.min(self.max)) / f64::from(self.max.max(1));
        let lerp = |(lo, hi): (f64, f64)| lo + (hi - lo) * t;
        (lerp(self.min_fraction), lerp(self.max_fraction))
    }

    /// Number of mines to place on a board with `total_tiles` tiles.
    ///
    /// Never more than `total_tiles - 1`, one tile is always kept free for the start.
    pub fn mine_target<S: MineSampler + ?Sized>(
        &self,
        difficulty: u32,
        total_tiles: CellCount,
        sampler: &mut S,
    ) -> CellCount {
        let (min, max) = self.fractions(difficulty);
        let fraction = sampler.fraction(min, max);
        let wanted = (fraction * f64::from(total_tiles)).floor() as CellCount;
        let limit = total_tiles.saturating_sub(1);

        if wanted > limit {
            log::warn!(
                "Requested {} mines but only {} fit next to the start tile",
                wanted,
                limit
            );
            limit
        } else {
            wanted
        }
    }
}

/// Hands out a fixed list of coordinates, then repeats the last one.
#[cfg(test)]
pub(crate) struct ScriptedSampler {
    fraction: f64,
    coords: Vec<Coord2>,
    next: usize,
}

#[cfg(test)]
impl ScriptedSampler {
    pub(crate) fn new(fraction: f64, coords: &[Coord2]) -> Self {
        Self {
            fraction,
            coords: coords.to_vec(),
            next: 0,
        }
    }
}

#[cfg(test)]
impl MineSampler for ScriptedSampler {
    fn fraction(&mut self, _low: f64, _high: f64) -> f64 {
        self.fraction
    }

    fn coords(&mut self, _size: Coord2) -> Coord2 {
        let pos = self.coords[self.next.min(self.coords.len() - 1)];
        self.next += 1;
        pos
    }
}
