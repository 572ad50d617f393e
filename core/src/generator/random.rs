use rand::prelude::*;

use super::*;

/// Seeded sampler backed by `SmallRng`, the same seed always yields the same boards.
#[derive(Clone, Debug)]
pub struct RandomSampler {
    rng: SmallRng,
}

impl RandomSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MineSampler for RandomSampler {
    fn fraction(&mut self, low: f64, high: f64) -> f64 {
        if high > low {
            self.rng.random_range(low..high)
        } else {
            low
        }
    }

    fn coords(&mut self, (cols, rows): Coord2) -> Coord2 {
        (self.rng.random_range(0..cols), self.rng.random_range(0..rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_gives_same_sequence() {
        let mut a = RandomSampler::new(42);
        let mut b = RandomSampler::new(42);

        for _ in 0..100 {
            assert_eq!(a.coords((35, 20)), b.coords((35, 20)));
        }
    }

    #[test]
    fn coords_stay_in_bounds() {
        let mut sampler = RandomSampler::new(7);

        for _ in 0..1000 {
            let (x, y) = sampler.coords((5, 3));
            assert!(x < 5 && y < 3);
        }
    }

    #[test]
    fn empty_fraction_range_returns_low_bound() {
        let mut sampler = RandomSampler::new(1);

        assert_eq!(sampler.fraction(0.2, 0.2), 0.2);
    }
}
