//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct wraps the `rand` crate's `StdRng` and offers
//! the handful of draws the operators need. Every selection, recombination and
//! mutation operator owns its own generator so that each one can be seeded
//! independently for reproducible runs.
//!
//! ## Example
//!
//! ```rust
//! use genloop::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(42);
//! let coin = rng.chance(0.5);
//! let idx = rng.index(10);
//! assert!(idx < 10);
//! # let _ = coin;
//! ```

use rand::{distributions::uniform::SampleUniform, rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// A wrapper around the `rand` crate's `StdRng`.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Performs a Bernoulli trial with the given probability.
    ///
    /// Values outside `[0, 1]` are clamped, so `chance(2.0)` always succeeds
    /// and `chance(-1.0)` never does.
    pub fn chance(&mut self, probability: f64) -> bool {
        if probability.is_nan() || probability <= 0.0 {
            return false;
        }
        if probability >= 1.0 {
            return true;
        }
        self.rng.gen_bool(probability)
    }

    /// Returns a uniformly distributed index in `0..len`.
    ///
    /// `len` must be greater than zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Returns a uniformly distributed value in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Returns a value uniformly distributed in the inclusive range `[low, high]`.
    pub fn range_inclusive(&mut self, low: i64, high: i64) -> i64 {
        self.rng.gen_range(low..=high)
    }

    /// Returns a value uniformly distributed in `[low, high]`, for any numeric
    /// type. `low` must not exceed `high`, and float bounds must be finite.
    pub fn between<T>(&mut self, low: T, high: T) -> T
    where
        T: SampleUniform + PartialOrd,
    {
        self.rng.gen_range(low..=high)
    }

    /// Draws `amount` distinct indices from `0..len`, in random order.
    ///
    /// `amount` is capped at `len`.
    pub fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, len, amount.min(len)).into_vec()
    }

    /// Shuffles a slice in place.
    pub fn shuffle<T>(&mut self, values: &mut [T]) {
        values.shuffle(&mut self.rng);
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chance_extremes() {
        let mut rng = RandomNumberGenerator::new();
        for _ in 0..100 {
            assert!(rng.chance(1.0));
            assert!(rng.chance(3.0));
            assert!(!rng.chance(0.0));
            assert!(!rng.chance(-1.0));
            assert!(!rng.chance(f64::NAN));
        }
    }

    #[test]
    fn test_index_within_bounds() {
        let mut rng = RandomNumberGenerator::new();
        for _ in 0..100 {
            assert!(rng.index(5) < 5);
        }
        assert_eq!(rng.index(1), 0);
    }

    #[test]
    fn test_uniform_within_unit_interval() {
        let mut rng = RandomNumberGenerator::new();
        for _ in 0..100 {
            let value = rng.uniform();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn test_between_is_inclusive() {
        let mut rng = RandomNumberGenerator::from_seed(8);
        let ints: Vec<i64> = (0..200).map(|_| rng.between(-2, 2)).collect();
        assert!(ints.iter().all(|v| (-2..=2).contains(v)));
        assert!(ints.contains(&-2) && ints.contains(&2));

        assert_eq!(rng.between(3u64, 3u64), 3);
        let real = rng.between(-0.5, 0.5);
        assert!((-0.5..=0.5).contains(&real));
    }

    #[test]
    fn test_sample_indices_are_distinct() {
        let mut rng = RandomNumberGenerator::from_seed(7);
        let mut sample = rng.sample_indices(10, 10);
        sample.sort_unstable();
        assert_eq!(sample, (0..10).collect::<Vec<_>>());

        assert_eq!(rng.sample_indices(3, 8).len(), 3);
        assert!(rng.sample_indices(4, 0).is_empty());
    }

    #[test]
    fn test_clone() {
        let mut rng1 = RandomNumberGenerator::from_seed(42);
        let mut rng2 = rng1.clone();

        // Both RNGs should generate the same sequence after cloning
        let nums1: Vec<usize> = (0..5).map(|_| rng1.index(1000)).collect();
        let nums2: Vec<usize> = (0..5).map(|_| rng2.index(1000)).collect();

        assert_eq!(nums1, nums2);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut rng1 = RandomNumberGenerator::from_seed(3);
        let mut rng2 = RandomNumberGenerator::from_seed(3);
        let mut values1 = vec![1, 2, 3, 4, 5, 6];
        let mut values2 = values1.clone();
        rng1.shuffle(&mut values1);
        rng2.shuffle(&mut values2);
        assert_eq!(values1, values2);
    }
}
