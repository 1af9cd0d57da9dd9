//! The capability set shared by every discrete distribution.
//!
//! [`Sampler`](crate::Sampler) only talks to its distribution through this trait, so
//! callers can plug in their own PMF alongside [`UniformDistribution`](crate::UniformDistribution)
//! and [`WeightedDistribution`](crate::WeightedDistribution).
//!
//! Removal is optional. A distribution that can delete a drawn value sets
//! [`SUPPORTS_REMOVAL`](DiscreteDistribution::SUPPORTS_REMOVAL) and overrides
//! [`sample_and_remove_with_rng`](DiscreteDistribution::sample_and_remove_with_rng);
//! otherwise without-replacement sampling falls back to drawing with replacement and
//! discarding repeats.

use rand::Rng;

/// A finite discrete probability distribution.
pub trait DiscreteDistribution {
    /// The type of the values being drawn.
    type Value;

    /// Whether [`sample_and_remove_with_rng`](Self::sample_and_remove_with_rng) is implemented.
    const SUPPORTS_REMOVAL: bool = false;

    /// Draw one value according to the PMF, using a caller-supplied RNG.
    ///
    /// Returns `None` only when nothing can be drawn (e.g. every value was removed).
    fn sample_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Self::Value>;

    /// Every value in the population. May be O(n) in time and space.
    fn all_values(&self) -> Vec<Self::Value>;

    /// Number of values in the population.
    fn num_values(&self) -> usize;

    /// Normalized probability mass of `value`; `0.0` for values outside the population.
    fn probability_of(&self, value: &Self::Value) -> f64;

    /// Draw one value and delete it from the population.
    ///
    /// The default does nothing and returns `None`.
    fn sample_and_remove_with_rng<R: Rng + ?Sized>(&mut self, _rng: &mut R) -> Option<Self::Value> {
        None
    }

    /// Draw one value using the thread-local RNG.
    fn sample(&self) -> Option<Self::Value> {
        let mut rng = rand::rng();
        self.sample_with_rng(&mut rng)
    }

    /// Whether the population has no values left.
    fn is_empty(&self) -> bool {
        self.num_values() == 0
    }
}
