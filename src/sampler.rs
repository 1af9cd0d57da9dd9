//! The sampling façade.
//!
//! A [`Sampler`] owns one [`DiscreteDistribution`] and one RNG. It draws with
//! replacement ([`sample`](Sampler::sample), [`sample_n`](Sampler::sample_n)) or without
//! ([`sample_unique`](Sampler::sample_unique)), and forwards inspection calls to the
//! distribution.
//!
//! Without-replacement sampling consumes the population: when the distribution
//! supports removal, every drawn value is deleted from it in place. Clone the sampler
//! first if the original population is needed afterwards.
//!
//! ```
//! use tirage::Sampler;
//!
//! let mut sampler = Sampler::new_non_uniform([("heads", 1.0), ("tails", 3.0)])?
//!     .with_seed(7);
//! assert_eq!(sampler.probability_of(&"tails"), 0.75);
//! let flips = sampler.sample_n(10)?;
//! assert_eq!(flips.len(), 10);
//! # Ok::<(), tirage::SamplerError>(())
//! ```

use std::collections::HashSet;
use std::hash::Hash;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::distribution::DiscreteDistribution;
use crate::error::{Result, SamplerError};
use crate::uniform::{IntoUniform, UniformDistribution};
use crate::weighted::{IntoWeights, WeightedDistribution};

/// Draw budget for [`Sampler::sample_unique`] on distributions without removal.
pub const DEFAULT_DRAW_LIMIT: usize = 1_000_000;

/// Draws values from a wrapped distribution.
#[derive(Debug, Clone)]
pub struct Sampler<D, R = StdRng> {
    distribution: D,
    rng: R,
    draw_limit: usize,
}

impl<D: DiscreteDistribution> Sampler<D, StdRng> {
    /// Wrap `distribution` with an OS-seeded RNG.
    ///
    /// # Errors
    ///
    /// [`SamplerError::InvalidDistribution`] if the distribution has no values.
    pub fn new(distribution: D) -> Result<Self> {
        Self::with_rng(distribution, StdRng::from_os_rng())
    }

    /// Reseed the RNG for reproducible draws.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

impl<T: Clone + PartialEq> Sampler<UniformDistribution<T>, StdRng> {
    /// Sampler over a uniform distribution.
    ///
    /// Accepts lists, slices, arrays, sets, integer ranges (`1..6` has five values,
    /// `1..=6` has six), or a bare integer `u` meaning `0..=u`.
    ///
    /// # Errors
    ///
    /// * [`SamplerError::EmptyPopulation`] for an empty collection or range.
    /// * [`SamplerError::NegativeRangeBound`] for a negative bare integer.
    /// * [`SamplerError::PopulationTooLarge`] for a range with more than `usize::MAX` values.
    pub fn new_uniform<V>(values: V) -> Result<Self>
    where
        V: IntoUniform<Value = T>,
    {
        Self::new(values.into_uniform()?)
    }
}

impl<T: Eq + Hash + Clone> Sampler<WeightedDistribution<T>, StdRng> {
    /// Sampler over a weighted distribution built from `(value, weight)` pairs.
    ///
    /// # Errors
    ///
    /// See [`WeightedDistribution::from_pairs`].
    pub fn new_non_uniform<V>(values_and_weights: V) -> Result<Self>
    where
        V: IntoWeights<Value = T>,
    {
        Self::new(values_and_weights.into_weighted()?)
    }
}

impl<D: DiscreteDistribution, R: Rng> Sampler<D, R> {
    /// Wrap `distribution` with a caller-supplied RNG.
    ///
    /// # Errors
    ///
    /// [`SamplerError::InvalidDistribution`] if the distribution has no values.
    pub fn with_rng(distribution: D, rng: R) -> Result<Self> {
        if distribution.num_values() == 0 {
            return Err(SamplerError::InvalidDistribution(
                "distribution has no values".to_string(),
            ));
        }
        Ok(Self {
            distribution,
            rng,
            draw_limit: DEFAULT_DRAW_LIMIT,
        })
    }

    /// Cap on draws made by [`sample_unique`](Self::sample_unique) when the
    /// distribution cannot remove values.
    pub fn with_draw_limit(mut self, limit: usize) -> Self {
        self.draw_limit = limit;
        self
    }

    /// Draw one value.
    ///
    /// # Errors
    ///
    /// [`SamplerError::EmptyPopulation`] if the population has been drained.
    pub fn sample(&mut self) -> Result<D::Value> {
        self.distribution
            .sample_with_rng(&mut self.rng)
            .ok_or(SamplerError::EmptyPopulation)
    }

    /// Draw `n` independent values, in draw order. Duplicates are expected.
    ///
    /// # Errors
    ///
    /// * [`SamplerError::InvalidSampleCount`] if `n == 0`.
    /// * [`SamplerError::EmptyPopulation`] if the population has been drained.
    pub fn sample_n(&mut self, n: usize) -> Result<Vec<D::Value>> {
        if n == 0 {
            return Err(SamplerError::InvalidSampleCount {
                requested: n,
                reason: "must draw at least one value",
            });
        }
        (0..n).map(|_| self.sample()).collect()
    }

    /// Draw up to `n` pairwise-distinct values without replacement.
    ///
    /// With removal support the drawn values are deleted from the distribution, and
    /// the loop also stops once nothing drawable is left. A uniform list with
    /// duplicates or a weighted distribution with zero-weight values can therefore
    /// return fewer than `n` values.
    ///
    /// Without removal support, values are drawn with replacement and repeats are
    /// discarded until `n` distinct values are collected.
    ///
    /// # Errors
    ///
    /// * [`SamplerError::InvalidSampleCount`] if `n > num_values()`.
    /// * [`SamplerError::DrawLimitExceeded`] if the fallback path runs out of draws.
    /// * [`SamplerError::EmptyPopulation`] if the fallback path finds nothing drawable.
    pub fn sample_unique(&mut self, n: usize) -> Result<Vec<D::Value>>
    where
        D::Value: Eq + Hash + Clone,
    {
        let available = self.distribution.num_values();
        if n > available {
            return Err(SamplerError::InvalidSampleCount {
                requested: n,
                reason: "exceeds the number of values in the population",
            });
        }

        let mut seen: HashSet<D::Value> = HashSet::with_capacity(n);
        let mut out = Vec::with_capacity(n);

        if D::SUPPORTS_REMOVAL {
            while out.len() < n && !self.distribution.is_empty() {
                let Some(value) = self.distribution.sample_and_remove_with_rng(&mut self.rng)
                else {
                    break;
                };
                if seen.insert(value.clone()) {
                    out.push(value);
                }
            }
        } else {
            let mut draws = 0usize;
            while out.len() < n {
                if draws == self.draw_limit {
                    return Err(SamplerError::DrawLimitExceeded {
                        requested: n,
                        found: out.len(),
                        draws,
                    });
                }
                draws += 1;
                let value = self.sample()?;
                if seen.insert(value.clone()) {
                    out.push(value);
                }
            }
        }

        log::trace!(
            "sample_unique: {} of {n} requested, {} values left",
            out.len(),
            self.distribution.num_values()
        );
        Ok(out)
    }

    /// Single-value form of [`sample_unique`](Self::sample_unique).
    ///
    /// # Errors
    ///
    /// As [`sample_unique`](Self::sample_unique), plus
    /// [`SamplerError::EmptyPopulation`] if nothing could be drawn.
    pub fn sample_unique_one(&mut self) -> Result<D::Value>
    where
        D::Value: Eq + Hash + Clone,
    {
        self.sample_unique(1)?
            .pop()
            .ok_or(SamplerError::EmptyPopulation)
    }

    /// Normalized probability of `value`; `0.0` outside the population.
    pub fn probability_of(&self, value: &D::Value) -> f64 {
        self.distribution.probability_of(value)
    }

    /// Every value in the population.
    pub fn all_values(&self) -> Vec<D::Value> {
        self.distribution.all_values()
    }

    /// Number of values in the population.
    pub fn num_values(&self) -> usize {
        self.distribution.num_values()
    }

    /// The wrapped distribution.
    pub fn distribution(&self) -> &D {
        &self.distribution
    }

    /// Mutable access to the wrapped distribution.
    pub fn distribution_mut(&mut self) -> &mut D {
        &mut self.distribution
    }

    /// Unwrap the distribution, dropping the RNG.
    pub fn into_inner(self) -> D {
        self.distribution
    }
}
