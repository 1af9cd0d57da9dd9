//! Weighted (non-uniform) discrete distributions.
//!
//! Weights are frequency counts or any unnormalized mass. Repeated values accumulate
//! their weights, and probabilities are `weight / total_mass`.
//!
//! Sampling uses the inverse-CDF walk: draw `u * total_mass` and return the first
//! value whose running weight sum strictly exceeds it. The walk follows first-seen
//! order, so results are deterministic for a fixed RNG stream.
//!
//! Zero-weight values are kept in the lookup table (they show up in
//! [`all_values`](DiscreteDistribution::all_values) with probability `0.0`) but are
//! never drawn.

use std::collections::HashMap;
use std::hash::Hash;

use rand::Rng;

use crate::distribution::DiscreteDistribution;
use crate::error::{Result, SamplerError};

/// Numeric types accepted as weights: every primitive integer and float.
pub trait Weight: Copy {
    /// Convert to `f64`. Very large integers lose precision.
    fn to_f64(self) -> f64;
}

macro_rules! impl_weight {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_weight!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// A distribution over values with arbitrary non-negative weights.
#[derive(Debug, Clone)]
pub struct WeightedDistribution<T> {
    weights: HashMap<T, f64>,
    // Every key in first-seen order, zero weights included.
    keys: Vec<T>,
    // Positive-weight entries in first-seen order; the sampling list.
    entries: Vec<(T, f64)>,
    total_mass: f64,
}

impl<T: Eq + Hash + Clone> WeightedDistribution<T> {
    /// Build from `(value, weight)` pairs. Weights of repeated values are summed.
    ///
    /// # Errors
    ///
    /// * [`SamplerError::InvalidDistributionInput`] if there are no pairs.
    /// * [`SamplerError::NonFiniteWeight`] if a weight (or the total) is NaN or infinite.
    /// * [`SamplerError::NegativeWeight`] if a weight is below zero.
    /// * [`SamplerError::DegenerateDistribution`] if the weights sum to zero.
    pub fn from_pairs<I, W>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, W)>,
        W: Weight,
    {
        let mut weights: HashMap<T, f64> = HashMap::new();
        let mut keys = Vec::new();

        for (value, weight) in pairs {
            let weight = weight.to_f64();
            if !weight.is_finite() {
                return Err(SamplerError::NonFiniteWeight(weight));
            }
            if weight < 0.0 {
                return Err(SamplerError::NegativeWeight(weight));
            }
            match weights.get_mut(&value) {
                Some(acc) => *acc += weight,
                None => {
                    keys.push(value.clone());
                    weights.insert(value, weight);
                }
            }
        }

        if keys.is_empty() {
            return Err(SamplerError::InvalidDistributionInput(
                "no values given".to_string(),
            ));
        }

        let entries: Vec<(T, f64)> = keys
            .iter()
            .filter_map(|k| {
                let w = weights[k];
                (w != 0.0).then(|| (k.clone(), w))
            })
            .collect();
        let total_mass: f64 = entries.iter().map(|(_, w)| w).sum();

        if !total_mass.is_finite() {
            return Err(SamplerError::NonFiniteWeight(total_mass));
        }
        if total_mass <= 0.0 {
            return Err(SamplerError::DegenerateDistribution(total_mass));
        }

        log::debug!(
            "weighted distribution over {} values ({} drawable), total mass {total_mass}",
            keys.len(),
            entries.len()
        );

        Ok(Self {
            weights,
            keys,
            entries,
            total_mass,
        })
    }

    /// Accumulated weight recorded for `value`, if any.
    pub fn weight_of(&self, value: &T) -> Option<f64> {
        self.weights.get(value).copied()
    }
}

impl<T> WeightedDistribution<T> {
    /// Sum of the weights still in the population.
    pub fn total_mass(&self) -> f64 {
        self.total_mass
    }

    fn pick_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        let target = rng.random::<f64>() * self.total_mass;
        let mut running = 0.0;
        for (i, (_, w)) in self.entries.iter().enumerate() {
            running += w;
            if running > target {
                return Some(i);
            }
        }
        // Rounding can leave the running sum a hair below the target.
        Some(self.entries.len() - 1)
    }
}

impl<T: Eq + Hash + Clone> DiscreteDistribution for WeightedDistribution<T> {
    type Value = T;

    const SUPPORTS_REMOVAL: bool = true;

    fn sample_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<T> {
        self.pick_index(rng).map(|i| self.entries[i].0.clone())
    }

    fn all_values(&self) -> Vec<T> {
        self.keys.clone()
    }

    fn num_values(&self) -> usize {
        self.keys.len()
    }

    fn probability_of(&self, value: &T) -> f64 {
        match self.weights.get(value) {
            Some(&w) if self.total_mass > 0.0 => w / self.total_mass,
            _ => 0.0,
        }
    }

    fn sample_and_remove_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<T> {
        let index = self.pick_index(rng)?;
        let (value, weight) = self.entries.remove(index);
        self.weights.remove(&value);
        if let Some(pos) = self.keys.iter().position(|k| *k == value) {
            self.keys.remove(pos);
        }
        // Subtracting would lose small weights to cancellation.
        self.total_mass = self.entries.iter().map(|(_, w)| w).sum();
        log::trace!(
            "removed value with weight {weight}; {} values left, mass {}",
            self.keys.len(),
            self.total_mass
        );
        Some(value)
    }
}

/// Inputs accepted by [`Sampler::new_non_uniform`](crate::Sampler::new_non_uniform):
/// anything yielding `(value, weight)` pairs, such as a `HashMap`, `BTreeMap`,
/// or a vector or array of tuples. Weights may be any primitive number (see [`Weight`]).
pub trait IntoWeights {
    /// Element type of the resulting distribution.
    type Value;

    /// Build the distribution.
    fn into_weighted(self) -> Result<WeightedDistribution<Self::Value>>;
}

impl<I, T, W> IntoWeights for I
where
    I: IntoIterator<Item = (T, W)>,
    T: Eq + Hash + Clone,
    W: Weight,
{
    type Value = T;

    fn into_weighted(self) -> Result<WeightedDistribution<T>> {
        WeightedDistribution::from_pairs(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::BTreeMap;

    #[test]
    fn rejects_bad_input() {
        let empty: Vec<(&str, f64)> = Vec::new();
        assert!(matches!(
            WeightedDistribution::from_pairs(empty),
            Err(SamplerError::InvalidDistributionInput(_))
        ));
        assert_eq!(
            WeightedDistribution::from_pairs([("x", -1)]).unwrap_err(),
            SamplerError::NegativeWeight(-1.0)
        );
        assert_eq!(
            WeightedDistribution::from_pairs([("a", 0), ("b", 0), ("c", 0)]).unwrap_err(),
            SamplerError::DegenerateDistribution(0.0)
        );
        let err = WeightedDistribution::from_pairs([("nan", f64::NAN)]).unwrap_err();
        assert!(matches!(err, SamplerError::NonFiniteWeight(w) if w.is_nan()));
    }

    #[test]
    fn normalizes_weights() {
        let d = WeightedDistribution::from_pairs(BTreeMap::from([(5, 20), (10, 30)]))
            .expect("weights ok");
        assert!((d.probability_of(&5) - 0.4).abs() < 1e-12);
        assert!((d.probability_of(&10) - 0.6).abs() < 1e-12);
        assert_eq!(d.probability_of(&7), 0.0);
        assert_eq!(d.total_mass(), 50.0);
    }

    #[test]
    fn repeated_values_accumulate() {
        let d = WeightedDistribution::from_pairs(vec![("a", 1.0), ("b", 2.0), ("a", 3.0)])
            .expect("weights ok");
        assert_eq!(d.num_values(), 2);
        assert_eq!(d.all_values(), vec!["a", "b"]);
        assert_eq!(d.weight_of(&"a"), Some(4.0));
        assert!((d.probability_of(&"a") - 4.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn zero_weights_are_listed_but_never_drawn() {
        let d = WeightedDistribution::from_pairs([("never", 0.0), ("always", 2.5)])
            .expect("weights ok");
        assert_eq!(d.num_values(), 2);
        assert_eq!(d.all_values(), vec!["never", "always"]);
        assert_eq!(d.probability_of(&"never"), 0.0);

        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..1_000 {
            assert_eq!(d.sample_with_rng(&mut rng), Some("always"));
        }
    }

    #[test]
    fn removal_updates_mass() {
        let mut d = WeightedDistribution::from_pairs([("a", 1.0), ("b", 3.0), ("z", 0.0)])
            .expect("weights ok");
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let first = d.sample_and_remove_with_rng(&mut rng).expect("drawable");
        assert!(first == "a" || first == "b");
        assert_eq!(d.num_values(), 2);
        assert_eq!(d.probability_of(&first), 0.0);
        let other = if first == "a" { "b" } else { "a" };
        assert_eq!(d.probability_of(&other), 1.0);

        assert_eq!(d.sample_and_remove_with_rng(&mut rng), Some(other));
        assert_eq!(d.total_mass(), 0.0);
        // Only the zero-weight value is left, and it cannot be drawn.
        assert_eq!(d.all_values(), vec!["z"]);
        assert_eq!(d.sample_and_remove_with_rng(&mut rng), None);
        assert_eq!(d.sample_with_rng(&mut rng), None);
        assert_eq!(d.probability_of(&"z"), 0.0);
    }

    #[test]
    fn removal_keeps_small_weights_normalized() {
        for seed in 0..20 {
            let mut d = WeightedDistribution::from_pairs([("big", 1e16), ("small", 1.0)])
                .expect("weights ok");
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let removed = d.sample_and_remove_with_rng(&mut rng).expect("drawable");
            let sum: f64 = d.all_values().iter().map(|v| d.probability_of(v)).sum();
            assert!((sum - 1.0).abs() < 1e-12, "removed {removed}, sum was {sum}");
            if removed == "big" {
                assert_eq!(d.total_mass(), 1.0);
                assert_eq!(d.probability_of(&"small"), 1.0);
                assert_eq!(d.sample_with_rng(&mut rng), Some("small"));
            }
        }
    }

    #[test]
    fn accepts_integer_counts() {
        let d = WeightedDistribution::from_pairs([("a", 3_usize), ("b", 1)]).expect("counts ok");
        assert_eq!(d.probability_of(&"a"), 0.75);
        let d = WeightedDistribution::from_pairs(vec![(1_u8, 2_u64), (2, 2_u64)])
            .expect("counts ok");
        assert_eq!(d.probability_of(&1), 0.5);
        assert_eq!(
            WeightedDistribution::from_pairs([("x", -4_i64)]).unwrap_err(),
            SamplerError::NegativeWeight(-4.0)
        );
    }

    #[test]
    fn biases_toward_large_weights() {
        let d = WeightedDistribution::from_pairs([(0_usize, 100.0), (1, 1.0), (2, 1.0)])
            .expect("weights ok");
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut counts = [0usize; 3];
        for _ in 0..2_000 {
            counts[d.sample_with_rng(&mut rng).expect("drawable")] += 1;
        }
        assert!(counts[0] > counts[1]);
        assert!(counts[0] > counts[2]);
    }
}
