//! Uniform discrete distributions.
//!
//! Every entry of the population carries mass `1 / num_values`. The population is
//! either a materialized list of arbitrary values or, for contiguous integer ranges,
//! a closed-form `(first, count)` span that is never expanded unless a value is removed.
//!
//! Duplicates in a list are kept as separate entries. A value listed twice is drawn
//! twice as often, but [`probability_of`](DiscreteDistribution::probability_of)
//! still reports the mass of a single entry. Values that are not in the
//! population get `0.0`.

use std::collections::{BTreeSet, HashSet};
use std::ops::{Range, RangeInclusive};

use rand::Rng;

use crate::distribution::DiscreteDistribution;
use crate::error::{Result, SamplerError};

/// Primitive integers usable as the closed-form range representation.
pub trait Integral: Copy + PartialOrd {
    /// Widen to `i128`.
    fn to_i128(self) -> i128;
    /// Narrow from `i128`. Only called with values known to fit.
    fn from_i128(value: i128) -> Self;
}

macro_rules! impl_integral {
    ($($t:ty),*) => {
        $(
            impl Integral for $t {
                #[inline]
                fn to_i128(self) -> i128 {
                    self as i128
                }
                #[inline]
                fn from_i128(value: i128) -> Self {
                    value as $t
                }
            }
        )*
    };
}

impl_integral!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

fn span_nth<T: Integral>(first: &T, index: usize) -> T {
    T::from_i128(first.to_i128() + index as i128)
}

fn span_offset<T: Integral>(first: &T, value: &T) -> Option<usize> {
    usize::try_from(value.to_i128() - first.to_i128()).ok()
}

#[derive(Debug, Clone)]
enum Population<T> {
    List(Vec<T>),
    Span {
        first: T,
        count: usize,
        nth: fn(&T, usize) -> T,
        offset: fn(&T, &T) -> Option<usize>,
    },
}

/// A distribution giving every population entry the same probability.
#[derive(Debug, Clone)]
pub struct UniformDistribution<T> {
    population: Population<T>,
}

impl<T> UniformDistribution<T> {
    /// Build from a list of values. Duplicates are preserved.
    ///
    /// # Errors
    ///
    /// [`SamplerError::EmptyPopulation`] if `values` yields nothing.
    pub fn from_values<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();
        if values.is_empty() {
            return Err(SamplerError::EmptyPopulation);
        }
        log::debug!("uniform distribution over {} listed values", values.len());
        Ok(Self {
            population: Population::List(values),
        })
    }

    /// Whether the population is still held in closed `(first, count)` form.
    pub fn is_range(&self) -> bool {
        matches!(self.population, Population::Span { .. })
    }

    fn len(&self) -> usize {
        match &self.population {
            Population::List(values) => values.len(),
            Population::Span { count, .. } => *count,
        }
    }
}

impl<T: Integral> UniformDistribution<T> {
    /// Build from a half-open range `start..end`.
    ///
    /// # Errors
    ///
    /// * [`SamplerError::EmptyPopulation`] if `end <= start`.
    /// * [`SamplerError::PopulationTooLarge`] if the range holds more than `usize::MAX` values.
    pub fn from_range(range: Range<T>) -> Result<Self> {
        Self::from_span(range.start, range.end, false)
    }

    /// Build from a closed range `start..=end`.
    ///
    /// # Errors
    ///
    /// * [`SamplerError::EmptyPopulation`] if `end < start`.
    /// * [`SamplerError::PopulationTooLarge`] if the range holds more than `usize::MAX` values,
    ///   e.g. `0..=usize::MAX`.
    pub fn from_range_inclusive(range: RangeInclusive<T>) -> Result<Self> {
        let (start, end) = range.into_inner();
        Self::from_span(start, end, true)
    }

    fn from_span(first: T, last: T, inclusive: bool) -> Result<Self> {
        let count = last.to_i128() - first.to_i128() + i128::from(inclusive);
        if count <= 0 {
            return Err(SamplerError::EmptyPopulation);
        }
        let count =
            usize::try_from(count).map_err(|_| SamplerError::PopulationTooLarge(count))?;
        log::debug!("uniform distribution over a range of {count} integers");
        Ok(Self {
            population: Population::Span {
                first,
                count,
                nth: span_nth::<T>,
                offset: span_offset::<T>,
            },
        })
    }
}

impl<T: Clone> UniformDistribution<T> {
    fn nth(&self, index: usize) -> T {
        match &self.population {
            Population::List(values) => values[index].clone(),
            Population::Span { first, nth, .. } => nth(first, index),
        }
    }

    fn materialize(&mut self) {
        if let Population::Span { count, .. } = self.population {
            log::trace!("materializing range of {count} values");
            let values = (0..count).map(|i| self.nth(i)).collect();
            self.population = Population::List(values);
        }
    }
}

impl<T: PartialEq> UniformDistribution<T> {
    /// Whether `value` is an entry of the population.
    pub fn contains(&self, value: &T) -> bool {
        match &self.population {
            Population::List(values) => values.contains(value),
            Population::Span {
                first,
                count,
                offset,
                ..
            } => offset(first, value).is_some_and(|i| i < *count),
        }
    }
}

impl<T: Clone + PartialEq> DiscreteDistribution for UniformDistribution<T> {
    type Value = T;

    const SUPPORTS_REMOVAL: bool = true;

    fn sample_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<T> {
        let n = self.len();
        if n == 0 {
            return None;
        }
        Some(self.nth(rng.random_range(0..n)))
    }

    /// Expands a range into a full list.
    fn all_values(&self) -> Vec<T> {
        match &self.population {
            Population::List(values) => values.clone(),
            Population::Span { count, .. } => (0..*count).map(|i| self.nth(i)).collect(),
        }
    }

    fn num_values(&self) -> usize {
        self.len()
    }

    fn probability_of(&self, value: &T) -> f64 {
        if self.contains(value) {
            1.0 / self.len() as f64
        } else {
            0.0
        }
    }

    /// Removes exactly one entry. A range is materialized first, and the
    /// remaining entries are not kept in their original order.
    fn sample_and_remove_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<T> {
        let n = self.len();
        if n == 0 {
            return None;
        }
        let index = rng.random_range(0..n);
        self.materialize();
        match &mut self.population {
            Population::List(values) => Some(values.swap_remove(index)),
            Population::Span { .. } => None,
        }
    }
}

/// Inputs accepted by [`Sampler::new_uniform`](crate::Sampler::new_uniform).
///
/// Lists, slices, arrays and sets become a materialized population; integer ranges
/// keep the closed form; a bare integer `u` means `0..=u`. A range or bound must hold
/// at most `usize::MAX` values, so `u64::MAX` and `usize::MAX` are rejected with
/// [`SamplerError::PopulationTooLarge`].
pub trait IntoUniform {
    /// Element type of the resulting distribution.
    type Value;

    /// Build the distribution.
    fn into_uniform(self) -> Result<UniformDistribution<Self::Value>>;
}

impl<T> IntoUniform for UniformDistribution<T> {
    type Value = T;

    fn into_uniform(self) -> Result<Self> {
        Ok(self)
    }
}

impl<T> IntoUniform for Vec<T> {
    type Value = T;

    fn into_uniform(self) -> Result<UniformDistribution<T>> {
        UniformDistribution::from_values(self)
    }
}

impl<T: Clone> IntoUniform for &[T] {
    type Value = T;

    fn into_uniform(self) -> Result<UniformDistribution<T>> {
        UniformDistribution::from_values(self.iter().cloned())
    }
}

impl<T, const N: usize> IntoUniform for [T; N] {
    type Value = T;

    fn into_uniform(self) -> Result<UniformDistribution<T>> {
        UniformDistribution::from_values(self)
    }
}

impl<T, S> IntoUniform for HashSet<T, S> {
    type Value = T;

    fn into_uniform(self) -> Result<UniformDistribution<T>> {
        UniformDistribution::from_values(self)
    }
}

impl<T> IntoUniform for BTreeSet<T> {
    type Value = T;

    fn into_uniform(self) -> Result<UniformDistribution<T>> {
        UniformDistribution::from_values(self)
    }
}

impl<T: Integral> IntoUniform for Range<T> {
    type Value = T;

    fn into_uniform(self) -> Result<UniformDistribution<T>> {
        UniformDistribution::from_range(self)
    }
}

impl<T: Integral> IntoUniform for RangeInclusive<T> {
    type Value = T;

    fn into_uniform(self) -> Result<UniformDistribution<T>> {
        UniformDistribution::from_range_inclusive(self)
    }
}

macro_rules! impl_into_uniform_bound {
    ($($t:ty),*) => {
        $(
            impl IntoUniform for $t {
                type Value = $t;

                #[allow(unused_comparisons)]
                fn into_uniform(self) -> Result<UniformDistribution<$t>> {
                    if self < 0 {
                        return Err(SamplerError::NegativeRangeBound(self as i128));
                    }
                    UniformDistribution::from_range_inclusive(0..=self)
                }
            }
        )*
    };
}

impl_into_uniform_bound!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
