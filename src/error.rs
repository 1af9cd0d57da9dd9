//! Errors for distribution construction and sampling.

use thiserror::Error;

/// Errors raised while building a distribution or drawing from a [`Sampler`](crate::Sampler).
///
/// All of these are argument errors: retrying with the same input fails the same way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SamplerError {
    /// A caller-supplied distribution cannot be sampled from.
    #[error("invalid distribution: {0}")]
    InvalidDistribution(String),
    /// Uniform construction from an empty set, list or range.
    #[error("population is empty")]
    EmptyPopulation,
    /// Negative upper bound given for the `0..=bound` shorthand.
    #[error("range upper bound must be >= 0 (got {0})")]
    NegativeRangeBound(i128),
    /// A range or bound with more values than `usize` can count.
    #[error("range of {0} values is too large to index")]
    PopulationTooLarge(i128),
    /// Weighted construction from an empty mapping or pair list.
    #[error("invalid distribution input: {0}")]
    InvalidDistributionInput(String),
    /// A weight below zero.
    #[error("weight must be >= 0 (got {0})")]
    NegativeWeight(f64),
    /// A NaN or infinite weight.
    #[error("weight must be finite (got {0})")]
    NonFiniteWeight(f64),
    /// Weights sum to zero (or less) after aggregation.
    #[error("total weight must be > 0 (got {0})")]
    DegenerateDistribution(f64),
    /// Sample count outside the accepted range.
    #[error("invalid sample count {requested}: {reason}")]
    InvalidSampleCount {
        requested: usize,
        reason: &'static str,
    },
    /// The deduplicating fallback gave up before collecting enough distinct values.
    #[error("collected {found} of {requested} distinct values after {draws} draws")]
    DrawLimitExceeded {
        requested: usize,
        found: usize,
        draws: usize,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SamplerError>;
