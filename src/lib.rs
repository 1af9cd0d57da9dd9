//! `tirage`: sampling from finite discrete distributions.
//!
//! Two distribution strategies sit behind one façade:
//! - `uniform`: every population entry has equal mass; lists, sets, or integer ranges
//!   kept in closed form.
//! - `weighted`: arbitrary non-negative weights (frequency counts), normalized by their sum.
//! - `sampler`: [`Sampler`] draws with replacement, without replacement, and reports
//!   probabilities.
//!
//! Any type implementing [`DiscreteDistribution`] can be wrapped by a [`Sampler`].
//!
//! Notes:
//! - Every randomized call goes through the sampler's own RNG; use
//!   [`Sampler::with_seed`] or [`Sampler::with_rng`] for deterministic runs.
//! - Without-replacement sampling removes drawn values from the wrapped distribution.

#![forbid(unsafe_code)]

pub mod distribution;
pub mod error;
pub mod sampler;
pub mod uniform;
pub mod weighted;

pub use distribution::DiscreteDistribution;
pub use error::{Result, SamplerError};
pub use sampler::{Sampler, DEFAULT_DRAW_LIMIT};
pub use uniform::{Integral, IntoUniform, UniformDistribution};
pub use weighted::{IntoWeights, Weight, WeightedDistribution};
