//! Exponential smoothing of scalar sensor streams
//!
//! A [`SmoothingFilter`] is a first-order exponential moving average. It is
//! unit-agnostic: temperature and humidity use the same filter, configured
//! with different seeds and weights.

use thiserror_no_std::Error;

/// Error types for filter construction
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum FilterError {
    /// Weight outside the half-open range (0, 1]
    #[error("Invalid smoothing weight {weight} (must be in (0, 1])")]
    InvalidWeight {
        /// The rejected weight
        weight: f32,
    },

    /// Seed is NaN or infinite
    #[error("Invalid filter seed {seed} (must be finite)")]
    InvalidSeed {
        /// The rejected seed
        seed: f32,
    },
}

/// First-order exponential moving average over a stream of finite samples.
///
/// Each accepted sample updates the state as
/// `current = weight * sample + (1 - weight) * current`.
/// A weight of 1 passes samples through unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingFilter {
    weight: f32,
    current: f32,
}

impl SmoothingFilter {
    /// Create a filter seeded with `seed`.
    ///
    /// The seed is authoritative immediately: the first [`apply`](Self::apply)
    /// blends against it.
    pub fn new(weight: f32, seed: f32) -> Result<Self, FilterError> {
        // NaN fails both comparisons and is rejected here too
        if !(weight > 0.0 && weight <= 1.0) {
            return Err(FilterError::InvalidWeight { weight });
        }
        if !seed.is_finite() {
            return Err(FilterError::InvalidSeed { seed });
        }

        Ok(Self {
            weight,
            current: seed,
        })
    }

    /// Blend a new sample into the filter and return the smoothed value.
    ///
    /// Callers should only pass finite samples. A non-finite sample is
    /// skipped in every build, leaving `current` unchanged.
    pub fn apply(&mut self, sample: f32) -> f32 {
        if sample.is_finite() {
            self.current = self.weight * sample + (1.0 - self.weight) * self.current;
        }
        self.current
    }

    /// Current smoothed value
    pub fn value(&self) -> f32 {
        self.current
    }

    /// Configured smoothing weight
    pub fn weight(&self) -> f32 {
        self.weight
    }
}
