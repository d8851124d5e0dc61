//! Bounded rating values for edge scoring
//!
//! `Score` is the 1-5 quality scale, `Confidence` the 0-1 credibility
//! scale, and `Tier` the 1-5 evidence reliability class. Each rejects NaN
//! and out-of-range input on the fallible path and offers a clamping
//! constructor for untrusted external values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RatingError {
    #[error("Rating value cannot be NaN")]
    NaN,

    #[error("Rating out of bounds: {value} (must be {min} to {max})")]
    OutOfBounds { value: f64, min: f64, max: f64 },
}

/// Quality score on the 1-5 scale
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Score(f64);

impl Score {
    pub const MIN: f64 = 1.0;
    pub const MAX: f64 = 5.0;

    /// Create a new score with bounds validation
    ///
    /// # Errors
    /// - Returns `RatingError::NaN` if value is NaN
    /// - Returns `RatingError::OutOfBounds` if value < 1.0 or > 5.0
    pub fn new(value: f64) -> Result<Self, RatingError> {
        if value.is_nan() {
            return Err(RatingError::NaN);
        }
        if value < Self::MIN || value > Self::MAX {
            return Err(RatingError::OutOfBounds {
                value,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(value))
    }

    /// Clamp an untrusted value into range; NaN maps to the scale midpoint
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self(3.0);
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// Get the underlying f64 value
    pub fn get(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Bounded confidence value [0.0, 1.0]
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Confidence(f64);

impl Confidence {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 1.0;

    /// Create a new confidence value with bounds validation
    ///
    /// # Errors
    /// - Returns `RatingError::NaN` if value is NaN
    /// - Returns `RatingError::OutOfBounds` if value < 0.0 or > 1.0
    pub fn new(value: f64) -> Result<Self, RatingError> {
        if value.is_nan() {
            return Err(RatingError::NaN);
        }
        if value < Self::MIN || value > Self::MAX {
            return Err(RatingError::OutOfBounds {
                value,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(value))
    }

    /// Clamp an untrusted value into range; NaN maps to 0.0
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// Zero confidence (nothing assessed yet)
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Get the underlying f64 value
    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self::zero()
    }
}

impl TryFrom<f64> for Confidence {
    type Error = RatingError;
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Evidence reliability tier, 1 (weak/inferred) to 5 (strong/quantified)
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Tier(u8);

impl Tier {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Create a new tier with bounds validation
    pub fn new(value: u8) -> Result<Self, RatingError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(RatingError::OutOfBounds {
                value: value as f64,
                min: Self::MIN as f64,
                max: Self::MAX as f64,
            });
        }
        Ok(Self(value))
    }

    /// Clamp an untrusted value into the 1..=5 range
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    /// Get the underlying tier number
    pub fn get(self) -> u8 {
        self.0
    }

    /// Aggregation weight for this tier: base^(tier - 1)
    ///
    /// With the default base of 3, tiers 1..5 weigh 1, 3, 9, 27, 81, so
    /// higher-tier evidence dominates quickly without low-tier evidence
    /// ever being fully discarded.
    pub fn weight(self, base: f64) -> f64 {
        base.powi(self.0 as i32 - 1)
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
