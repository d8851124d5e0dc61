//! Tunable constants for evidence aggregation and inference fallback
//!
//! No global settings object: the formula constants live in explicit
//! config structs passed to constructors so they stay testable.

/// Constants of the credibility-weighted scoring formula
///
/// `confidence = W / (W + pseudo_count)` over total evidence weight W,
/// `final = confidence * WAR + (1 - confidence) * prior_mean`.
#[derive(Clone, Debug)]
pub struct AggregationConfig {
    /// Pseudo-count C in the shrinkage denominator (default: 10.0)
    pub pseudo_count: f64,
    /// Prior mean the score shrinks toward (default: 2.5, scale midpoint)
    pub prior_mean: f64,
    /// Base of the exponential tier weighting (default: 3.0)
    pub weight_base: f64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            pseudo_count: 10.0,
            prior_mean: 2.5,
            weight_base: 3.0,
        }
    }
}

/// Neutral low-trust defaults applied when inference output is unusable
#[derive(Clone, Debug)]
pub struct InferenceDefaults {
    /// Fallback quality judgment (default: 3.0, neutral)
    pub score: f64,
    /// Fallback reliability tier (default: 2, low)
    pub tier: i64,
    /// Fallback inference confidence (default: 0.3)
    pub confidence: f64,
}

impl Default for InferenceDefaults {
    fn default() -> Self {
        Self {
            score: 3.0,
            tier: 2,
            confidence: 0.3,
        }
    }
}
