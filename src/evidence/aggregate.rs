//! Credibility-weighted evidence aggregation
//!
//! Converts a list of tiered observations into a calibrated score and
//! confidence. Tier weights grow exponentially (base 3 by default) so
//! strong evidence dominates quickly, and the weighted mean is shrunk
//! toward the scale midpoint by a fixed pseudo-count so a single
//! observation cannot swing the score to an extreme.

use serde::Serialize;

use super::record::EvidenceRecord;
use crate::config::AggregationConfig;
use crate::rating::{Confidence, Score, Tier};

/// Aggregation weight for a tier under the given base
pub fn tier_weight(tier: Tier, base: f64) -> f64 {
    tier.weight(base)
}

/// Aggregate score state over one edge's evidence list
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Aggregate {
    pub score: Score,
    pub confidence: Confidence,
    pub total_weight: f64,
    pub evidence_count: usize,
}

/// Compute the Bayesian aggregate over an evidence list
///
/// `WAR = sum(score * weight) / sum(weight)`,
/// `confidence = W / (W + pseudo_count)`,
/// `final = confidence * WAR + (1 - confidence) * prior_mean`.
///
/// With zero evidence the result is exactly the prior mean at zero
/// confidence. Pure function of the full list: re-running over the same
/// evidence yields the same aggregate.
pub fn aggregate(records: &[EvidenceRecord], config: &AggregationConfig) -> Aggregate {
    if records.is_empty() {
        return Aggregate {
            score: Score::clamped(config.prior_mean),
            confidence: Confidence::zero(),
            total_weight: 0.0,
            evidence_count: 0,
        };
    }

    let total_weight: f64 = records
        .iter()
        .map(|r| r.tier.weight(config.weight_base))
        .sum();
    let weighted_sum: f64 = records
        .iter()
        .map(|r| r.score.get() * r.tier.weight(config.weight_base))
        .sum();
    let war = weighted_sum / total_weight;

    let confidence = total_weight / (total_weight + config.pseudo_count);
    let final_score = confidence * war + (1.0 - confidence) * config.prior_mean;

    Aggregate {
        score: Score::clamped(final_score),
        confidence: Confidence::clamped(confidence),
        total_weight,
        evidence_count: records.len(),
    }
}
