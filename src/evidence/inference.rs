//! LLM inference boundary for evidence interpretation
//!
//! The inference client is an opaque text-completion service returning
//! JSON. Its output is untrusted input: numeric fields are clamped into
//! their declared ranges and unusable payloads resolve to neutral
//! low-trust defaults instead of failing the assessment.

use async_trait::async_trait;
use serde_json::Value;

use crate::config::InferenceDefaults;
use crate::errors::Result;
use crate::graph::edge::EdgeType;
use crate::rating::{Confidence, Score, Tier};

/// Boundary to the external inference service
///
/// Implementations call out to an LLM (or a scripted stand-in for tests)
/// and return the raw JSON payload. Inference is stateless: the caller
/// may retry freely, since nothing is recorded until the outcome is
/// resolved and appended.
#[async_trait]
pub trait EvidenceInference: Send + Sync {
    /// Interpret a free-text statement as scored evidence for an edge type
    ///
    /// Expected payload shape:
    /// `{inferred_score, evidence_tier, reasoning, confidence}`.
    async fn infer(&self, statement: &str, edge_type: EdgeType, context: &Value)
        -> Result<Value>;
}

/// Validated result of one inference call
#[derive(Clone, Debug, PartialEq)]
pub enum InferenceOutcome {
    /// Parsed and clamped model output
    Inferred {
        score: Score,
        tier: Tier,
        confidence: Confidence,
        reasoning: String,
    },
    /// Payload was unusable; defaults apply
    Fallback { reason: String },
}

impl InferenceOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// Score/tier/confidence to apply, resolving fallback to defaults
    pub fn resolve(&self, defaults: &InferenceDefaults) -> (Score, Tier, Confidence) {
        match self {
            Self::Inferred {
                score,
                tier,
                confidence,
                ..
            } => (*score, *tier, *confidence),
            Self::Fallback { .. } => (
                Score::clamped(defaults.score),
                Tier::clamped(defaults.tier),
                Confidence::clamped(defaults.confidence),
            ),
        }
    }
}

/// Validate and clamp a raw inference payload
///
/// Requires numeric `inferred_score` and `evidence_tier`; both are
/// clamped into range rather than rejected when out of bounds. Missing
/// `confidence` falls back to the configured default; missing `reasoning`
/// becomes empty. Anything else resolves to `Fallback`.
pub fn parse_inference(value: &Value, defaults: &InferenceDefaults) -> InferenceOutcome {
    let Some(obj) = value.as_object() else {
        tracing::warn!("inference payload is not a JSON object, using defaults");
        return InferenceOutcome::Fallback {
            reason: "payload is not a JSON object".to_string(),
        };
    };

    let score = obj.get("inferred_score").and_then(Value::as_f64);
    let tier = obj.get("evidence_tier").and_then(Value::as_i64);

    match (score, tier) {
        (Some(score), Some(tier)) => {
            let confidence = obj
                .get("confidence")
                .and_then(Value::as_f64)
                .unwrap_or(defaults.confidence);
            let reasoning = obj
                .get("reasoning")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            InferenceOutcome::Inferred {
                score: Score::clamped(score),
                tier: Tier::clamped(tier),
                confidence: Confidence::clamped(confidence),
                reasoning,
            }
        }
        _ => {
            tracing::warn!("inference payload missing numeric score/tier, using defaults");
            InferenceOutcome::Fallback {
                reason: "missing numeric inferred_score or evidence_tier".to_string(),
            }
        }
    }
}
