//! Evidence aggregation pipeline
//!
//! `EvidenceAggregator` is the write path of the assessment core: a
//! free-text statement is interpreted by the inference boundary, appended
//! to the edge's evidence list, and the edge score is recomputed over the
//! full list. The edge is only touched after inference resolves, so a
//! cancelled inference call leaves no partial state.

pub mod aggregate;
pub mod inference;
pub mod record;

pub use aggregate::{aggregate, tier_weight, Aggregate};
pub use inference::{parse_inference, EvidenceInference, InferenceOutcome};
pub use record::EvidenceRecord;

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::config::{AggregationConfig, InferenceDefaults};
use crate::errors::Result;
use crate::graph::{EdgeType, GraphManager, NodeId};
use crate::rating::{Confidence, Score};

/// Full updated edge state returned by `assess_edge`
#[derive(Clone, Debug, Serialize)]
pub struct EdgeAssessment {
    pub source: NodeId,
    pub target: NodeId,
    pub edge_type: EdgeType,
    pub score: Score,
    pub confidence: Confidence,
    pub evidence_count: usize,
    /// True when inference output was unusable and defaults were applied;
    /// surfaced so callers can flag low-trust results instead of hiding them
    pub used_fallback: bool,
    pub reasoning: Option<String>,
}

/// Converts statements into evidence and keeps edge scores consistent
pub struct EvidenceAggregator {
    manager: Arc<GraphManager>,
    inference: Arc<dyn EvidenceInference>,
    config: AggregationConfig,
    defaults: InferenceDefaults,
}

impl EvidenceAggregator {
    pub fn new(manager: Arc<GraphManager>, inference: Arc<dyn EvidenceInference>) -> Self {
        Self {
            manager,
            inference,
            config: AggregationConfig::default(),
            defaults: InferenceDefaults::default(),
        }
    }

    /// Override aggregation constants (builder pattern)
    pub fn with_config(mut self, config: AggregationConfig) -> Self {
        self.config = config;
        self
    }

    /// Override inference fallback defaults (builder pattern)
    pub fn with_defaults(mut self, defaults: InferenceDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Assess a statement against one factor edge
    ///
    /// 1. Fetch or create the edge (endpoints must exist).
    /// 2. Run inference on the statement; transport errors and malformed
    ///    payloads resolve to low-trust defaults, never abort.
    /// 3. Append the evidence record.
    /// 4. Recompute score/confidence over the full evidence list and
    ///    persist.
    ///
    /// Idempotent in the aggregate sense: the resulting score is a pure
    /// function of the edge's full evidence history.
    pub async fn assess_edge(
        &self,
        source: &NodeId,
        target: &NodeId,
        edge_type: EdgeType,
        statement: &str,
        conversation_id: Option<&str>,
        context: &Value,
    ) -> Result<EdgeAssessment> {
        let mut edge = self.manager.add_edge(source, target, edge_type).await?;

        let outcome = match self.inference.infer(statement, edge_type, context).await {
            Ok(payload) => parse_inference(&payload, &self.defaults),
            Err(err) => {
                tracing::warn!(%source, %target, error = %err, "inference call failed, using defaults");
                InferenceOutcome::Fallback {
                    reason: err.to_string(),
                }
            }
        };
        let (score, tier, _inference_confidence) = outcome.resolve(&self.defaults);
        let reasoning = match &outcome {
            InferenceOutcome::Inferred { reasoning, .. } if !reasoning.is_empty() => {
                Some(reasoning.clone())
            }
            _ => None,
        };

        edge.evidence.push(EvidenceRecord::new(
            statement,
            tier,
            score,
            conversation_id.map(str::to_string),
        ));

        let agg = aggregate(&edge.evidence, &self.config);
        edge.current_score = Some(agg.score);
        edge.current_confidence = agg.confidence;
        edge.updated_at = Utc::now();
        self.manager.save_edge(edge).await?;

        tracing::info!(
            %source,
            %target,
            edge_type = %edge_type,
            score = agg.score.get(),
            confidence = agg.confidence.get(),
            evidence_count = agg.evidence_count,
            fallback = outcome.is_fallback(),
            "edge assessed"
        );

        Ok(EdgeAssessment {
            source: source.clone(),
            target: target.clone(),
            edge_type,
            score: agg.score,
            confidence: agg.confidence,
            evidence_count: agg.evidence_count,
            used_fallback: outcome.is_fallback(),
            reasoning,
        })
    }

    /// Recompute an edge's aggregate from its stored evidence list
    ///
    /// Repairs the score-follows-evidence invariant after a config change.
    /// Returns `None` when the edge does not exist.
    pub async fn rescore_edge(
        &self,
        source: &NodeId,
        target: &NodeId,
    ) -> Result<Option<Aggregate>> {
        let Some(mut edge) = self.manager.get_edge(source, target).await? else {
            return Ok(None);
        };
        let agg = aggregate(&edge.evidence, &self.config);
        edge.current_score = if edge.evidence.is_empty() {
            None
        } else {
            Some(agg.score)
        };
        edge.current_confidence = agg.confidence;
        edge.updated_at = Utc::now();
        self.manager.save_edge(edge).await?;
        Ok(Some(agg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AssessmentError;
    use crate::graph::{Node, NodeKind};
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use tokio::sync::Mutex;

    /// Returns queued payloads in order, then errors
    struct ScriptedInference {
        payloads: Mutex<VecDeque<Value>>,
    }

    impl ScriptedInference {
        fn new(payloads: Vec<Value>) -> Self {
            Self {
                payloads: Mutex::new(payloads.into()),
            }
        }
    }

    #[async_trait]
    impl EvidenceInference for ScriptedInference {
        async fn infer(&self, _: &str, _: EdgeType, _: &Value) -> Result<Value> {
            self.payloads
                .lock()
                .await
                .pop_front()
                .ok_or_else(|| AssessmentError::Inference("script exhausted".to_string()))
        }
    }

    async fn manager_with_edge_endpoints() -> Arc<GraphManager> {
        let manager = Arc::new(GraphManager::in_memory());
        manager
            .add_node(Node::new("forecast", NodeKind::Output, "Forecast"))
            .await
            .unwrap();
        manager
            .add_node(Node::new("team", NodeKind::Team, "Sales Ops"))
            .await
            .unwrap();
        manager
    }

    #[tokio::test]
    async fn test_assess_edge_appends_and_rescores() {
        let manager = manager_with_edge_endpoints().await;
        let inference = Arc::new(ScriptedInference::new(vec![json!({
            "inferred_score": 2, "evidence_tier": 3, "reasoning": "manual rework every week", "confidence": 0.8
        })]));
        let aggregator = EvidenceAggregator::new(manager.clone(), inference);

        let assessment = aggregator
            .assess_edge(
                &"team".into(),
                &"forecast".into(),
                EdgeType::TeamExecution,
                "the team reworks the forecast by hand every week",
                Some("conv-1"),
                &json!({}),
            )
            .await
            .unwrap();

        assert!(!assessment.used_fallback);
        assert_eq!(assessment.evidence_count, 1);
        // Single tier-3 score-2 item: shrunk toward 2.5
        assert!((assessment.score.get() - 2.263).abs() < 0.01);
        assert!((assessment.confidence.get() - 9.0 / 19.0).abs() < 0.001);
        assert_eq!(assessment.reasoning.as_deref(), Some("manual rework every week"));

        let edge = manager
            .get_edge(&"team".into(), &"forecast".into())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(edge.evidence.len(), 1);
        assert_eq!(edge.evidence[0].conversation_id.as_deref(), Some("conv-1"));
    }

    #[tokio::test]
    async fn test_incremental_matches_direct_aggregate() {
        let manager = manager_with_edge_endpoints().await;
        let payload = json!({"inferred_score": 2, "evidence_tier": 3, "confidence": 0.8});
        let inference = Arc::new(ScriptedInference::new(vec![payload.clone(), payload]));
        let aggregator = EvidenceAggregator::new(manager.clone(), inference);

        for _ in 0..2 {
            aggregator
                .assess_edge(
                    &"team".into(),
                    &"forecast".into(),
                    EdgeType::TeamExecution,
                    "same statement",
                    None,
                    &json!({}),
                )
                .await
                .unwrap();
        }

        let edge = manager
            .get_edge(&"team".into(), &"forecast".into())
            .await
            .unwrap()
            .unwrap();
        // Append semantics: two records, and the stored score equals the
        // direct aggregate over the doubled list
        assert_eq!(edge.evidence.len(), 2);
        let direct = aggregate(&edge.evidence, &AggregationConfig::default());
        assert_eq!(edge.current_score.unwrap(), direct.score);
        assert_eq!(edge.current_confidence, direct.confidence);
    }

    #[tokio::test]
    async fn test_transport_error_uses_fallback_defaults() {
        let manager = manager_with_edge_endpoints().await;
        let inference = Arc::new(ScriptedInference::new(vec![])); // errors immediately
        let aggregator = EvidenceAggregator::new(manager.clone(), inference);

        let assessment = aggregator
            .assess_edge(
                &"team".into(),
                &"forecast".into(),
                EdgeType::TeamExecution,
                "statement",
                None,
                &json!({}),
            )
            .await
            .unwrap();

        assert!(assessment.used_fallback);
        let edge = manager
            .get_edge(&"team".into(), &"forecast".into())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(edge.evidence[0].tier.get(), 2);
        assert_eq!(edge.evidence[0].score.get(), 3.0);
    }

    #[tokio::test]
    async fn test_malformed_payload_uses_fallback_defaults() {
        let manager = manager_with_edge_endpoints().await;
        let inference = Arc::new(ScriptedInference::new(vec![json!("garbage")]));
        let aggregator = EvidenceAggregator::new(manager, inference);

        let assessment = aggregator
            .assess_edge(
                &"team".into(),
                &"forecast".into(),
                EdgeType::TeamExecution,
                "statement",
                None,
                &json!({}),
            )
            .await
            .unwrap();
        assert!(assessment.used_fallback);
        assert!(assessment.reasoning.is_none());
    }

    #[tokio::test]
    async fn test_assess_edge_missing_endpoint_fails_without_side_effects() {
        let manager = Arc::new(GraphManager::in_memory());
        let inference = Arc::new(ScriptedInference::new(vec![]));
        let aggregator = EvidenceAggregator::new(manager.clone(), inference);

        let result = aggregator
            .assess_edge(
                &"ghost".into(),
                &"forecast".into(),
                EdgeType::TeamExecution,
                "statement",
                None,
                &json!({}),
            )
            .await;
        assert!(result.is_err());
        assert!(manager.list_edges().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rescore_edge_missing_returns_none() {
        let manager = Arc::new(GraphManager::in_memory());
        let inference = Arc::new(ScriptedInference::new(vec![]));
        let aggregator = EvidenceAggregator::new(manager, inference);

        let result = aggregator
            .rescore_edge(&"a".into(), &"b".into())
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
