//! Bottleneck and gap analysis over an assessment graph
//!
//! Turns raw bottleneck edges into human-actionable analysis: root-cause
//! categories, gap severity against a required quality, remediation
//! recommendations, and cross-output comparison.

pub mod gaps;
pub mod recommendations;

pub use gaps::{gap_severity, gap_stars, gap_summary, GapSeverity, GapSummary};
pub use recommendations::{
    categorize, category_for, solution_recommendations, Priority, RootCause,
    SolutionRecommendation,
};

use serde::Serialize;
use std::sync::Arc;

use crate::errors::Result;
use crate::graph::{GraphManager, NodeId};
use crate::rating::Score;

/// Analysis of one output's quality state
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutputAnalysis {
    /// No incoming edge has been assessed yet
    NotAssessed { output_id: NodeId },
    Assessed {
        output_id: NodeId,
        /// MIN over assessed incoming edges
        quality: Score,
        /// Every tied weakest edge, categorized
        bottlenecks: Vec<RootCause>,
        /// Present when a required quality was supplied
        gap: Option<GapSummary>,
    },
}

impl OutputAnalysis {
    pub fn is_assessed(&self) -> bool {
        matches!(self, Self::Assessed { .. })
    }
}

/// Quality standing of one output in a comparison
#[derive(Clone, Debug, Serialize)]
pub struct OutputStanding {
    pub output_id: NodeId,
    pub quality: Option<Score>,
    pub bottleneck_count: usize,
}

/// Cross-output comparison, worst first
#[derive(Clone, Debug, Serialize)]
pub struct OutputComparison {
    /// Standings sorted ascending by quality (unassessed sorts as 0)
    pub standings: Vec<OutputStanding>,
    pub lowest: Option<NodeId>,
    pub highest: Option<NodeId>,
}

/// Read-side analysis over a graph manager
pub struct BottleneckAnalyzer {
    manager: Arc<GraphManager>,
}

impl BottleneckAnalyzer {
    pub fn new(manager: Arc<GraphManager>) -> Self {
        Self { manager }
    }

    /// Analyze one output: quality, bottlenecks, and optional gap
    pub async fn analyze_output(
        &self,
        output_id: &NodeId,
        required_quality: Option<Score>,
    ) -> Result<OutputAnalysis> {
        let Some(quality) = self.manager.calculate_output_quality(output_id).await? else {
            tracing::debug!(output = %output_id, "output not assessed");
            return Ok(OutputAnalysis::NotAssessed {
                output_id: output_id.clone(),
            });
        };

        let bottleneck_edges = self.manager.identify_bottlenecks(output_id).await?;
        let bottlenecks: Vec<RootCause> = bottleneck_edges.iter().map(categorize).collect();
        let gap = required_quality.map(|required| gap_summary(required.get() - quality.get()));

        tracing::info!(
            output = %output_id,
            quality = quality.get(),
            bottleneck_count = bottlenecks.len(),
            "output analyzed"
        );

        Ok(OutputAnalysis::Assessed {
            output_id: output_id.clone(),
            quality,
            bottlenecks,
            gap,
        })
    }

    /// Ranked remediation recommendations for one output's bottlenecks
    pub async fn recommendations_for(
        &self,
        output_id: &NodeId,
    ) -> Result<Vec<SolutionRecommendation>> {
        match self.analyze_output(output_id, None).await? {
            OutputAnalysis::Assessed { bottlenecks, .. } => {
                Ok(solution_recommendations(&bottlenecks))
            }
            OutputAnalysis::NotAssessed { .. } => Ok(Vec::new()),
        }
    }

    /// Compare outputs by quality, worst first
    ///
    /// Unassessed outputs sort as quality 0 (they are the most suspect,
    /// not the best).
    pub async fn compare_outputs(&self, output_ids: &[NodeId]) -> Result<OutputComparison> {
        let mut standings = Vec::with_capacity(output_ids.len());
        for output_id in output_ids {
            let quality = self.manager.calculate_output_quality(output_id).await?;
            let bottleneck_count = self.manager.identify_bottlenecks(output_id).await?.len();
            standings.push(OutputStanding {
                output_id: output_id.clone(),
                quality,
                bottleneck_count,
            });
        }

        standings.sort_by(|a, b| {
            let qa = a.quality.map(Score::get).unwrap_or(0.0);
            let qb = b.quality.map(Score::get).unwrap_or(0.0);
            qa.partial_cmp(&qb).unwrap_or(std::cmp::Ordering::Equal)
        });

        let lowest = standings.first().map(|s| s.output_id.clone());
        let highest = standings.last().map(|s| s.output_id.clone());
        Ok(OutputComparison {
            standings,
            lowest,
            highest,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::record::EvidenceRecord;
    use crate::graph::{EdgeType, Node, NodeKind};
    use crate::rating::{Confidence, Tier};

    async fn manager_with_scored_output(
        output: &str,
        factors: &[(&str, EdgeType, f64)],
    ) -> Arc<GraphManager> {
        let manager = Arc::new(GraphManager::in_memory());
        manager
            .add_node(Node::new(output, NodeKind::Output, output))
            .await
            .unwrap();
        for (id, edge_type, score) in factors {
            manager
                .add_node(Node::new(*id, NodeKind::Process, *id))
                .await
                .unwrap();
            let mut edge = manager
                .add_edge(&NodeId::from(*id), &NodeId::from(output), *edge_type)
                .await
                .unwrap();
            edge.current_score = Some(Score::new(*score).unwrap());
            edge.current_confidence = Confidence::new(0.6).unwrap();
            edge.evidence.push(EvidenceRecord::new(
                "seed",
                Tier::new(3).unwrap(),
                Score::new(*score).unwrap(),
                None,
            ));
            manager.save_edge(edge).await.unwrap();
        }
        manager
    }

    #[tokio::test]
    async fn test_analyze_unassessed_output() {
        let manager = Arc::new(GraphManager::in_memory());
        manager
            .add_node(Node::new("forecast", NodeKind::Output, "Forecast"))
            .await
            .unwrap();
        let analyzer = BottleneckAnalyzer::new(manager);

        let analysis = analyzer
            .analyze_output(&"forecast".into(), None)
            .await
            .unwrap();
        assert!(!analysis.is_assessed());
    }

    #[tokio::test]
    async fn test_analyze_output_with_gap() {
        let manager = manager_with_scored_output(
            "forecast",
            &[
                ("team", EdgeType::TeamExecution, 3.0),
                ("process", EdgeType::ProcessMaturity, 2.0),
            ],
        )
        .await;
        let analyzer = BottleneckAnalyzer::new(manager);

        let analysis = analyzer
            .analyze_output(&"forecast".into(), Some(Score::new(4.0).unwrap()))
            .await
            .unwrap();

        match analysis {
            OutputAnalysis::Assessed {
                quality,
                bottlenecks,
                gap,
                ..
            } => {
                assert_eq!(quality.get(), 2.0);
                assert_eq!(bottlenecks.len(), 1);
                assert_eq!(bottlenecks[0].category, "Process Issue");
                let gap = gap.unwrap();
                assert_eq!(gap.gap, 2.0);
                assert_eq!(gap.gap_stars, 2);
                assert_eq!(gap.severity, GapSeverity::Moderate);
            }
            other => panic!("expected Assessed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_recommendations_for_bottlenecked_output() {
        let manager = manager_with_scored_output(
            "forecast",
            &[
                ("team", EdgeType::TeamExecution, 1.5),
                ("crm", EdgeType::SystemCapabilities, 1.5),
            ],
        )
        .await;
        let analyzer = BottleneckAnalyzer::new(manager);

        let recs = analyzer.recommendations_for(&"forecast".into()).await.unwrap();
        assert_eq!(recs.len(), 2);
        assert!(recs.iter().all(|r| r.priority == Priority::High));
    }

    #[tokio::test]
    async fn test_compare_outputs_orders_worst_first() {
        let manager = Arc::new(GraphManager::in_memory());
        for (output, score) in [("forecast", 2.0), ("plan", 4.0)] {
            manager
                .add_node(Node::new(output, NodeKind::Output, output))
                .await
                .unwrap();
            let factor = format!("{}_team", output);
            manager
                .add_node(Node::new(factor.clone(), NodeKind::Team, factor.clone()))
                .await
                .unwrap();
            let mut edge = manager
                .add_edge(
                    &NodeId::from(factor.as_str()),
                    &NodeId::from(output),
                    EdgeType::TeamExecution,
                )
                .await
                .unwrap();
            edge.current_score = Some(Score::new(score).unwrap());
            edge.evidence.push(EvidenceRecord::new(
                "seed",
                Tier::new(3).unwrap(),
                Score::new(score).unwrap(),
                None,
            ));
            manager.save_edge(edge).await.unwrap();
        }
        // One never-assessed output
        manager
            .add_node(Node::new("report", NodeKind::Output, "report"))
            .await
            .unwrap();

        let analyzer = BottleneckAnalyzer::new(manager);
        let comparison = analyzer
            .compare_outputs(&["forecast".into(), "plan".into(), "report".into()])
            .await
            .unwrap();

        // Unassessed sorts as 0 and therefore lowest
        assert_eq!(comparison.lowest, Some("report".into()));
        assert_eq!(comparison.highest, Some("plan".into()));
        assert_eq!(comparison.standings.len(), 3);
        assert!(comparison.standings[0].quality.is_none());
    }

    #[tokio::test]
    async fn test_compare_outputs_empty() {
        let manager = Arc::new(GraphManager::in_memory());
        let analyzer = BottleneckAnalyzer::new(manager);
        let comparison = analyzer.compare_outputs(&[]).await.unwrap();
        assert!(comparison.standings.is_empty());
        assert!(comparison.lowest.is_none());
        assert!(comparison.highest.is_none());
    }
}
