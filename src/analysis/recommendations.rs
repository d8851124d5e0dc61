//! Root-cause categorization and remediation ranking
//!
//! Maps bottleneck edges onto a fixed category/solution table and groups
//! them into prioritized remediation recommendations.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::graph::{Edge, NodeId};
use crate::graph::edge::EdgeType;
use crate::rating::{Confidence, Score};

/// Category, solution class, and description for an edge-type label
///
/// Unknown labels map to a generic fallback instead of erroring, so data
/// from older serialized graphs stays analyzable.
pub fn category_for(edge_type: &str) -> (&'static str, &'static str, &'static str) {
    match edge_type {
        "dependency_quality" => (
            "Dependency Issue",
            "Data Quality/Pipeline AI Pilots",
            "An upstream output this deliverable depends on is underperforming",
        ),
        "team_execution" => (
            "Execution Issue",
            "Augmentation/Automation AI Pilots",
            "The producing team's execution is the limiting factor",
        ),
        "process_maturity" => (
            "Process Issue",
            "Process Intelligence AI Pilots",
            "The production process is immature or inconsistent",
        ),
        "system_capabilities" => (
            "System Issue",
            "Intelligent Features AI Pilots",
            "The supporting systems lack needed capabilities",
        ),
        _ => (
            "Unknown",
            "General Improvement",
            "Unrecognized factor type; investigate manually",
        ),
    }
}

/// Category and remediation class for one bottleneck edge
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RootCause {
    pub source: NodeId,
    pub target: NodeId,
    pub edge_type: EdgeType,
    pub score: Option<Score>,
    /// Aggregation confidence behind the score, surfaced so low-evidence
    /// bottleneck calls are visibly flagged
    pub confidence: Confidence,
    pub category: String,
    pub solution_type: String,
    pub description: String,
}

/// Categorize a bottleneck edge via the fixed lookup table
pub fn categorize(edge: &Edge) -> RootCause {
    let (category, solution_type, description) = category_for(edge.edge_type.as_str());
    RootCause {
        source: edge.source.clone(),
        target: edge.target.clone(),
        edge_type: edge.edge_type,
        score: edge.current_score,
        confidence: edge.current_confidence,
        category: category.to_string(),
        solution_type: solution_type.to_string(),
        description: description.to_string(),
    }
}

/// Remediation priority, derived from the worst score in a group
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A group of root causes sharing a solution type
#[derive(Clone, Debug, Serialize)]
pub struct SolutionRecommendation {
    pub solution_type: String,
    pub priority: Priority,
    pub causes: Vec<RootCause>,
}

impl SolutionRecommendation {
    pub fn cause_count(&self) -> usize {
        self.causes.len()
    }
}

/// Group root causes by solution type and rank them
///
/// Priority is High when any grouped cause scores below 2, Medium below
/// 3, else Low. Sorted by priority, then by descending group size.
pub fn solution_recommendations(causes: &[RootCause]) -> Vec<SolutionRecommendation> {
    let mut groups: IndexMap<String, Vec<RootCause>> = IndexMap::new();
    for cause in causes {
        groups
            .entry(cause.solution_type.clone())
            .or_default()
            .push(cause.clone());
    }

    let mut recommendations: Vec<SolutionRecommendation> = groups
        .into_iter()
        .map(|(solution_type, causes)| {
            let worst = causes
                .iter()
                .filter_map(|c| c.score)
                .map(Score::get)
                .fold(f64::INFINITY, f64::min);
            let priority = if worst < 2.0 {
                Priority::High
            } else if worst < 3.0 {
                Priority::Medium
            } else {
                Priority::Low
            };
            SolutionRecommendation {
                solution_type,
                priority,
                causes,
            }
        })
        .collect();

    recommendations.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then(b.cause_count().cmp(&a.cause_count()))
    });
    recommendations
}
