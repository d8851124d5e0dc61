//! Edge data model: factor relationships and their evidence
//!
//! Edges are directed source -> target. The four edge types are the
//! quality factors feeding an output; dependency edges connect two
//! output nodes. `edge_type` is immutable after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::node::NodeId;
use crate::evidence::record::EvidenceRecord;
use crate::rating::{Confidence, Score};

/// One of the four factor relationships feeding an output
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    TeamExecution,
    SystemCapabilities,
    ProcessMaturity,
    /// Connects an upstream output to the output that consumes it
    DependencyQuality,
}

impl EdgeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TeamExecution => "team_execution",
            Self::SystemCapabilities => "system_capabilities",
            Self::ProcessMaturity => "process_maturity",
            Self::DependencyQuality => "dependency_quality",
        }
    }
}

impl std::fmt::Display for EdgeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Directed factor edge with aggregated score state
///
/// Invariant: `current_score` and `current_confidence` always equal the
/// aggregate of `evidence`; an edge with no evidence has `current_score`
/// `None` ("not assessed") and zero confidence.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub edge_type: EdgeType,
    pub current_score: Option<Score>,
    #[serde(default)]
    pub current_confidence: Confidence,
    /// Append-only evidence list
    #[serde(default)]
    pub evidence: Vec<EvidenceRecord>,
    pub updated_at: DateTime<Utc>,
}

impl Edge {
    /// Create an unassessed edge
    pub fn new(source: NodeId, target: NodeId, edge_type: EdgeType) -> Self {
        Self {
            source,
            target,
            edge_type,
            current_score: None,
            current_confidence: Confidence::zero(),
            evidence: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn is_assessed(&self) -> bool {
        self.current_score.is_some()
    }

    pub fn evidence_count(&self) -> usize {
        self.evidence.len()
    }
}
