//! Assessment graph management
//!
//! Owns node/edge CRUD for one assessment session and the derived
//! quality model: an output's effective quality is the MIN over its
//! incoming factor edges (weakest-link composition, not an average),
//! because a single severely deficient factor caps the whole output.

pub mod edge;
pub mod node;
pub mod store;
pub mod topology;

pub use edge::{Edge, EdgeType};
pub use node::{GraphId, Node, NodeId, NodeKind};
pub use store::{GraphStore, InMemoryGraphStore};
pub use topology::DependencyTopology;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::errors::{AssessmentError, Result};
use crate::rating::{Confidence, Score};

/// Scores within this distance count as tied bottlenecks. Scores produced
/// by the same aggregation path over identical evidence are bit-identical;
/// the epsilon only guards serialization round-trips.
const SCORE_EPSILON: f64 = 1e-9;

/// Assessment state of one edge, for display surfaces
#[derive(Clone, Debug, Serialize)]
pub struct EdgeSummary {
    pub source: NodeId,
    pub target: NodeId,
    pub edge_type: EdgeType,
    pub score: Option<Score>,
    pub confidence: Confidence,
    pub evidence_count: usize,
    pub updated_at: DateTime<Utc>,
}

/// Main API for one assessment session's graph
pub struct GraphManager {
    graph_id: GraphId,
    store: Arc<dyn GraphStore>,
}

impl GraphManager {
    pub fn new(graph_id: GraphId, store: Arc<dyn GraphStore>) -> Self {
        Self { graph_id, store }
    }

    /// Fresh session backed by in-memory storage
    pub fn in_memory() -> Self {
        Self::new(GraphId::new(), Arc::new(InMemoryGraphStore::new()))
    }

    pub fn graph_id(&self) -> GraphId {
        self.graph_id
    }

    /// Add a node to the graph (replaces an existing node with the same id)
    pub async fn add_node(&self, node: Node) -> Result<()> {
        tracing::debug!(graph = %self.graph_id, node = %node.id, kind = ?node.kind, "add node");
        self.store.put_node(self.graph_id, node).await
    }

    pub async fn get_node(&self, id: &NodeId) -> Result<Option<Node>> {
        self.store.get_node(self.graph_id, id).await
    }

    /// Update an existing node; returns false if the node does not exist
    pub async fn update_node(&self, node: Node) -> Result<bool> {
        if self.store.get_node(self.graph_id, &node.id).await?.is_none() {
            return Ok(false);
        }
        self.store.put_node(self.graph_id, node).await?;
        Ok(true)
    }

    /// Remove a node and all incident edges; returns false if missing
    pub async fn remove_node(&self, id: &NodeId) -> Result<bool> {
        tracing::debug!(graph = %self.graph_id, node = %id, "remove node");
        self.store.remove_node(self.graph_id, id).await
    }

    pub async fn list_nodes(&self) -> Result<Vec<Node>> {
        self.store.list_nodes(self.graph_id).await
    }

    /// Get or create the edge source -> target
    ///
    /// Both endpoints must already exist. An existing edge is returned
    /// as-is when the type matches; `edge_type` is immutable, so a type
    /// mismatch is an invalid-state error.
    pub async fn add_edge(
        &self,
        source: &NodeId,
        target: &NodeId,
        edge_type: EdgeType,
    ) -> Result<Edge> {
        if let Some(existing) = self.store.get_edge(self.graph_id, source, target).await? {
            if existing.edge_type != edge_type {
                return Err(AssessmentError::InvalidState(format!(
                    "Edge {} -> {} already exists with type {}",
                    source, target, existing.edge_type
                )));
            }
            return Ok(existing);
        }

        for id in [source, target] {
            if self.store.get_node(self.graph_id, id).await?.is_none() {
                return Err(AssessmentError::NotFound(format!("Node {} not found", id)));
            }
        }

        let edge = Edge::new(source.clone(), target.clone(), edge_type);
        tracing::debug!(graph = %self.graph_id, %source, %target, %edge_type, "add edge");
        self.store.put_edge(self.graph_id, edge.clone()).await?;
        Ok(edge)
    }

    pub async fn get_edge(&self, source: &NodeId, target: &NodeId) -> Result<Option<Edge>> {
        self.store.get_edge(self.graph_id, source, target).await
    }

    /// Remove an edge; returns false if missing
    pub async fn remove_edge(&self, source: &NodeId, target: &NodeId) -> Result<bool> {
        tracing::debug!(graph = %self.graph_id, %source, %target, "remove edge");
        self.store.remove_edge(self.graph_id, source, target).await
    }

    pub async fn list_edges(&self) -> Result<Vec<Edge>> {
        self.store.list_edges(self.graph_id).await
    }

    pub async fn incoming_edges(&self, target: &NodeId) -> Result<Vec<Edge>> {
        self.store.incoming_edges(self.graph_id, target).await
    }

    pub async fn outgoing_edges(&self, source: &NodeId) -> Result<Vec<Edge>> {
        self.store.outgoing_edges(self.graph_id, source).await
    }

    /// Persist an edge whose score state was recomputed from evidence.
    ///
    /// Crate-internal: the aggregator is the only writer of score state,
    /// which keeps the score-follows-evidence invariant in one place.
    pub(crate) async fn save_edge(&self, edge: Edge) -> Result<()> {
        self.store.put_edge(self.graph_id, edge).await
    }

    /// MIN over the assessed incoming edges of an output
    ///
    /// Returns `None` when the output has no incoming edges or none of
    /// them has been assessed yet.
    pub async fn calculate_output_quality(&self, output_id: &NodeId) -> Result<Option<Score>> {
        let incoming = self.incoming_edges(output_id).await?;
        let min = incoming
            .iter()
            .filter_map(|e| e.current_score)
            .min_by(|a, b| {
                a.get()
                    .partial_cmp(&b.get())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        Ok(min)
    }

    /// Every incoming edge whose score equals the MIN
    ///
    /// Ties are all reported, in store insertion order. Empty when the
    /// output is unassessed.
    pub async fn identify_bottlenecks(&self, output_id: &NodeId) -> Result<Vec<Edge>> {
        let Some(min) = self.calculate_output_quality(output_id).await? else {
            return Ok(Vec::new());
        };
        let incoming = self.incoming_edges(output_id).await?;
        Ok(incoming
            .into_iter()
            .filter(|e| {
                e.current_score
                    .map(|s| (s.get() - min.get()).abs() < SCORE_EPSILON)
                    .unwrap_or(false)
            })
            .collect())
    }

    /// Assessment summary for one edge; `None` when the edge does not exist
    pub async fn edge_assessment_summary(
        &self,
        source: &NodeId,
        target: &NodeId,
    ) -> Result<Option<EdgeSummary>> {
        Ok(self.get_edge(source, target).await?.map(|e| EdgeSummary {
            source: e.source.clone(),
            target: e.target.clone(),
            edge_type: e.edge_type,
            score: e.current_score,
            confidence: e.current_confidence,
            evidence_count: e.evidence.len(),
            updated_at: e.updated_at,
        }))
    }

    /// Dependency topology over the current edge set
    pub async fn dependency_topology(&self) -> Result<DependencyTopology> {
        Ok(DependencyTopology::from_edges(&self.list_edges().await?))
    }
}
