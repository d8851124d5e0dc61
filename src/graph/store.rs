//! Storage abstraction for assessment graphs
//!
//! Trait-based storage keyed by `(GraphId, NodeId)` for nodes and
//! `(GraphId, source, target)` for edges, with an in-memory
//! implementation. A persisted backend can be injected by the
//! surrounding application without touching the core.

use async_trait::async_trait;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::edge::Edge;
use super::node::{GraphId, Node, NodeId};
use crate::errors::Result;

/// Storage trait for graph state (allows test mocks and persisted backends)
///
/// Removal operations report missing ids as `Ok(false)`, never as errors;
/// the caller decides whether that is fatal.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Insert or replace a node
    async fn put_node(&self, graph: GraphId, node: Node) -> Result<()>;

    /// Get a node by id
    async fn get_node(&self, graph: GraphId, id: &NodeId) -> Result<Option<Node>>;

    /// Remove a node and all incident edges
    async fn remove_node(&self, graph: GraphId, id: &NodeId) -> Result<bool>;

    /// List all nodes in insertion order
    async fn list_nodes(&self, graph: GraphId) -> Result<Vec<Node>>;

    /// Insert or replace an edge
    async fn put_edge(&self, graph: GraphId, edge: Edge) -> Result<()>;

    /// Get an edge by endpoints
    async fn get_edge(
        &self,
        graph: GraphId,
        source: &NodeId,
        target: &NodeId,
    ) -> Result<Option<Edge>>;

    /// Remove an edge by endpoints
    async fn remove_edge(
        &self,
        graph: GraphId,
        source: &NodeId,
        target: &NodeId,
    ) -> Result<bool>;

    /// List all edges in insertion order
    async fn list_edges(&self, graph: GraphId) -> Result<Vec<Edge>>;

    /// All edges pointing at `target`, in insertion order
    async fn incoming_edges(&self, graph: GraphId, target: &NodeId) -> Result<Vec<Edge>>;

    /// All edges leaving `source`, in insertion order
    async fn outgoing_edges(&self, graph: GraphId, source: &NodeId) -> Result<Vec<Edge>>;
}

/// Per-graph node and edge tables
///
/// IndexMap keeps listing order deterministic (insertion order), which
/// bottleneck tie reporting and match ranking rely on.
#[derive(Default)]
struct GraphState {
    nodes: IndexMap<NodeId, Node>,
    edges: IndexMap<(NodeId, NodeId), Edge>,
}

/// In-memory graph storage
pub struct InMemoryGraphStore {
    graphs: Arc<RwLock<HashMap<GraphId, GraphState>>>,
}

impl InMemoryGraphStore {
    pub fn new() -> Self {
        Self {
            graphs: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryGraphStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GraphStore for InMemoryGraphStore {
    async fn put_node(&self, graph: GraphId, node: Node) -> Result<()> {
        let mut graphs = self.graphs.write().await;
        let state = graphs.entry(graph).or_default();
        state.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    async fn get_node(&self, graph: GraphId, id: &NodeId) -> Result<Option<Node>> {
        let graphs = self.graphs.read().await;
        Ok(graphs.get(&graph).and_then(|s| s.nodes.get(id).cloned()))
    }

    async fn remove_node(&self, graph: GraphId, id: &NodeId) -> Result<bool> {
        let mut graphs = self.graphs.write().await;
        let Some(state) = graphs.get_mut(&graph) else {
            return Ok(false);
        };
        let removed = state.nodes.shift_remove(id).is_some();
        if removed {
            // No dangling edges: drop everything incident to the node
            state
                .edges
                .retain(|(source, target), _| source != id && target != id);
        }
        Ok(removed)
    }

    async fn list_nodes(&self, graph: GraphId) -> Result<Vec<Node>> {
        let graphs = self.graphs.read().await;
        Ok(graphs
            .get(&graph)
            .map(|s| s.nodes.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn put_edge(&self, graph: GraphId, edge: Edge) -> Result<()> {
        let mut graphs = self.graphs.write().await;
        let state = graphs.entry(graph).or_default();
        state
            .edges
            .insert((edge.source.clone(), edge.target.clone()), edge);
        Ok(())
    }

    async fn get_edge(
        &self,
        graph: GraphId,
        source: &NodeId,
        target: &NodeId,
    ) -> Result<Option<Edge>> {
        let graphs = self.graphs.read().await;
        Ok(graphs
            .get(&graph)
            .and_then(|s| s.edges.get(&(source.clone(), target.clone())).cloned()))
    }

    async fn remove_edge(
        &self,
        graph: GraphId,
        source: &NodeId,
        target: &NodeId,
    ) -> Result<bool> {
        let mut graphs = self.graphs.write().await;
        let Some(state) = graphs.get_mut(&graph) else {
            return Ok(false);
        };
        Ok(state
            .edges
            .shift_remove(&(source.clone(), target.clone()))
            .is_some())
    }

    async fn list_edges(&self, graph: GraphId) -> Result<Vec<Edge>> {
        let graphs = self.graphs.read().await;
        Ok(graphs
            .get(&graph)
            .map(|s| s.edges.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn incoming_edges(&self, graph: GraphId, target: &NodeId) -> Result<Vec<Edge>> {
        let graphs = self.graphs.read().await;
        Ok(graphs
            .get(&graph)
            .map(|s| {
                s.edges
                    .values()
                    .filter(|e| &e.target == target)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn outgoing_edges(&self, graph: GraphId, source: &NodeId) -> Result<Vec<Edge>> {
        let graphs = self.graphs.read().await;
        Ok(graphs
            .get(&graph)
            .map(|s| {
                s.edges
                    .values()
                    .filter(|e| &e.source == source)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::edge::EdgeType;
    use crate::graph::node::NodeKind;

    fn output(id: &str) -> Node {
        Node::new(id, NodeKind::Output, id)
    }

    #[tokio::test]
    async fn test_put_and_get_node() {
        let store = InMemoryGraphStore::new();
        let graph = GraphId::new();
        store.put_node(graph, output("forecast")).await.unwrap();

        let node = store.get_node(graph, &"forecast".into()).await.unwrap();
        assert!(node.is_some());
        assert_eq!(node.unwrap().kind, NodeKind::Output);
    }

    #[tokio::test]
    async fn test_get_node_missing() {
        let store = InMemoryGraphStore::new();
        let graph = GraphId::new();
        let node = store.get_node(graph, &"nope".into()).await.unwrap();
        assert!(node.is_none());
    }

    #[tokio::test]
    async fn test_remove_node_cascades_edges() {
        let store = InMemoryGraphStore::new();
        let graph = GraphId::new();
        store.put_node(graph, output("forecast")).await.unwrap();
        store
            .put_node(graph, Node::new("crm", NodeKind::System, "CRM"))
            .await
            .unwrap();
        store
            .put_edge(
                graph,
                Edge::new("crm".into(), "forecast".into(), EdgeType::SystemCapabilities),
            )
            .await
            .unwrap();

        let removed = store.remove_node(graph, &"crm".into()).await.unwrap();
        assert!(removed);
        assert!(store.list_edges(graph).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_node_missing_returns_false() {
        let store = InMemoryGraphStore::new();
        let graph = GraphId::new();
        assert!(!store.remove_node(graph, &"nope".into()).await.unwrap());
    }

    #[tokio::test]
    async fn test_incoming_edges_filters_by_target() {
        let store = InMemoryGraphStore::new();
        let graph = GraphId::new();
        for id in ["team", "crm", "forecast", "pipeline"] {
            store.put_node(graph, output(id)).await.unwrap();
        }
        store
            .put_edge(
                graph,
                Edge::new("team".into(), "forecast".into(), EdgeType::TeamExecution),
            )
            .await
            .unwrap();
        store
            .put_edge(
                graph,
                Edge::new("crm".into(), "forecast".into(), EdgeType::SystemCapabilities),
            )
            .await
            .unwrap();
        store
            .put_edge(
                graph,
                Edge::new("crm".into(), "pipeline".into(), EdgeType::SystemCapabilities),
            )
            .await
            .unwrap();

        let incoming = store.incoming_edges(graph, &"forecast".into()).await.unwrap();
        assert_eq!(incoming.len(), 2);
        let outgoing = store.outgoing_edges(graph, &"crm".into()).await.unwrap();
        assert_eq!(outgoing.len(), 2);
    }

    #[tokio::test]
    async fn test_graphs_are_isolated() {
        let store = InMemoryGraphStore::new();
        let g1 = GraphId::new();
        let g2 = GraphId::new();
        store.put_node(g1, output("forecast")).await.unwrap();

        assert_eq!(store.list_nodes(g1).await.unwrap().len(), 1);
        assert!(store.list_nodes(g2).await.unwrap().is_empty());
    }
}
