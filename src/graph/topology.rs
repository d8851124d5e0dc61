//! Dependency topology between output nodes
//!
//! A petgraph view over the `dependency_quality` edges of a graph.
//! Edge direction follows the stored edges: upstream output -> consuming
//! output, so an output's suppliers sit behind its incoming edges.

use indexmap::IndexSet;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use std::collections::{HashMap, HashSet};

use super::edge::{Edge, EdgeType};
use super::node::NodeId;

/// Directed view of output-to-output dependency edges
pub struct DependencyTopology {
    graph: DiGraph<NodeId, ()>,
    node_indices: HashMap<NodeId, NodeIndex>,
}

impl DependencyTopology {
    /// Build from an edge list, keeping only dependency edges
    pub fn from_edges(edges: &[Edge]) -> Self {
        let mut topology = Self {
            graph: DiGraph::new(),
            node_indices: HashMap::new(),
        };
        for edge in edges {
            if edge.edge_type == EdgeType::DependencyQuality {
                let from = topology.get_or_create_node(edge.source.clone());
                let to = topology.get_or_create_node(edge.target.clone());
                if topology.graph.find_edge(from, to).is_none() {
                    topology.graph.add_edge(from, to, ());
                }
            }
        }
        topology
    }

    /// All outputs transitively feeding the given output
    ///
    /// Empty when the output has no dependency edges.
    pub fn upstream_chain(&self, output: &NodeId) -> IndexSet<NodeId> {
        let mut result = IndexSet::new();
        let Some(_) = self.node_indices.get(output) else {
            return result;
        };
        let mut visited = HashSet::new();
        self.collect_upstream(output, &mut visited, &mut result);
        result.shift_remove(output); // Exclude self
        result
    }

    fn collect_upstream(
        &self,
        output: &NodeId,
        visited: &mut HashSet<NodeId>,
        result: &mut IndexSet<NodeId>,
    ) {
        if !visited.insert(output.clone()) {
            return; // Already visited
        }
        result.insert(output.clone());

        if let Some(&idx) = self.node_indices.get(output) {
            for neighbor in self
                .graph
                .neighbors_directed(idx, petgraph::Direction::Incoming)
            {
                let upstream = self.graph[neighbor].clone();
                self.collect_upstream(&upstream, visited, result);
            }
        }
    }

    /// All outputs transitively consuming the given output
    ///
    /// A degraded dependency bottlenecks everything in this set.
    pub fn downstream_impact(&self, output: &NodeId) -> IndexSet<NodeId> {
        let mut result = IndexSet::new();
        let Some(&idx) = self.node_indices.get(output) else {
            return result;
        };
        let mut dfs = Dfs::new(&self.graph, idx);
        while let Some(reached) = dfs.next(&self.graph) {
            if reached != idx {
                result.insert(self.graph[reached].clone());
            }
        }
        result
    }

    /// Detect cyclic dependency declarations between outputs
    ///
    /// A cycle means the stored graph claims two outputs feed each other,
    /// which is a data error worth surfacing to the caller.
    pub fn detect_cycles(&self) -> Vec<Vec<NodeId>> {
        tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|scc| scc.into_iter().map(|idx| self.graph[idx].clone()).collect())
            .collect()
    }

    /// All outputs participating in dependency edges
    pub fn nodes(&self) -> IndexSet<NodeId> {
        self.node_indices.keys().cloned().collect()
    }

    fn get_or_create_node(&mut self, id: NodeId) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(id.clone());
        self.node_indices.insert(id, idx);
        idx
    }
}
