//! LayoutGraph: the rank constraints of a flowchart Graph as a petgraph
//! DiGraph.
//!
//! Node indices follow the graph's node insertion order and edge indices
//! follow edge order, so everything derived from them is deterministic.
//! Self-loops carry no rank constraint and are left out.

use std::collections::HashMap;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::syntax::types::Graph;

pub struct LayoutGraph {
    pub digraph: DiGraph<(), ()>,
}

impl LayoutGraph {
    pub fn from_graph(graph: &Graph) -> Self {
        let mut digraph: DiGraph<(), ()> =
            DiGraph::with_capacity(graph.node_count(), graph.edge_count());
        let mut node_index: HashMap<&str, NodeIndex> = HashMap::new();

        for node in graph.nodes() {
            node_index.insert(node.id.as_str(), digraph.add_node(()));
        }

        for edge in graph.edges() {
            // Graph keeps every endpoint present; a miss means a foreign edge.
            let (Some(&src), Some(&tgt)) = (
                node_index.get(edge.source.as_str()),
                node_index.get(edge.target.as_str()),
            ) else {
                continue;
            };
            if src != tgt {
                digraph.add_edge(src, tgt, ());
            }
        }

        Self { digraph }
    }

    pub fn node_count(&self) -> usize {
        self.digraph.node_count()
    }

    /// Node positions in topological order, or None if the graph has cycles.
    pub fn topological_order(&self) -> Option<Vec<usize>> {
        toposort(&self.digraph, None)
            .ok()
            .map(|indices| indices.into_iter().map(NodeIndex::index).collect())
    }

    /// Edges as `(source, target)` positions in node insertion order.
    pub fn index_edges(&self) -> Vec<(usize, usize)> {
        self.digraph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index()))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_graph.rs"]
mod tests;
