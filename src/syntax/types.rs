//! Data model for flowchart graphs.
//!
//! `NodeType`, `Node`, `Edge` and `Graph` are what the parser produces, what
//! the layout engine positions and what the editing surface mutates before
//! the graph is serialized back to DSL text.
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::EditError;

// ─── NodeType ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    #[default]
    Rectangle, // id[Label]
    Diamond,       // id{Label}
    Rounded,       // id(Label) or id([Label])
    Hexagon,       // id{{Label}}
    Parallelogram, // id[/Label/] or id[\Label\]
    Cylinder,      // id[(Label)]
    Circle,        // id((Label))
}

impl NodeType {
    pub const ALL: [NodeType; 7] = [
        NodeType::Rectangle,
        NodeType::Diamond,
        NodeType::Rounded,
        NodeType::Hexagon,
        NodeType::Parallelogram,
        NodeType::Cylinder,
        NodeType::Circle,
    ];
}

// ─── Node ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Identifier, a non-empty run of word characters (e.g. "A", "step_2").
    pub id: String,
    /// Display label. May be empty.
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default)]
    pub node_type: NodeType,
}

impl Node {
    pub fn new(id: impl Into<String>, label: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            node_type,
        }
    }

    /// Node synthesized for an id only ever referenced by an edge:
    /// a Rectangle labelled with its own id.
    pub fn bare(id: impl Into<String>) -> Self {
        let id = id.into();
        let label = id.clone();
        Self {
            id,
            label,
            node_type: NodeType::Rectangle,
        }
    }
}

/// True if `s` is usable as a node id: one or more word characters.
pub fn is_node_id(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_word_char)
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

// ─── Edge ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Generated id, unique within one graph but not stable across parses.
    #[serde(default)]
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Dashed/dotted connector (`-.->`).
    #[serde(default)]
    pub animated: bool,
}

// ─── Graph ───────────────────────────────────────────────────────────────────

/// A flowchart graph: nodes unique by id in insertion order, edges in order.
///
/// Every edge endpoint names a node of the same graph. Construction paths
/// (the builder, [`Graph::from_parts`], deserialization) synthesize missing
/// endpoints and the edit operations refuse or cascade changes that would
/// leave an edge dangling. Node ids are always runs of word characters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "GraphRepr", into = "GraphRepr")]
pub struct Graph {
    nodes: IndexMap<String, Node>,
    edges: Vec<Edge>,
}

/// Wire shape of a graph: plain node and edge lists.
#[derive(Serialize, Deserialize)]
struct GraphRepr {
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
}

impl TryFrom<GraphRepr> for Graph {
    type Error = EditError;

    fn try_from(repr: GraphRepr) -> Result<Self, EditError> {
        Graph::from_parts(repr.nodes, repr.edges)
    }
}

impl From<Graph> for GraphRepr {
    fn from(graph: Graph) -> Self {
        GraphRepr {
            nodes: graph.nodes.into_values().collect(),
            edges: graph.edges,
        }
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from loose node and edge lists, restoring the invariants:
    /// the first node per id wins, missing endpoints become Rectangle nodes,
    /// and empty or repeated edge ids are regenerated.
    ///
    /// Fails with `InvalidNodeId` if a node or an edge endpoint names an id
    /// the parser could not read back.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, EditError> {
        let mut graph = Graph::new();
        for node in nodes {
            if !is_node_id(&node.id) {
                return Err(EditError::InvalidNodeId(node.id));
            }
            graph.insert_node_if_absent(node);
        }
        for mut edge in edges {
            for id in [&edge.source, &edge.target] {
                if !is_node_id(id) {
                    return Err(EditError::InvalidNodeId(id.clone()));
                }
            }
            graph.ensure_node(&edge.source);
            graph.ensure_node(&edge.target);
            if edge.id.is_empty() || graph.edge(&edge.id).is_some() {
                edge.id = graph.next_edge_id(&edge.source, &edge.target);
            }
            graph.edges.push(edge);
        }
        Ok(graph)
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// A node touched by no edge.
    pub fn is_orphan(&self, id: &str) -> bool {
        !self.edges.iter().any(|e| e.source == id || e.target == id)
    }

    // ── Builder primitives ───────────────────────────────────────────────────

    /// First declaration wins: insert only if the id is not present.
    /// Returns true if the node was inserted.
    pub(crate) fn insert_node_if_absent(&mut self, node: Node) -> bool {
        if self.nodes.contains_key(&node.id) {
            return false;
        }
        self.nodes.insert(node.id.clone(), node);
        true
    }

    /// Ensure a node exists, synthesizing a Rectangle labelled with the id.
    /// Returns true if a node was synthesized.
    pub(crate) fn ensure_node(&mut self, id: &str) -> bool {
        if self.nodes.contains_key(id) {
            return false;
        }
        debug!(id = id; "Synthesizing node for undeclared edge endpoint");
        self.nodes.insert(id.to_string(), Node::bare(id));
        true
    }

    /// Append an edge between existing nodes with a freshly generated id.
    pub(crate) fn push_edge(
        &mut self,
        source: &str,
        target: &str,
        label: Option<String>,
        animated: bool,
    ) -> &Edge {
        let id = self.next_edge_id(source, target);
        self.edges.push(Edge {
            id,
            source: source.to_string(),
            target: target.to_string(),
            label,
            animated,
        });
        &self.edges[self.edges.len() - 1]
    }

    fn next_edge_id(&self, source: &str, target: &str) -> String {
        let mut seq = self.edges.len();
        loop {
            let candidate = format!("e{seq}-{source}-{target}");
            if self.edge(&candidate).is_none() {
                return candidate;
            }
            seq += 1;
        }
    }

    // ── Edit operations ──────────────────────────────────────────────────────

    pub fn add_node(&mut self, node: Node) -> Result<(), EditError> {
        if !is_node_id(&node.id) {
            return Err(EditError::InvalidNodeId(node.id));
        }
        if self.nodes.contains_key(&node.id) {
            return Err(EditError::DuplicateNode(node.id));
        }
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Remove a node and every edge touching it.
    pub fn remove_node(&mut self, id: &str) -> Result<Node, EditError> {
        let node = self
            .nodes
            .shift_remove(id)
            .ok_or_else(|| EditError::UnknownNode(id.to_string()))?;
        self.edges.retain(|e| e.source != id && e.target != id);
        Ok(node)
    }

    pub fn relabel_node(&mut self, id: &str, label: impl Into<String>) -> Result<(), EditError> {
        let node = self.node_mut(id)?;
        node.label = label.into();
        Ok(())
    }

    pub fn retype_node(&mut self, id: &str, node_type: NodeType) -> Result<(), EditError> {
        let node = self.node_mut(id)?;
        node.node_type = node_type;
        Ok(())
    }

    /// Connect two existing nodes. Returns the new edge.
    pub fn add_edge(
        &mut self,
        source: &str,
        target: &str,
        label: Option<String>,
    ) -> Result<&Edge, EditError> {
        self.require_node(source)?;
        self.require_node(target)?;
        Ok(self.push_edge(source, target, label, false))
    }

    pub fn remove_edge(&mut self, id: &str) -> Result<Edge, EditError> {
        let pos = self.edge_position(id)?;
        Ok(self.edges.remove(pos))
    }

    /// Set or clear an edge label. An empty label clears it.
    pub fn relabel_edge(&mut self, id: &str, label: Option<String>) -> Result<(), EditError> {
        let pos = self.edge_position(id)?;
        self.edges[pos].label = label.filter(|l| !l.is_empty());
        Ok(())
    }

    pub fn reconnect_edge(&mut self, id: &str, source: &str, target: &str) -> Result<(), EditError> {
        let pos = self.edge_position(id)?;
        self.require_node(source)?;
        self.require_node(target)?;
        let edge = &mut self.edges[pos];
        edge.source = source.to_string();
        edge.target = target.to_string();
        Ok(())
    }

    pub fn set_edge_animated(&mut self, id: &str, animated: bool) -> Result<(), EditError> {
        let pos = self.edge_position(id)?;
        self.edges[pos].animated = animated;
        Ok(())
    }

    fn node_mut(&mut self, id: &str) -> Result<&mut Node, EditError> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| EditError::UnknownNode(id.to_string()))
    }

    fn require_node(&self, id: &str) -> Result<(), EditError> {
        if self.nodes.contains_key(id) {
            Ok(())
        } else {
            Err(EditError::UnknownNode(id.to_string()))
        }
    }

    fn edge_position(&self, id: &str) -> Result<usize, EditError> {
        self.edges
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| EditError::UnknownEdge(id.to_string()))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
