//! Layout output: positioned nodes and the diagram handed to the editing
//! surface.

use serde::{Deserialize, Serialize};

use crate::syntax::types::{Graph, Node};

// ─── PositionedNode ──────────────────────────────────────────────────────────

/// A node with its box. `(x, y)` is the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedNode {
    #[serde(flatten)]
    pub node: Node,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Layer index, top to bottom.
    #[serde(default)]
    pub rank: usize,
}

impl PositionedNode {
    pub fn id(&self) -> &str {
        &self.node.id
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True if the two boxes share interior area. Touching edges do not count.
    pub fn overlaps(&self, other: &PositionedNode) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

// ─── Diagram ─────────────────────────────────────────────────────────────────

/// A graph together with the positions of all of its nodes.
///
/// `nodes` follows the graph's node insertion order. `width` and `height`
/// cover the whole drawing including its margin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    pub graph: Graph,
    pub nodes: Vec<PositionedNode>,
    pub width: f64,
    pub height: f64,
}

impl Diagram {
    pub fn position(&self, id: &str) -> Option<&PositionedNode> {
        self.nodes.iter().find(|n| n.node.id == id)
    }
}
