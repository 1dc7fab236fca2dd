//! Layout engine: positions every node of a Graph in a top-down layered
//! drawing.

pub mod graph;
pub mod sugiyama;
pub mod types;

pub use graph::LayoutGraph;
pub use sugiyama::SugiyamaLayout;
pub use types::{Diagram, PositionedNode};

use crate::config::LayoutConfig;
use crate::syntax::types::{Graph, Node, NodeType};

/// Box size of a node as `(width, height)`.
///
/// The width grows with the label and is clamped to the configured bounds;
/// Diamond nodes are taller than all other shapes.
pub fn node_size(node: &Node, config: &LayoutConfig) -> (f64, f64) {
    let text = node.label.chars().count() as f64 * config.char_width + config.label_padding;
    let width = text.max(config.min_node_width).min(config.max_node_width);
    let height = match node.node_type {
        NodeType::Diamond => config.diamond_height,
        _ => config.node_height,
    };
    (width, height)
}

/// Lay out a graph. Total: every graph, including the empty one, gets a
/// Diagram with one positioned node per graph node.
pub fn layout(graph: &Graph, config: &LayoutConfig) -> Diagram {
    let lg = LayoutGraph::from_graph(graph);
    let sizes: Vec<(f64, f64)> = graph.nodes().map(|n| node_size(n, config)).collect();
    let result = SugiyamaLayout::layout(&lg, &sizes, config);

    let nodes: Vec<PositionedNode> = graph
        .nodes()
        .zip(sizes)
        .zip(result.centers.iter().zip(&result.ranks))
        .map(|((node, (width, height)), (&(cx, cy), &rank))| PositionedNode {
            node: node.clone(),
            x: cx - width / 2.0,
            y: cy - height / 2.0,
            width,
            height,
            rank,
        })
        .collect();

    let width = nodes
        .iter()
        .map(PositionedNode::right)
        .fold(config.margin, f64::max)
        + config.margin;
    let height = nodes
        .iter()
        .map(PositionedNode::bottom)
        .fold(config.margin, f64::max)
        + config.margin;

    Diagram {
        graph: graph.clone(),
        nodes,
        width,
        height,
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout.rs"]
mod tests;
