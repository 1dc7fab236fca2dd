use super::*;
use crate::parsers::parse;
use crate::syntax::types::Node;

fn graph(src: &str) -> LayoutGraph {
    LayoutGraph::from_graph(&parse(src).unwrap())
}

// ── Basic construction ────────────────────────────────────────────────────

#[test]
fn test_empty_graph() {
    let lg = LayoutGraph::from_graph(&Graph::new());
    assert_eq!(lg.node_count(), 0);
    assert!(lg.index_edges().is_empty());
    assert_eq!(lg.topological_order(), Some(vec![]));
}

#[test]
fn test_single_node() {
    let lg = graph("flowchart TD\n    A[Alone]");
    assert_eq!(lg.node_count(), 1);
    assert!(lg.index_edges().is_empty());
}

#[test]
fn test_indices_follow_insertion_order() {
    // C, A, B
    let lg = graph("flowchart TD\n    C --> A\n    B --> C");
    assert_eq!(lg.index_edges(), vec![(0, 1), (2, 0)]);
}

#[test]
fn test_parallel_edges_kept() {
    let lg = graph("flowchart TD\n    A --> B\n    A -->|again| B");
    assert_eq!(lg.index_edges(), vec![(0, 1), (0, 1)]);
}

#[test]
fn test_foreign_edge_skipped() {
    let mut g = Graph::new();
    g.add_node(Node::bare("A")).unwrap();
    let lg = LayoutGraph::from_graph(&g);
    assert_eq!(lg.node_count(), 1);
    assert!(lg.index_edges().is_empty());
}

// ── Acyclicity ────────────────────────────────────────────────────────────

#[test]
fn test_dag_topological_order() {
    // C, D, A, B
    let lg = graph("flowchart TD\n    C --> D\n    A --> C\n    B --> C");
    let order = lg.topological_order().unwrap();
    let pos = |v: usize| order.iter().position(|&n| n == v).unwrap();
    assert!(pos(2) < pos(0));
    assert!(pos(3) < pos(0));
    assert!(pos(0) < pos(1));
}

#[test]
fn test_cycle_detected() {
    let lg = graph("flowchart TD\n    A --> B\n    B --> A");
    assert!(lg.topological_order().is_none());
}

#[test]
fn test_self_loop_dropped() {
    let lg = graph("flowchart TD\n    A --> A\n    A --> B");
    assert_eq!(lg.index_edges(), vec![(0, 1)]);
    assert_eq!(lg.topological_order(), Some(vec![0, 1]));
}
