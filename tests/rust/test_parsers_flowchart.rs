use super::*;
use crate::parsers::parse;
use crate::syntax::types::{Node, NodeType};

fn node<'g>(g: &'g Graph, id: &str) -> &'g Node {
    g.node(id)
        .unwrap_or_else(|| panic!("node {id} missing"))
}

#[test]
fn test_auto_synthesis() {
    let g = parse("flowchart TD\n    A --> B").unwrap();
    assert_eq!(g.node_count(), 2);
    assert_eq!(node(&g, "A"), &Node::new("A", "A", NodeType::Rectangle));
    assert_eq!(node(&g, "B"), &Node::new("B", "B", NodeType::Rectangle));
    assert_eq!(g.edge_count(), 1);
    let e = &g.edges()[0];
    assert_eq!((e.source.as_str(), e.target.as_str()), ("A", "B"));
    assert!(e.label.is_none());
    assert!(!e.animated);
}

#[test]
fn test_labeled_edge() {
    let g = parse("flowchart TD\n    A[Start] -->|Yes| B{Check}").unwrap();
    assert_eq!(node(&g, "A"), &Node::new("A", "Start", NodeType::Rectangle));
    assert_eq!(node(&g, "B"), &Node::new("B", "Check", NodeType::Diamond));
    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.edges()[0].label.as_deref(), Some("Yes"));
}

#[test]
fn test_no_nodes_found() {
    assert_eq!(
        parse("flowchart TD\n%% just a comment"),
        Err(Error::NoNodesFound)
    );
    assert_eq!(parse("flowchart TD\nsome prose"), Err(Error::NoNodesFound));
}

#[test]
fn test_empty_input() {
    assert_eq!(parse(""), Err(Error::EmptyOrInvalidInput));
    assert_eq!(parse("  \n\t "), Err(Error::EmptyOrInvalidInput));
}

#[test]
fn test_first_declaration_wins() {
    let src = "flowchart TD\n    A[First] --> B\n    A{Second} --> C\n";
    let g = parse(src).unwrap();
    assert_eq!(node(&g, "A"), &Node::new("A", "First", NodeType::Rectangle));
    assert_eq!(g.edge_count(), 2);
}

#[test]
fn test_bare_reference_before_declaration_keeps_synthesized_node() {
    // Synthesis happens when the edge is recorded, so a later declaration
    // is a redeclaration and is ignored.
    let src = "flowchart TD\n    A --> B\n    B{Decide}\n";
    let g = parse(src).unwrap();
    assert_eq!(node(&g, "B"), &Node::bare("B"));
}

#[test]
fn test_declaration_on_edge_line_precedes_synthesis() {
    let g = parse("flowchart TD\n    A --> B((Done))\n").unwrap();
    assert_eq!(node(&g, "B").node_type, NodeType::Circle);
    assert_eq!(node(&g, "B").label, "Done");
    let ids: Vec<&str> = g.nodes().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B"]);
}

#[test]
fn test_inline_label_adds_no_nodes() {
    let g = parse("flowchart TD\n    A -- retry(3) --> B").unwrap();
    let ids: Vec<&str> = g.nodes().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B"]);
    assert_eq!(g.edges()[0].label.as_deref(), Some("retry(3)"));
}

#[test]
fn test_dotted_and_thick_edges() {
    let src = "flowchart TD\n    A -.-> B\n    B ==> C\n    C -.->|later| D\n";
    let g = parse(src).unwrap();
    let animated: Vec<bool> = g.edges().iter().map(|e| e.animated).collect();
    assert_eq!(animated, vec![true, false, true]);
    assert_eq!(g.edges()[2].label.as_deref(), Some("later"));
}

#[test]
fn test_structural_lines_skipped() {
    let src = "\
flowchart TD
    %% comment
    subgraph Intake
        A[Receive] --> B[Triage]
    end
    style A fill:#f9f
    classDef hot fill:#f00
    class B hot
";
    let g = parse(src).unwrap();
    assert_eq!(g.node_count(), 2);
    assert_eq!(g.edge_count(), 1);
    assert!(!g.contains_node("subgraph"));
    assert!(!g.contains_node("end"));
}

#[test]
fn test_standalone_declarations_keep_insertion_order() {
    let src = "flowchart TD\n    Z[Last]\n    M((Mid))\n    A --> Z\n";
    let g = parse(src).unwrap();
    let ids: Vec<&str> = g.nodes().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["Z", "M", "A"]);
    assert!(g.is_orphan("M"));
}

#[test]
fn test_headerless_text_still_parses() {
    let g = parse("A[One] --> B[Two]").unwrap();
    assert_eq!(g.node_count(), 2);
}

#[test]
fn test_garbage_lines_do_not_fail() {
    let src = "flowchart TD\n    A[Start] --> B\n    ??? nonsense !!!\n    B --> C\n";
    let g = parse(src).unwrap();
    assert_eq!(g.edge_count(), 2);
}

#[test]
fn test_builder_line_by_line() {
    let mut builder = GraphBuilder::new();
    builder.apply(1, parse_line("flowchart TD"));
    builder.apply(2, parse_line("A{Ok?} -->|no| B"));
    let g = builder.finish().unwrap();
    assert_eq!(g.node("A").unwrap().node_type, NodeType::Diamond);
    assert_eq!(g.edges()[0].label.as_deref(), Some("no"));
}

#[test]
fn test_empty_builder_fails() {
    assert_eq!(GraphBuilder::new().finish(), Err(Error::NoNodesFound));
}

#[test]
fn test_self_loop_edge() {
    let g = parse("flowchart TD\n    A[Retry] --> A").unwrap();
    assert_eq!(g.node_count(), 1);
    assert_eq!(g.edge_count(), 1);
}
