use super::*;
use crate::parsers::parse;
use crate::syntax::types::NodeType;
use proptest::prelude::*;

fn render(graph: &Graph) -> String {
    DslRenderer::new().render(graph)
}

fn reparse(graph: &Graph) -> Graph {
    parse(&render(graph)).unwrap()
}

// ── Layout of the text ────────────────────────────────────────────────────

#[test]
fn test_labeled_edge() {
    let g = parse("flowchart TD\n    A[Start] -->|Yes| B{Check}").unwrap();
    assert_eq!(render(&g), "flowchart TD\n    A[Start] -->|Yes| B{Check}\n");
}

#[test]
fn test_declare_once_then_bare() {
    let g = parse("flowchart TD\n    A --> B\n    B --> C\n    C --> A").unwrap();
    assert_eq!(
        render(&g),
        "flowchart TD\n    A[A] --> B[B]\n    B --> C[C]\n    C --> A\n"
    );
}

#[test]
fn test_orphans_last_in_insertion_order() {
    let g = parse("flowchart TD\n    Z((Lonely))\n    A --> B\n    Y[/Also/]").unwrap();
    assert_eq!(
        render(&g),
        "flowchart TD\n    A[A] --> B[B]\n    Z((Lonely))\n    Y[/Also/]\n"
    );
}

#[test]
fn test_animated_edges_dotted() {
    let g = parse("flowchart TD\n    A -.-> B\n    B -.->|later| C\n    C ==> D").unwrap();
    let text = render(&g);
    assert!(text.contains("A[A] -.-> B[B]"), "{text}");
    assert!(text.contains("B -.->|later| C[C]"), "{text}");
    assert!(text.contains("C --> D[D]"), "{text}");
}

#[test]
fn test_all_shapes() {
    let mut g = Graph::new();
    for (i, node_type) in NodeType::ALL.into_iter().enumerate() {
        g.add_node(Node::new(format!("N{i}"), "L", node_type)).unwrap();
    }
    assert_eq!(
        render(&g),
        "flowchart TD\n    N0[L]\n    N1{L}\n    N2(L)\n    N3{{L}}\n    N4[/L/]\n    N5[(L)]\n    N6((L))\n"
    );
}

#[test]
fn test_custom_header() {
    let renderer = DslRenderer {
        header: "graph TD".to_string(),
    };
    let g = parse("A --> B").unwrap();
    assert!(renderer.render(&g).starts_with("graph TD\n"));
}

// ── Escaping ──────────────────────────────────────────────────────────────

#[test]
fn test_edge_label_escaping() {
    assert_eq!(edge_label("a|b \"c\""), "a/b 'c'");
    let mut g = parse("A --> B").unwrap();
    let id = g.edges()[0].id.clone();
    g.relabel_edge(&id, Some("yes|no".to_string())).unwrap();
    assert!(render(&g).contains("-->|yes/no|"));
}

#[test]
fn test_node_label_escaping() {
    assert_eq!(node_label("say \"hi\" [now]"), "say 'hi' (now)");
    let g = Graph::from_parts(
        vec![Node::new("A", "say \"hi\" [now]", NodeType::Rectangle)],
        vec![],
    )
    .unwrap();
    assert_eq!(render(&g), "flowchart TD\n    A[\"say 'hi' (now)\"]\n");
}

#[test]
fn test_closing_delimiter_in_label_survives() {
    let g = Graph::from_parts(
        vec![
            Node::new("R", "f(x) = 1", NodeType::Rounded),
            Node::new("D", "{set}", NodeType::Diamond),
            Node::new("C", "a)) b", NodeType::Circle),
        ],
        vec![],
    )
    .unwrap();
    let back = reparse(&g);
    assert_eq!(back.node("R"), g.node("R"));
    assert_eq!(back.node("D"), g.node("D"));
    assert_eq!(back.node("C"), g.node("C"));
}

#[test]
fn test_label_that_looks_like_another_shape() {
    let g = Graph::from_parts(
        vec![
            Node::new("A", "(db)", NodeType::Rectangle),
            Node::new("B", "/slanted/", NodeType::Rectangle),
        ],
        vec![],
    )
    .unwrap();
    let back = reparse(&g);
    assert_eq!(back.node("A"), g.node("A"));
    assert_eq!(back.node("B"), g.node("B"));
}

#[test]
fn test_empty_labels() {
    let g = Graph::from_parts(
        NodeType::ALL
            .into_iter()
            .enumerate()
            .map(|(i, t)| Node::new(format!("N{i}"), "", t))
            .collect(),
        vec![],
    )
    .unwrap();
    let back = reparse(&g);
    assert_eq!(back.nodes().collect::<Vec<_>>(), g.nodes().collect::<Vec<_>>());
}

#[test]
fn test_keyword_ids_round_trip() {
    let mut g = Graph::new();
    g.add_node(Node::new("end", "Finish", NodeType::Rounded)).unwrap();
    g.add_node(Node::bare("x")).unwrap();
    g.add_edge("end", "x", None).unwrap();
    g.add_edge("x", "end", None).unwrap();
    g.add_edge("end", "x", Some("again".to_string())).unwrap();
    let back = reparse(&g);
    assert_eq!(back.node("end"), g.node("end"));
    assert_eq!(back.edge_count(), 3);
}

// ── Edited graphs ─────────────────────────────────────────────────────────

#[test]
fn test_serialize_after_edits() {
    let mut g = parse("flowchart TD\n    A[Start] --> B{Ok?}\n    B -->|yes| C[Done]").unwrap();
    g.retype_node("C", NodeType::Hexagon).unwrap();
    g.relabel_node("A", "Begin").unwrap();
    g.add_node(Node::new("D", "Retry", NodeType::Rounded)).unwrap();
    let new_edge = g.add_edge("B", "D", Some("no".to_string())).unwrap().id.clone();
    g.set_edge_animated(&new_edge, true).unwrap();
    g.remove_node("C").unwrap();

    let text = render(&g);
    assert_eq!(
        text,
        "flowchart TD\n    A[Begin] --> B{Ok?}\n    B -.->|no| D(Retry)\n"
    );
    let back = parse(&text).unwrap();
    assert_eq!(back.node_count(), 3);
    assert!(back.edges()[1].animated);
}

// ── Properties ───────────────────────────────────────────────────────────

fn arb_graph() -> impl Strategy<Value = Graph> {
    let nodes = proptest::collection::vec(
        (
            "[a-z][a-z0-9_]{0,4}",
            "[A-Za-z0-9 ?!.,:'(){}/<>-]{0,16}",
            0usize..7,
        ),
        1..8,
    );
    nodes.prop_flat_map(|specs| {
        let mut g = Graph::new();
        for (id, label, ty) in specs {
            let _ = g.add_node(Node::new(id, label.trim(), NodeType::ALL[ty]));
        }
        let n = g.node_count();
        let edges = proptest::collection::vec(
            (0..n, 0..n, proptest::option::of("[A-Za-z0-9 ?!.,:'()<>\\[\\]-]{1,12}"), any::<bool>()),
            0..10,
        );
        (Just(g), edges)
    })
    .prop_map(|(mut g, edges)| {
        let ids: Vec<String> = g.nodes().map(|n| n.id.clone()).collect();
        for (s, t, label, animated) in edges {
            let label = label.map(|l| l.trim().to_string()).filter(|l| !l.is_empty());
            let id = g.add_edge(&ids[s], &ids[t], label).unwrap().id.clone();
            g.set_edge_animated(&id, animated).unwrap();
        }
        g
    })
}

fn sorted_nodes(g: &Graph) -> Vec<Node> {
    let mut nodes: Vec<Node> = g.nodes().cloned().collect();
    nodes.sort_by(|a, b| a.id.cmp(&b.id));
    nodes
}

fn edge_tuples(g: &Graph) -> Vec<(String, String, Option<String>, bool)> {
    g.edges()
        .iter()
        .map(|e| (e.source.clone(), e.target.clone(), e.label.clone(), e.animated))
        .collect()
}

proptest! {
    #[test]
    fn prop_round_trip(g in arb_graph()) {
        let back = reparse(&g);
        prop_assert_eq!(sorted_nodes(&back), sorted_nodes(&g));
        prop_assert_eq!(edge_tuples(&back), edge_tuples(&g));
    }

    #[test]
    fn prop_serialization_stable(g in arb_graph()) {
        let text = render(&g);
        prop_assert_eq!(render(&parse(&text).unwrap()), text);
    }
}
