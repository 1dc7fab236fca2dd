//! Flowchart DSL writer: turns a (possibly edited) Graph back into text the
//! parser reads as the same graph.
//!
//! Each node is declared in full the first time it appears, edges are
//! written in graph order, and nodes touched by no edge follow as standalone
//! declarations in insertion order.

use std::collections::HashSet;

use super::Renderer;
use crate::parsers::base::is_directive;
use crate::syntax::shape::delimiters;
use crate::syntax::types::{Edge, Graph, Node};

const INDENT: &str = "    ";

/// Characters that force a node label into double quotes.
const QUOTE_TRIGGERS: &[char] = &['(', ')', '[', ']', '{', '}', '|', '/', '\\', '<', '>'];

/// Renders a Graph as `flowchart TD` text.
pub struct DslRenderer {
    pub header: String,
}

impl DslRenderer {
    pub fn new() -> Self {
        Self {
            header: "flowchart TD".to_string(),
        }
    }
}

impl Default for DslRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for DslRenderer {
    fn render(&self, graph: &Graph) -> String {
        let mut out = String::new();
        out.push_str(&self.header);
        out.push('\n');

        let mut declared: HashSet<&str> = HashSet::new();
        for edge in graph.edges() {
            let (Some(source), Some(target)) = (graph.node(&edge.source), graph.node(&edge.target))
            else {
                continue;
            };
            // A bare keyword id at line start would read as a directive.
            let source_text = if is_directive(&source.id) {
                declared.insert(&source.id);
                declaration(source)
            } else {
                reference(source, &mut declared)
            };
            let target_text = reference(target, &mut declared);
            out.push_str(&format!("{INDENT}{source_text} {} {target_text}\n", arrow(edge)));
        }

        for node in graph.nodes() {
            if graph.is_orphan(&node.id) {
                out.push_str(&format!("{INDENT}{}\n", declaration(node)));
            }
        }

        out
    }
}

/// Full declaration on first sight, bare id afterwards.
fn reference<'g>(node: &'g Node, declared: &mut HashSet<&'g str>) -> String {
    if declared.insert(&node.id) {
        declaration(node)
    } else {
        node.id.clone()
    }
}

/// `id` followed by the bracket pair of its type.
pub fn declaration(node: &Node) -> String {
    let (open, close) = delimiters(node.node_type);
    let label = node_label(&node.label);
    if label.contains(QUOTE_TRIGGERS) {
        format!("{}{open}\"{label}\"{close}", node.id)
    } else {
        format!("{}{open}{label}{close}", node.id)
    }
}

/// `-->`, `-.->`, optionally followed by `|label|`.
pub fn arrow(edge: &Edge) -> String {
    let token = if edge.animated { "-.->" } else { "-->" };
    match edge.label.as_deref().map(edge_label) {
        Some(label) if !label.is_empty() => format!("{token}|{label}|"),
        _ => token.to_string(),
    }
}

/// Node label safe for a bracket pair: double quotes become single quotes
/// and square brackets become parentheses.
pub fn node_label(label: &str) -> String {
    label
        .trim()
        .chars()
        .map(|c| match c {
            '"' => '\'',
            '[' => '(',
            ']' => ')',
            '\n' | '\r' | '\t' => ' ',
            c => c,
        })
        .collect()
}

/// Edge label safe between pipes: `|` becomes `/`, double quotes become
/// single quotes.
pub fn edge_label(label: &str) -> String {
    label
        .trim()
        .chars()
        .map(|c| match c {
            '|' => '/',
            '"' => '\'',
            '\n' | '\r' | '\t' => ' ',
            c => c,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/rust/test_renderers_dsl.rs"]
mod tests;
