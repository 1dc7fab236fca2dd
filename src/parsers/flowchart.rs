//! Graph builder for flowchart text.
//!
//! Lines are parsed independently by [`parse_line`]; the builder is the
//! accumulator threaded through them. A fresh builder is used for every
//! parse, so a graph is always a full rebuild of its text.

use log::debug;

use crate::error::{Error, Result};
use crate::syntax::types::Graph;

use super::base::{EdgeStmt, LineStatement, Parser, parse_line};

/// Parser for `flowchart TD` / `graph TD` text.
pub struct FlowchartParser;

impl Parser for FlowchartParser {
    fn parse(&self, src: &str) -> Result<Graph> {
        let mut builder = GraphBuilder::new();
        for (line_no, line) in src.lines().enumerate() {
            builder.apply(line_no + 1, parse_line(line));
        }
        builder.finish()
    }
}

/// Accumulates node declarations and edges line by line.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: Graph,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one line's statement into the graph.
    pub fn apply(&mut self, line_no: usize, stmt: LineStatement) {
        match stmt {
            LineStatement::Skip => {}
            LineStatement::Unparseable => {
                debug!(line_no = line_no; "Skipping unparseable line");
            }
            LineStatement::Content { declarations, edge } => {
                // Nodes enter the graph in order of appearance on the line.
                if let Some(ref edge) = edge {
                    if !declarations.iter().any(|n| n.id == edge.source) {
                        self.graph.ensure_node(&edge.source);
                    }
                }
                for node in declarations {
                    let id = node.id.clone();
                    if !self.graph.insert_node_if_absent(node) {
                        debug!(line_no = line_no, id = id; "Ignoring redeclaration of node");
                    }
                }
                if let Some(edge) = edge {
                    self.add_edge(edge);
                }
            }
        }
    }

    fn add_edge(&mut self, edge: EdgeStmt) {
        self.graph.ensure_node(&edge.source);
        self.graph.ensure_node(&edge.target);
        let animated = edge.animated();
        self.graph
            .push_edge(&edge.source, &edge.target, edge.label, animated);
    }

    /// The finished graph, or `NoNodesFound` if nothing was declared.
    pub fn finish(self) -> Result<Graph> {
        if self.graph.is_empty() {
            return Err(Error::NoNodesFound);
        }
        Ok(self.graph)
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_parsers_flowchart.rs"]
mod tests;
