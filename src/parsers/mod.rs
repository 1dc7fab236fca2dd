//! Parsing entry point: validate the input, then run the flowchart builder.

pub mod base;
pub mod flowchart;

pub use base::Parser;

use log::trace;

use crate::error::{Error, Result};
use crate::syntax::types::Graph;
use flowchart::FlowchartParser;

/// True if the first meaningful line is a `flowchart`/`graph` header.
///
/// Informational only: headerless text is parsed all the same.
pub fn looks_like_flowchart(src: &str) -> bool {
    for line in src.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("%%") {
            continue;
        }
        let first = trimmed.split_whitespace().next().unwrap_or("");
        return first == "flowchart" || first == "graph";
    }
    false
}

/// Parse flowchart DSL text into a Graph.
///
/// Fails with `EmptyOrInvalidInput` on blank input and with `NoNodesFound`
/// when no line declares or references a node. Every other malformation is
/// tolerated: unrecognised lines are skipped and unknown shapes become
/// rectangles.
pub fn parse(src: &str) -> Result<Graph> {
    if src.trim().is_empty() {
        return Err(Error::EmptyOrInvalidInput);
    }
    if !looks_like_flowchart(src) {
        trace!("Input has no flowchart header; parsing leniently");
    }
    FlowchartParser.parse(src)
}
