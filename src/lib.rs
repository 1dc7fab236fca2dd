//! flowviz — flowchart DSL to typed graph and back.
//!
//! Pipeline: sanitize → parse → layout, with a serializer that turns an
//! edited [`Graph`] back into DSL text the parser reads as the same graph.
//!
//! Modules:
//!   syntax     — Graph/Node/Edge data model, shape classifier
//!   parsers    — line cursor + graph builder
//!   sanitize   — repairs for generated diagram text
//!   layout     — layered (Sugiyama) placement
//!   renderers  — DSL serializer
//!   config     — LayoutConfig
//!   error      — error taxonomy

pub mod config;
pub mod error;
pub mod layout;
pub mod parsers;
pub mod renderers;
pub mod sanitize;
pub mod syntax;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::LayoutConfig;
pub use error::{DiagramError, EditError, Error, Result};
pub use layout::{Diagram, PositionedNode, layout, node_size};
pub use parsers::parse;
pub use renderers::serialize;
pub use sanitize::{extract_code_block, sanitize};
pub use syntax::{Edge, Graph, Node, NodeType};

use log::debug;

/// Sanitize, parse and lay out raw diagram text in one go.
///
/// On failure the error carries `raw` unchanged so the caller can fall back
/// to showing it verbatim.
pub fn load(raw: &str, config: &LayoutConfig) -> std::result::Result<Diagram, DiagramError> {
    if raw.trim().is_empty() {
        return Err(DiagramError::new(Error::EmptyOrInvalidInput, raw));
    }
    let clean = sanitize(raw);
    let graph = parse(&clean).map_err(|kind| DiagramError::new(kind, raw))?;
    debug!(nodes = graph.node_count(), edges = graph.edge_count(); "Loaded diagram");
    Ok(layout(&graph, config))
}
