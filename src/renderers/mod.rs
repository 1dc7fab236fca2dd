//! Renderer trait and the DSL serializer.

pub mod dsl;

pub use dsl::DslRenderer;

use crate::syntax::types::Graph;

/// Trait for graph renderers.
pub trait Renderer {
    /// Render a graph to a string.
    fn render(&self, graph: &Graph) -> String;
}

/// Serialize a graph to flowchart DSL text with the default header.
pub fn serialize(graph: &Graph) -> String {
    DslRenderer::new().render(graph)
}
