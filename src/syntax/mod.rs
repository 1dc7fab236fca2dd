//! Flowchart data model and the bracket-shape vocabulary.

pub mod shape;
pub mod types;

pub use shape::classify;
pub use types::{Edge, Graph, Node, NodeType};
