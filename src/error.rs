//! Error taxonomy for the parse pipeline and for graph edits.
//!
//! Sanitizing and laying out never fail; only the graph builder and the
//! edit operations on a [`Graph`](crate::syntax::types::Graph) return errors.
//! Lines the parser does not recognise are logged and skipped, never
//! surfaced as an error value.

use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Parse failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The input was empty (or whitespace only) before sanitization.
    #[error("diagram text is empty")]
    EmptyOrInvalidInput,

    /// A full parse pass produced no node declarations.
    #[error("no nodes found in diagram text")]
    NoNodesFound,
}

/// Failures of the graph edit operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("node '{0}' already exists")]
    DuplicateNode(String),

    #[error("unknown node '{0}'")]
    UnknownNode(String),

    #[error("unknown edge '{0}'")]
    UnknownEdge(String),

    /// Node ids must be non-empty runs of word characters.
    #[error("invalid node id '{0}'")]
    InvalidNodeId(String),
}

/// A parse failure together with the raw text that caused it.
///
/// Callers present this as a recoverable state and fall back to showing
/// `raw_text` verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramError {
    pub kind: Error,
    pub raw_text: String,
}

impl DiagramError {
    pub fn new(kind: Error, raw_text: impl Into<String>) -> Self {
        Self {
            kind,
            raw_text: raw_text.into(),
        }
    }
}

impl fmt::Display for DiagramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl std::error::Error for DiagramError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}
