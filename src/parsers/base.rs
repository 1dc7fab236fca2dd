//! Parser trait and the per-line cursor.
//!
//! The flowchart grammar is line oriented: every physical line is either a
//! no-op directive, an edge statement (with optional inline declarations on
//! either side), a standalone declaration, or noise. [`parse_line`] turns one
//! line into a [`LineStatement`] without touching any shared state; the graph
//! builder folds those statements into a graph.

use log::trace;

use crate::error::Result;
use crate::syntax::shape::{classify, match_shape};
use crate::syntax::types::{Graph, Node, NodeType, is_word_char};

// ─── Parser trait ────────────────────────────────────────────────────────────

/// Trait for diagram parsers.
pub trait Parser {
    /// Parse the input source string into a Graph.
    fn parse(&self, src: &str) -> Result<Graph>;
}

// ─── Arrow patterns ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKind {
    Solid,  // -->
    Dotted, // -.->
    Thick,  // ==>
}

/// Connector tokens, each optionally followed by a `|label|`.
/// The inline `-- label -->` form is tried after all of these.
pub const ARROW_PATTERNS: &[(&str, ArrowKind)] = &[
    ("-->", ArrowKind::Solid),
    ("-.->", ArrowKind::Dotted),
    ("==>", ArrowKind::Thick),
];

/// Leading keywords of lines that carry no topology.
pub const DIRECTIVE_KEYWORDS: &[&str] = &[
    "flowchart",
    "graph",
    "subgraph",
    "end",
    "style",
    "classDef",
    "class",
    "linkStyle",
    "click",
];

// ─── Line statements ─────────────────────────────────────────────────────────

/// An edge recognised on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeStmt {
    pub source: String,
    pub target: String,
    pub label: Option<String>,
    pub arrow: ArrowKind,
}

impl EdgeStmt {
    pub fn animated(&self) -> bool {
        self.arrow == ArrowKind::Dotted
    }
}

/// What one line contributes to the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineStatement {
    /// Blank line, comment or directive.
    Skip,
    /// Node declarations, in order of appearance, and at most one edge.
    Content {
        declarations: Vec<Node>,
        edge: Option<EdgeStmt>,
    },
    /// Nothing recognisable.
    Unparseable,
}

/// Classify and parse one physical line.
pub fn parse_line(line: &str) -> LineStatement {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with("%%") || is_directive(trimmed) {
        trace!(line = trimmed; "Skipping no-op line");
        return LineStatement::Skip;
    }

    let declarations = scan_declarations(trimmed);
    let edge = Cursor::new(trimmed).parse_edge_stmt();

    if declarations.is_empty() && edge.is_none() {
        return LineStatement::Unparseable;
    }
    LineStatement::Content { declarations, edge }
}

/// True if the line's first word is a directive keyword.
pub fn is_directive(trimmed: &str) -> bool {
    let first = trimmed.split_whitespace().next().unwrap_or("");
    DIRECTIVE_KEYWORDS.contains(&first)
}

/// Every `<id><bracket-pair>` on the line, skipping over `|edge labels|`,
/// inline `-- edge labels -->` and double-quoted text.
pub fn scan_declarations(line: &str) -> Vec<Node> {
    let mut cursor = Cursor::new(line);
    let mut found = Vec::new();
    while let Some(ch) = cursor.peek_char() {
        match ch {
            '|' | '"' => cursor.skip_delimited(ch),
            '-' if cursor.skip_inline_label() => {}
            c if is_word_char(c) => {
                let Some(id) = cursor.match_node_id() else {
                    break;
                };
                if let Some((node_type, label)) = cursor.parse_node_shape() {
                    found.push(Node::new(id, label, node_type));
                }
            }
            _ => cursor.advance_char(),
        }
    }
    found
}

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Cursor over a single line. Positions are byte offsets on char boundaries.
pub struct Cursor<'a> {
    pub src: &'a str,
    pub pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    pub fn eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    pub fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    pub fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn advance_char(&mut self) {
        if let Some(ch) = self.peek_char() {
            self.pos += ch.len_utf8();
        }
    }

    pub fn peek(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    /// Consume `s` if it matches; returns true if consumed.
    pub fn consume(&mut self, s: &str) -> bool {
        if self.peek(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    /// Skip spaces and tabs.
    pub fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start_matches([' ', '\t']).len();
    }

    /// Skip from an opening `delim` to just past its partner (or to the end).
    pub fn skip_delimited(&mut self, delim: char) {
        self.advance_char();
        match self.rest().find(delim) {
            Some(offset) => self.pos += offset + delim.len_utf8(),
            None => self.pos = self.src.len(),
        }
    }

    /// Skip an inline `-- label -->` connector. Returns false, without
    /// moving, if there is none at the cursor.
    pub fn skip_inline_label(&mut self) -> bool {
        if !self.peek("--") || self.peek("-->") || self.peek("---") {
            return false;
        }
        match self.rest()[2..].find("-->") {
            Some(end) => {
                self.pos += end + 5;
                true
            }
            None => false,
        }
    }

    /// Match a node identifier: one or more word characters.
    pub fn match_node_id(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|&(_, c)| !is_word_char(c))
            .map_or(rest.len(), |(i, _)| i);
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(&rest[..len])
    }

    /// Bracket pair immediately at the cursor, classified.
    pub fn parse_node_shape(&mut self) -> Option<(NodeType, String)> {
        let extent = match_shape(self.rest())?;
        let decl = &self.rest()[..extent];
        self.pos += extent;
        Some(classify(decl))
    }

    /// Node reference: id plus an optional inline declaration. Returns the id.
    pub fn parse_endpoint(&mut self) -> Option<&'a str> {
        self.skip_ws();
        let id = self.match_node_id()?;
        self.parse_node_shape();
        Some(id)
    }

    /// Parse an edge label `|text|`. Empty labels count as absent.
    pub fn try_parse_edge_label(&mut self) -> Option<String> {
        let saved = self.pos;
        self.skip_ws();
        if !self.consume("|") {
            self.pos = saved;
            return None;
        }
        let text = match self.rest().find('|') {
            Some(end) => {
                let text = &self.rest()[..end];
                self.pos += end + 1;
                text
            }
            None => {
                self.pos = saved;
                return None;
            }
        };
        clean_edge_label(text)
    }

    /// Parse a connector and its label, most specific form first.
    pub fn parse_connector(&mut self) -> Option<(ArrowKind, Option<String>)> {
        self.skip_ws();
        for &(token, arrow) in ARROW_PATTERNS {
            if self.consume(token) {
                let label = self.try_parse_edge_label();
                return Some((arrow, label));
            }
        }
        // A -- label --> B
        if self.peek("--") && !self.peek("---") {
            let body_start = self.pos + 2;
            let end = self.src[body_start..].find("-->")?;
            let label = clean_edge_label(&self.src[body_start..body_start + end]);
            self.pos = body_start + end + 3;
            return Some((ArrowKind::Solid, label));
        }
        None
    }

    /// Parse `source connector target` from the start of the line.
    pub fn parse_edge_stmt(&mut self) -> Option<EdgeStmt> {
        let saved = self.pos;
        let stmt = self.try_edge_stmt();
        if stmt.is_none() {
            self.pos = saved;
        }
        stmt
    }

    fn try_edge_stmt(&mut self) -> Option<EdgeStmt> {
        let source = self.parse_endpoint()?;
        let (arrow, label) = self.parse_connector()?;
        let target = self.parse_endpoint()?;
        Some(EdgeStmt {
            source: source.to_string(),
            target: target.to_string(),
            label,
            arrow,
        })
    }
}

/// Trim an edge label and drop surrounding double quotes; empty means absent.
fn clean_edge_label(text: &str) -> Option<String> {
    let mut label = text.trim();
    if label.len() >= 2 && label.starts_with('"') && label.ends_with('"') {
        label = label[1..label.len() - 1].trim();
    }
    if label.is_empty() {
        None
    } else {
        Some(label.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_parsers_base.rs"]
mod tests;
