//! Shape classifier: bracket-delimited declaration text ↔ (NodeType, label).
//!
//! Bracket syntaxes nest (`((x))` contains `(x)`), so the delimiter pairs are
//! tried in a fixed precedence order, most specific first. The order of
//! [`SHAPE_PATTERNS`] is that precedence.

use super::types::NodeType;

/// Delimiter pairs in precedence order (first match wins).
pub const SHAPE_PATTERNS: &[(&str, &str, NodeType)] = &[
    ("{{", "}}", NodeType::Hexagon),
    ("{", "}", NodeType::Diamond),
    ("((", "))", NodeType::Circle),
    ("[(", ")]", NodeType::Cylinder),
    ("([", "])", NodeType::Rounded),
    ("(", ")", NodeType::Rounded),
    ("[/", "/]", NodeType::Parallelogram),
    ("[\\", "\\]", NodeType::Parallelogram),
    ("[", "]", NodeType::Rectangle),
];

/// Classify a whole declaration substring such as `{Decide}` or `[(Store)]`.
///
/// Total: text with no recognised delimiter pair is a Rectangle whose label
/// is the trimmed input.
pub fn classify(decl: &str) -> (NodeType, String) {
    let text = decl.trim();
    for &(open, close, node_type) in SHAPE_PATTERNS {
        if text.len() >= open.len() + close.len()
            && text.starts_with(open)
            && text.ends_with(close)
        {
            let inner = &text[open.len()..text.len() - close.len()];
            return (node_type, clean_label(inner));
        }
    }
    (NodeType::Rectangle, text.to_string())
}

/// Find the declaration that starts at the beginning of `rest`.
///
/// Returns the byte length of the bracket pair, or None if `rest` does not
/// open with a recognised delimiter that is closed later on. The closing
/// delimiter is the first one after the opener, skipping over a double
/// quoted label.
pub fn match_shape(rest: &str) -> Option<usize> {
    for &(open, close, _) in SHAPE_PATTERNS {
        if !rest.starts_with(open) {
            continue;
        }
        let body_start = open.len();
        let search_from = skip_quoted(rest, body_start);
        if let Some(offset) = rest[search_from..].find(close) {
            return Some(search_from + offset + close.len());
        }
    }
    None
}

/// Opening and closing delimiters used when writing a node of `node_type`.
pub fn delimiters(node_type: NodeType) -> (&'static str, &'static str) {
    match node_type {
        NodeType::Rectangle => ("[", "]"),
        NodeType::Diamond => ("{", "}"),
        NodeType::Rounded => ("(", ")"),
        NodeType::Hexagon => ("{{", "}}"),
        NodeType::Parallelogram => ("[/", "/]"),
        NodeType::Cylinder => ("[(", ")]"),
        NodeType::Circle => ("((", "))"),
    }
}

/// If the body (after leading spaces) is a double-quoted string, return the
/// byte offset just past its closing quote; otherwise `body_start`.
fn skip_quoted(text: &str, body_start: usize) -> usize {
    let body = &text[body_start..];
    let trimmed = body.trim_start_matches([' ', '\t']);
    if !trimmed.starts_with('"') {
        return body_start;
    }
    let quote_at = body_start + (body.len() - trimmed.len());
    match text[quote_at + 1..].find('"') {
        Some(end) => quote_at + 1 + end + 1,
        None => body_start,
    }
}

/// Trim the captured text and drop one pair of surrounding double quotes.
fn clean_label(inner: &str) -> String {
    let trimmed = inner.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        return trimmed[1..trimmed.len() - 1].trim().to_string();
    }
    trimmed.to_string()
}

#[cfg(test)]
#[path = "../../tests/rust/test_syntax_shape.rs"]
mod tests;
