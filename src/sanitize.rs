//! Sanitizer: repairs the malformed patterns generated flowchart text tends
//! to contain, before it reaches the parser.
//!
//! Repairs, in order:
//!
//! 1. parenthesized asides inside square-bracket node labels,
//!    `id[Before (aside) After]` becomes `id[Before After - aside]`;
//!    edge labels are not touched;
//! 2. code-fence backticks are deleted;
//! 3. uppercase tokens trailing a `]` on the same or the next line are dropped;
//! 4. runs of spaces and tabs collapse to one space;
//! 5. blank and punctuation-only lines are dropped;
//! 6. the whole text is trimmed.
//!
//! The passes repeat until the text stops changing, which makes
//! [`sanitize`] idempotent. Every pass either removes a parenthesis pair or
//! shortens the text, so the loop terminates.

use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::syntax::types::is_word_char;

/// A single-line square-bracket body opened right after a node id or a `(`,
/// with no nested square brackets.
static BRACKET_BODY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<pre>[\w(])\[(?P<body>[^\[\]\n]*)\]").expect("bracket body pattern")
});

/// An uppercase token after `]`, up to the end of that line or the next.
static TRAILING_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)\][ \t]*(?:\n[ \t]*)?[A-Z]{2,}[ \t]*$").expect("trailing token pattern")
});

static SPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]{2,}").expect("space run pattern"));

/// Characters that make an otherwise wordless line worth keeping.
const STRUCTURAL_CHARS: &[char] = &['[', ']', '{', '}', '|', '-', '>', '<'];

/// Repair raw flowchart text. Total and idempotent.
pub fn sanitize(text: &str) -> String {
    let mut current = text.replace("\r\n", "\n");
    let mut passes = 0usize;
    loop {
        let next = sanitize_pass(&current);
        if next == current {
            break;
        }
        current = next;
        passes += 1;
    }
    if passes > 0 && current != text {
        debug!(passes = passes, before = text.len(), after = current.len(); "Sanitizer repaired input");
    }
    current
}

/// Pull the diagram out of a full generated reply and sanitize it.
///
/// Drops the first "```mermaid" marker and everything from the last "```"
/// on. Replies without fences pass through to [`sanitize`] unchanged.
pub fn extract_code_block(response: &str) -> String {
    let mut body = response.replacen("```mermaid", "", 1);
    if let Some(end) = body.rfind("```") {
        body.truncate(end);
    }
    sanitize(body.trim())
}

fn sanitize_pass(text: &str) -> String {
    let text = repair_parens(text);
    let text = text.replace("```", "");
    let text = TRAILING_TOKEN.replace_all(&text, "]");
    let text = SPACE_RUN.replace_all(&text, " ");
    drop_noise_lines(&text).trim().to_string()
}

/// Apply the aside rewrite until no node label changes. Edge labels are
/// left alone.
fn repair_parens(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = current
            .split('\n')
            .map(|line| map_outside_edge_labels(line, repair_node_labels))
            .collect::<Vec<_>>()
            .join("\n");
        if next == current {
            return current;
        }
        current = next;
    }
}

fn repair_node_labels(segment: &str) -> String {
    BRACKET_BODY
        .replace_all(segment, |caps: &Captures| {
            format!("{}{}", &caps["pre"], repair_bracket(&caps["body"]))
        })
        .into_owned()
}

/// Run `f` over the parts of `line` outside `|edge labels|`. Pipes inside
/// double-quoted node labels do not open an edge label.
fn map_outside_edge_labels(line: &str, f: impl Fn(&str) -> String) -> String {
    let bytes = line.as_bytes();
    let mut out = String::with_capacity(line.len());
    let mut start = 0;
    let mut in_quote = false;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'"' => in_quote = !in_quote,
            b'|' if !in_quote => {
                if let Some(len) = line[i + 1..].find('|') {
                    let end = i + len + 2;
                    out.push_str(&f(&line[start..i]));
                    out.push_str(&line[i..end]);
                    start = end;
                    i = end;
                    continue;
                }
            }
            _ => {}
        }
        i += 1;
    }
    out.push_str(&f(&line[start..]));
    out
}

/// Rewrite one `[body]`, keeping parallelogram slashes in place.
fn repair_bracket(body: &str) -> String {
    let (open, inner, close) = split_markers(body);
    match strip_aside(inner) {
        Some(repaired) => format!("[{open}{repaired}{close}]"),
        None => format!("[{body}]"),
    }
}

fn split_markers(body: &str) -> (&str, &str, &str) {
    for marker in ["/", "\\"] {
        if body.len() >= 2 && body.starts_with(marker) && body.ends_with(marker) {
            return (marker, &body[1..body.len() - 1], marker);
        }
    }
    ("", body, "")
}

/// Move the innermost `(aside)` to the end of the label, or None if the
/// body has nothing to repair. Cylinder bodies `(…)` and quoted labels are
/// left alone.
fn strip_aside(inner: &str) -> Option<String> {
    if inner.trim_start().starts_with('"') {
        return None;
    }
    if inner.starts_with('(') && inner.ends_with(')') {
        return None;
    }
    let close = inner.find(')')?;
    let open = inner[..close].rfind('(')?;

    let before = inner[..open].trim_end();
    let aside = inner[open + 1..close].trim();
    let after = inner[close + 1..].trim_start();

    let head = match (before.is_empty(), after.is_empty()) {
        (false, false) => format!("{before} {after}"),
        _ => format!("{before}{after}"),
    };
    Some(match (head.trim().is_empty(), aside.is_empty()) {
        (false, false) => format!("{head} - {aside}"),
        (false, true) => head,
        (true, _) => aside.to_string(),
    })
}

fn drop_noise_lines(text: &str) -> String {
    text.lines()
        .map(str::trim_end)
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty()
                && (trimmed.chars().any(is_word_char) || trimmed.contains(STRUCTURAL_CHARS))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "../tests/rust/test_sanitize.rs"]
mod tests;
