//! Comment stripping and whitespace canonicalisation.
//!
//! LaTeX source wraps prose across lines, so a literal newline is usually
//! just soft wrapping while a blank line is a paragraph break. After
//! dropping comments, the stage folds double newlines into a placeholder
//! token, flattens the remaining single newlines to spaces, collapses
//! whitespace runs, and restores the placeholder — preserving paragraph
//! structure while unwrapping the prose.

use crate::pipeline::scan::is_escaped_at;
use once_cell::sync::Lazy;
use regex::Regex;

/// Token standing in for a paragraph break while newlines are flattened.
/// Must never occur in real LaTeX input.
const PARA_BREAK: &str = "<<<PARA_BREAK>>>";

static RE_EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
static RE_WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Strip unescaped-`%` comments and canonicalise whitespace into
/// paragraph-broken single-line prose.
pub fn remove_comments(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");

    let stripped: Vec<&str> = text.lines().map(strip_line_comment).collect();
    let text = stripped.join("\n");

    let text = RE_EXCESS_NEWLINES.replace_all(&text, "\n\n");
    let text = text.replace("\n\n", PARA_BREAK);
    let text = text.replace('\n', " ");
    let text = RE_WHITESPACE_RUN.replace_all(&text, " ");
    text.trim().replace(PARA_BREAK, "\n\n")
}

/// Truncate a line at its first unescaped `%`.
///
/// The `regex` crate has no lookbehind, so the escape check counts the
/// backslash run preceding each candidate.
fn strip_line_comment(line: &str) -> &str {
    for (idx, ch) in line.char_indices() {
        if ch == '%' && !is_escaped_at(line, idx) {
            return &line[..idx];
        }
    }
    line
}
