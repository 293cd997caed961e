//! Preamble handling: abstract normalisation, title/author extraction, and
//! document-body isolation.
//!
//! These run before comment stripping because `\title`/`\author` live in the
//! preamble, outside the `document` environment that the body extractor
//! keeps. The extracted values are excised from the text and re-injected
//! later by the `\maketitle` replacement.

use crate::error::ParseWarning;
use crate::pipeline::scan::scan_argument;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

static RE_ABSTRACT_BEGIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\begin\{abstract\}").unwrap());
static RE_ABSTRACT_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\end\{abstract\}").unwrap());
static RE_TITLE_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\title\{").unwrap());
static RE_AUTHOR_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\author\{").unwrap());
static RE_DOCUMENT_BODY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\\begin\{document\}(.*?)\\end\{document\}").unwrap());
static RE_AUTHOR_SEP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\and|,").unwrap());

/// Rewrite the abstract environment into a generic unnumbered section so the
/// heading converter picks it up like any other section.
pub fn normalize_abstract(text: &str) -> String {
    let text = RE_ABSTRACT_BEGIN.replace_all(text, r"\section*{Abstract}");
    RE_ABSTRACT_END.replace_all(&text, "").into_owned()
}

/// Pull `\title{...}` and `\author{...}` out of the text.
///
/// Returns the text with both declarations removed, plus the raw title and
/// author strings (empty when absent). Unbalanced braces truncate the text
/// at the command and take the remainder as a best-effort value.
pub fn extract_title_authors(
    text: &str,
    warnings: &mut Vec<ParseWarning>,
) -> (String, String, String) {
    let (text, title) = extract_declaration(text, &RE_TITLE_OPEN, "title", warnings);
    let (text, authors) = extract_declaration(&text, &RE_AUTHOR_OPEN, "author", warnings);
    (text, title, authors)
}

fn extract_declaration(
    text: &str,
    opener: &Regex,
    command: &str,
    warnings: &mut Vec<ParseWarning>,
) -> (String, String) {
    let Some(m) = opener.find(text) else {
        return (text.to_string(), String::new());
    };

    let arg = scan_argument(text, m.end());
    if arg.balanced {
        let value = arg.text.trim().to_string();
        let mut out = String::with_capacity(text.len());
        out.push_str(&text[..m.start()]);
        out.push_str(&text[arg.end..]);
        (out, value)
    } else {
        warn!(command, "unbalanced braces in declaration; taking remainder");
        warnings.push(ParseWarning::UnbalancedBraces {
            command: command.to_string(),
        });
        (text[..m.start()].to_string(), arg.text.trim().to_string())
    }
}

/// Isolate the content between `\begin{document}` and `\end{document}`.
/// Input without document markers passes through unchanged.
pub fn extract_document_body(text: &str) -> String {
    match RE_DOCUMENT_BODY.captures(text) {
        Some(caps) => caps[1].to_string(),
        None => text.to_string(),
    }
}

/// Split a raw author string on `\and` and comma separators, dropping empty
/// entries.
pub fn split_authors(authors: &str) -> Vec<String> {
    RE_AUTHOR_SEP
        .split(authors)
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}
