//! Heading, list, and inline-format conversion, plus `\maketitle`
//! replacement.
//!
//! Inline formats are applied in several places (captions, list items, and
//! once over the whole document) — safe to repeat because the converted
//! Markdown no longer matches the LaTeX source patterns.

use crate::pipeline::metadata::split_authors;
use once_cell::sync::Lazy;
use regex::{Captures, NoExpand, Regex};

static RE_EMPH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\(?:emph|textit)\{(.*?)\}").unwrap());
static RE_BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\textbf\{(.*?)\}").unwrap());
static RE_SMALLCAPS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\textsc\{(.*?)\}").unwrap());
static RE_MAKETITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\maketitle").unwrap());
static RE_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)\\(section|subsection|subsubsection|paragraph|runningtitle)\*?\{(.*?)\}(?:\s*\\label\{([^}]+)\})?",
    )
    .unwrap()
});
static RE_ENUMERATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\\begin\{enumerate\}(\[[^\]]*\])?(.*?)\\end\{enumerate\}").unwrap());
static RE_ITEMIZE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\\begin\{itemize\}(\[[^\]]*\])?(.*?)\\end\{itemize\}").unwrap());
static RE_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\item").unwrap());
static RE_BARE_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\item\s+").unwrap());

/// Map `\emph`/`\textit` to `*...*`, `\textbf` to `**...**`, and `\textsc`
/// to `` `...` ``.
pub fn apply_inline_formats(text: &str) -> String {
    let text = RE_EMPH.replace_all(text, |c: &Captures<'_>| format!("*{}*", c[1].trim()));
    let text = RE_BOLD.replace_all(&text, |c: &Captures<'_>| format!("**{}**", c[1].trim()));
    RE_SMALLCAPS
        .replace_all(&text, |c: &Captures<'_>| format!("`{}`", c[1].trim()))
        .into_owned()
}

/// Replace `\maketitle` with the extracted title as a level-1 heading and an
/// `**Authors:**` line. Both parts are omitted when empty.
pub fn replace_maketitle(text: &str, title: &str, authors: &str) -> String {
    let mut replacement = String::new();
    if !title.is_empty() {
        replacement.push_str(&format!("# {}\n\n", apply_inline_formats(title)));
    }
    let authors = split_authors(authors);
    if !authors.is_empty() {
        replacement.push_str(&format!("**Authors:** {}\n\n", authors.join(", ")));
    }
    RE_MAKETITLE
        .replace_all(text, NoExpand(&replacement))
        .into_owned()
}

/// Convert sectioning commands to Markdown headings, relocating a trailing
/// `\label` onto its own line beneath the heading.
pub fn replace_headings(text: &str, keep_labels: bool) -> String {
    RE_HEADING
        .replace_all(text, |caps: &Captures<'_>| {
            let level: usize = match &caps[1] {
                "section" | "runningtitle" => 1,
                "subsection" => 2,
                "subsubsection" => 3,
                "paragraph" => 4,
                _ => 2,
            };
            let title = caps[2].trim();
            let mut out = format!("\n\n{} {title}", "#".repeat(level));
            if keep_labels {
                if let Some(label) = caps.get(3) {
                    out.push_str(&format!("\n\\label{{{}}}", label.as_str()));
                }
            }
            out.push_str("\n\n");
            out
        })
        .into_owned()
}

/// Convert `enumerate` and `itemize` environments to numbered and bulleted
/// lists; a residual bare `\item` outside any environment becomes a bullet.
pub fn replace_lists(text: &str) -> String {
    let text = RE_ENUMERATE.replace_all(text, |caps: &Captures<'_>| {
        let mut out = String::from("\n\n");
        for (idx, item) in split_items(&caps[2]).enumerate() {
            out.push_str(&format!("{}. {}\n", idx + 1, apply_inline_formats(item)));
        }
        out.push('\n');
        out
    });

    let text = RE_ITEMIZE.replace_all(&text, |caps: &Captures<'_>| {
        let mut out = String::from("\n\n");
        for item in split_items(&caps[2]) {
            out.push_str(&format!("- {}\n", apply_inline_formats(item)));
        }
        out.push('\n');
        out
    });

    RE_BARE_ITEM.replace_all(&text, "\n- ").into_owned()
}

fn split_items<'a>(body: &'a str) -> impl Iterator<Item = &'a str> {
    RE_ITEM.split(body).map(str::trim).filter(|i| !i.is_empty())
}
