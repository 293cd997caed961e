//! Figure and equation reduction.
//!
//! A float's content (graphics commands, sizing, placement options) has no
//! Markdown counterpart; what survives conversion is its caption and its
//! `\label` anchors. Figures collapse to a `**Figure:** caption` annotation;
//! equations keep their math body inside a `$$` block.
//!
//! Caption text is read with the brace-balanced scanner because captions
//! routinely nest commands (`\caption{The \emph{fast} path}`). The caption
//! and label collectors live here and are shared with the table reducer,
//! which annotates its output the same way.

use crate::error::ParseWarning;
use crate::pipeline::markup::apply_inline_formats;
use crate::pipeline::scan::scan_argument;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::warn;

static RE_FIGURE_ENV: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\\begin\{figure.*?\}(.*?)\\end\{figure.*?\}").unwrap());
static RE_EQUATION_ENV: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\\begin\{equation\}(.*?)\\end\{equation\}").unwrap());
static RE_CAPTION_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\caption\{").unwrap());
static RE_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\label\{([^}]+)\}").unwrap());
static RE_EQ_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\\label\{[^}]+\})\s*").unwrap());
static RE_LABEL_STRIP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\label\{[^}]+\}\s*").unwrap());

/// Replace every `figure`/`figure*` environment with a caption annotation.
pub fn replace_figures(text: &str, keep_labels: bool, warnings: &mut Vec<ParseWarning>) -> String {
    RE_FIGURE_ENV
        .replace_all(text, |caps: &Captures<'_>| {
            let inner = &caps[1];
            let caption = apply_inline_formats(&collect_captions(inner, "caption", warnings));

            let mut out = format!("\n\n**Figure:** {caption}");
            if keep_labels {
                for label in collect_labels(inner) {
                    out.push_str(&format!(" \\label{{{label}}}"));
                }
            }
            out.push_str("\n\n");
            out
        })
        .into_owned()
}

/// Replace every `equation` environment with a `$$` math block.
///
/// A `\label` inside the body is pushed onto its own line so the anchor does
/// not run into the math.
pub fn replace_equations(text: &str, keep_labels: bool) -> String {
    RE_EQUATION_ENV
        .replace_all(text, |caps: &Captures<'_>| {
            let body = caps[1].trim().to_string();
            let body = if keep_labels {
                RE_EQ_LABEL.replace_all(&body, "${1}\n").into_owned()
            } else {
                RE_LABEL_STRIP.replace_all(&body, "").trim().to_string()
            };
            format!("\n\n$$\n{body}\n$$\n\n")
        })
        .into_owned()
}

/// Gather every `\caption{...}` argument in `text`, strip nested labels from
/// the caption text, and join multiple captions with spaces.
///
/// `command` names the construct in the warning when braces are unbalanced.
pub fn collect_captions(text: &str, command: &str, warnings: &mut Vec<ParseWarning>) -> String {
    let mut captions = Vec::new();
    let mut pos = 0;
    while let Some(m) = RE_CAPTION_OPEN.find_at(text, pos) {
        let arg = scan_argument(text, m.end());
        let caption = RE_LABEL_STRIP.replace_all(arg.text.trim(), "");
        captions.push(caption.trim().to_string());
        if !arg.balanced {
            warn!(command, "unbalanced braces in caption; taking remainder");
            warnings.push(ParseWarning::UnbalancedBraces {
                command: command.to_string(),
            });
            break;
        }
        pos = arg.end;
    }
    captions.join(" ").trim().to_string()
}

/// Gather every `\label{...}` identifier in `text`, in order.
pub fn collect_labels(text: &str) -> Vec<String> {
    RE_LABEL
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn figure_collapses_to_caption_and_label() {
        let mut w = Vec::new();
        let input = "before\n\\begin{figure}\n\\includegraphics{x.png}\n\\caption{A plot}\\label{fig:one}\n\\end{figure}\nafter";
        let out = replace_figures(input, true, &mut w);
        assert!(out.contains("**Figure:** A plot \\label{fig:one}"));
        assert!(!out.contains("includegraphics"));
        assert!(w.is_empty());
    }

    #[test]
    fn starred_figure_matches_too() {
        let mut w = Vec::new();
        let input = r"\begin{figure*}\caption{Wide}\end{figure*}";
        let out = replace_figures(input, true, &mut w);
        assert!(out.contains("**Figure:** Wide"));
    }

    #[test]
    fn multiple_captions_concatenate() {
        let mut w = Vec::new();
        let input = r"\begin{figure}\caption{One}\caption{Two}\end{figure}";
        let out = replace_figures(input, true, &mut w);
        assert!(out.contains("**Figure:** One Two"));
    }

    #[test]
    fn caption_inline_formats_applied() {
        let mut w = Vec::new();
        let input = r"\begin{figure}\caption{A \textbf{bold} claim}\end{figure}";
        let out = replace_figures(input, true, &mut w);
        assert!(out.contains("**Figure:** A **bold** claim"));
    }

    #[test]
    fn labels_dropped_when_disabled() {
        let mut w = Vec::new();
        let input = r"\begin{figure}\caption{A plot}\label{fig:one}\end{figure}";
        let out = replace_figures(input, false, &mut w);
        assert!(out.contains("**Figure:** A plot"));
        assert!(!out.contains("\\label"));
    }

    #[test]
    fn unbalanced_caption_recovers_with_warning() {
        let mut w = Vec::new();
        let inner = r"\caption{never closed";
        let caption = collect_captions(inner, "caption", &mut w);
        assert_eq!(caption, "never closed");
        assert_eq!(w.len(), 1);
    }

    #[test]
    fn equation_becomes_math_block() {
        let input = r"\begin{equation}E = mc^2 \label{eq:em}\end{equation}";
        let out = replace_equations(input, true);
        assert!(out.contains("$$\nE = mc^2 \\label{eq:em}\n"));
        assert!(out.trim_end().ends_with("$$"));
    }

    #[test]
    fn equation_label_stripped_when_disabled() {
        let input = r"\begin{equation}E = mc^2 \label{eq:em}\end{equation}";
        let out = replace_equations(input, false);
        assert!(out.contains("$$\nE = mc^2\n$$"));
        assert!(!out.contains("\\label"));
    }
}
