//! End-to-end integration tests for tex2md.
//!
//! These run the full pipeline over realistic paper-style LaTeX sources and
//! exercise the file-I/O boundary with temporary directories. Unit tests for
//! individual stages live next to each stage module.

use std::path::PathBuf;
use tex2md::{convert, convert_str, convert_to_file, ConversionConfig, Tex2MdError};

// ── Test helpers ─────────────────────────────────────────────────────────────

const SAMPLE_PAPER: &str = r"% A sample paper
\documentclass{article}
\title{On \textbf{Bold} Claims}
\author{Ada Lovelace \and Charles Babbage}

\begin{document}
\maketitle

\begin{abstract}
We make claims. % inline note
\end{abstract}

\section{Introduction}\label{sec:intro}
Text with \emph{emphasis} and 50\% confidence.
This line is wrapped,
not a new paragraph.

\begin{figure}
\includegraphics{plot.png}
\caption{A \textit{representative} plot}\label{fig:plot}
\end{figure}

\begin{table}
\caption{Results}\label{tab:res}
\begin{tabular}{ll}
a & b \\
c & d \\
\end{tabular}
\end{table}

\begin{equation}
E = mc^2 \label{eq:em}
\end{equation}

\begin{itemize}
\item First point
\item Second point
\end{itemize}

\newpage
\subsection{Method}
Uses \textsc{caps} here.\vspace{1em}
\end{document}
";

fn config() -> ConversionConfig {
    ConversionConfig::default()
}

/// Assert the Markdown passes basic shape checks shared by every conversion.
fn assert_markdown_quality(md: &str, context: &str) {
    assert!(!md.trim().is_empty(), "[{context}] Markdown is empty");
    assert!(
        md.ends_with('\n') && !md.ends_with("\n\n"),
        "[{context}] Markdown must end with exactly one newline"
    );
    assert!(
        !md.contains("\n\n\n"),
        "[{context}] Output has more than one consecutive blank line"
    );
}

// ── Full-document conversion ─────────────────────────────────────────────────

#[test]
fn sample_paper_converts_end_to_end() {
    let out = convert_str(SAMPLE_PAPER, &config());
    let md = &out.markdown;
    assert_markdown_quality(md, "sample_paper");

    // Title block from \maketitle
    assert!(md.contains("# On **Bold** Claims"), "title heading: {md}");
    assert!(md.contains("**Authors:** Ada Lovelace, Charles Babbage"));

    // Abstract promoted to a heading
    assert!(md.contains("# Abstract"));

    // Headings with relocated labels
    assert!(md.contains("# Introduction\n\\label{sec:intro}"));
    assert!(md.contains("## Method"));

    // Inline formats
    assert!(md.contains("*emphasis*"));
    assert!(md.contains("`caps`"));

    // Comment policy: trailing comment gone, escaped percent kept as text
    assert!(!md.contains("inline note"));
    assert!(md.contains("50% confidence"));

    // Wrapped prose folded into one paragraph
    assert!(md.contains("This line is wrapped, not a new paragraph."));

    // Figure reduced to its caption, content dropped
    assert!(md.contains("**Figure:** A *representative* plot \\label{fig:plot}"));
    assert!(!md.contains("includegraphics"));

    // Table reduced to a grid
    assert!(md.contains("**Table:** Results \\label{tab:res}"));
    assert!(md.contains("| a | b |"));
    assert!(md.contains("| --- | --- |"));
    assert!(md.contains("| c | d |"));

    // Equation block
    assert!(md.contains("$$\nE = mc^2 \\label{eq:em}"));

    // List items
    assert!(md.contains("- First point\n- Second point"));

    // Layout commands swept
    assert!(!md.contains("\\newpage"));
    assert!(!md.contains("\\vspace"));
    assert!(!md.contains("\\documentclass"));

    // Metadata mirrors the preamble
    assert_eq!(out.metadata.title.as_deref(), Some(r"On \textbf{Bold} Claims"));
    assert_eq!(
        out.metadata.authors,
        vec!["Ada Lovelace", "Charles Babbage"]
    );
    assert!(!out.has_warnings(), "unexpected warnings: {:?}", out.warnings);
}

#[test]
fn nested_tables_fall_back_to_fenced_latex() {
    let latex = r"\begin{document}
\begin{table}
\caption{Nested layout}
\begin{tabular}{l}
\begin{tabular}{l} inner \\ \end{tabular} \\
\end{tabular}
\end{table}
\end{document}
";
    let out = convert_str(latex, &config());
    assert!(out.markdown.contains("**Table:** Nested layout"));
    assert!(out.markdown.contains("```latex"));
    assert!(out.markdown.contains(r"\begin{tabular}"));
    assert!(!out.markdown.contains("| --- |"));
    assert!(out.has_warnings());
}

#[test]
fn labels_dropped_when_disabled() {
    let cfg = ConversionConfig::builder()
        .keep_labels(false)
        .build()
        .unwrap();
    let out = convert_str(SAMPLE_PAPER, &cfg);
    assert!(!out.markdown.contains("\\label"));
    assert!(out.markdown.contains("**Figure:** A *representative* plot"));
}

#[test]
fn input_without_document_markers_passes_through() {
    let out = convert_str("\\section{Solo}\nJust text.", &config());
    assert!(out.markdown.contains("# Solo"));
    assert!(out.markdown.contains("Just text."));
}

// ── Idempotence on converted output ──────────────────────────────────────────

#[test]
fn rerunning_pipeline_on_prose_output_is_stable() {
    let latex = "\\begin{document}\n\\section{Intro}\nSome \\textbf{bold} prose.\n\nA second paragraph with \\emph{feeling}.\n\\end{document}\n";
    let once = convert_str(latex, &config()).markdown;
    let twice = convert_str(&once, &config()).markdown;
    assert_eq!(once, twice);
}

// ── File I/O boundary ────────────────────────────────────────────────────────

#[test]
fn tex_path_produces_sibling_txt() {
    let dir = tempfile::tempdir().unwrap();
    let tex_path = dir.path().join("paper.tex");
    std::fs::write(&tex_path, SAMPLE_PAPER).unwrap();

    let cfg = config();
    let out_path = tex2md::output_path_for(tex_path.to_str().unwrap(), &cfg).unwrap();
    assert_eq!(out_path, dir.path().join("paper.txt"));

    convert_to_file(tex_path.to_str().unwrap(), &out_path, &cfg).unwrap();
    let written = std::fs::read_to_string(&out_path).unwrap();
    assert!(written.contains("# On **Bold** Claims"));
    assert_markdown_quality(&written, "file output");
}

#[test]
fn non_tex_extension_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let md_path = dir.path().join("paper.md");
    std::fs::write(&md_path, "content").unwrap();

    let err = convert(md_path.to_str().unwrap(), &config()).unwrap_err();
    assert!(matches!(err, Tex2MdError::NotATexFile { .. }));
}

#[test]
fn missing_file_is_a_usage_error() {
    let err = convert("does_not_exist.tex", &config()).unwrap_err();
    assert!(matches!(err, Tex2MdError::FileNotFound { .. }));
}

#[test]
fn raw_input_derives_configured_default_output() {
    let cfg = ConversionConfig::builder()
        .default_output(PathBuf::from("converted.txt"))
        .build()
        .unwrap();
    let path = tex2md::output_path_for("a\nb", &cfg).unwrap();
    assert_eq!(path, PathBuf::from("converted.txt"));
}
