//! # tex2md
//!
//! Convert LaTeX documents to Markdown-flavored text.
//!
//! ## Why this crate?
//!
//! Academic LaTeX sources are awkward to feed into plain-text tooling —
//! search indexes, diff viewers, LLM context windows. Full LaTeX engines are
//! heavyweight and produce typeset output, not text. This crate instead runs
//! a single-pass, regex-driven rewrite that keeps the prose and reduces the
//! structure (sections, figures, tables, equations, lists) to Markdown
//! conventions. It is deliberately *not* a LaTeX parser: no macro expansion,
//! no bibliography resolution — well-formed, mostly flat input in, readable
//! Markdown out, with printed warnings where fidelity degrades.
//!
//! ## Pipeline Overview
//!
//! ```text
//! LaTeX
//!  │
//!  ├─ 1. Input     resolve raw text or .tex path
//!  ├─ 2. Metadata  abstract, \title/\author extraction, document body
//!  ├─ 3. Comments  strip unescaped %, fold wrapped lines into paragraphs
//!  ├─ 4. Structure maketitle, figures, tables, equations, headings, lists
//!  ├─ 5. Inline    \emph / \textbf / \textsc → * / ** / `
//!  └─ 6. Cleanup   leftover commands, whitespace normalisation
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use tex2md::{convert_str, ConversionConfig};
//!
//! let config = ConversionConfig::default();
//! let output = convert_str("\\section{Intro}\nHello \\textbf{world}.", &config);
//! assert!(output.markdown.contains("# Intro"));
//! assert!(output.markdown.contains("**world**"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `tex2md` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! tex2md = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{convert, convert_str, convert_to_file};
pub use error::{ParseWarning, Tex2MdError};
pub use output::{ConversionOutput, ConversionStats, DocumentMetadata};
pub use pipeline::input::output_path_for;
