//! Pipeline stages for LaTeX-to-Markdown conversion.
//!
//! Each submodule implements one transformation step as a pure
//! `&str -> String` function over the whole document. Keeping stages
//! separate makes each independently testable and lets us re-order or
//! extend the pipeline without touching other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ metadata ──▶ comments ──▶ markup/floats/tables ──▶ cleanup
//! (.tex/raw) (title,    (strip %,     (structural               (leftover
//!             body)      fold paras)   conversions)              cmds, ws)
//! ```
//!
//! 1. [`input`]    — resolve raw text vs `.tex` path, derive the output path
//! 2. [`scan`]     — brace-balanced argument scanner shared by later stages
//! 3. [`metadata`] — abstract normalisation, title/author extraction,
//!    document-body isolation
//! 4. [`comments`] — unescaped-`%` stripping and paragraph folding
//! 5. [`floats`]   — figure and equation reduction
//! 6. [`tables`]   — table reduction with tabular→grid conversion
//! 7. [`markup`]   — maketitle, headings, lists, inline formats
//! 8. [`cleanup`]  — leftover-command removal and final whitespace pass

pub mod cleanup;
pub mod comments;
pub mod floats;
pub mod input;
pub mod markup;
pub mod metadata;
pub mod scan;
pub mod tables;
