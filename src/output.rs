//! Output types: the conversion result, extracted metadata, and run stats.

use crate::error::ParseWarning;
use serde::{Deserialize, Serialize};

/// The complete result of a conversion.
///
/// Returned by [`crate::convert`] and [`crate::convert_str`]. The Markdown is
/// always produced, possibly with degraded fidelity for unsupported
/// constructs; check [`ConversionOutput::warnings`] for what was recovered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// The Markdown-flavored rendering of the document.
    pub markdown: String,
    /// Title and authors extracted from the preamble.
    pub metadata: DocumentMetadata,
    /// Non-fatal structural warnings emitted while converting.
    pub warnings: Vec<ParseWarning>,
    /// Size and timing figures for the run.
    pub stats: ConversionStats,
}

impl ConversionOutput {
    /// Check if any construct was converted with degraded fidelity.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Title and author declarations pulled out of the preamble.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Argument of `\title{...}`, if present.
    pub title: Option<String>,
    /// Authors from `\author{...}`, split on `\and` and commas.
    pub authors: Vec<String>,
}

/// Size and timing figures for one conversion.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Bytes of LaTeX source read.
    pub input_bytes: usize,
    /// Bytes of Markdown produced.
    pub output_bytes: usize,
    /// Wall-clock duration of the pipeline in milliseconds.
    pub duration_ms: u64,
}
