//! Error types for the tex2md library.
//!
//! Two distinct types reflect two distinct failure modes:
//!
//! * [`Tex2MdError`] — **Fatal**: the conversion cannot proceed at all
//!   (missing file, wrong extension, unwritable output). Returned as
//!   `Err(Tex2MdError)` from the top-level `convert*` functions.
//!
//! * [`ParseWarning`] — **Non-fatal**: a construct could not be converted
//!   faithfully (unbalanced braces, nested tables) but the pipeline recovers
//!   with a best-effort substitution. Collected in
//!   [`crate::output::ConversionOutput::warnings`] so callers can inspect
//!   degraded fidelity rather than losing the whole document to one bad
//!   environment.
//!
//! The separation lets callers decide their own tolerance: treat any warning
//! as a failure, log and continue, or ignore them entirely.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the tex2md library.
///
/// Structural problems inside the document use [`ParseWarning`] and are
/// stored in [`crate::output::ConversionOutput`] rather than propagated here.
#[derive(Debug, Error)]
pub enum Tex2MdError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("LaTeX file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// A path input was given without the `.tex` extension.
    #[error("Input file must have a .tex extension, got: '{path}'")]
    NotATexFile { path: PathBuf },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A non-fatal warning emitted while converting a single construct.
///
/// Every emission is also logged through `tracing::warn!` at the point the
/// pipeline recovers, so CLI users see it without touching the library API.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum ParseWarning {
    /// A tracked command's argument ran past end-of-text with unclosed braces.
    /// The remainder of the text was taken as a best-effort argument.
    #[error("unbalanced braces in \\{command} argument; took remainder of input")]
    UnbalancedBraces { command: String },

    /// A `table` environment contains nested `tabular` environments, which
    /// grid conversion does not support. The original LaTeX was kept in a
    /// fenced code block.
    #[error("nested tabular environments detected; kept tabular content as LaTeX code")]
    NestedTabular,

    /// A `table` environment contains no parseable `tabular` body. The
    /// caption-stripped environment was kept in a fenced code block.
    #[error("table conversion found no tabular body; kept environment as LaTeX code")]
    NoTabularBody,
}
