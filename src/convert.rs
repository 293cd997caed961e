//! Conversion entry points.
//!
//! [`convert_str`] is the pure in-memory pipeline: a fixed sequence of
//! string transformations, each a stateless function over the whole
//! document. [`convert`] adds input resolution on top, and
//! [`convert_to_file`] writes the result atomically.

use crate::config::ConversionConfig;
use crate::error::Tex2MdError;
use crate::output::{ConversionOutput, ConversionStats, DocumentMetadata};
use crate::pipeline::{cleanup, comments, floats, input, markup, metadata, tables};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Convert a LaTeX document (raw text or a `.tex` path) to Markdown.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `input_str` — Raw LaTeX content (any string containing a newline) or a
///   path to a `.tex` file
/// * `config` — Conversion configuration
///
/// # Returns
/// `Ok(ConversionOutput)` on success, even when constructs were converted
/// with degraded fidelity (check `output.warnings`).
///
/// # Errors
/// Returns `Err(Tex2MdError)` only for usage errors:
/// - File not found / permission denied
/// - Path without a `.tex` extension
pub fn convert(
    input_str: impl AsRef<str>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Tex2MdError> {
    let resolved = input::resolve_input(input_str.as_ref())?;
    Ok(convert_str(resolved.content(), config))
}

/// Run the conversion pipeline over in-memory LaTeX source.
///
/// Infallible: structural problems degrade fidelity and are reported in
/// [`ConversionOutput::warnings`], never returned as errors.
pub fn convert_str(latex: &str, config: &ConversionConfig) -> ConversionOutput {
    let start = Instant::now();
    let mut warnings = Vec::new();
    info!(bytes = latex.len(), "starting conversion");

    // ── Step 1: Normalise the abstract ───────────────────────────────────
    let text = metadata::normalize_abstract(latex);

    // ── Step 2: Extract title and authors ────────────────────────────────
    let (text, title, authors) = metadata::extract_title_authors(&text, &mut warnings);
    debug!(%title, %authors, "extracted preamble metadata");

    // ── Step 3: Isolate the document body ────────────────────────────────
    let text = metadata::extract_document_body(&text);

    // ── Step 4: Strip comments, fold paragraphs ──────────────────────────
    let text = comments::remove_comments(&text);

    // ── Step 5: Structural conversions ───────────────────────────────────
    let text = markup::replace_maketitle(&text, &title, &authors);
    let text = floats::replace_figures(&text, config.keep_labels, &mut warnings);
    let text = tables::replace_tables(&text, config.keep_labels, &mut warnings);
    let text = floats::replace_equations(&text, config.keep_labels);
    let text = markup::replace_headings(&text, config.keep_labels);
    let text = markup::replace_lists(&text);
    let text = markup::apply_inline_formats(&text);

    // ── Step 6: Leftover commands and final whitespace ───────────────────
    let text = cleanup::remove_leftover_commands(&text, &mut warnings);
    let text = cleanup::remove_formatting_cmds(&text);
    let markdown = cleanup::final_cleanup(&text);

    let stats = ConversionStats {
        input_bytes: latex.len(),
        output_bytes: markdown.len(),
        duration_ms: start.elapsed().as_millis() as u64,
    };
    info!(
        output_bytes = stats.output_bytes,
        warnings = warnings.len(),
        duration_ms = stats.duration_ms,
        "conversion complete"
    );

    ConversionOutput {
        markdown,
        metadata: DocumentMetadata {
            title: (!title.is_empty()).then(|| title.clone()),
            authors: metadata::split_authors(&authors),
        },
        warnings,
        stats,
    }
}

/// Convert a LaTeX document and write the Markdown to `output_path`.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub fn convert_to_file(
    input_str: impl AsRef<str>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Tex2MdError> {
    let output = convert(input_str, config)?;
    let path = output_path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| Tex2MdError::OutputWriteFailed {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
    }

    let tmp_path = path.with_extension("txt.tmp");
    std::fs::write(&tmp_path, &output.markdown).map_err(|e| Tex2MdError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    std::fs::rename(&tmp_path, path).map_err(|e| Tex2MdError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!(path = %path.display(), "wrote Markdown output");
    Ok(output)
}
