//! Input resolution: raw LaTeX text vs a `.tex` file path.
//!
//! A string containing a newline cannot be a file path, so it is treated as
//! raw LaTeX content; anything else must name an existing `.tex` file.
//! Validation happens here, before any processing, so callers get a
//! meaningful error rather than converting garbage.

use crate::config::ConversionConfig;
use crate::error::Tex2MdError;
use std::path::PathBuf;
use tracing::debug;

/// The resolved input — raw content or a file that was read in full.
#[derive(Debug)]
pub enum ResolvedInput {
    /// Input was raw LaTeX text; no path context exists.
    Raw(String),
    /// Input named a `.tex` file.
    File { content: String, path: PathBuf },
}

impl ResolvedInput {
    /// The LaTeX content regardless of how it was resolved.
    pub fn content(&self) -> &str {
        match self {
            ResolvedInput::Raw(content) => content,
            ResolvedInput::File { content, .. } => content,
        }
    }

    /// Where the Markdown should be written: the sibling `.txt` for file
    /// input, the configured default for raw input.
    pub fn output_path(&self, config: &ConversionConfig) -> PathBuf {
        match self {
            ResolvedInput::Raw(_) => config.default_output.clone(),
            ResolvedInput::File { path, .. } => path.with_extension("txt"),
        }
    }
}

/// Check if the input string is raw LaTeX rather than a path.
pub fn is_raw_latex(input: &str) -> bool {
    input.contains('\n')
}

/// Resolve the input string, reading and validating a `.tex` file when a
/// path is given.
pub fn resolve_input(input: &str) -> Result<ResolvedInput, Tex2MdError> {
    if is_raw_latex(input) {
        debug!(bytes = input.len(), "treating input as raw LaTeX");
        return Ok(ResolvedInput::Raw(input.to_string()));
    }

    let path = PathBuf::from(input);
    if path.extension().and_then(|e| e.to_str()) != Some("tex") {
        return Err(Tex2MdError::NotATexFile { path });
    }

    match std::fs::read_to_string(&path) {
        Ok(content) => {
            debug!(path = %path.display(), bytes = content.len(), "read LaTeX source");
            Ok(ResolvedInput::File { content, path })
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(Tex2MdError::PermissionDenied { path })
        }
        Err(_) => Err(Tex2MdError::FileNotFound { path }),
    }
}

/// Derive the output path for an input string without converting it.
///
/// Performs the same extension validation as [`resolve_input`] but does not
/// read the file.
pub fn output_path_for(input: &str, config: &ConversionConfig) -> Result<PathBuf, Tex2MdError> {
    if is_raw_latex(input) {
        return Ok(config.default_output.clone());
    }
    let path = PathBuf::from(input);
    if path.extension().and_then(|e| e.to_str()) != Some("tex") {
        return Err(Tex2MdError::NotATexFile { path });
    }
    Ok(path.with_extension("txt"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_input_detected_by_newline() {
        assert!(is_raw_latex("line one\nline two"));
        assert!(!is_raw_latex("paper.tex"));
    }

    #[test]
    fn raw_input_uses_default_output() {
        let config = ConversionConfig::default();
        let resolved = resolve_input("a\nb").unwrap();
        assert_eq!(resolved.output_path(&config), PathBuf::from("output.txt"));
    }

    #[test]
    fn wrong_extension_rejected() {
        let err = resolve_input("paper.pdf").unwrap_err();
        assert!(matches!(err, Tex2MdError::NotATexFile { .. }));
    }

    #[test]
    fn missing_file_reported() {
        let err = resolve_input("definitely_not_here.tex").unwrap_err();
        assert!(matches!(err, Tex2MdError::FileNotFound { .. }));
    }

    #[test]
    fn output_path_is_sibling_txt() {
        let config = ConversionConfig::default();
        assert_eq!(
            output_path_for("dir/paper.tex", &config).unwrap(),
            PathBuf::from("dir/paper.txt")
        );
    }
}
