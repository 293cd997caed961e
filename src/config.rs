//! Configuration types for LaTeX-to-Markdown conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share configs across calls, serialise them for logging, and
//! diff two runs to understand why their outputs differ.

use crate::error::Tex2MdError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a LaTeX-to-Markdown conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use tex2md::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .keep_labels(false)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Retain `\label{...}` identifiers as inline annotations after their
    /// owning construct (figures, tables, headings). Default: true.
    ///
    /// Labels are the only cross-reference anchors that survive conversion;
    /// dropping them produces cleaner prose at the cost of making `\ref`
    /// targets unrecoverable downstream.
    pub keep_labels: bool,

    /// Output path used when the input is a raw LaTeX string rather than a
    /// `.tex` file (raw input carries no path to derive a sibling from).
    /// Default: `output.txt`.
    pub default_output: PathBuf,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            keep_labels: true,
            default_output: PathBuf::from("output.txt"),
        }
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn keep_labels(mut self, v: bool) -> Self {
        self.config.keep_labels = v;
        self
    }

    pub fn default_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.default_output = path.into();
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Tex2MdError> {
        if self.config.default_output.as_os_str().is_empty() {
            return Err(Tex2MdError::InvalidConfig(
                "default_output must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}
