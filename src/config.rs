//! Configuration types for conversion and Markdown cleanup.
//!
//! There is no configuration file and no process-wide state: every knob is a
//! field on [`CleanupConfig`] or [`ConversionConfig`], and callers pass the
//! value explicitly into [`crate::convert_document`] / [`crate::clean_and_format`].
//! [`ConversionConfig`] is built via its [`ConversionConfigBuilder`] so callers
//! set only what they care about and rely on the defaults for the rest.

use crate::error::Doc2MdError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Attribution banner emitted by the Aspose.Words Markdown exporter.
pub const DEFAULT_BOILERPLATE_MARKER: &str = "Aspose.Words";

/// Caption that replaces every image alt text.
pub const DEFAULT_IMAGE_CAPTION: &str = "Illustration";

/// File name of the Markdown file produced inside each conversion directory.
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "ReadMe.md";

/// Settings for the Markdown cleanup pipeline.
///
/// # Example
/// ```rust
/// use doc2md::CleanupConfig;
///
/// let config = CleanupConfig {
///     boilerplate_markers: vec!["ConverterLib".into()],
///     ..CleanupConfig::default()
/// };
/// assert_eq!(config.image_caption, "Illustration");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    /// Substrings identifying a converter attribution banner. A bold line
    /// (`**...**`) containing any of them, case-insensitively, starts a
    /// suppressed block. Default: `["Aspose.Words"]`.
    pub boilerplate_markers: Vec<String>,

    /// Literal placed between `![` and `]` of every image. Default: `Illustration`.
    pub image_caption: String,

    /// Replacement for each tab character. Default: two spaces.
    pub tab_replacement: String,

    /// Reflow pipe tables into aligned columns. Default: true.
    pub format_tables: bool,

    /// Replace image alt text with [`Self::image_caption`]. Default: true.
    pub rewrite_images: bool,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            boilerplate_markers: vec![DEFAULT_BOILERPLATE_MARKER.to_string()],
            image_caption: DEFAULT_IMAGE_CAPTION.to_string(),
            tab_replacement: "  ".to_string(),
            format_tables: true,
            rewrite_images: true,
        }
    }
}

impl CleanupConfig {
    /// Check invariants the pipeline relies on.
    pub fn validate(&self) -> Result<(), Doc2MdError> {
        if self.boilerplate_markers.iter().any(|m| m.trim().is_empty()) {
            return Err(Doc2MdError::InvalidConfig(
                "Boilerplate markers must not be empty".into(),
            ));
        }
        if self.image_caption.contains([']', '|', '\n']) {
            return Err(Doc2MdError::InvalidConfig(format!(
                "Image caption may not contain ']', '|' or newlines, got {:?}",
                self.image_caption
            )));
        }
        if self.tab_replacement.contains('\t') || self.tab_replacement.contains('\n') {
            return Err(Doc2MdError::InvalidConfig(
                "Tab replacement may not contain tabs or newlines".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration for converting a document into a Markdown file.
///
/// # Example
/// ```rust
/// use doc2md::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .target_dir("/tmp/converted")
///     .output_file_name("index.md")
///     .force(true)
///     .build()
///     .unwrap();
/// assert!(config.force);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Directory receiving one sub-directory per converted document. Default: `.`.
    pub target_dir: PathBuf,

    /// Name of the Markdown file inside each conversion directory. Default: `ReadMe.md`.
    ///
    /// Only names ending in `.md` are re-cleaned when the conversion already
    /// exists; other names always trigger a fresh conversion.
    pub output_file_name: String,

    /// Discard an existing conversion and run the converter again. Default: false.
    pub force: bool,

    /// Check the leading bytes of the source against its extension before
    /// invoking the converter. Default: true.
    pub verify_signature: bool,

    /// Settings for the cleanup pass run after every conversion.
    pub cleanup: CleanupConfig,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            target_dir: PathBuf::from("."),
            output_file_name: DEFAULT_OUTPUT_FILE_NAME.to_string(),
            force: false,
            verify_signature: true,
            cleanup: CleanupConfig::default(),
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
    pub fn target_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.target_dir = dir.into();
        self
    }

    pub fn output_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.output_file_name = name.into();
        self
    }

    pub fn force(mut self, v: bool) -> Self {
        self.config.force = v;
        self
    }

    pub fn verify_signature(mut self, v: bool) -> Self {
        self.config.verify_signature = v;
        self
    }

    pub fn cleanup(mut self, cleanup: CleanupConfig) -> Self {
        self.config.cleanup = cleanup;
        self
    }

    /// Replace the attribution markers; an empty list disables the filter.
    pub fn boilerplate_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.cleanup.boilerplate_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn image_caption(mut self, caption: impl Into<String>) -> Self {
        self.config.cleanup.image_caption = caption.into();
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Doc2MdError> {
        let c = &self.config;
        let name = c.output_file_name.trim();
        if name.is_empty() {
            return Err(Doc2MdError::InvalidConfig(
                "Output file name must not be empty".into(),
            ));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(Doc2MdError::InvalidConfig(format!(
                "Output file name must not contain path separators, got '{}'",
                name
            )));
        }
        c.cleanup.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = ConversionConfig::default();
        assert_eq!(c.output_file_name, "ReadMe.md");
        assert!(!c.force);
        assert!(c.verify_signature);
        assert_eq!(c.cleanup.boilerplate_markers, vec!["Aspose.Words"]);
        assert_eq!(c.cleanup.tab_replacement, "  ");
    }

    #[test]
    fn builder_sets_fields() {
        let c = ConversionConfig::builder()
            .target_dir("out")
            .output_file_name("doc.md")
            .force(true)
            .boilerplate_markers(["ConverterLib", "Other"])
            .image_caption("Figure")
            .build()
            .unwrap();
        assert_eq!(c.target_dir, PathBuf::from("out"));
        assert_eq!(c.output_file_name, "doc.md");
        assert!(c.force);
        assert_eq!(c.cleanup.boilerplate_markers.len(), 2);
        assert_eq!(c.cleanup.image_caption, "Figure");
    }

    #[test]
    fn builder_rejects_bad_output_name() {
        assert!(ConversionConfig::builder()
            .output_file_name("")
            .build()
            .is_err());
        assert!(ConversionConfig::builder()
            .output_file_name("sub/ReadMe.md")
            .build()
            .is_err());
    }

    #[test]
    fn builder_rejects_blank_marker() {
        let err = ConversionConfig::builder()
            .boilerplate_markers(["  "])
            .build()
            .unwrap_err();
        assert!(matches!(err, Doc2MdError::InvalidConfig(_)));
    }

    #[test]
    fn caption_with_bracket_is_invalid() {
        let c = CleanupConfig {
            image_caption: "a]b".into(),
            ..CleanupConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn caption_with_pipe_is_invalid() {
        let c = CleanupConfig {
            image_caption: "a|b".into(),
            ..CleanupConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn cleanup_config_deserialises_partial_json() {
        let c: CleanupConfig = serde_json::from_str(r#"{"image_caption":"Bild"}"#).unwrap();
        assert_eq!(c.image_caption, "Bild");
        assert!(c.format_tables);
        assert_eq!(c.boilerplate_markers, vec!["Aspose.Words"]);
    }
}
