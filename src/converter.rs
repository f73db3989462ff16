//! The external document converter.
//!
//! Parsing PDF/DOC/DOCX is delegated entirely to another tool. The library
//! only needs one capability from it, expressed by [`MarkdownConverter`]:
//! turn a source file into Markdown text. [`CommandConverter`] fulfils it by
//! running a command-line converter and reading its standard output; tests and
//! embedders can supply any other implementation, including a plain closure.

use crate::error::ConverterError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// Placeholder in [`CommandConverter::args`] replaced by the source path.
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// Converts one source document to Markdown text.
pub trait MarkdownConverter {
    fn convert(&self, source: &Path) -> Result<String, ConverterError>;
}

impl<F> MarkdownConverter for F
where
    F: Fn(&Path) -> Result<String, ConverterError>,
{
    fn convert(&self, source: &Path) -> Result<String, ConverterError> {
        self(source)
    }
}

/// Runs an external program and captures its standard output as Markdown.
///
/// # Example
/// ```rust
/// use doc2md::CommandConverter;
///
/// let pandoc = CommandConverter::new("pandoc", ["-t", "gfm", "{input}"]);
/// assert_eq!(pandoc.program, "pandoc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandConverter {
    /// Program name or path, resolved through `PATH`.
    pub program: String,
    /// Arguments; every `{input}` is replaced by the source path. When no
    /// argument mentions `{input}`, the path is appended as the last argument.
    pub args: Vec<String>,
}

impl Default for CommandConverter {
    /// `markitdown <input>`: reads PDF, DOC and DOCX and prints Markdown.
    fn default() -> Self {
        Self {
            program: "markitdown".to_string(),
            args: vec![INPUT_PLACEHOLDER.to_string()],
        }
    }
}

impl CommandConverter {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Arguments for converting `source`.
    pub fn render_args(&self, source: &Path) -> Vec<String> {
        let source = source.to_string_lossy();
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|a| a.replace(INPUT_PLACEHOLDER, &source))
            .collect();
        if !self.args.iter().any(|a| a.contains(INPUT_PLACEHOLDER)) {
            args.push(source.into_owned());
        }
        args
    }
}

impl MarkdownConverter for CommandConverter {
    fn convert(&self, source: &Path) -> Result<String, ConverterError> {
        let args = self.render_args(source);
        info!("Running converter: {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| ConverterError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(ConverterError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let markdown = String::from_utf8(output.stdout)
            .map_err(|e| ConverterError::InvalidOutput(format!("not UTF-8: {e}")))?;
        debug!("Converter produced {} bytes", markdown.len());
        Ok(markdown)
    }
}
