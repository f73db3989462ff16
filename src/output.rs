//! Result types returned by the cleanup and conversion entry points.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Counters collected by one cleanup run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupStats {
    /// Lines read from the input.
    pub lines_in: usize,
    /// Lines written to the output.
    pub lines_out: usize,
    /// Lines dropped by the attribution filter.
    pub boilerplate_lines_removed: usize,
    /// Pipe-table blocks that were reflowed.
    pub tables_formatted: usize,
    /// Image alt-text spans replaced by the caption.
    pub images_rewritten: usize,
}

/// Cleaned Markdown text plus the counters that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedMarkdown {
    pub text: String,
    pub stats: CleanupStats,
}

/// What [`crate::convert_document`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionAction {
    /// The conversion file already existed and was cleaned again.
    Recleaned,
    /// The source was itself Markdown and was cleaned in place.
    CleanedSource,
    /// The external converter ran and its output was cleaned.
    Converted,
    /// The external converter failed; cleanup ran on whatever it left.
    ConversionFailed,
    /// The source does not exist; nothing happened.
    SourceMissing,
}

/// Outcome of one [`crate::convert_document`] call.
#[derive(Debug, Serialize)]
pub struct ConversionOutcome {
    pub source: PathBuf,
    pub action: ConversionAction,
    /// The Markdown file that was (or would have been) cleaned.
    pub markdown_path: Option<PathBuf>,
    /// Present when the cleanup pass found a file to process.
    pub cleanup: Option<CleanupStats>,
    /// Message of the converter failure, if any.
    #[serde(serialize_with = "serialize_error")]
    pub converter_error: Option<crate::error::ConverterError>,
}

fn serialize_error<S>(
    error: &Option<crate::error::ConverterError>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match error {
        Some(e) => serializer.serialize_some(&e.to_string()),
        None => serializer.serialize_none(),
    }
}

/// Per-file entry of a [`BatchReport`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// The file was processed.
    Done {
        path: PathBuf,
        action: Option<ConversionAction>,
        markdown_path: Option<PathBuf>,
        stats: Option<CleanupStats>,
        /// Converter message when the conversion itself failed.
        warning: Option<String>,
    },
    /// The file could not be processed; the batch carried on.
    Failed { path: PathBuf, error: String },
}

impl FileOutcome {
    pub fn path(&self) -> &PathBuf {
        match self {
            FileOutcome::Done { path, .. } | FileOutcome::Failed { path, .. } => path,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FileOutcome::Failed { .. })
    }
}

/// Summary of a sequential batch over many files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub files: Vec<FileOutcome>,
    pub total_duration_ms: u64,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.files.iter().filter(|f| !f.is_failed()).count()
    }

    pub fn failed(&self) -> usize {
        self.files.iter().filter(|f| f.is_failed()).count()
    }
}
