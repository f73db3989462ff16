//! Error types for the doc2md library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Doc2MdError`]: **Fatal** for one call: the file could not be read or
//!   written, the extension is not supported, the configuration is invalid.
//!   Returned as `Err(Doc2MdError)` from [`crate::convert_document`] and
//!   [`crate::clean_and_format`].
//!
//! * [`ConverterError`]: **Non-fatal**: the external converter failed for
//!   one document. It is stored in [`crate::output::ConversionOutcome`]
//!   and the cleanup pass still runs on whatever the converter left behind.
//!
//! A missing input file is neither: both entry points treat it as a no-op.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the doc2md library.
#[derive(Debug, Error)]
pub enum Doc2MdError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The file exists but could not be read (permissions, invalid UTF-8).
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The extension is neither a convertible document nor Markdown.
    #[error("The file extension '{extension}' is not supported: '{path}'")]
    UnsupportedExtension { path: PathBuf, extension: String },

    /// The extension says one thing, the leading bytes say another.
    #[error("File '{path}' does not look like a {kind} document\nFirst bytes: {magic:?}")]
    SignatureMismatch {
        path: PathBuf,
        kind: &'static str,
        magic: Vec<u8>,
    },

    /// A batch root does not exist or is not a directory.
    #[error("Directory not found: '{path}'")]
    DirectoryNotFound { path: PathBuf },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create the conversion directory.
    #[error("Failed to prepare directory '{path}': {source}")]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write the output Markdown file.
    #[error("Failed to write output file '{path}': {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Failure of the external document converter.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// The converter program could not be started at all.
    #[error("Failed to start converter '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The converter ran and exited unsuccessfully.
    #[error("Converter exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    /// The converter produced something that is not usable Markdown text.
    #[error("Converter produced invalid output: {0}")]
    InvalidOutput(String),

    /// Any other converter-specific failure.
    #[error("{0}")]
    Other(String),
}
