//! Public entry points: convert a document, clean a Markdown file.
//!
//! Both operations are synchronous and run to completion for one file. The
//! whole file is read, transformed in memory, and written back in one piece
//! (temp file + rename), so an interrupted run never leaves half a file.
//!
//! A path that does not exist is a silent no-op for both entry points.

use crate::config::{CleanupConfig, ConversionConfig};
use crate::converter::MarkdownConverter;
use crate::error::Doc2MdError;
use crate::output::{CleanupStats, ConversionAction, ConversionOutcome};
use crate::pipeline::input::{self, DocumentKind};
use crate::pipeline::postprocess;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Clean and format the Markdown file at `path` in place.
///
/// Returns `Ok(None)` without touching the file system when `path` does not
/// exist.
///
/// # Errors
/// - [`Doc2MdError::ReadFailed`]: the file exists but is unreadable or not UTF-8
/// - [`Doc2MdError::WriteFailed`]: the cleaned text could not be written back
pub fn clean_and_format(
    path: impl AsRef<Path>,
    config: &CleanupConfig,
) -> Result<Option<CleanupStats>, Doc2MdError> {
    let path = path.as_ref();
    if !path.exists() {
        debug!("Nothing to clean, file missing: {}", path.display());
        return Ok(None);
    }

    let start = Instant::now();
    let raw = std::fs::read_to_string(path).map_err(|e| Doc2MdError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    let cleaned = postprocess::clean_markdown(&raw, config);
    write_atomic(path, &cleaned.text)?;

    info!(
        "Cleaned {} ({} → {} lines) in {}ms",
        path.display(),
        cleaned.stats.lines_in,
        cleaned.stats.lines_out,
        start.elapsed().as_millis()
    );
    Ok(Some(cleaned.stats))
}

/// Where the conversion of `source` lands: `(directory, markdown file)`.
///
/// `docs/Report.pdf` with target `out` and file name `ReadMe.md` maps to
/// `(out/Report, out/Report/ReadMe.md)`.
pub fn conversion_paths(source: &Path, config: &ConversionConfig) -> (PathBuf, PathBuf) {
    let stem = source
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("document"));
    let dir = config.target_dir.join(stem);
    let file = dir.join(&config.output_file_name);
    (dir, file)
}

/// Convert `source` to Markdown (if needed) and clean the result.
///
/// Decision order:
/// 1. The conversion file already exists (and is `.md`, and `force` is off):
///    it is cleaned again, the converter is not run.
/// 2. `source` does not exist: no-op.
/// 3. `source` is Markdown: it is cleaned in place.
/// 4. Otherwise the conversion directory is recreated, the converter runs, its
///    output is written to the conversion file and cleaned.
///
/// A converter failure is not an `Err`: it is reported in
/// [`ConversionOutcome::converter_error`] and the cleanup pass still runs,
/// which is a no-op when the converter produced nothing.
///
/// # Errors
/// - [`Doc2MdError::UnsupportedExtension`]: `source` is not PDF/DOC/DOCX/MD
/// - [`Doc2MdError::SignatureMismatch`]: content does not match the extension
/// - I/O errors while preparing the directory or reading/writing Markdown
pub fn convert_document<C>(
    source: impl AsRef<Path>,
    config: &ConversionConfig,
    converter: &C,
) -> Result<ConversionOutcome, Doc2MdError>
where
    C: MarkdownConverter + ?Sized,
{
    let source = source.as_ref();
    let (conversion_dir, conversion_file) = conversion_paths(source, config);
    let outcome = |action, markdown_path: Option<PathBuf>, cleanup| ConversionOutcome {
        source: source.to_path_buf(),
        action,
        markdown_path,
        cleanup,
        converter_error: None,
    };

    // ── Step 1: existing conversion ──────────────────────────────────────
    let target_is_md = DocumentKind::from_path(&conversion_file) == Some(DocumentKind::Markdown);
    if !config.force && target_is_md && conversion_file.exists() {
        info!("Re-cleaning existing conversion: {}", conversion_file.display());
        let stats = clean_and_format(&conversion_file, &config.cleanup)?;
        return Ok(outcome(
            ConversionAction::Recleaned,
            Some(conversion_file),
            stats,
        ));
    }

    // ── Step 2: missing source ───────────────────────────────────────────
    if !source.exists() {
        debug!("Source missing, skipping: {}", source.display());
        return Ok(outcome(ConversionAction::SourceMissing, None, None));
    }

    // ── Step 3: Markdown source ──────────────────────────────────────────
    let kind = input::classify(source)?;
    if !kind.needs_conversion() {
        let stats = clean_and_format(source, &config.cleanup)?;
        return Ok(outcome(
            ConversionAction::CleanedSource,
            Some(source.to_path_buf()),
            stats,
        ));
    }
    if config.verify_signature {
        input::verify_signature(source, kind)?;
    }

    // ── Step 4: fresh conversion ─────────────────────────────────────────
    prepare_dir(&conversion_dir)?;

    let start = Instant::now();
    let converter_error = match converter.convert(source) {
        Ok(markdown) => {
            write_atomic(&conversion_file, &markdown)?;
            info!(
                "Converted {} ({}) in {}ms",
                source.display(),
                kind,
                start.elapsed().as_millis()
            );
            None
        }
        Err(e) => {
            warn!("Conversion of {} failed: {}", source.display(), e);
            Some(e)
        }
    };

    let stats = clean_and_format(&conversion_file, &config.cleanup)?;
    let action = if converter_error.is_some() {
        ConversionAction::ConversionFailed
    } else {
        ConversionAction::Converted
    };

    Ok(ConversionOutcome {
        source: source.to_path_buf(),
        action,
        markdown_path: Some(conversion_file),
        cleanup: stats,
        converter_error,
    })
}

/// Remove `dir` if present and create it empty.
fn prepare_dir(dir: &Path) -> Result<(), Doc2MdError> {
    let map = |e| Doc2MdError::CreateDirFailed {
        path: dir.to_path_buf(),
        source: e,
    };
    if dir.exists() {
        debug!("Removing previous conversion: {}", dir.display());
        std::fs::remove_dir_all(dir).map_err(map)?;
    }
    std::fs::create_dir_all(dir).map_err(map)
}

/// Write `text` to `path` via a sibling temp file and a rename.
pub(crate) fn write_atomic(path: &Path, text: &str) -> Result<(), Doc2MdError> {
    let mut tmp: OsString = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp_path = PathBuf::from(tmp);

    std::fs::write(&tmp_path, text).map_err(|e| Doc2MdError::WriteFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    std::fs::rename(&tmp_path, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp_path);
        Doc2MdError::WriteFailed {
            path: path.to_path_buf(),
            source: e,
        }
    })
}
