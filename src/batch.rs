//! Sequential batches over many files.
//!
//! A batch never stops on a per-file error: the error is recorded in the
//! [`BatchReport`] and reported through the progress callback, then the next
//! file is processed. Only a batch root that cannot be enumerated is fatal.

use crate::config::{CleanupConfig, ConversionConfig};
use crate::convert::{clean_and_format, convert_document};
use crate::converter::MarkdownConverter;
use crate::error::Doc2MdError;
use crate::output::{BatchReport, FileOutcome};
use crate::pipeline::input::{self, DocumentKind};
use crate::progress::BatchProgressCallback;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};
use walkdir::WalkDir;

/// All files under `root` whose extension maps to one of `kinds`, sorted.
///
/// Unreadable entries are skipped.
pub fn find_documents(root: &Path, kinds: &[DocumentKind]) -> Result<Vec<PathBuf>, Doc2MdError> {
    if !root.is_dir() {
        return Err(Doc2MdError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| DocumentKind::from_path(path).is_some_and(|k| kinds.contains(&k)))
        .collect();
    files.sort();
    Ok(files)
}

/// Expand directories in `paths` with [`find_documents`]; files pass through.
pub fn expand_paths(paths: &[PathBuf], kinds: &[DocumentKind]) -> Result<Vec<PathBuf>, Doc2MdError> {
    let mut out = Vec::new();
    for path in paths {
        if path.is_dir() {
            out.extend(find_documents(path, kinds)?);
        } else {
            out.push(path.clone());
        }
    }
    Ok(out)
}

/// Clean one file, rejecting anything that is not Markdown.
pub fn format_file(
    path: &Path,
    config: &CleanupConfig,
) -> Result<Option<crate::output::CleanupStats>, Doc2MdError> {
    match input::classify(path)? {
        DocumentKind::Markdown => clean_and_format(path, config),
        _ => Err(Doc2MdError::UnsupportedExtension {
            path: path.to_path_buf(),
            extension: input::dotted_extension(path),
        }),
    }
}

/// Clean every file in `files`.
pub fn format_all(
    files: &[PathBuf],
    config: &CleanupConfig,
    progress: &dyn BatchProgressCallback,
) -> BatchReport {
    run_batch(files, progress, |path| {
        format_file(path, config).map(|stats| FileOutcome::Done {
            path: path.to_path_buf(),
            action: None,
            markdown_path: stats.map(|_| path.to_path_buf()),
            stats,
            warning: None,
        })
    })
}

/// Convert every file in `files`.
pub fn convert_all<C>(
    files: &[PathBuf],
    config: &ConversionConfig,
    converter: &C,
    progress: &dyn BatchProgressCallback,
) -> BatchReport
where
    C: MarkdownConverter + ?Sized,
{
    run_batch(files, progress, |path| {
        convert_document(path, config, converter).map(|outcome| FileOutcome::Done {
            path: outcome.source,
            action: Some(outcome.action),
            markdown_path: outcome.markdown_path,
            stats: outcome.cleanup,
            warning: outcome.converter_error.map(|e| e.to_string()),
        })
    })
}

fn run_batch<F>(files: &[PathBuf], progress: &dyn BatchProgressCallback, mut process: F) -> BatchReport
where
    F: FnMut(&Path) -> Result<FileOutcome, Doc2MdError>,
{
    let start = Instant::now();
    let total = files.len();
    progress.on_batch_start(total);

    let mut report = BatchReport::default();
    for (i, path) in files.iter().enumerate() {
        let index = i + 1;
        progress.on_file_start(index, total, path);
        match process(path) {
            Ok(outcome) => {
                if let FileOutcome::Done {
                    warning: Some(ref w),
                    ..
                } = outcome
                {
                    progress.on_file_error(index, total, path, w);
                } else {
                    progress.on_file_complete(index, total, path);
                }
                report.files.push(outcome);
            }
            Err(e) => {
                let error = e.to_string();
                warn!("{}: {}", path.display(), error);
                progress.on_file_error(index, total, path, &error);
                report.files.push(FileOutcome::Failed {
                    path: path.clone(),
                    error,
                });
            }
        }
    }

    report.total_duration_ms = start.elapsed().as_millis() as u64;
    progress.on_batch_complete(total, report.succeeded());
    info!(
        "Batch complete: {}/{} files in {}ms",
        report.succeeded(),
        total,
        report.total_duration_ms
    );
    report
}
