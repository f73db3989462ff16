//! Progress-callback trait for per-file batch events.
//!
//! Pass a [`BatchProgressCallback`] to [`crate::batch::convert_all`] or
//! [`crate::batch::format_all`] to receive events as each file is processed.
//! The library knows nothing about terminals; the CLI forwards these events
//! to a progress bar.
//!
//! # Example
//!
//! ```rust
//! use doc2md::BatchProgressCallback;
//! use std::cell::Cell;
//!
//! struct Counting {
//!     done: Cell<usize>,
//! }
//!
//! impl BatchProgressCallback for Counting {
//!     fn on_file_complete(&self, _index: usize, _total: usize, _path: &std::path::Path) {
//!         self.done.set(self.done.get() + 1);
//!     }
//! }
//!
//! let counter = Counting { done: Cell::new(0) };
//! counter.on_file_complete(1, 1, std::path::Path::new("a.md"));
//! assert_eq!(counter.done.get(), 1);
//! ```

use std::path::Path;

/// Called by the batch runners as they process each file.
///
/// Files are processed sequentially, one at a time. All methods have default
/// no-op implementations so callers only override what they care about.
pub trait BatchProgressCallback {
    /// Called once before the first file.
    ///
    /// # Arguments
    /// * `total_files`: number of files that will be processed
    fn on_batch_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called just before a file is processed.
    ///
    /// # Arguments
    /// * `index`: 1-indexed position in the batch
    /// * `total`: total files in the batch
    /// * `path` : the file
    fn on_file_start(&self, index: usize, total: usize, path: &Path) {
        let _ = (index, total, path);
    }

    /// Called when a file was processed (including no-ops).
    fn on_file_complete(&self, index: usize, total: usize, path: &Path) {
        let _ = (index, total, path);
    }

    /// Called when a file failed; the batch continues with the next one.
    ///
    /// # Arguments
    /// * `error`: human-readable error description
    fn on_file_error(&self, index: usize, total: usize, path: &Path, error: &str) {
        let _ = (index, total, path, error);
    }

    /// Called once after all files have been attempted.
    ///
    /// # Arguments
    /// * `total_files`  : files in the batch
    /// * `success_count`: files that did not fail
    fn on_batch_complete(&self, total_files: usize, success_count: usize) {
        let _ = (total_files, success_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl BatchProgressCallback for NoopProgressCallback {}
