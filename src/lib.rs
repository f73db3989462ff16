//! # doc2md
//!
//! Convert office documents (PDF, DOC, DOCX) to Markdown and tidy the result.
//!
//! ## Why this crate?
//!
//! Document converters get the words right but leave the Markdown noisy:
//! attribution banners, runs of blank lines, tabs, headings glued to the
//! paragraph above, ragged pipe tables and alt text copied from file names.
//! The conversion itself is delegated to an external tool behind the
//! [`MarkdownConverter`] trait; this crate owns the deterministic cleanup that
//! turns its output into stable, diff-friendly Markdown.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF/DOC/DOCX
//!  │
//!  ├─ 1. Convert  external converter → <target>/<stem>/ReadMe.md
//!  ├─ 2. Filter   drop attribution banner + trailing blanks
//!  ├─ 3. Space    blank lines around headings, collapse runs, tabs → spaces
//!  ├─ 4. Tables   reflow pipe tables into aligned columns
//!  ├─ 5. Images   alt text → fixed caption
//!  └─ 6. Output   overwrite the Markdown file in place
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use doc2md::{clean_and_format, convert_document, CommandConverter, ConversionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::builder().target_dir("converted").build()?;
//!     let outcome = convert_document("report.docx", &config, &CommandConverter::default())?;
//!     if let Some(err) = &outcome.converter_error {
//!         eprintln!("conversion failed: {err}");
//!     }
//!
//!     // Markdown files can be cleaned directly; a missing file is a no-op.
//!     clean_and_format("notes/ReadMe.md", &config.cleanup)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `doc2md` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod batch;
pub mod config;
pub mod convert;
pub mod converter;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod readme;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use batch::{convert_all, expand_paths, find_documents, format_all, format_file};
pub use config::{CleanupConfig, ConversionConfig, ConversionConfigBuilder};
pub use convert::{clean_and_format, conversion_paths, convert_document};
pub use converter::{CommandConverter, MarkdownConverter};
pub use error::{ConverterError, Doc2MdError};
pub use output::{
    BatchReport, CleanedMarkdown, CleanupStats, ConversionAction, ConversionOutcome, FileOutcome,
};
pub use pipeline::input::DocumentKind;
pub use pipeline::postprocess::clean_markdown;
pub use progress::{BatchProgressCallback, NoopProgressCallback};
pub use readme::{create_readme, find_templates, ReadmeOutcome};
