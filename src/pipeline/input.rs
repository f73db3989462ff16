//! Input classification: decide what kind of document a path names.
//!
//! The extension decides the route (convert vs. clean in place). Before the
//! external converter is invoked the leading bytes are compared with the
//! format's signature, so callers get a meaningful error rather than an
//! opaque converter crash on a renamed or truncated file.

use crate::error::Doc2MdError;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Source formats understood by the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Doc,
    Docx,
    Markdown,
}

impl DocumentKind {
    /// Formats that need the external converter.
    pub const CONVERTIBLE: [DocumentKind; 3] =
        [DocumentKind::Pdf, DocumentKind::Doc, DocumentKind::Docx];

    /// Classify by extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "doc" => Some(DocumentKind::Doc),
            "docx" => Some(DocumentKind::Docx),
            "md" => Some(DocumentKind::Markdown),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Doc => "doc",
            DocumentKind::Docx => "docx",
            DocumentKind::Markdown => "md",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "PDF",
            DocumentKind::Doc => "DOC",
            DocumentKind::Docx => "DOCX",
            DocumentKind::Markdown => "Markdown",
        }
    }

    pub fn needs_conversion(self) -> bool {
        self != DocumentKind::Markdown
    }

    fn signature(self) -> Option<&'static [u8]> {
        match self {
            DocumentKind::Pdf => Some(b"%PDF"),
            // OOXML is a zip container.
            DocumentKind::Docx => Some(b"PK\x03\x04"),
            // Legacy Word is an OLE2 compound file.
            DocumentKind::Doc => Some(&[0xD0, 0xCF, 0x11, 0xE0]),
            DocumentKind::Markdown => None,
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Extension of `path` with its leading dot, or an empty string.
pub fn dotted_extension(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}

/// Classify `path`, failing with [`Doc2MdError::UnsupportedExtension`].
pub fn classify(path: &Path) -> Result<DocumentKind, Doc2MdError> {
    DocumentKind::from_path(path).ok_or_else(|| Doc2MdError::UnsupportedExtension {
        path: path.to_path_buf(),
        extension: dotted_extension(path),
    })
}

/// Compare the first bytes of `path` with the signature of `kind`.
///
/// Files shorter than the signature are accepted; the converter reports those.
pub fn verify_signature(path: &Path, kind: DocumentKind) -> Result<(), Doc2MdError> {
    let Some(expected) = kind.signature() else {
        return Ok(());
    };

    let mut file = std::fs::File::open(path).map_err(|e| Doc2MdError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut magic = vec![0u8; expected.len()];
    if file.read_exact(&mut magic).is_ok() && magic != expected {
        return Err(Doc2MdError::SignatureMismatch {
            path: path.to_path_buf(),
            kind: kind.name(),
            magic,
        });
    }

    debug!("Signature ok for {} source: {}", kind, path.display());
    Ok(())
}
