//! Image alt-text rewrite.
//!
//! Converters fill image alt text with whatever they find (file names, OCR
//! fragments, auto-generated descriptions). Every `![...]` span is replaced by
//! one fixed caption; the `(target)` part that follows is left untouched and
//! is never resolved.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

static RE_IMAGE_ALT: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[[^\]]*\]").unwrap());

/// Replace every image alt text in `text` with `caption`.
///
/// Returns the rewritten text and the number of spans replaced.
pub fn rewrite_image_captions(text: &str, caption: &str) -> (String, usize) {
    let count = RE_IMAGE_ALT.find_iter(text).count();
    if count == 0 {
        return (text.to_string(), 0);
    }
    let replacement = format!("![{}]", caption);
    let rewritten = RE_IMAGE_ALT
        .replace_all(text, NoExpand(replacement.as_str()))
        .into_owned();
    (rewritten, count)
}
