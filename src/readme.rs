//! ReadMe assembly from `rm_creator.md` templates.
//!
//! A template is ordinary Markdown plus two directives, each on its own line:
//!
//! ```text
//! [insert_file](chapters/intro/ReadMe.md)(1)
//! [insert_acinfo](https://example.org/diagrams)(activities.txt)
//! ```
//!
//! `insert_file` inlines another Markdown file, demoting its headings by the
//! given number of levels and copying the images it references next to the
//! generated ReadMe. `insert_acinfo` reads a `title:`/`fileName:` list and
//! emits one `###` section with an image link per diagram.
//!
//! Relative paths resolve against the template's directory. Missing include
//! files and failed image copies are logged and skipped; they never abort the
//! assembly.

use crate::convert::write_atomic;
use crate::error::Doc2MdError;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// File name of a ReadMe template.
pub const TEMPLATE_FILE_NAME: &str = "rm_creator.md";

/// File name of the generated ReadMe.
pub const README_FILE_NAME: &str = "ReadMe.md";

const INSERT_FILE: &str = "[insert_file]";
const INSERT_ACINFO: &str = "[insert_acinfo]";
const ACINFO_HEADING_LEVEL: usize = 3;

/// Result of one [`create_readme`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadmeOutcome {
    pub readme_path: PathBuf,
    /// False when the ReadMe already existed and `force` was off.
    pub written: bool,
    pub lines: usize,
    pub images_copied: usize,
}

/// All templates under `root`, sorted.
pub fn find_templates(root: &Path) -> Result<Vec<PathBuf>, Doc2MdError> {
    if !root.is_dir() {
        return Err(Doc2MdError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|n| n.eq_ignore_ascii_case(TEMPLATE_FILE_NAME))
        })
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    Ok(files)
}

/// Expand `template` into `ReadMe.md` in the same directory.
///
/// An existing ReadMe is only overwritten when `force` is set.
pub fn create_readme(template: &Path, force: bool) -> Result<ReadmeOutcome, Doc2MdError> {
    let base = template
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let readme_path = base.join(README_FILE_NAME);
    let source = std::fs::read_to_string(template).map_err(|e| Doc2MdError::ReadFailed {
        path: template.to_path_buf(),
        source: e,
    })?;

    let mut images_copied = 0usize;
    let mut result: Vec<String> = Vec::new();

    for line in source.lines() {
        if starts_with_ignore_case(line, INSERT_FILE) {
            let Some(file) = between(line, "(", ")") else {
                warn!("Malformed directive, kept verbatim: {}", line);
                result.push(line.to_string());
                continue;
            };
            let level = between(line, ")(", ")")
                .and_then(|l| l.trim().parse::<usize>().ok())
                .unwrap_or(0);
            let include = base.join(file.trim());
            result.extend(include_readme(&base, &include, level, &mut images_copied));
        } else if starts_with_ignore_case(line, INSERT_ACINFO) {
            let url = between(line, "(", ")").unwrap_or_default().trim();
            let list = between(line, ")(", ")").unwrap_or_default().trim();
            result.extend(include_activity_diagrams(
                &base.join(list),
                url,
                ACINFO_HEADING_LEVEL,
            ));
        } else {
            result.push(line.to_string());
        }
    }

    let written = force || !readme_path.exists();
    if written {
        let mut text = result.join("\n");
        if !result.is_empty() {
            text.push('\n');
        }
        write_atomic(&readme_path, &text)?;
        info!("Wrote {} ({} lines)", readme_path.display(), result.len());
    } else {
        info!(
            "Kept existing {} (use force to overwrite)",
            readme_path.display()
        );
    }

    Ok(ReadmeOutcome {
        readme_path,
        written,
        lines: result.len(),
        images_copied,
    })
}

/// Lines of `file` with headings demoted by `level` and images copied to `dest`.
fn include_readme(dest: &Path, file: &Path, level: usize, copied: &mut usize) -> Vec<String> {
    let content = match std::fs::read_to_string(file) {
        Ok(c) => c,
        Err(e) => {
            warn!("Skipping include {}: {}", file.display(), e);
            return Vec::new();
        }
    };
    let source_dir = file.parent().unwrap_or(Path::new("."));
    let prefix = "#".repeat(level);

    content
        .lines()
        .map(|line| {
            let trimmed = line.trim();
            if trimmed.starts_with("![") {
                if let Some(image) = between(line, "(", ")") {
                    if copy_image(&source_dir.join(image), &dest.join(image)) {
                        *copied += 1;
                    }
                }
                line.to_string()
            } else if trimmed.starts_with('#') {
                format!("{prefix}{line}")
            } else {
                line.to_string()
            }
        })
        .collect()
}

fn copy_image(from: &Path, to: &Path) -> bool {
    if from == to {
        return false;
    }
    let result = to
        .parent()
        .map_or(Ok(()), std::fs::create_dir_all)
        .and_then(|_| std::fs::copy(from, to));
    match result {
        Ok(_) => true,
        Err(e) => {
            debug!("Ignoring image copy {} → {}: {}", from.display(), to.display(), e);
            false
        }
    }
}

/// One section per `fileName:` entry, titled by the preceding `title:`.
fn include_activity_diagrams(list: &Path, url: &str, level: usize) -> Vec<String> {
    let Ok(content) = std::fs::read_to_string(list) else {
        debug!("No activity list at {}", list.display());
        return Vec::new();
    };
    let url = url.trim_end_matches('/');
    let hashes = "#".repeat(level);
    let mut title = String::new();
    let mut result = Vec::new();

    for line in content.lines() {
        match line.split_once(':') {
            Some(("title", value)) => title = value.trim().to_string(),
            Some(("fileName", value)) => {
                if !result.is_empty() {
                    result.push(String::new());
                }
                result.push(format!("{hashes} {title}"));
                result.push(String::new());
                result.push(format!("![{title}]({url}/{})", value.trim()));
            }
            _ => {}
        }
    }
    result
}

fn starts_with_ignore_case(line: &str, prefix: &str) -> bool {
    line.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Text between the first `start` and the next `end` after it.
fn between<'a>(s: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let from = s.find(start)? + start.len();
    let len = s[from..].find(end)?;
    Some(&s[from..from + len])
}
