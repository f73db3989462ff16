//! Line classification shared by every cleanup stage.

/// Coarse category of a single Markdown line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace-only.
    Blank,
    /// ATX heading: the line starts with one or more `#`.
    Heading,
    /// Pipe-table row: the line, trimmed of leading spaces/tabs, starts with `|`.
    TableRow,
    /// Anything else.
    Text,
}

impl LineKind {
    /// Classify `line`. Blank wins over everything, then headings, then tables.
    pub fn of(line: &str) -> Self {
        if is_blank(line) {
            LineKind::Blank
        } else if is_heading(line) {
            LineKind::Heading
        } else if is_table_row(line) {
            LineKind::TableRow
        } else {
            LineKind::Text
        }
    }
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Headings are recognised only at column zero; `  # x` is not a heading.
pub fn is_heading(line: &str) -> bool {
    line.starts_with('#')
}

pub fn is_table_row(line: &str) -> bool {
    line.trim_start_matches([' ', '\t']).starts_with('|')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines() {
        assert_eq!(LineKind::of(""), LineKind::Blank);
        assert_eq!(LineKind::of("   \t "), LineKind::Blank);
    }

    #[test]
    fn headings() {
        assert_eq!(LineKind::of("# Title"), LineKind::Heading);
        assert_eq!(LineKind::of("###### deep"), LineKind::Heading);
        assert_eq!(LineKind::of("#tag"), LineKind::Heading);
        assert_eq!(LineKind::of("  # indented"), LineKind::Text);
    }

    #[test]
    fn table_rows() {
        assert_eq!(LineKind::of("| a | b |"), LineKind::TableRow);
        assert_eq!(LineKind::of(" \t|a|"), LineKind::TableRow);
        assert_eq!(LineKind::of("a | b"), LineKind::Text);
    }
}
