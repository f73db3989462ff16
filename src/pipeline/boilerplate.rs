//! Suppression of converter attribution banners.
//!
//! Document converters running in evaluation mode stamp a bold banner such as
//! `**Created with Aspose.Words ...**` into their output, usually followed by
//! a few blank lines. The filter drops the banner and the blank run after it
//! in a single forward pass without lookahead.
//!
//! A banner at the very end of the input swallows the trailing blank lines
//! with it; nothing is ever emitted for a block that never closes.

use super::classify::is_blank;

/// Filter state between two lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterState {
    #[default]
    Normal,
    SuppressingBoilerplate,
}

/// Streaming filter for attribution banners.
#[derive(Debug, Clone)]
pub struct BoilerplateFilter {
    markers: Vec<String>,
    state: FilterState,
    removed: usize,
}

impl BoilerplateFilter {
    /// Create a filter matching any of `markers`, case-insensitively.
    pub fn new<S: AsRef<str>>(markers: &[S]) -> Self {
        Self {
            markers: markers
                .iter()
                .map(|m| m.as_ref().to_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
            state: FilterState::Normal,
            removed: 0,
        }
    }

    pub fn state(&self) -> FilterState {
        self.state
    }

    /// Number of lines suppressed so far.
    pub fn removed(&self) -> usize {
        self.removed
    }

    /// Feed one line; returns it back when it should continue down the pipeline.
    pub fn accept<'a>(&mut self, line: &'a str) -> Option<&'a str> {
        if self.is_marker(line) {
            self.state = FilterState::SuppressingBoilerplate;
        } else if self.state == FilterState::SuppressingBoilerplate && is_blank(line) {
            // stay suppressed
        } else {
            self.state = FilterState::Normal;
        }

        match self.state {
            FilterState::Normal => Some(line),
            FilterState::SuppressingBoilerplate => {
                self.removed += 1;
                None
            }
        }
    }

    fn is_marker(&self, line: &str) -> bool {
        if self.markers.is_empty() {
            return false;
        }
        let line = line.trim();
        let Some(inner) = line
            .strip_prefix("**")
            .and_then(|rest| rest.strip_suffix("**"))
        else {
            return false;
        };
        let inner = inner.to_lowercase();
        self.markers.iter().any(|m| inner.contains(m.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(markers: &[&str], lines: &[&str]) -> Vec<String> {
        let mut filter = BoilerplateFilter::new(markers);
        lines
            .iter()
            .filter_map(|l| filter.accept(l))
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn drops_banner_and_following_blanks() {
        let out = run(
            &["ConverterLib"],
            &["intro", "**Generated by ConverterLib**", "", "  ", "# Title", ""],
        );
        assert_eq!(out, vec!["intro", "# Title", ""]);
    }

    #[test]
    fn match_is_case_insensitive() {
        let out = run(
            &["Aspose.Words"],
            &["**Created with ASPOSE.WORDS for .NET**", "text"],
        );
        assert_eq!(out, vec!["text"]);
    }

    #[test]
    fn marker_outside_bold_passes() {
        let lines = ["Generated by ConverterLib", "*ConverterLib*"];
        assert_eq!(run(&["ConverterLib"], &lines), lines.to_vec());
    }

    #[test]
    fn bold_without_marker_passes() {
        let lines = ["**Important**", ""];
        assert_eq!(run(&["ConverterLib"], &lines), lines.to_vec());
    }

    #[test]
    fn unterminated_block_swallows_trailing_blanks() {
        let mut filter = BoilerplateFilter::new(&["X"]);
        assert_eq!(filter.accept("a"), Some("a"));
        assert_eq!(filter.accept("**X**"), None);
        assert_eq!(filter.accept(""), None);
        assert_eq!(filter.state(), FilterState::SuppressingBoilerplate);
        assert_eq!(filter.removed(), 2);
    }

    #[test]
    fn first_content_line_ends_suppression_and_passes() {
        let mut filter = BoilerplateFilter::new(&["X"]);
        filter.accept("**X**");
        assert_eq!(filter.accept("body"), Some("body"));
        assert_eq!(filter.state(), FilterState::Normal);
        assert_eq!(filter.accept(""), Some(""));
    }

    #[test]
    fn no_markers_disables_filter() {
        let empty: [&str; 0] = [];
        let lines = ["**anything**", ""];
        assert_eq!(run(&empty, &lines), lines.to_vec());
    }
}
