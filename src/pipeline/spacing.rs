//! Blank-line and whitespace normalisation.
//!
//! Rules, applied per line while carrying the kind of the previous line:
//!
//! 1. Blank lines before the first content line are dropped.
//! 2. Tabs become the configured replacement; trailing whitespace is trimmed.
//! 3. A heading preceded by content gets one blank line inserted above it.
//! 4. A blank line survives only if the previous line was not blank, so runs
//!    of blank lines collapse to one.
//! 5. Content directly after a heading gets one blank line inserted above it.
//!
//! The carry value is updated for every line, emitted or not.

use super::classify::LineKind;

#[derive(Debug, Clone)]
pub struct SpacingNormalizer {
    tab_replacement: String,
    previous: Option<LineKind>,
}

impl SpacingNormalizer {
    pub fn new(tab_replacement: impl Into<String>) -> Self {
        Self {
            tab_replacement: tab_replacement.into(),
            previous: None,
        }
    }

    /// Feed one line, appending zero, one or two lines to `out`.
    pub fn push(&mut self, line: &str, out: &mut Vec<String>) {
        let kind = LineKind::of(line);
        // Start of stream counts as blank.
        let prev_blank = self.previous.map_or(true, |k| k == LineKind::Blank);
        let prev_heading = self.previous == Some(LineKind::Heading);

        if kind == LineKind::Heading {
            if !prev_blank {
                out.push(String::new());
            }
            out.push(self.normalise(line));
        } else if kind != LineKind::Blank || !prev_blank {
            if prev_heading && kind != LineKind::Blank {
                out.push(String::new());
            }
            out.push(self.normalise(line));
        }

        self.previous = Some(kind);
    }

    fn normalise(&self, line: &str) -> String {
        line.replace('\t', &self.tab_replacement)
            .trim_end()
            .to_string()
    }
}

impl Default for SpacingNormalizer {
    fn default() -> Self {
        Self::new("  ")
    }
}
