//! Post-processing: deterministic cleanup of converter-generated Markdown.
//!
//! Converters emit Markdown that is correct but noisy: attribution banners,
//! ragged blank-line runs, tabs, headings glued to paragraphs, unaligned pipe
//! tables and alt text copied from file names. This module chains the stages
//! of [`crate::pipeline`] into one pure function over the whole text.
//!
//! ## Stage Order
//!
//! 1. Attribution filter and spacing run interleaved, line by line
//! 2. Table reflow over the accumulated lines
//! 3. Image caption rewrite over the joined text
//!
//! Each output line is terminated by `\n`. Table cells are measured with
//! their final image captions, so the output is a fixed point: cleaning it
//! again yields the same text.

use super::boilerplate::BoilerplateFilter;
use super::images::rewrite_image_captions;
use super::spacing::SpacingNormalizer;
use super::table::format_tables;
use crate::config::CleanupConfig;
use crate::output::{CleanedMarkdown, CleanupStats};
use tracing::debug;

/// Apply the full cleanup pipeline to `input`.
pub fn clean_markdown(input: &str, config: &CleanupConfig) -> CleanedMarkdown {
    let mut stats = CleanupStats::default();
    let mut filter = BoilerplateFilter::new(&config.boilerplate_markers);
    let mut spacing = SpacingNormalizer::new(config.tab_replacement.as_str());
    let mut lines: Vec<String> = Vec::new();

    // ── Stage 1: filter + spacing ────────────────────────────────────────
    for line in input.lines() {
        stats.lines_in += 1;
        if let Some(kept) = filter.accept(line) {
            spacing.push(kept, &mut lines);
        }
    }
    stats.boilerplate_lines_removed = filter.removed();

    // ── Stage 2: tables ──────────────────────────────────────────────────
    if config.format_tables {
        let caption = config
            .rewrite_images
            .then_some(config.image_caption.as_str());
        let (formatted, tables) = format_tables(lines, caption);
        lines = formatted;
        stats.tables_formatted = tables;
    }
    stats.lines_out = lines.len();

    // ── Stage 3: images ──────────────────────────────────────────────────
    let mut text = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in &lines {
        text.push_str(line);
        text.push('\n');
    }
    if config.rewrite_images {
        let (rewritten, images) = rewrite_image_captions(&text, &config.image_caption);
        text = rewritten;
        stats.images_rewritten = images;
    }

    debug!(
        "Cleanup: {} → {} lines, {} boilerplate removed, {} tables, {} images",
        stats.lines_in,
        stats.lines_out,
        stats.boilerplate_lines_removed,
        stats.tables_formatted,
        stats.images_rewritten
    );

    CleanedMarkdown { text, stats }
}

// ── Tests ────────────────────────────────────────────────────────────────────
