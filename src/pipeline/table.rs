//! Pipe-table reflow.
//!
//! Every maximal run of consecutive pipe-table rows is split into cells,
//! measured, and re-emitted as `|cell0|cell1|...|` with each cell padded with
//! spaces to the widest entry of its column. Lines outside tables are never
//! touched.
//!
//! Empty cells are dropped while splitting, so `|a||b|` is a two-cell row.
//!
//! ## Ragged rows
//!
//! The column count is taken from the first row, widened to the longest row
//! in the block. Rows with fewer cells are completed with empty cells, so a
//! malformed table is still reflowed instead of being dropped or rejected.
//!
//! ## Image captions
//!
//! When a caption is given, cells are measured with their image alt text
//! already replaced. The later caption pass over the whole document then
//! leaves the column widths intact.

use super::classify::is_table_row;
use super::images::rewrite_image_captions;
use unicode_width::UnicodeWidthStr;

/// Reflow all table blocks in `lines`. Returns the new lines and the number
/// of blocks that were reflowed.
pub fn format_tables(lines: Vec<String>, caption: Option<&str>) -> (Vec<String>, usize) {
    let mut result = Vec::with_capacity(lines.len());
    let mut block: Vec<String> = Vec::new();
    let mut tables = 0usize;

    for line in lines {
        if is_table_row(&line) {
            block.push(line);
            continue;
        }
        if !block.is_empty() {
            result.extend(format_table(&block, caption));
            block.clear();
            tables += 1;
        }
        result.push(line);
    }
    if !block.is_empty() {
        result.extend(format_table(&block, caption));
        tables += 1;
    }

    (result, tables)
}

/// Reflow one table block. An empty block is returned unchanged.
pub fn format_table(block: &[String], caption: Option<&str>) -> Vec<String> {
    if block.is_empty() {
        return block.to_vec();
    }

    let mut rows: Vec<Vec<String>> = block.iter().map(|l| split_row(l)).collect();
    if let Some(caption) = caption {
        for cell in rows.iter_mut().flatten() {
            *cell = rewrite_image_captions(cell, caption).0;
        }
    }
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut rows {
        row.resize(columns, String::new());
    }
    let widths = column_widths(&rows);

    rows.iter().map(|row| render_row(row, &widths)).collect()
}

/// Split a table row into trimmed, non-empty cells.
///
/// `\|` is part of the cell text, not a separator.
pub fn split_row(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut escaped = false;

    for ch in line.chars() {
        if escaped {
            current.push(ch);
            escaped = false;
            continue;
        }
        match ch {
            '\\' => {
                current.push(ch);
                escaped = true;
            }
            '|' => cells.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    cells.push(current);

    cells
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

/// Widest display width per column across all rows.
pub fn column_widths(rows: &[Vec<String>]) -> Vec<usize> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    (0..columns)
        .map(|i| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.width())
                .max()
                .unwrap_or(0)
        })
        .collect()
}

fn render_row(row: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (cell, &width) in row.iter().zip(widths) {
        line.push_str(cell);
        line.push_str(&" ".repeat(width.saturating_sub(cell.width())));
        line.push('|');
    }
    line
}
