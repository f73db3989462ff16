//! File-level behaviour of `clean_and_format`.
//!
//! Every test works on a file in a fresh temp dir, so the in-place overwrite
//! is exercised end to end.

use doc2md::{clean_and_format, CleanupConfig};
use std::path::{Path, PathBuf};

fn config() -> CleanupConfig {
    CleanupConfig {
        boilerplate_markers: vec!["ConverterLib".into()],
        ..CleanupConfig::default()
    }
}

fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

fn clean_file(text: &str) -> String {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "doc.md", text);
    clean_and_format(&path, &config()).unwrap().unwrap();
    std::fs::read_to_string(&path).unwrap()
}

#[test]
fn second_run_changes_nothing() {
    let inputs = [
        "**Generated by ConverterLib**\n\nIntro\n# Title\n\tindented\n\n\n\n## Table\n| a | bb |\n|---|---|\n| ccc | d |\nText ![cat photo](img/cat.png)\n\n",
        "| ![a](x.png) | b |\n| a much longer cell | c |\n",
        "| h1 | h2 | h3 |\n|a||b|\n| x |\n",
    ];

    for input in inputs {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "doc.md", input);

        clean_and_format(&path, &config()).unwrap();
        let once = std::fs::read_to_string(&path).unwrap();
        clean_and_format(&path, &config()).unwrap();
        let twice = std::fs::read_to_string(&path).unwrap();

        assert_eq!(once, twice, "input: {input:?}");
    }
}

#[test]
fn image_in_table_is_measured_with_caption() {
    assert_eq!(
        clean_file("| ![a](x.png) | b |\n| a much longer cell | c |\n"),
        "|![Illustration](x.png)|b|\n|a much longer cell    |c|\n"
    );
}

#[test]
fn empty_cells_and_delimiters_follow_plain_padding() {
    assert_eq!(
        clean_file("| Name | Qty |\n|---|---|\n|apple||12|\n"),
        "|Name |Qty|\n|---  |---|\n|apple|12 |\n"
    );
}

#[test]
fn blank_runs_collapse_to_one() {
    for n in 2..6 {
        let input = format!("first{}second\n", "\n".repeat(n + 1));
        assert_eq!(clean_file(&input), "first\n\nsecond\n", "{n} blank lines");
    }
}

#[test]
fn heading_gets_one_blank_line_on_each_side() {
    assert_eq!(
        clean_file("para one\n### Heading\npara two\n"),
        "para one\n\n### Heading\n\npara two\n"
    );
}

#[test]
fn table_columns_take_widest_cell() {
    assert_eq!(clean_file("|a|bb|\n|ccc|d|\n"), "|a  |bb|\n|ccc|d |\n");
}

#[test]
fn image_alt_text_becomes_caption() {
    assert_eq!(
        clean_file("![photo of cat](img/1.png)\n"),
        "![Illustration](img/1.png)\n"
    );
}

#[test]
fn attribution_banner_and_following_blanks_are_dropped() {
    assert_eq!(
        clean_file("**Generated by ConverterLib**\n\n\n# Title\n"),
        "# Title\n"
    );
}

#[test]
fn attribution_marker_is_case_insensitive() {
    assert_eq!(
        clean_file("**Created with CONVERTERLIB for .NET**\nbody\n"),
        "body\n"
    );
}

#[test]
fn bold_line_without_marker_is_kept() {
    assert_eq!(clean_file("**Important**\nbody\n"), "**Important**\nbody\n");
}

#[test]
fn lines_around_tables_are_untouched() {
    let out = clean_file("text with | pipe  \n|x|yy|\n|zzz|w|\nafter | too\n");
    assert_eq!(out, "text with | pipe\n|x  |yy|\n|zzz|w |\nafter | too\n");
}

#[test]
fn missing_file_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.md");

    let stats = clean_and_format(&path, &config()).unwrap();

    assert!(stats.is_none());
    assert!(!path.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn unterminated_banner_swallows_trailing_blanks_only() {
    assert_eq!(clean_file("body\n**ConverterLib**\n\n\n"), "body\n");
}

#[test]
fn ragged_table_is_padded() {
    assert_eq!(
        clean_file("| h1 | h2 |\n| only |\n"),
        "|h1  |h2|\n|only|  |\n"
    );
}

#[test]
fn stats_report_the_work_done() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "doc.md",
        "**ConverterLib**\n\n|a|\n\ntext ![x](a.png) and ![y](b.png)\n",
    );

    let stats = clean_and_format(&path, &config()).unwrap().unwrap();

    assert_eq!(stats.lines_in, 5);
    assert_eq!(stats.boilerplate_lines_removed, 2);
    assert_eq!(stats.tables_formatted, 1);
    assert_eq!(stats.images_rewritten, 2);
    assert_eq!(stats.lines_out, 3);
}
