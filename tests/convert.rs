//! `convert_document` and `convert_all` against an in-process converter.

use doc2md::{
    convert_all, convert_document, ConversionAction, ConversionConfig, ConverterError,
    Doc2MdError, FileOutcome, NoopProgressCallback,
};
use std::cell::Cell;
use std::path::{Path, PathBuf};

const RAW: &str = "**Evaluation Only. Created with Aspose.Words.**\n\n# Report\nIntro\n|a|bb|\n|ccc|d|\n![image1](media/image1.png)\n";
const CLEAN: &str = "# Report\n\nIntro\n|a  |bb|\n|ccc|d |\n![Illustration](media/image1.png)\n";

fn setup() -> (tempfile::TempDir, PathBuf, ConversionConfig) {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("Report.pdf");
    std::fs::write(&source, b"%PDF-1.7\nfake body").unwrap();
    let config = ConversionConfig::builder()
        .target_dir(dir.path().join("out"))
        .build()
        .unwrap();
    (dir, source, config)
}

fn fixed(_source: &Path) -> Result<String, ConverterError> {
    Ok(RAW.to_string())
}

#[test]
fn converts_and_cleans_into_target_dir() {
    let (dir, source, config) = setup();

    let outcome = convert_document(&source, &config, &fixed).unwrap();

    let expected = dir.path().join("out/Report/ReadMe.md");
    assert_eq!(outcome.action, ConversionAction::Converted);
    assert_eq!(outcome.markdown_path.as_deref(), Some(expected.as_path()));
    assert!(outcome.converter_error.is_none());
    assert_eq!(std::fs::read_to_string(&expected).unwrap(), CLEAN);
    let stats = outcome.cleanup.unwrap();
    assert_eq!(stats.tables_formatted, 1);
    assert_eq!(stats.images_rewritten, 1);
}

#[test]
fn existing_conversion_is_recleaned_not_reconverted() {
    let (dir, source, config) = setup();
    let calls = Cell::new(0);
    let counting = |_: &Path| -> Result<String, ConverterError> {
        calls.set(calls.get() + 1);
        Ok(RAW.to_string())
    };

    convert_document(&source, &config, &counting).unwrap();
    let md = dir.path().join("out/Report/ReadMe.md");
    std::fs::write(&md, "edited\n\n\n\nby hand\n").unwrap();

    let outcome = convert_document(&source, &config, &counting).unwrap();

    assert_eq!(calls.get(), 1);
    assert_eq!(outcome.action, ConversionAction::Recleaned);
    assert_eq!(std::fs::read_to_string(&md).unwrap(), "edited\n\nby hand\n");
}

#[test]
fn existing_conversion_is_recleaned_even_without_source() {
    let (dir, source, config) = setup();
    convert_document(&source, &config, &fixed).unwrap();
    std::fs::remove_file(&source).unwrap();

    let outcome = convert_document(&source, &config, &fixed).unwrap();

    assert_eq!(outcome.action, ConversionAction::Recleaned);
    assert!(dir.path().join("out/Report/ReadMe.md").exists());
}

#[test]
fn force_reconverts_and_clears_directory() {
    let (dir, source, config) = setup();
    convert_document(&source, &config, &fixed).unwrap();
    let stale = dir.path().join("out/Report/stale.png");
    std::fs::write(&stale, b"x").unwrap();

    let forced = ConversionConfig {
        force: true,
        ..config
    };
    let outcome = convert_document(&source, &forced, &fixed).unwrap();

    assert_eq!(outcome.action, ConversionAction::Converted);
    assert!(!stale.exists());
}

#[test]
fn converter_failure_is_reported_not_raised() {
    let (dir, source, config) = setup();
    let failing =
        |_: &Path| -> Result<String, ConverterError> { Err(ConverterError::Other("boom".into())) };

    let outcome = convert_document(&source, &config, &failing).unwrap();

    assert_eq!(outcome.action, ConversionAction::ConversionFailed);
    assert_eq!(outcome.converter_error.unwrap().to_string(), "boom");
    // Nothing was written, so the cleanup pass had nothing to do.
    assert!(outcome.cleanup.is_none());
    assert!(!dir.path().join("out/Report/ReadMe.md").exists());
}

#[test]
fn missing_source_is_a_noop() {
    let (dir, _, config) = setup();
    let source = dir.path().join("Ghost.docx");

    let outcome = convert_document(&source, &config, &fixed).unwrap();

    assert_eq!(outcome.action, ConversionAction::SourceMissing);
    assert!(outcome.markdown_path.is_none());
    assert!(!dir.path().join("out").exists());
}

#[test]
fn markdown_source_is_cleaned_in_place() {
    let (dir, _, config) = setup();
    let source = dir.path().join("notes.md");
    std::fs::write(&source, "a\n# B\nc\n").unwrap();

    let outcome = convert_document(&source, &config, &fixed).unwrap();

    assert_eq!(outcome.action, ConversionAction::CleanedSource);
    assert_eq!(std::fs::read_to_string(&source).unwrap(), "a\n\n# B\n\nc\n");
    assert!(!dir.path().join("out").exists());
}

#[test]
fn unsupported_extension_is_an_error() {
    let (dir, _, config) = setup();
    let source = dir.path().join("sheet.xlsx");
    std::fs::write(&source, b"PK\x03\x04").unwrap();

    let err = convert_document(&source, &config, &fixed).unwrap_err();

    match err {
        Doc2MdError::UnsupportedExtension { extension, .. } => assert_eq!(extension, ".xlsx"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn signature_mismatch_is_an_error() {
    let (dir, _, config) = setup();
    let source = dir.path().join("fake.docx");
    std::fs::write(&source, b"just text, not a zip").unwrap();

    let err = convert_document(&source, &config, &fixed).unwrap_err();
    assert!(matches!(err, Doc2MdError::SignatureMismatch { .. }));

    let lenient = ConversionConfig {
        verify_signature: false,
        ..config
    };
    let outcome = convert_document(&source, &lenient, &fixed).unwrap();
    assert_eq!(outcome.action, ConversionAction::Converted);
}

#[test]
fn batch_keeps_going_after_a_bad_file() {
    let (dir, source, config) = setup();
    let bad = dir.path().join("broken.doc");
    std::fs::write(&bad, b"nope").unwrap();
    let flaky = |path: &Path| -> Result<String, ConverterError> {
        if path.ends_with("Second.pdf") {
            Err(ConverterError::Other("corrupt".into()))
        } else {
            Ok(RAW.to_string())
        }
    };
    let second = dir.path().join("Second.pdf");
    std::fs::write(&second, b"%PDF-1.4").unwrap();

    let report = convert_all(
        &[bad.clone(), source, second],
        &config,
        &flaky,
        &NoopProgressCallback,
    );

    assert_eq!(report.files.len(), 3);
    assert_eq!(report.failed(), 1);
    assert!(matches!(&report.files[0], FileOutcome::Failed { path, .. } if path == &bad));
    match &report.files[2] {
        FileOutcome::Done {
            action, warning, ..
        } => {
            assert_eq!(*action, Some(ConversionAction::ConversionFailed));
            assert_eq!(warning.as_deref(), Some("corrupt"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(
        std::fs::read_to_string(dir.path().join("out/Report/ReadMe.md")).unwrap(),
        CLEAN
    );

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["files"][0]["status"], "failed");
    assert_eq!(json["files"][1]["action"], "converted");
}
