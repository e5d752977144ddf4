//! Batch fixer tests
//!
//! Runs the fixer over temporary directories and checks what lands on disk.

use std::fs;
use std::path::Path;

use rtlfix_text::ShapingService;
use rtlfix_xml::*;
use tempfile::tempdir;

fn fixer() -> BatchXmlFixer {
    BatchXmlFixer::new(&ShapingService::detect(), FixerConfig::default()).unwrap()
}

fn xml_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

const SAMPLE: &str = r#"<Items><Item Value="مرحبا"/><Item Value="hello"/></Items>"#;

// ============================================================================
// SINGLE DIRECTORY RUNS
// ============================================================================

#[test]
fn test_fixes_arabic_value_only() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("a.xml");
    fs::write(&source, SAMPLE).unwrap();

    let report = fixer().run(dir.path()).unwrap();

    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(report.total_changed(), 1);

    let fixed: Vec<&FileReport> = report.fixed().collect();
    assert_eq!(fixed[0].changed, 1);
    assert_eq!(fixed[0].output, dir.path().join("a_fixed.xml"));

    let output = fs::read_to_string(dir.path().join("a_fixed.xml")).unwrap();
    assert!(output.starts_with("<?xml"));
    assert!(output.contains(r#"Value="hello""#));
    assert!(!output.contains("مرحبا"));
    assert!(output.contains("\u{FE8E}\u{FE92}\u{FEA3}\u{FEAE}\u{FEE3}"));

    // Source untouched
    assert_eq!(fs::read_to_string(&source).unwrap(), SAMPLE);
}

#[test]
fn test_no_xml_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), "مرحبا").unwrap();

    let report = fixer().run(dir.path()).unwrap();

    assert!(report.is_empty());
    assert_eq!(xml_names(dir.path()), ["notes.txt"]);
}

#[test]
fn test_uppercase_extension() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("B.XML"), SAMPLE).unwrap();

    let report = fixer().run(dir.path()).unwrap();

    assert_eq!(report.outcomes.len(), 1);
    assert!(dir.path().join("B_fixed.xml").exists());
}

#[test]
fn test_malformed_file_does_not_stop_batch() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.xml"), "<broken><x></broken>").unwrap();
    fs::write(dir.path().join("b.xml"), SAMPLE).unwrap();

    let report = fixer().run(dir.path()).unwrap();

    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.failed_count(), 1);
    assert!(matches!(
        &report.outcomes[0],
        FileOutcome::Failed { error: FixError::MalformedDocument { .. }, .. }
    ));
    assert!(!dir.path().join("a_fixed.xml").exists());
    assert!(dir.path().join("b_fixed.xml").exists());
}

#[test]
fn test_invalid_utf8_reported() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.xml"), [0x3C, 0x61, 0xFF, 0x2F, 0x3E]).unwrap();

    let report = fixer().run(dir.path()).unwrap();

    assert!(matches!(
        &report.outcomes[0],
        FileOutcome::Failed { error: FixError::Encoding { encoding: "UTF-8", .. }, .. }
    ));
}

// ============================================================================
// INPUT ENCODINGS
// ============================================================================

#[test]
fn test_utf16_source_written_as_utf8() {
    let dir = tempdir().unwrap();
    let text = "\u{FEFF}<?xml version=\"1.0\" encoding=\"UTF-16\"?><r><i Value=\"مرحبا\"/></r>";
    let bytes: Vec<u8> = text.encode_utf16().flat_map(u16::to_le_bytes).collect();
    fs::write(dir.path().join("a.xml"), bytes).unwrap();

    let report = fixer().run(dir.path()).unwrap();

    assert_eq!(report.failed_count(), 0);
    assert_eq!(report.total_changed(), 1);

    let output = fs::read_to_string(dir.path().join("a_fixed.xml")).unwrap();
    assert!(output.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
    assert!(output.contains("\u{FE8E}\u{FE92}\u{FEA3}\u{FEAE}\u{FEE3}"));
}

#[test]
fn test_legacy_source_written_as_utf8() {
    let dir = tempdir().unwrap();
    let text = "<?xml version=\"1.0\" encoding=\"windows-1256\"?><r><i Value=\"مرحبا\"/><i Value=\"&#1576;\"/></r>";
    let (bytes, _, _) = encoding_rs::WINDOWS_1256.encode(text);
    fs::write(dir.path().join("a.xml"), &bytes).unwrap();

    let report = fixer().run(dir.path()).unwrap();

    assert_eq!(report.failed_count(), 0);
    assert_eq!(report.total_changed(), 2);

    let output = fs::read_to_string(dir.path().join("a_fixed.xml")).unwrap();
    assert!(output.contains("encoding=\"utf-8\""));
    assert!(!output.contains("windows-1256"));
    assert!(output.contains("Value=\"\u{FE8F}\""));
}

#[test]
fn test_sorted_order() {
    let dir = tempdir().unwrap();
    for name in ["c.xml", "a.xml", "b.xml"] {
        fs::write(dir.path().join(name), "<r/>").unwrap();
    }

    let report = fixer().run(dir.path()).unwrap();
    let names: Vec<String> = report
        .outcomes
        .iter()
        .map(|o| o.path().file_name().unwrap().to_string_lossy().into_owned())
        .collect();

    assert_eq!(names, ["a.xml", "b.xml", "c.xml"]);
}

#[test]
fn test_rerun_skips_previous_outputs_when_asked() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.xml"), SAMPLE).unwrap();

    let config = FixerConfig {
        skip_outputs: true,
        ..FixerConfig::default()
    };
    let fixer = BatchXmlFixer::new(&ShapingService::detect(), config).unwrap();
    let first = fixer.run(dir.path()).unwrap();
    let second = fixer.run(dir.path()).unwrap();

    assert_eq!(first.outcomes.len(), 1);
    assert_eq!(second.outcomes.len(), 1);
    assert_eq!(second.skipped, [dir.path().join("a_fixed.xml")]);
    assert!(!second.is_empty());
    assert_eq!(xml_names(dir.path()), ["a.xml", "a_fixed.xml"]);
}

#[test]
fn test_suffixed_source_processed_by_default() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("menu_fixed.xml"), SAMPLE).unwrap();

    let report = fixer().run(dir.path()).unwrap();

    assert!(report.skipped.is_empty());
    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(report.total_changed(), 1);
    assert!(dir.path().join("menu_fixed_fixed.xml").exists());
}

#[test]
fn test_subdirectories_ignored() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("nested.xml")).unwrap();

    let report = fixer().run(dir.path()).unwrap();
    assert!(report.is_empty());
}

#[test]
fn test_missing_directory() {
    let dir = tempdir().unwrap();
    let err = fixer().run(&dir.path().join("absent")).unwrap_err();
    assert!(matches!(err, FixError::ReadDir { .. }));
}

#[test]
fn test_custom_attribute_and_suffix() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.xml"), r#"<r Text="ب" Value="ب"/>"#).unwrap();

    let config = FixerConfig {
        attribute: "Text".to_string(),
        suffix: ".shaped".to_string(),
        ..FixerConfig::default()
    };
    let fixer = BatchXmlFixer::new(&ShapingService::detect(), config).unwrap();
    let report = fixer.run(dir.path()).unwrap();

    assert_eq!(report.total_changed(), 1);
    let output = fs::read_to_string(dir.path().join("a.shaped.xml")).unwrap();
    assert!(output.contains("Text=\"\u{FE8F}\" Value=\"ب\""));
}
