//! Integration tests for the pipeline module.

use std::fs;
use std::path::{Path, PathBuf};

use insta::assert_json_snapshot;
use survey_cli::pipeline::{
    OptionOverrides, detect_export, extract_export, load_options, reasons_overview,
};
use survey_model::{DetectionOptions, Role};
use tempfile::TempDir;

const EXPORT: &str = "\
Submitted,Why did you leave?,Rating,Where,Anything else?
2024-02-01,I'm retiring,5,Poland,\"Wonderful resources, thank you all!\"
2024-02-03,I can't afford it right now,3,Chile,\"Too pricey for me; maybe later.\"
2024-02-07,I'm retiring,4,India,42
2024-02-11,Other,2,Norway,\"The search was slow, and results odd.\"
2024-02-19,I'm retiring,1,Italy,???
";

fn write_export(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("export.csv");
    fs::write(&path, EXPORT).unwrap();
    path
}

fn detect(path: &Path) -> survey_cli::pipeline::DetectedExport {
    detect_export(path, DetectionOptions::default()).unwrap()
}

#[test]
fn detects_roles_in_csv_export() {
    let dir = TempDir::new().unwrap();
    let export = detect(&write_export(&dir));

    assert_json_snapshot!(export.report.result, @r###"
    {
      "numeric_score": "Rating",
      "freeform_answer": "Anything else?",
      "country": "Where",
      "exit_reason": "Why did you leave?",
      "date": "Submitted"
    }
    "###);
}

#[test]
fn reasons_default_to_detected_exit_column() {
    let dir = TempDir::new().unwrap();
    let export = detect(&write_export(&dir));

    let overview = reasons_overview(&export, None).unwrap();
    assert_eq!(overview.column, "Why did you leave?");
    assert_eq!(overview.rows[0].category, "I'm retiring");
    assert_eq!(overview.rows[0].count, 3);
    assert_eq!(overview.rows[0].percentage, 60.0);

    let explicit = reasons_overview(&export, Some("Where")).unwrap();
    assert_eq!(explicit.rows.len(), 5);
    assert!(reasons_overview(&export, Some("Nope")).is_err());
}

#[test]
fn extraction_drops_wordless_answers_by_default() {
    let dir = TempDir::new().unwrap();
    let export = detect(&write_export(&dir));

    let extracted = extract_export(&export, false).unwrap();
    assert_eq!(extracted.row_count(), 3);
    assert_eq!(
        extracted.column_names().collect::<Vec<_>>(),
        vec![
            Role::NumericScore.as_str(),
            Role::FreeformAnswer.as_str(),
            Role::Country.as_str(),
            Role::ExitReason.as_str(),
            Role::Date.as_str(),
        ]
    );

    let kept = extract_export(&export, true).unwrap();
    assert_eq!(kept.row_count(), 5);
}

#[test]
fn options_file_and_overrides() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("options.json");
    fs::write(&path, r#"{"category_threshold": 0.7}"#).unwrap();

    let options = load_options(
        Some(path.as_path()),
        OptionOverrides {
            bonus_multiplier: Some(1.5),
            ..OptionOverrides::default()
        },
    )
    .unwrap();
    assert_eq!(options.category_threshold, 0.7);
    assert_eq!(options.name_bonus_multiplier, 1.5);
    assert_eq!(options.min_numeric_fraction, 0.9);

    let invalid = load_options(
        None,
        OptionOverrides {
            min_numeric_fraction: Some(-1.0),
            ..OptionOverrides::default()
        },
    );
    assert!(invalid.is_err());
}

#[test]
fn missing_export_is_reported() {
    let dir = TempDir::new().unwrap();
    let err = detect_export(&dir.path().join("absent.csv"), DetectionOptions::default())
        .unwrap_err();
    assert!(format!("{err:#}").contains("absent.csv"));
}
