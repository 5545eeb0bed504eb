//! End-to-end tests: read a CSV file, project it, write and read it back

use pretty_assertions::assert_eq;
use snowleopard::prelude::*;
use snowleopard::{build_mapping, CalculatedChoice, ColumnChoice};
use std::fs;

fn write_grades(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("grades.csv");
    fs::write(
        &path,
        "Name,Quiz1,Quiz2,Quiz3\r\nAda,10,5,8\r\n\"Bob, Jr.\",150,,abc\r\n",
    )
    .unwrap();
    path
}

fn config() -> SelectionConfig {
    SelectionConfig {
        columns: vec![ColumnChoice {
            name: "Quiz1".into(),
            include: true,
            rename: Some("First Quiz".into()),
        }],
        calculated: vec![
            CalculatedChoice {
                include: true,
                name: "Final".into(),
                calculation: "SUMDROP(1; Quiz1, Quiz2, Quiz3)".into(),
            },
            CalculatedChoice {
                include: true,
                name: "Capped".into(),
                calculation: "BOUND(0; 100; Quiz1)".into(),
            },
        ],
    }
}

#[test]
fn test_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_grades(&dir);

    let specs = build_mapping(&input, &config()).unwrap();
    assert_eq!(specs.len(), 3);
    assert_eq!(specs[0].original_name(), Some("Quiz1"));

    let table = RawTable::open(&input).unwrap();
    let output = table.project(&specs).unwrap();

    let out_path = dir.path().join("out.csv");
    output.save(&out_path).unwrap();

    assert_eq!(
        fs::read_to_string(&out_path).unwrap(),
        "First Quiz,Final,Capped\n10,18,10\n150,150,100\n"
    );
}

#[test]
fn test_missing_file_is_data_source_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = RawTable::open(dir.path().join("nope.csv")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DataSource);
}

#[test]
fn test_empty_file_is_data_source_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    fs::write(&path, "").unwrap();

    let err = build_mapping(&path, &config()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DataSource);
}

#[test]
fn test_invalid_config_is_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_grades(&dir);

    let mut config = config();
    config.calculated[1].calculation = String::new();
    let err = build_mapping(&input, &config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let mut config = self::config();
    config.columns[0].name = "Midterm".into();
    assert_eq!(build_mapping(&input, &config).unwrap_err().kind(), ErrorKind::Validation);
}
