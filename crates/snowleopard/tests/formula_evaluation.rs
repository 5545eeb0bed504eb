//! Tests for calculated columns over CSV input

use snowleopard::prelude::*;
use snowleopard::{evaluate_formula, FormulaError, NumericRow};
use std::io::Cursor;

fn quiz_row(q1: f64, q2: f64, q3: f64) -> NumericRow {
    [("Quiz1", q1), ("Quiz2", q2), ("Quiz3", q3)].into_iter().collect()
}

/// Final = SUMDROP(1; Quiz1, Quiz2, Quiz3) drops the lowest quiz
#[test]
fn test_final_drops_lowest_quiz() {
    let csv = "Name,Quiz1,Quiz2,Quiz3\nAda,10,5,8\n";
    let table = CsvReader::read(Cursor::new(csv), &CsvReadOptions::default()).unwrap();

    let mut selection = ColumnSelection::new(table.headers().iter().cloned());
    selection.select("Quiz1").unwrap();
    selection.select("Quiz2").unwrap();
    selection.select("Quiz3").unwrap();
    selection
        .add_calculated("Final", "SUMDROP(1; Quiz1, Quiz2, Quiz3)")
        .unwrap();

    let specs = selection.build().unwrap();
    let names: Vec<_> = specs.iter().map(|s| s.new_name.as_str()).collect();
    assert_eq!(names, vec!["Quiz1", "Quiz2", "Quiz3", "Final"]);

    let output = table.project(&specs).unwrap();
    assert_eq!(output.rows, vec![vec![10.0, 5.0, 8.0, 18.0]]);
}

/// Capped = BOUND(0; 100; Quiz1)
#[test]
fn test_capped_clamps_quiz() {
    for (quiz, expected) in [(150.0, 100.0), (-5.0, 0.0), (42.0, 42.0)] {
        let result = evaluate_formula("BOUND(0; 100; Quiz1)", &quiz_row(quiz, 0.0, 0.0)).unwrap();
        assert_eq!(result, expected, "Quiz1 = {}", quiz);
    }
}

/// A reference to an absent column names that column
#[test]
fn test_unknown_column_is_named() {
    let err = evaluate_formula("SUMDROP(0; Quiz1, Midterm)", &quiz_row(1.0, 2.0, 3.0)).unwrap_err();
    match err {
        FormulaError::UnknownColumn { column, formula } => {
            assert_eq!(column, "Midterm");
            assert_eq!(formula, "SUMDROP(0; Quiz1, Midterm)");
        }
        other => panic!("expected unknown column, got {:?}", other),
    }
}

/// Dropping every value is rejected rather than summing nothing
#[test]
fn test_drop_everything_fails() {
    let row = quiz_row(1.0, 2.0, 3.0);
    for formula in ["SUMDROP(3; Quiz1, Quiz2, Quiz3)", "SUMDROP(7; Quiz1)"] {
        let err = evaluate_formula(formula, &row).unwrap_err();
        assert!(err.is_syntax(), "{}: {:?}", formula, err);
    }
    assert_eq!(evaluate_formula("SUMDROP(2; Quiz1, Quiz2, Quiz3)", &row).unwrap(), 3.0);
}

/// Noisy cells become the fill value in both direct and calculated columns
#[test]
fn test_noisy_cells_are_cleaned() {
    let csv = "Name,Quiz1,Quiz2\nAda,excused,7\nBob, 4 ,\n";
    let table = CsvReader::read(Cursor::new(csv), &CsvReadOptions::default()).unwrap();
    let specs = vec![
        ColumnSpec::original(0, "Quiz1", "Quiz1"),
        ColumnSpec::calculated(1, "Total", "SUMDROP(0; Quiz1, Quiz2)"),
    ];

    let output = table.project(&specs).unwrap();
    assert_eq!(output.rows, vec![vec![0.0, 7.0], vec![4.0, 4.0]]);
}

/// Headers containing spaces are referenced with quotes
#[test]
fn test_quoted_column_names() {
    let csv = "Student Name,Quiz 1,Quiz 2\nAda,9,3\n";
    let table = CsvReader::read(Cursor::new(csv), &CsvReadOptions::default()).unwrap();
    let specs = vec![ColumnSpec::calculated(0, "Best", "SUMDROP(1; \"Quiz 1\", \"Quiz 2\")")];

    let output = table.project(&specs).unwrap();
    assert_eq!(output.column("Best"), Some(vec![9.0]));
}
