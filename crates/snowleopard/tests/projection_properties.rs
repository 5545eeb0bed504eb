//! Row-count and column-order invariants of table projection

use proptest::prelude::*;
use snowleopard::prelude::*;

const HEADERS: [&str; 4] = ["a", "b", "c", "d"];

fn table_with_rows(rows: &[Vec<i32>]) -> RawTable {
    let mut table = RawTable::new(HEADERS);
    for row in rows {
        table.push_row(row.iter().map(|v| v.to_string()));
    }
    table
}

fn spec_for(index: usize, choice: usize) -> ColumnSpec {
    match choice {
        0..=3 => ColumnSpec::original(index, HEADERS[choice], format!("out{}", index)),
        4 => ColumnSpec::calculated(index, format!("out{}", index), "SUMDROP(1; a, b, c, d)"),
        _ => ColumnSpec::calculated(index, format!("out{}", index), "BOUND(0; 10; a)"),
    }
}

proptest! {
    #[test]
    fn prop_row_count_and_column_order(
        rows in prop::collection::vec(prop::collection::vec(-50i32..50, 0..6), 0..30),
        choices in prop::collection::vec(0usize..6, 1..8),
    ) {
        let table = table_with_rows(&rows);
        let specs: Vec<ColumnSpec> = choices
            .iter()
            .enumerate()
            .map(|(i, &c)| spec_for(i, c))
            .collect();

        let output = table.project(&specs).unwrap();

        prop_assert_eq!(output.row_count(), table.row_count());
        let expected: Vec<String> = specs.iter().map(|s| s.new_name.clone()).collect();
        prop_assert_eq!(&output.columns, &expected);
        prop_assert!(output.rows.iter().all(|r| r.len() == specs.len()));

        for (i, &choice) in choices.iter().enumerate() {
            if choice < 4 {
                let source = table.clean_column(HEADERS[choice], 0.0).unwrap();
                prop_assert_eq!(output.column(&format!("out{}", i)).unwrap(), source);
            }
        }
    }
}
