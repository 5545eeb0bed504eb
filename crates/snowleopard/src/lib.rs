//! # snowleopard
//!
//! A Rust library for picking, renaming and deriving columns of a CSV file.
//!
//! ## Features
//!
//! - Read CSV headers and rows
//! - Select and rename source columns
//! - Calculated columns with `SUMDROP` (drop-lowest sum) and `BOUND` (clamp)
//! - Best-effort numeric cleaning of noisy cells
//! - Write the projected table back to CSV
//!
//! ## Example
//!
//! ```rust
//! use snowleopard::prelude::*;
//! use std::io::Cursor;
//!
//! let csv = "Name,Quiz1,Quiz2,Quiz3\nAda,10,5,8\n";
//! let table = CsvReader::read(Cursor::new(csv), &CsvReadOptions::default()).unwrap();
//!
//! let mut selection = ColumnSelection::new(table.headers().iter().cloned());
//! selection.select("Quiz1").unwrap();
//! selection.add_calculated("Final", "SUMDROP(1; Quiz1, Quiz2, Quiz3)").unwrap();
//! let specs = selection.build().unwrap();
//!
//! let output = table.project(&specs).unwrap();
//! assert_eq!(output.column("Final"), Some(vec![18.0]));
//! ```

pub mod error;
pub mod prelude;
pub mod projection;

pub use error::{Error, ErrorKind, Result};
pub use projection::{project, project_with_options, ErrorMode, ProjectionOptions, RawTableProjectionExt};

// Re-export core types
pub use snowleopard_core::{
    clean_numeric, CalculatedChoice, CalculatedSlot, ColumnChoice, ColumnSelection, ColumnSource,
    ColumnSpec, HeaderChoice, NumericRow, OutputTable, RawTable, SelectionConfig,
    DEFAULT_FILL_VALUE, MAX_CALCULATED_COLUMNS,
};

// Re-export formula types
pub use snowleopard_formula::{
    evaluate, evaluate_formula, parse_formula, ColumnLookup, EvaluationContext, Formula,
    FormulaError, FormulaExpr, FormulaResult, FunctionDef, FunctionName, FUNCTIONS,
};

// Re-export I/O types
pub use snowleopard_csv::{
    CsvError, CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter, LineTerminator,
};

use std::path::Path;

/// Extension trait for RawTable to add file input
pub trait RawTableExt: Sized {
    /// Open a CSV file with default options
    fn open<P: AsRef<Path>>(path: P) -> Result<Self>;

    /// Open a CSV file with custom options
    fn open_with_options<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> Result<Self>;
}

impl RawTableExt for RawTable {
    fn open<P: AsRef<Path>>(path: P) -> Result<RawTable> {
        Self::open_with_options(path, &CsvReadOptions::default())
    }

    fn open_with_options<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> Result<RawTable> {
        Ok(CsvReader::read_file(path, options)?)
    }
}

/// Extension trait for OutputTable to add file output
pub trait OutputTableExt {
    /// Save to a CSV file with default options
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Save to a CSV file with custom options
    fn save_with_options<P: AsRef<Path>>(&self, path: P, options: &CsvWriteOptions) -> Result<()>;
}

impl OutputTableExt for OutputTable {
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.save_with_options(path, &CsvWriteOptions::default())
    }

    fn save_with_options<P: AsRef<Path>>(&self, path: P, options: &CsvWriteOptions) -> Result<()> {
        Ok(CsvWriter::write_file(self, path, options)?)
    }
}

/// Build a mapping for the headers of a CSV file from a selection config
pub fn build_mapping<P: AsRef<Path>>(path: P, config: &SelectionConfig) -> Result<Vec<ColumnSpec>> {
    let headers = CsvReader::read_headers_file(path, &CsvReadOptions::default())?;
    Ok(config.build(headers)?)
}
