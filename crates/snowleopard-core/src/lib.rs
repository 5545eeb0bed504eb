//! # snowleopard-core
//!
//! Core data structures for snowleopard.
//!
//! This crate provides the fundamental types used throughout snowleopard:
//! - [`ColumnSpec`] - One output column, either a passthrough or a calculation
//! - [`RawTable`] - Headers and string cells read from a data source
//! - [`NumericRow`] - Cleaned numeric values of a row, keyed by header
//! - [`ColumnSelection`] - Builder that turns user choices into a mapping
//!
//! ## Example
//!
//! ```rust
//! use snowleopard_core::{ColumnSelection, RawTable};
//!
//! let mut table = RawTable::new(["Name", "Quiz1"]);
//! table.push_row(["Ada", "10"]);
//!
//! let mut selection = ColumnSelection::new(table.headers().iter().cloned());
//! selection.select_as("Quiz1", "Q1").unwrap();
//!
//! let specs = selection.build().unwrap();
//! assert_eq!(specs[0].original_name(), Some("Quiz1"));
//! assert_eq!(table.numeric_row(0, 0.0).unwrap().get("Quiz1"), Some(10.0));
//! ```

pub mod column;
pub mod error;
pub mod selection;
pub mod table;

// Re-exports for convenience
pub use column::{ColumnSource, ColumnSpec};
pub use error::{Error, Result};
pub use selection::{
    CalculatedChoice, CalculatedSlot, ColumnChoice, ColumnSelection, HeaderChoice,
    SelectionConfig, MAX_CALCULATED_COLUMNS,
};
pub use table::{clean_numeric, NumericRow, OutputTable, RawTable, DEFAULT_FILL_VALUE};
