//! Table projection
//!
//! Applies a column mapping to every row of a raw table, copying cleaned
//! source cells and evaluating calculated columns.
//!
//! # Example
//!
//! ```rust
//! use snowleopard::prelude::*;
//!
//! let mut table = RawTable::new(["Name", "Quiz1", "Quiz2", "Quiz3"]);
//! table.push_row(["Ada", "10", "5", "8"]);
//!
//! let specs = vec![
//!     ColumnSpec::original(0, "Quiz1", "Quiz1"),
//!     ColumnSpec::calculated(1, "Final", "SUMDROP(1; Quiz1, Quiz2, Quiz3)"),
//! ];
//!
//! let output = table.project(&specs).unwrap();
//! assert_eq!(output.rows, vec![vec![10.0, 18.0]]);
//! ```

use crate::{ColumnSpec, Error, Formula, FormulaError, OutputTable, RawTable, Result};
use snowleopard_core::{clean_numeric, ColumnSource, NumericRow, DEFAULT_FILL_VALUE};

/// How row projection reacts to errors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorMode {
    /// Stop at the first error
    #[default]
    FailFast,
    /// Check every column and report all errors together
    ///
    /// Collection happens while the mapping is compiled. Once it compiles,
    /// evaluation cannot fail for a row of the same table.
    CollectAll,
}

/// Options for table projection
#[derive(Debug, Clone)]
pub struct ProjectionOptions {
    /// Value used for missing or non-numeric cells (default: 0)
    pub fill_value: f64,
    /// Error reporting
    pub error_mode: ErrorMode,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            fill_value: DEFAULT_FILL_VALUE,
            error_mode: ErrorMode::FailFast,
        }
    }
}

/// Extension trait for RawTable to add projection methods
pub trait RawTableProjectionExt {
    /// Project with default options
    fn project(&self, specs: &[ColumnSpec]) -> Result<OutputTable>;

    /// Project with custom options
    fn project_with_options(&self, specs: &[ColumnSpec], options: &ProjectionOptions) -> Result<OutputTable>;
}

impl RawTableProjectionExt for RawTable {
    fn project(&self, specs: &[ColumnSpec]) -> Result<OutputTable> {
        project(self, specs)
    }

    fn project_with_options(&self, specs: &[ColumnSpec], options: &ProjectionOptions) -> Result<OutputTable> {
        project_with_options(self, specs, options)
    }
}

/// Project a table with default options
pub fn project(table: &RawTable, specs: &[ColumnSpec]) -> Result<OutputTable> {
    project_with_options(table, specs, &ProjectionOptions::default())
}

/// Project a table
///
/// Every calculation is parsed, and every referenced column checked against
/// the headers, before the first row is processed. No table is returned if
/// any error occurs.
pub fn project_with_options(
    table: &RawTable,
    specs: &[ColumnSpec],
    options: &ProjectionOptions,
) -> Result<OutputTable> {
    let plan = ProjectionPlan::compile(table, specs, options.error_mode)?;
    plan.apply(table, options)
}

/// A column ready to be produced
#[derive(Debug)]
enum PlannedColumn {
    /// Position of the source column in each raw row
    Original(usize),
    Calculated(Formula),
}

/// Compiled mapping: parsed formulas and resolved source positions
#[derive(Debug)]
struct ProjectionPlan {
    names: Vec<String>,
    columns: Vec<PlannedColumn>,
}

impl ProjectionPlan {
    fn compile(table: &RawTable, specs: &[ColumnSpec], mode: ErrorMode) -> Result<Self> {
        let mut names = Vec::with_capacity(specs.len());
        let mut columns = Vec::with_capacity(specs.len());
        let mut errors = Vec::new();

        for spec in specs {
            match Self::compile_column(table, spec) {
                Ok(column) => {
                    names.push(spec.new_name.clone());
                    columns.push(column);
                }
                Err(e) if mode == ErrorMode::CollectAll => {
                    tracing::warn!("{}", e);
                    errors.push(e);
                }
                Err(e) => return Err(e),
            }
        }

        collect_errors(errors)?;

        tracing::debug!(
            columns = columns.len(),
            calculated = columns
                .iter()
                .filter(|c| matches!(c, PlannedColumn::Calculated(_)))
                .count(),
            "compiled column mapping"
        );

        Ok(Self { names, columns })
    }

    fn compile_column(table: &RawTable, spec: &ColumnSpec) -> Result<PlannedColumn> {
        match &spec.source {
            ColumnSource::Original(name) => table
                .column_index(name)
                .map(PlannedColumn::Original)
                .ok_or_else(|| Error::UnknownColumn {
                    column: spec.new_name.clone(),
                    original_name: name.clone(),
                }),
            ColumnSource::Calculated(text) => {
                let formula = Formula::parse(text).map_err(|source| Error::Formula {
                    column: spec.new_name.clone(),
                    source,
                })?;

                if let Some(missing) = formula
                    .referenced_columns()
                    .into_iter()
                    .find(|c| !table.has_column(c))
                {
                    return Err(Error::Formula {
                        column: spec.new_name.clone(),
                        source: FormulaError::UnknownColumn {
                            column: missing.to_string(),
                            formula: formula.text().to_string(),
                        },
                    });
                }

                tracing::debug!(column = %spec.new_name, formula = %formula.expr(), "parsed calculation");
                Ok(PlannedColumn::Calculated(formula))
            }
        }
    }

    fn apply(&self, table: &RawTable, options: &ProjectionOptions) -> Result<OutputTable> {
        let fill = options.fill_value;
        let needs_row_values = self
            .columns
            .iter()
            .any(|c| matches!(c, PlannedColumn::Calculated(_)));

        let mut output = OutputTable::new(self.names.clone());
        output.rows.reserve(table.row_count());

        for (row_idx, cells) in table.rows().enumerate() {
            let values = if needs_row_values {
                table.numeric_row(row_idx, fill).unwrap_or_default()
            } else {
                NumericRow::new()
            };

            let mut out_row = Vec::with_capacity(self.columns.len());
            for (name, column) in self.names.iter().zip(&self.columns) {
                let value = match column {
                    PlannedColumn::Original(pos) => {
                        clean_numeric(cells.get(*pos).map(String::as_str), fill)
                    }
                    // Every header is in `values`, so only hand-built plans fail here
                    PlannedColumn::Calculated(formula) => {
                        formula.evaluate(&values).map_err(|source| Error::Row {
                            row: row_idx,
                            column: name.clone(),
                            source,
                        })?
                    }
                };
                out_row.push(value);
            }
            output.rows.push(out_row);
        }

        tracing::info!(
            rows = output.row_count(),
            columns = output.columns.len(),
            "projected table"
        );
        Ok(output)
    }
}

fn collect_errors(mut errors: Vec<Error>) -> Result<()> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(Error::Multiple(errors)),
    }
}
