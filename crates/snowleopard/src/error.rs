//! Error types for snowleopard

use snowleopard_csv::CsvError;
use snowleopard_formula::FormulaError;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// The four kinds of failure a run can end with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed user configuration
    Validation,
    /// Malformed calculation expression
    FormulaSyntax,
    /// Reference to a column that does not exist
    UnknownColumn,
    /// Unreadable file or empty header row
    DataSource,
}

/// Errors that can occur while reading, mapping or projecting a table
#[derive(Debug, Error)]
pub enum Error {
    /// Column selection rejected
    #[error("Validation error: {0}")]
    Validation(#[from] snowleopard_core::Error),

    /// Calculation failed to parse or references a missing column
    #[error("Column '{column}': {source}")]
    Formula {
        column: String,
        #[source]
        source: FormulaError,
    },

    /// Passthrough column is not a header of the table
    #[error("Column '{column}': unknown source column '{original_name}'")]
    UnknownColumn {
        column: String,
        original_name: String,
    },

    /// Evaluation failed on a data row
    ///
    /// Projection checks formulas and references up front, so this only
    /// surfaces for expressions evaluated outside a compiled projection.
    #[error("Row {row}, column '{column}': {source}")]
    Row {
        /// Zero-based data row index
        row: usize,
        column: String,
        #[source]
        source: FormulaError,
    },

    /// Several errors, reported together
    #[error("{} errors; first: {}", .0.len(), .0.first().map(ToString::to_string).unwrap_or_default())]
    Multiple(Vec<Error>),

    /// Reading or writing the data file failed
    #[error("Data source error: {0}")]
    DataSource(#[from] CsvError),
}

impl Error {
    /// Classify this error
    ///
    /// [`Error::Multiple`] reports the kind of its first error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Formula { source, .. } | Error::Row { source, .. } => formula_kind(source),
            Error::UnknownColumn { .. } => ErrorKind::UnknownColumn,
            Error::Multiple(errors) => errors.first().map_or(ErrorKind::Validation, Error::kind),
            Error::DataSource(_) => ErrorKind::DataSource,
        }
    }

    /// The individual errors, flattening [`Error::Multiple`]
    pub fn errors(&self) -> Vec<&Error> {
        match self {
            Error::Multiple(errors) => errors.iter().flat_map(Error::errors).collect(),
            other => vec![other],
        }
    }
}

fn formula_kind(error: &FormulaError) -> ErrorKind {
    match error {
        FormulaError::Syntax { .. } => ErrorKind::FormulaSyntax,
        FormulaError::UnknownColumn { .. } => ErrorKind::UnknownColumn,
    }
}
