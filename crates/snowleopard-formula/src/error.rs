//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur during formula parsing or evaluation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// Malformed formula: bad delimiters, unknown function, wrong arity
    #[error("Syntax error in '{formula}' at position {position}: {reason}")]
    Syntax {
        formula: String,
        /// Byte offset into the trimmed formula
        position: usize,
        reason: String,
    },

    /// Formula references a column that is not in the row
    #[error("Unknown column '{column}' in '{formula}'")]
    UnknownColumn { column: String, formula: String },
}

impl FormulaError {
    /// Formula text the error refers to
    pub fn formula(&self) -> &str {
        match self {
            FormulaError::Syntax { formula, .. } | FormulaError::UnknownColumn { formula, .. } => {
                formula
            }
        }
    }

    /// Check if this is a syntax error
    pub fn is_syntax(&self) -> bool {
        matches!(self, FormulaError::Syntax { .. })
    }
}
