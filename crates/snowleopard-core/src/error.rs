//! Error types for snowleopard-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a column mapping
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// An included calculated column has no name
    #[error("Calculated column in slot {slot} has an empty name")]
    EmptyColumnName { slot: usize },

    /// An included calculated column has no calculation
    #[error("Calculated column '{name}' (slot {slot}) has an empty calculation")]
    EmptyCalculation { slot: usize, name: String },

    /// Header index out of bounds
    #[error("Header index {0} out of bounds (count: {1})")]
    HeaderOutOfBounds(usize, usize),

    /// Header not found by name
    #[error("Header not found: {0}")]
    HeaderNotFound(String),

    /// Too many calculated column slots
    #[error("Calculated column slot {0} exceeds the limit of {1} slots")]
    SlotLimit(usize, usize),
}
