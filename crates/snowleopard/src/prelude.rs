//! Prelude module - common imports for snowleopard users
//!
//! ```rust
//! use snowleopard::prelude::*;
//! ```

pub use crate::{
    // Column mapping types
    ColumnSelection,
    ColumnSpec,
    SelectionConfig,

    // Table types
    OutputTable,
    RawTable,

    // Formula types
    Formula,
    FormulaError,

    // I/O types
    CsvReadOptions,
    CsvReader,
    CsvWriteOptions,
    CsvWriter,

    // Error types
    Error,
    ErrorKind,
    Result,

    // Projection types
    ErrorMode,
    ProjectionOptions,

    // Extension traits
    OutputTableExt,
    RawTableExt,
    RawTableProjectionExt,
};
