//! # snowleopard-formula
//!
//! Formula parser and evaluator for snowleopard calculated columns.
//!
//! This crate provides:
//! - Formula parsing (text → AST)
//! - Formula evaluation (AST + row → number)
//! - The two built-in functions, `SUMDROP` and `BOUND`
//! - Column reference extraction
//!
//! ## Example
//!
//! ```rust
//! use snowleopard_core::NumericRow;
//! use snowleopard_formula::Formula;
//!
//! let row: NumericRow = [("Quiz1", 150.0)].into_iter().collect();
//! let capped = Formula::parse("BOUND(0; 100; Quiz1)").unwrap();
//! assert_eq!(capped.evaluate(&row).unwrap(), 100.0);
//! ```

pub mod ast;
pub mod dependency;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod parser;

pub use ast::FormulaExpr;
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate, evaluate_formula, ColumnLookup, EvaluationContext, Formula};
pub use functions::{FunctionDef, FunctionName, FUNCTIONS};
pub use parser::parse_formula;
