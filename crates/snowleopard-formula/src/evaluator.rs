//! Formula evaluator
//!
//! Evaluates formula ASTs against one row of numeric values.

use crate::ast::FormulaExpr;
use crate::error::{FormulaError, FormulaResult};
use crate::functions::math;
use crate::parser::parse_formula;
use snowleopard_core::NumericRow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Source of column values for evaluation
pub trait ColumnLookup {
    /// Value of a column by exact name
    fn lookup(&self, column: &str) -> Option<f64>;
}

impl ColumnLookup for NumericRow {
    fn lookup(&self, column: &str) -> Option<f64> {
        self.get(column)
    }
}

impl<S: BuildHasher> ColumnLookup for HashMap<String, f64, S> {
    fn lookup(&self, column: &str) -> Option<f64> {
        self.get(column).copied()
    }
}

impl ColumnLookup for BTreeMap<String, f64> {
    fn lookup(&self, column: &str) -> Option<f64> {
        self.get(column).copied()
    }
}

impl<T: ColumnLookup + ?Sized> ColumnLookup for &T {
    fn lookup(&self, column: &str) -> Option<f64> {
        (**self).lookup(column)
    }
}

/// Context for formula evaluation
pub struct EvaluationContext<'a> {
    /// Row values
    pub row: &'a dyn ColumnLookup,
    /// Formula text, for error messages
    pub formula: &'a str,
}

impl<'a> EvaluationContext<'a> {
    /// Create a new evaluation context
    pub fn new(row: &'a dyn ColumnLookup, formula: &'a str) -> Self {
        Self { row, formula }
    }

    /// Get a column value from the row
    pub fn get_column_value(&self, column: &str) -> FormulaResult<f64> {
        self.row
            .lookup(column)
            .ok_or_else(|| FormulaError::UnknownColumn {
                column: column.to_string(),
                formula: self.formula.to_string(),
            })
    }
}

/// Evaluate a formula AST
pub fn evaluate(expr: &FormulaExpr, ctx: &EvaluationContext<'_>) -> FormulaResult<f64> {
    match expr {
        FormulaExpr::Number(n) => Ok(*n),
        FormulaExpr::ColumnRef(name) => ctx.get_column_value(name),
        FormulaExpr::SumDrop {
            drop,
            operands,
            weights,
        } => {
            let values = operands
                .iter()
                .map(|operand| evaluate(operand, ctx))
                .collect::<FormulaResult<Vec<f64>>>()?;

            // Arity is checked by the parser; this only fails for hand-built ASTs
            math::sum_drop(&values, *drop, weights.as_deref()).ok_or_else(|| {
                FormulaError::Syntax {
                    formula: ctx.formula.to_string(),
                    position: 0,
                    reason: format!(
                        "SUMDROP cannot drop {} of {} value(s) with {} weight(s)",
                        drop,
                        values.len(),
                        weights.as_ref().map_or(0, Vec::len)
                    ),
                }
            })
        }
        FormulaExpr::Bound {
            lower,
            upper,
            value,
        } => {
            let lower = evaluate(lower, ctx)?;
            let upper = evaluate(upper, ctx)?;
            let value = evaluate(value, ctx)?;
            Ok(math::bound(lower, upper, value))
        }
    }
}

/// Parse and evaluate a formula against a row
///
/// # Example
/// ```rust
/// use std::collections::HashMap;
/// use snowleopard_formula::evaluate_formula;
///
/// let row: HashMap<String, f64> = [("Quiz1", 10.0), ("Quiz2", 5.0), ("Quiz3", 8.0)]
///     .into_iter()
///     .map(|(k, v)| (k.to_string(), v))
///     .collect();
///
/// assert_eq!(evaluate_formula("SUMDROP(1; Quiz1, Quiz2, Quiz3)", &row).unwrap(), 18.0);
/// ```
pub fn evaluate_formula<L: ColumnLookup + ?Sized>(expression: &str, row: &L) -> FormulaResult<f64> {
    Formula::parse(expression)?.evaluate(row)
}

/// A formula text together with its parsed AST
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    text: String,
    expr: FormulaExpr,
}

impl Formula {
    /// Parse a formula
    pub fn parse(text: &str) -> FormulaResult<Self> {
        let expr = parse_formula(text)?;
        Ok(Self {
            text: text.trim().to_string(),
            expr,
        })
    }

    /// Formula text (trimmed)
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parsed AST
    pub fn expr(&self) -> &FormulaExpr {
        &self.expr
    }

    /// Distinct column names this formula reads
    pub fn referenced_columns(&self) -> Vec<&str> {
        self.expr.referenced_columns()
    }

    /// Evaluate against a row
    pub fn evaluate<L: ColumnLookup + ?Sized>(&self, row: &L) -> FormulaResult<f64> {
        let row = &row;
        let ctx = EvaluationContext::new(row, &self.text);
        evaluate(&self.expr, &ctx)
    }
}
