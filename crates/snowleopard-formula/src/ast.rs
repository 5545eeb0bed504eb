//! Formula Abstract Syntax Tree types

use std::fmt;

/// Formula expression AST
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaExpr {
    // === Leaves ===
    /// Numeric literal
    Number(f64),
    /// Reference to a source column by original name
    ColumnRef(String),

    // === Functions ===
    /// `SUMDROP(k; a, b, ...[; w1, w2, ...])`
    SumDrop {
        /// Number of lowest values to drop
        drop: usize,
        /// Values to sum (at least `drop + 1`)
        operands: Vec<FormulaExpr>,
        /// Weights for the surviving values, lowest first
        weights: Option<Vec<f64>>,
    },
    /// `BOUND(lower; upper; value)`
    Bound {
        lower: Box<FormulaExpr>,
        upper: Box<FormulaExpr>,
        value: Box<FormulaExpr>,
    },
}

impl FormulaExpr {
    /// Create a column reference
    pub fn column<S: Into<String>>(name: S) -> Self {
        FormulaExpr::ColumnRef(name.into())
    }
}

impl fmt::Display for FormulaExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaExpr::Number(n) => write!(f, "{}", n),
            FormulaExpr::ColumnRef(name) => {
                if is_bare_identifier(name) {
                    f.write_str(name)
                } else {
                    write!(f, "\"{}\"", name.replace('"', "\"\""))
                }
            }
            FormulaExpr::SumDrop {
                drop,
                operands,
                weights,
            } => {
                write!(f, "SUMDROP({}; ", drop)?;
                write_list(f, operands)?;
                if let Some(weights) = weights {
                    f.write_str("; ")?;
                    write_list(f, weights)?;
                }
                f.write_str(")")
            }
            FormulaExpr::Bound {
                lower,
                upper,
                value,
            } => write!(f, "BOUND({}; {}; {})", lower, upper, value),
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// Check if a column name can be written without quotes
pub(crate) fn is_bare_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '.')
}
