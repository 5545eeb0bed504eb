//! Column dependency extraction
//!
//! Lists which source columns a formula reads, so callers can check a
//! mapping against the table headers before evaluating any row.

use crate::ast::FormulaExpr;

impl FormulaExpr {
    /// Distinct column names referenced by this expression, in order of first appearance
    ///
    /// ```rust
    /// use snowleopard_formula::parse_formula;
    ///
    /// let ast = parse_formula("BOUND(0; Cap; SUMDROP(1; a, b, a))").unwrap();
    /// assert_eq!(ast.referenced_columns(), vec!["Cap", "a", "b"]);
    /// ```
    pub fn referenced_columns(&self) -> Vec<&str> {
        let mut columns = Vec::new();
        collect_columns(self, &mut columns);
        columns
    }
}

fn collect_columns<'a>(expr: &'a FormulaExpr, columns: &mut Vec<&'a str>) {
    match expr {
        FormulaExpr::Number(_) => {}
        FormulaExpr::ColumnRef(name) => {
            if !columns.contains(&name.as_str()) {
                columns.push(name);
            }
        }
        FormulaExpr::SumDrop { operands, .. } => {
            for operand in operands {
                collect_columns(operand, columns);
            }
        }
        FormulaExpr::Bound {
            lower,
            upper,
            value,
        } => {
            collect_columns(lower, columns);
            collect_columns(upper, columns);
            collect_columns(value, columns);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse_formula;

    #[test]
    fn test_referenced_columns() {
        let ast = parse_formula("SUMDROP(0; Quiz1, 5, \"Quiz 2\", Quiz1)").unwrap();
        assert_eq!(ast.referenced_columns(), vec!["Quiz1", "Quiz 2"]);

        let ast = parse_formula("BOUND(0; 10; 20)").unwrap();
        assert!(ast.referenced_columns().is_empty());
    }
}
