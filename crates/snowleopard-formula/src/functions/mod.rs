//! Built-in formula functions

pub mod math;

use std::fmt;
use std::str::FromStr;

/// The closed set of callable functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionName {
    /// Drop-lowest sum
    SumDrop,
    /// Clamp to an interval
    Bound,
}

impl FunctionName {
    /// Name as written in formulas (case-sensitive)
    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionName::SumDrop => "SUMDROP",
            FunctionName::Bound => "BOUND",
        }
    }

    /// Catalog entry for this function
    pub fn definition(&self) -> &'static FunctionDef {
        match self {
            FunctionName::SumDrop => &FUNCTIONS[1],
            FunctionName::Bound => &FUNCTIONS[0],
        }
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FunctionName {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUMDROP" => Ok(FunctionName::SumDrop),
            "BOUND" => Ok(FunctionName::Bound),
            _ => Err(()),
        }
    }
}

/// Function documentation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionDef {
    /// Function name
    pub name: FunctionName,
    /// Call syntax
    pub usage: &'static str,
    /// One-paragraph explanation
    pub help: &'static str,
}

/// All functions, sorted by name
pub static FUNCTIONS: [FunctionDef; 2] = [
    FunctionDef {
        name: FunctionName::Bound,
        usage: "BOUND(lower_bound, upper_bound; value)",
        help: "Limit the value between the two bounds. More formally: BOUND(a, b; v) returns a if v <= a, b if v >= b, and v itself if a <= v <= b.",
    },
    FunctionDef {
        name: FunctionName::SumDrop,
        usage: "SUMDROP(k; column_name_1, column_name_2, ...[; weight_1, weight_2, ...])",
        help: "Add a sequence of values while dropping the k lowest scores. Use SUMDROP(0; ...) to sum all values. Optional weights multiply the kept values, lowest kept value first.",
    },
];
