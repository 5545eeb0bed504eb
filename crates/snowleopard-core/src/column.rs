//! Column specification types

use std::fmt;

/// Where the values of an output column come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSource {
    /// Passthrough of a source column, by original header name
    Original(String),
    /// Formula evaluated per row
    Calculated(String),
}

/// A single output-column description
///
/// A column is either a (possibly renamed) copy of a source column or a
/// calculated value, never both. The [`ColumnSource`] enum carries exactly one
/// of the two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Position in the produced mapping, counted across passthrough and
    /// calculated columns alike
    ///
    /// Older mapping files numbered passthrough columns by header position and
    /// calculated columns by slot; consumers should order by sequence position,
    /// not by this field's absolute value.
    pub index: usize,
    /// Output column name
    pub new_name: String,
    /// Value source
    pub source: ColumnSource,
}

impl ColumnSpec {
    /// Create a passthrough column
    pub fn original<S: Into<String>, N: Into<String>>(index: usize, original_name: S, new_name: N) -> Self {
        Self {
            index,
            new_name: new_name.into(),
            source: ColumnSource::Original(original_name.into()),
        }
    }

    /// Create a calculated column
    pub fn calculated<N: Into<String>, C: Into<String>>(index: usize, new_name: N, calculation: C) -> Self {
        Self {
            index,
            new_name: new_name.into(),
            source: ColumnSource::Calculated(calculation.into()),
        }
    }

    /// Original header name, for passthrough columns
    pub fn original_name(&self) -> Option<&str> {
        match &self.source {
            ColumnSource::Original(name) => Some(name),
            ColumnSource::Calculated(_) => None,
        }
    }

    /// Formula text, for calculated columns
    pub fn calculation(&self) -> Option<&str> {
        match &self.source {
            ColumnSource::Original(_) => None,
            ColumnSource::Calculated(calc) => Some(calc),
        }
    }

    /// Check if this is a calculated column
    pub fn is_calculated(&self) -> bool {
        matches!(self.source, ColumnSource::Calculated(_))
    }
}

impl fmt::Display for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            ColumnSource::Original(name) if name == &self.new_name => {
                write!(f, "{}: {}", self.index, name)
            }
            ColumnSource::Original(name) => write!(f, "{}: {} -> {}", self.index, name, self.new_name),
            ColumnSource::Calculated(calc) => write!(f, "{}: {} = {}", self.index, self.new_name, calc),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    //! Flat `{ index, original_name, new_name, calculation }` representation

    use super::{ColumnSource, ColumnSpec};
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct FlatColumnSpec {
        index: usize,
        original_name: Option<String>,
        new_name: String,
        calculation: Option<String>,
    }

    impl Serialize for ColumnSpec {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            FlatColumnSpec {
                index: self.index,
                original_name: self.original_name().map(str::to_string),
                new_name: self.new_name.clone(),
                calculation: self.calculation().map(str::to_string),
            }
            .serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for ColumnSpec {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let flat = FlatColumnSpec::deserialize(deserializer)?;
            let source = match (flat.original_name, flat.calculation) {
                (Some(name), None) => ColumnSource::Original(name),
                (None, Some(calc)) => ColumnSource::Calculated(calc),
                (Some(_), Some(_)) => {
                    return Err(de::Error::custom(format!(
                        "column '{}' sets both original_name and calculation",
                        flat.new_name
                    )))
                }
                (None, None) => {
                    return Err(de::Error::custom(format!(
                        "column '{}' sets neither original_name nor calculation",
                        flat.new_name
                    )))
                }
            };
            Ok(ColumnSpec {
                index: flat.index,
                new_name: flat.new_name,
                source,
            })
        }
    }
}
