//! Column selection
//!
//! Collects which source columns to keep (and under what name) plus the
//! calculated column slots, then produces the ordered [`ColumnSpec`] list.
//!
//! ## Example
//!
//! ```rust
//! use snowleopard_core::ColumnSelection;
//!
//! let mut selection = ColumnSelection::new(["Name", "Quiz1", "Quiz2", "Quiz3"]);
//! selection.select("Quiz1").unwrap();
//! selection.select_as("Quiz2", "Q2").unwrap();
//! selection.add_calculated("Final", "SUMDROP(1; Quiz1, Quiz2, Quiz3)").unwrap();
//!
//! let specs = selection.build().unwrap();
//! assert_eq!(specs.len(), 3);
//! assert_eq!(specs[2].new_name, "Final");
//! ```

use crate::column::ColumnSpec;
use crate::error::{Error, Result};

/// Default number of calculated column slots
pub const MAX_CALCULATED_COLUMNS: usize = 35;

/// Include flag and rename for one source header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderChoice {
    /// Keep this column in the output
    pub include: bool,
    /// New name (None or blank = keep the original name)
    pub rename: Option<String>,
}

/// One calculated column slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculatedSlot {
    /// Emit this column
    pub include: bool,
    /// Output column name
    pub name: String,
    /// Formula text
    pub calculation: String,
}

impl CalculatedSlot {
    /// Create an included slot
    pub fn new<N: Into<String>, C: Into<String>>(name: N, calculation: C) -> Self {
        Self {
            include: true,
            name: name.into(),
            calculation: calculation.into(),
        }
    }
}

/// Builder for an ordered column mapping
#[derive(Debug, Clone)]
pub struct ColumnSelection {
    headers: Vec<String>,
    choices: Vec<HeaderChoice>,
    slots: Vec<CalculatedSlot>,
    slot_limit: usize,
}

impl ColumnSelection {
    /// Create a selection over the given headers with nothing selected
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let choices = vec![HeaderChoice::default(); headers.len()];
        Self {
            headers,
            choices,
            slots: Vec::new(),
            slot_limit: MAX_CALCULATED_COLUMNS,
        }
    }

    /// Change the number of calculated column slots
    pub fn with_slot_limit(mut self, limit: usize) -> Self {
        self.slot_limit = limit;
        self
    }

    /// Header names in source order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Calculated column slots
    pub fn slots(&self) -> &[CalculatedSlot] {
        &self.slots
    }

    /// Include a header under its original name
    pub fn select(&mut self, header: &str) -> Result<&mut Self> {
        let idx = self.header_index(header)?;
        self.set_choice(idx, true, None)
    }

    /// Include a header under a new name
    pub fn select_as<S: Into<String>>(&mut self, header: &str, rename: S) -> Result<&mut Self> {
        let idx = self.header_index(header)?;
        self.set_choice(idx, true, Some(rename.into()))
    }

    /// Include every header under its original name
    pub fn select_all(&mut self) -> &mut Self {
        for choice in &mut self.choices {
            choice.include = true;
        }
        self
    }

    /// Set the include flag and rename of a header by position
    pub fn set_choice(&mut self, index: usize, include: bool, rename: Option<String>) -> Result<&mut Self> {
        let count = self.choices.len();
        let choice = self
            .choices
            .get_mut(index)
            .ok_or(Error::HeaderOutOfBounds(index, count))?;
        choice.include = include;
        choice.rename = rename;
        Ok(self)
    }

    /// Append an included calculated column in the next free slot
    pub fn add_calculated<N: Into<String>, C: Into<String>>(&mut self, name: N, calculation: C) -> Result<&mut Self> {
        let slot = self.slots.len();
        self.set_slot(slot, CalculatedSlot::new(name, calculation))
    }

    /// Fill a calculated column slot by position
    ///
    /// Slots between the current end and `slot` are created empty and excluded.
    pub fn set_slot(&mut self, slot: usize, value: CalculatedSlot) -> Result<&mut Self> {
        if slot >= self.slot_limit {
            return Err(Error::SlotLimit(slot, self.slot_limit));
        }
        if slot >= self.slots.len() {
            self.slots.resize(slot + 1, CalculatedSlot::default());
        }
        self.slots[slot] = value;
        Ok(self)
    }

    /// Produce the mapping: selected headers in source order, then included slots in slot order
    pub fn build(&self) -> Result<Vec<ColumnSpec>> {
        let mut specs = Vec::new();

        for (header, choice) in self.headers.iter().zip(&self.choices) {
            if !choice.include {
                continue;
            }
            let new_name = match choice.rename.as_deref().map(str::trim) {
                Some(rename) if !rename.is_empty() => rename.to_string(),
                _ => header.clone(),
            };
            specs.push(ColumnSpec::original(specs.len(), header.clone(), new_name));
        }

        for (slot, calc) in self.slots.iter().enumerate() {
            if !calc.include {
                continue;
            }
            let name = calc.name.trim();
            if name.is_empty() {
                return Err(Error::EmptyColumnName { slot });
            }
            let calculation = calc.calculation.trim();
            if calculation.is_empty() {
                return Err(Error::EmptyCalculation {
                    slot,
                    name: name.to_string(),
                });
            }
            specs.push(ColumnSpec::calculated(specs.len(), name, calculation));
        }

        Ok(specs)
    }

    fn header_index(&self, header: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == header)
            .ok_or_else(|| Error::HeaderNotFound(header.to_string()))
    }
}

/// Serializable selection, as collected from a front end
///
/// ```json
/// {
///   "columns": [{ "name": "Quiz1", "include": true, "rename": "Q1" }],
///   "calculated": [{ "include": true, "name": "Final", "calculation": "SUMDROP(0; Quiz1)" }]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SelectionConfig {
    /// Source column choices, by header name
    pub columns: Vec<ColumnChoice>,
    /// Calculated column slots, in slot order
    pub calculated: Vec<CalculatedChoice>,
}

/// Source column entry of a [`SelectionConfig`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnChoice {
    /// Original header name
    pub name: String,
    /// Keep this column
    #[cfg_attr(feature = "serde", serde(default = "default_include"))]
    pub include: bool,
    /// New name
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub rename: Option<String>,
}

/// Calculated column entry of a [`SelectionConfig`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalculatedChoice {
    /// Emit this column
    #[cfg_attr(feature = "serde", serde(default = "default_include"))]
    pub include: bool,
    /// Output column name
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Formula text
    #[cfg_attr(feature = "serde", serde(default))]
    pub calculation: String,
}

#[cfg(feature = "serde")]
fn default_include() -> bool {
    true
}

impl SelectionConfig {
    /// Apply this configuration to a header list and produce the mapping
    pub fn build<I, S>(&self, headers: I) -> Result<Vec<ColumnSpec>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.to_selection(headers)?.build()
    }

    /// Apply this configuration to a header list
    pub fn to_selection<I, S>(&self, headers: I) -> Result<ColumnSelection>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = ColumnSelection::new(headers);

        for choice in &self.columns {
            let idx = selection.header_index(&choice.name)?;
            selection.set_choice(idx, choice.include, choice.rename.clone())?;
        }

        for (slot, calc) in self.calculated.iter().enumerate() {
            selection.set_slot(
                slot,
                CalculatedSlot {
                    include: calc.include,
                    name: calc.name.clone(),
                    calculation: calc.calculation.clone(),
                },
            )?;
        }

        Ok(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn quiz_headers() -> Vec<&'static str> {
        vec!["Name", "Quiz1", "Quiz2", "Quiz3"]
    }

    #[test]
    fn test_originals_then_calculated() {
        let mut selection = ColumnSelection::new(quiz_headers());
        selection.add_calculated("Final", "SUMDROP(1; Quiz1, Quiz2, Quiz3)").unwrap();
        selection.select("Quiz3").unwrap();
        selection.select("Quiz1").unwrap();

        let specs = selection.build().unwrap();
        assert_eq!(
            specs,
            vec![
                ColumnSpec::original(0, "Quiz1", "Quiz1"),
                ColumnSpec::original(1, "Quiz3", "Quiz3"),
                ColumnSpec::calculated(2, "Final", "SUMDROP(1; Quiz1, Quiz2, Quiz3)"),
            ]
        );
    }

    #[test]
    fn test_index_runs_across_skipped_headers_and_slots() {
        let mut selection = ColumnSelection::new(quiz_headers());
        selection.select("Quiz3").unwrap();
        selection.set_slot(2, CalculatedSlot::new("Capped", "BOUND(0; 100; Quiz3)")).unwrap();

        let specs = selection.build().unwrap();
        // header position 3 and slot 2 both become sequence positions
        let indexes: Vec<usize> = specs.iter().map(|s| s.index).collect();
        assert_eq!(indexes, vec![0, 1]);
    }

    #[test]
    fn test_rename() {
        let mut selection = ColumnSelection::new(quiz_headers());
        selection.select_as("Quiz1", "First Quiz").unwrap();
        selection.select_as("Quiz2", "   ").unwrap();

        let specs = selection.build().unwrap();
        assert_eq!(specs[0].new_name, "First Quiz");
        assert_eq!(specs[0].original_name(), Some("Quiz1"));
        assert_eq!(specs[1].new_name, "Quiz2");
    }

    #[test]
    fn test_unknown_header() {
        let mut selection = ColumnSelection::new(quiz_headers());
        assert_eq!(
            selection.select("Midterm").unwrap_err(),
            Error::HeaderNotFound("Midterm".into())
        );
        assert_eq!(
            selection.set_choice(9, true, None).unwrap_err(),
            Error::HeaderOutOfBounds(9, 4)
        );
    }

    #[test]
    fn test_empty_calculated_fields() {
        let mut selection = ColumnSelection::new(quiz_headers());
        selection.add_calculated("", "BOUND(0; 1; Quiz1)").unwrap();
        assert_eq!(selection.build().unwrap_err(), Error::EmptyColumnName { slot: 0 });

        let mut selection = ColumnSelection::new(quiz_headers());
        selection.add_calculated("Capped", " ").unwrap();
        assert_eq!(
            selection.build().unwrap_err(),
            Error::EmptyCalculation {
                slot: 0,
                name: "Capped".into()
            }
        );
    }

    #[test]
    fn test_excluded_slots_are_not_validated() {
        let mut selection = ColumnSelection::new(quiz_headers());
        selection
            .set_slot(
                2,
                CalculatedSlot {
                    include: false,
                    name: String::new(),
                    calculation: String::new(),
                },
            )
            .unwrap();
        selection.set_slot(4, CalculatedSlot::new("Bad", "not a formula")).unwrap();

        let specs = selection.build().unwrap();
        assert_eq!(specs, vec![ColumnSpec::calculated(0, "Bad", "not a formula")]);
    }

    #[test]
    fn test_slot_limit() {
        let mut selection = ColumnSelection::new(quiz_headers()).with_slot_limit(2);
        selection.add_calculated("a", "SUMDROP(0; Quiz1)").unwrap();
        selection.add_calculated("b", "SUMDROP(0; Quiz2)").unwrap();
        assert_eq!(
            selection.add_calculated("c", "SUMDROP(0; Quiz3)").unwrap_err(),
            Error::SlotLimit(2, 2)
        );
        let mut selection = ColumnSelection::new(quiz_headers());
        assert_eq!(
            selection
                .set_slot(MAX_CALCULATED_COLUMNS, CalculatedSlot::default())
                .unwrap_err(),
            Error::SlotLimit(MAX_CALCULATED_COLUMNS, MAX_CALCULATED_COLUMNS)
        );
    }

    #[test]
    fn test_config_matches_builder() {
        let config = SelectionConfig {
            columns: vec![
                ColumnChoice {
                    name: "Quiz2".into(),
                    include: true,
                    rename: Some("Q2".into()),
                },
                ColumnChoice {
                    name: "Name".into(),
                    include: false,
                    rename: None,
                },
            ],
            calculated: vec![CalculatedChoice {
                include: true,
                name: "Capped".into(),
                calculation: "BOUND(0; 100; Quiz1)".into(),
            }],
        };

        let mut selection = ColumnSelection::new(quiz_headers());
        selection.select_as("Quiz2", "Q2").unwrap();
        selection.add_calculated("Capped", "BOUND(0; 100; Quiz1)").unwrap();

        assert_eq!(config.build(quiz_headers()).unwrap(), selection.build().unwrap());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_from_json_defaults() {
        let config: SelectionConfig = serde_json::from_str(
            r#"{
                "columns": [{ "name": "Quiz1" }],
                "calculated": [{ "name": "Final", "calculation": "SUMDROP(0; Quiz1)" }]
            }"#,
        )
        .unwrap();

        assert!(config.columns[0].include);
        assert!(config.calculated[0].include);
        assert_eq!(config.build(quiz_headers()).unwrap().len(), 2);
    }
}
