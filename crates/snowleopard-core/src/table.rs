//! Raw tabular data read from a source file

use ahash::{AHashMap, AHashSet};

/// Default fill value for missing or non-numeric cells
pub const DEFAULT_FILL_VALUE: f64 = 0.0;

/// Convert a cell to a number, substituting `fill` for missing or non-numeric text
///
/// Surrounding whitespace is ignored and `NaN` counts as missing.
///
/// ```rust
/// use snowleopard_core::clean_numeric;
///
/// assert_eq!(clean_numeric(Some(" 42 "), 0.0), 42.0);
/// assert_eq!(clean_numeric(Some("absent"), -1.0), -1.0);
/// assert_eq!(clean_numeric(None, 0.0), 0.0);
/// ```
pub fn clean_numeric(cell: Option<&str>, fill: f64) -> f64 {
    match cell.map(str::trim).and_then(|s| s.parse::<f64>().ok()) {
        Some(n) if !n.is_nan() => n,
        _ => fill,
    }
}

/// Header names plus string cells, addressable by header name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    index: AHashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Create an empty table with the given headers
    ///
    /// Blank headers become `Unnamed: <position>` and repeated headers get a
    /// `.1`, `.2`, ... suffix, so every header is unique.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers = normalize_headers(headers.into_iter().map(Into::into));
        let index = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), i))
            .collect();

        Self {
            headers,
            index,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding short rows with empty cells and dropping extra cells
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let width = self.headers.len();
        let mut row: Vec<String> = cells.into_iter().take(width).map(Into::into).collect();
        row.resize(width, String::new());
        self.rows.push(row);
    }

    /// Header names in source order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Position of a header
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Check if a header exists
    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of data rows (the header row is not counted)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if there are no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over the data rows
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Get a cell by row index and header name
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Cleaned numeric values of one column
    pub fn clean_column(&self, column: &str, fill: f64) -> Option<Vec<f64>> {
        let col = self.column_index(column)?;
        Some(
            self.rows
                .iter()
                .map(|row| clean_numeric(row.get(col).map(String::as_str), fill))
                .collect(),
        )
    }

    /// Cleaned numeric values of one row, keyed by header name
    pub fn numeric_row(&self, row: usize, fill: f64) -> Option<NumericRow> {
        let cells = self.rows.get(row)?;
        Some(
            self.headers
                .iter()
                .zip(cells)
                .map(|(h, cell)| (h.clone(), clean_numeric(Some(cell), fill)))
                .collect(),
        )
    }
}

fn normalize_headers(raw: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen: AHashSet<String> = AHashSet::new();
    let mut headers = Vec::new();

    for (position, header) in raw.enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {}", position)
        } else {
            header
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", base, suffix);
            suffix += 1;
        }

        seen.insert(name.clone());
        headers.push(name);
    }

    headers
}

/// Cleaned numeric values of a single row, keyed by original column name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericRow {
    values: AHashMap<String, f64>,
}

impl NumericRow {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value by column name
    pub fn get(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied()
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the row has no columns
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for NumericRow {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Projected table: output column names plus numeric rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputTable {
    /// Output column names, in mapping order
    pub columns: Vec<String>,
    /// One row per input row, one value per column
    pub rows: Vec<Vec<f64>>,
}

impl OutputTable {
    /// Create an empty table with the given columns
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Values of one column by output name
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let col = self.columns.iter().position(|c| c == name)?;
        self.rows.iter().map(|row| row.get(col).copied()).collect()
    }
}
