//! Dataset and table types.

use crate::error::{BarscapeError, Result};
use indexmap::IndexMap;
use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

/// Product categories used to label matrix rows when the file carries none.
const CATEGORY_NAMES: [&str; 16] = [
    "Electronics",
    "Clothing",
    "Home",
    "Sports",
    "Books",
    "Beauty",
    "Toys",
    "Food",
    "Automotive",
    "Health",
    "Garden",
    "Office",
    "Jewelry",
    "Pet",
    "Music",
    "Art",
];

/// First year of the default quarterly column labels.
const FIRST_YEAR: usize = 2022;

/// Free-form dataset metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Metadata {
    /// Chart title.
    pub title: Option<String>,
    /// Chart subtitle.
    pub subtitle: Option<String>,
    /// Data version string.
    pub version: Option<String>,
    /// Label of the value axis, e.g. "Sales ($K)".
    pub value_label: Option<String>,
    /// Any other keys present in the document.
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Metadata {
    /// Title, or a generic one.
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or("Dataset")
    }

    /// Value-axis label, or a generic one.
    pub fn value_label_or_default(&self) -> &str {
        self.value_label.as_deref().unwrap_or("Value")
    }
}

/// A rectangular block of values: rows are categories, columns are periods.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Table name (dataset key in the document).
    pub name: String,
    /// One label per row.
    pub row_labels: Vec<String>,
    /// One label per column.
    pub column_labels: Vec<String>,
    /// The values, `rows × columns`.
    pub values: Array2<f64>,
}

impl Table {
    /// Build a table from row vectors, validating the shape and values.
    ///
    /// Missing labels are filled with defaults; surplus labels are dropped.
    pub fn from_rows(
        name: impl Into<String>,
        rows: &[Vec<f64>],
        row_labels: Vec<String>,
        column_labels: Vec<String>,
    ) -> Result<Self> {
        validate_rows(rows)?;
        let n_rows = rows.len();
        let n_cols = rows[0].len();

        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        let values = Array2::from_shape_vec((n_rows, n_cols), flat)
            .map_err(|e| BarscapeError::invalid_structure(e.to_string()))?;

        Ok(Self {
            name: name.into(),
            row_labels: fit_labels(row_labels, default_row_labels(n_rows)),
            column_labels: fit_labels(column_labels, default_column_labels(n_cols)),
            values,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.values.nrows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.values.ncols()
    }

    /// Total number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at (row, col).
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get((row, col)).copied()
    }

    /// Overwrite a value. Returns false when out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> bool {
        match self.values.get_mut((row, col)) {
            Some(slot) => {
                *slot = value;
                true
            },
            None => false,
        }
    }

    /// Copy of one row as a series.
    pub fn row(&self, row: usize) -> Option<Vec<f64>> {
        (row < self.rows()).then(|| self.values.row(row).to_vec())
    }

    /// Sum of every column, i.e. the aggregate series over periods.
    pub fn column_totals(&self) -> Vec<f64> {
        self.values.sum_axis(Axis(0)).to_vec()
    }

    /// All values in row-major order.
    pub fn flatten(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }

    /// Minimum and maximum value.
    pub fn extent(&self) -> Option<(f64, f64)> {
        crate::scale::extent(self.values.iter().copied())
    }

    /// Mean of all values.
    pub fn mean(&self) -> Option<f64> {
        self.values.mean()
    }

    /// Label of a row, or an empty string.
    pub fn row_label(&self, row: usize) -> &str {
        self.row_labels.get(row).map(String::as_str).unwrap_or("")
    }

    /// Label of a column, or an empty string.
    pub fn column_label(&self, col: usize) -> &str {
        self.column_labels.get(col).map(String::as_str).unwrap_or("")
    }
}

/// A loaded dataset: metadata plus one or more named tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Document metadata.
    pub metadata: Metadata,
    /// Named tables in document order.
    pub tables: IndexMap<String, Table>,
}

impl Dataset {
    /// Create a dataset from tables. Fails if there are none.
    pub fn new(metadata: Metadata, tables: Vec<Table>) -> Result<Self> {
        if tables.is_empty() {
            return Err(BarscapeError::EmptyDataset);
        }
        let tables = tables.into_iter().map(|t| (t.name.clone(), t)).collect();
        Ok(Self { metadata, tables })
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the dataset has no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Look up a table by name.
    pub fn table(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| BarscapeError::unknown_dataset(name))
    }

    /// Table by position.
    pub fn table_at(&self, index: usize) -> Option<&Table> {
        self.tables.get_index(index).map(|(_, t)| t)
    }

    /// Mutable table by position.
    pub fn table_at_mut(&mut self, index: usize) -> Option<&mut Table> {
        self.tables.get_index_mut(index).map(|(_, t)| t)
    }
}

/// Check that rows are non-empty, rectangular and finite.
pub(crate) fn validate_rows(rows: &[Vec<f64>]) -> Result<()> {
    let expected = match rows.first() {
        Some(first) if !first.is_empty() => first.len(),
        _ => return Err(BarscapeError::EmptyDataset),
    };

    for (r, row) in rows.iter().enumerate() {
        if row.len() != expected {
            return Err(BarscapeError::RaggedRows {
                row: r,
                expected,
                found: row.len(),
            });
        }
        if let Some(c) = row.iter().position(|v| !v.is_finite()) {
            return Err(BarscapeError::NonFiniteValue { row: r, col: c });
        }
    }
    Ok(())
}

/// Default row labels: product categories, then `Row N`.
pub fn default_row_labels(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| match CATEGORY_NAMES.get(i) {
            Some(name) => name.to_string(),
            None => format!("Row {}", i + 1),
        })
        .collect()
}

/// Default column labels: consecutive quarters starting in 2022.
pub fn default_column_labels(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| format!("Q{} {}", i % 4 + 1, FIRST_YEAR + i / 4))
        .collect()
}

fn fit_labels(mut given: Vec<String>, defaults: Vec<String>) -> Vec<String> {
    let n = defaults.len();
    if given.len() >= n {
        given.truncate(n);
        return given;
    }
    given.extend(defaults.into_iter().skip(given.len()));
    given
}
