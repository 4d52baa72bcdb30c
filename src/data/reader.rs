//! JSON dataset reader.

use super::{fallback_dataset, Dataset, Metadata, Table};
use crate::config::LoadPolicy;
use crate::error::{BarscapeError, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

/// Title and axis label given to bare-matrix documents.
const MATRIX_TITLE: &str = "Quarterly Sales Performance";
const MATRIX_SUBTITLE: &str = "2022-2024 by Product Category";
const MATRIX_VALUE_LABEL: &str = "Sales ($K)";

/// The two document shapes accepted on input.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDocument {
    Matrix(Vec<Vec<f64>>),
    Nested(RawNested),
}

#[derive(Debug, Deserialize)]
struct RawNested {
    datasets: IndexMap<String, IndexMap<String, Vec<f64>>>,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    metadata: Metadata,
}

/// Result of loading under a policy.
#[derive(Debug)]
pub struct LoadOutcome {
    /// The dataset in use.
    pub dataset: Dataset,
    /// Set when the fallback dataset replaced a failed load.
    pub fallback_reason: Option<String>,
}

/// JSON dataset reader.
#[derive(Debug)]
pub struct DataReader;

impl DataReader {
    /// Read and validate a dataset file.
    pub fn read_file(path: &Path) -> Result<Dataset> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| BarscapeError::file_open(path.to_path_buf(), e))?;
        let value: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| BarscapeError::parse(path.to_path_buf(), e))?;
        let dataset = Self::from_value(value)?;

        tracing::info!(
            path = %path.display(),
            tables = dataset.len(),
            "Dataset loaded"
        );
        Ok(dataset)
    }

    /// Parse a dataset from JSON text.
    pub fn parse(text: &str) -> Result<Dataset> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Read a file, applying the load failure policy.
    pub fn load(path: &Path, policy: LoadPolicy) -> Result<LoadOutcome> {
        match (Self::read_file(path), policy) {
            (Ok(dataset), _) => Ok(LoadOutcome {
                dataset,
                fallback_reason: None,
            }),
            (Err(e), LoadPolicy::Strict) => {
                tracing::error!(validation = e.is_validation(), "Error loading dataset: {}", e);
                Err(e)
            },
            (Err(e), LoadPolicy::Fallback) => {
                tracing::warn!(
                    validation = e.is_validation(),
                    "Error loading dataset, using fallback: {}",
                    e
                );
                Ok(LoadOutcome {
                    dataset: fallback_dataset(),
                    fallback_reason: Some(e.to_string()),
                })
            },
        }
    }

    fn from_value(value: serde_json::Value) -> Result<Dataset> {
        let document: RawDocument = serde_json::from_value(value).map_err(|_| {
            BarscapeError::invalid_structure(
                "expected an array of numeric rows or an object with a `datasets` map",
            )
        })?;

        match document {
            RawDocument::Matrix(rows) => Self::from_matrix(rows),
            RawDocument::Nested(nested) => Self::from_nested(nested),
        }
    }

    fn from_matrix(rows: Vec<Vec<f64>>) -> Result<Dataset> {
        let table = Table::from_rows("matrix", &rows, Vec::new(), Vec::new())?;

        tracing::debug!(
            rows = table.rows(),
            cols = table.cols(),
            "Parsed matrix dataset"
        );

        let metadata = Metadata {
            title: Some(MATRIX_TITLE.to_string()),
            subtitle: Some(MATRIX_SUBTITLE.to_string()),
            value_label: Some(MATRIX_VALUE_LABEL.to_string()),
            ..Default::default()
        };
        Dataset::new(metadata, vec![table])
    }

    fn from_nested(nested: RawNested) -> Result<Dataset> {
        let mut tables = Vec::with_capacity(nested.datasets.len());

        for (name, metrics) in nested.datasets {
            let row_labels: Vec<String> = metrics.keys().cloned().collect();
            let rows: Vec<Vec<f64>> = metrics.into_values().collect();
            let table = Table::from_rows(name, &rows, row_labels, nested.categories.clone())?;

            tracing::debug!(
                table = %table.name,
                rows = table.rows(),
                cols = table.cols(),
                "Parsed nested dataset"
            );
            tables.push(table);
        }

        Dataset::new(nested.metadata, tables)
    }
}
