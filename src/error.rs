//! Error types for Barscape.
//!
//! This module provides a unified error handling approach using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Barscape operations.
pub type Result<T> = std::result::Result<T, BarscapeError>;

/// Errors that can occur in Barscape.
#[derive(Debug, Error)]
pub enum BarscapeError {
    /// Failed to open a file.
    #[error("Failed to open file: {path}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The JSON is well formed but has neither accepted dataset shape.
    #[error("Invalid dataset structure: {0}")]
    InvalidStructure(String),

    /// The dataset has no rows or no columns.
    #[error("Dataset is empty")]
    EmptyDataset,

    /// A row has a different length than the first row.
    #[error("Row {row} has {found} values, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A value is NaN or infinite.
    #[error("Value at row {row}, column {col} is not a finite number")]
    NonFiniteValue { row: usize, col: usize },

    /// Named table does not exist in the dataset.
    #[error("Unknown dataset: {name}")]
    UnknownDataset { name: String },

    /// Configuration file could not be interpreted.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Failed to access clipboard.
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A selection-only action was requested with nothing selected.
    #[error("Nothing selected")]
    NothingSelected,
}

impl BarscapeError {
    /// Create a FileOpen error.
    pub fn file_open(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileOpen { path, source }
    }

    /// Create a Parse error.
    pub fn parse(path: PathBuf, source: serde_json::Error) -> Self {
        Self::Parse { path, source }
    }

    /// Create an InvalidStructure error.
    pub fn invalid_structure(reason: impl Into<String>) -> Self {
        Self::InvalidStructure(reason.into())
    }

    /// Create an UnknownDataset error.
    pub fn unknown_dataset(name: impl Into<String>) -> Self {
        Self::UnknownDataset { name: name.into() }
    }

    /// Whether the error comes from the dataset's content rather than from IO.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidStructure(_)
                | Self::EmptyDataset
                | Self::RaggedRows { .. }
                | Self::NonFiniteValue { .. }
        )
    }
}
