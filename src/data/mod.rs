//! Data loading and representation.
//!
//! This module handles reading JSON datasets (plain matrices or nested
//! dataset → metric → series documents), validating them, and normalizing
//! them into rectangular tables.

mod dataset;
mod fallback;
mod reader;

pub use dataset::{default_column_labels, default_row_labels, Dataset, Metadata, Table};
pub use fallback::{fallback_dataset, regional_clusters, REGION_NAMES};
pub use reader::{DataReader, LoadOutcome};
