//! Barscape - 3D bar-chart data visualization with lightweight analytics.
//!
//! Barscape turns a numeric matrix into a renderer-agnostic 3D scene: one bar,
//! point or line segment per value, colored by a sequential scale, optionally
//! surrounded by smaller satellite clusters. On top of the data it computes a
//! linear-regression forecast, moving averages, growth rates and z-score
//! anomalies, and turns them into plain-language insights.
//!
//! # Features
//!
//! - Matrix and nested JSON datasets with strict or fallback loading
//! - Linear, band, sequential color and quantile scales
//! - Scene graph with entrance animation on a virtual clock
//! - Hover and selection state machine with timed info overlays
//! - Simulated real-time updates from a seeded generator
//! - JSON session reports
//! - Terminal front-end with Gruvbox themes and clipboard integration
//!
//! # Example
//!
//! ```ignore
//! use barscape::app::App;
//! use barscape::config::ChartConfig;
//! use barscape::data::DataReader;
//! use std::path::Path;
//!
//! let dataset = DataReader::read_file(Path::new("sales.json"))?;
//! let mut app = App::new(dataset, ChartConfig::default(), 0)?;
//! app.tick(1500);
//! println!("{} elements, trend: {:?}", app.scene.element_count(), app.analytics.forecast);
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod analytics;
pub mod app;
pub mod clipboard;
pub mod config;
pub mod data;
pub mod error;
pub mod interaction;
pub mod realtime;
pub mod report;
pub mod scale;
pub mod scene;
pub mod scheduler;
pub mod ui;

pub use error::{BarscapeError, Result};
