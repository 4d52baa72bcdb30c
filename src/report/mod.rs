//! Session report export.
//!
//! The report is a single JSON document:
//!
//! ```json
//! {
//!   "generatedAt": "2024-05-01T12:00:00+02:00",
//!   "sessionDurationMs": 42000,
//!   "averageFps": 9.8,
//!   "interactions": [ ... ],
//!   "insights": [ ... ],
//!   "predictions": { ... },
//!   "dataset": { ... }
//! }
//! ```

mod stats;

pub use stats::{DatasetSummary, SessionStats};

use crate::analytics::{AnalyticsSnapshot, Forecast, Insight};
use crate::error::Result;
use crate::interaction::InteractionRecord;
use crate::scheduler::Millis;
use serde::Serialize;
use std::path::Path;

/// Everything recorded about a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    /// Local wall-clock time of the export, RFC 3339.
    pub generated_at: String,
    /// Session length.
    pub session_duration_ms: Millis,
    /// Mean frame rate.
    pub average_fps: f64,
    /// Interaction log.
    pub interactions: Vec<InteractionRecord>,
    /// Series the insights and predictions describe.
    pub series: String,
    /// Current insights.
    pub insights: Vec<Insight>,
    /// Current forecast.
    pub predictions: Option<Forecast>,
    /// Dataset figures.
    pub dataset: DatasetSummary,
}

impl SessionReport {
    /// Assemble a report stamped with the current local time.
    pub fn new(
        stats: &SessionStats,
        now: Millis,
        interactions: &[InteractionRecord],
        analytics: &AnalyticsSnapshot,
        dataset: DatasetSummary,
    ) -> Self {
        Self {
            generated_at: chrono::Local::now().to_rfc3339(),
            session_duration_ms: stats.duration_ms(now),
            average_fps: stats.average_fps(),
            interactions: interactions.to_vec(),
            series: analytics.label.clone(),
            insights: analytics.insights.clone(),
            predictions: analytics.forecast.clone(),
            dataset,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report to `path`.
    pub fn export(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        tracing::info!(
            path = %path.display(),
            interactions = self.interactions.len(),
            "Session report exported"
        );
        Ok(())
    }
}
