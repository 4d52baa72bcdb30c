//! Dataset summary and session statistics.

use crate::data::{Metadata, Table};
use crate::scale::QuantileScale;
use crate::scheduler::Millis;
use indexmap::IndexMap;
use serde::Serialize;

/// Headline figures of the displayed table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    /// Chart title.
    pub title: String,
    /// Name of the displayed table.
    pub table: String,
    /// "rows × columns".
    pub matrix_size: String,
    /// Elements in the scene, clusters included.
    pub total_bars: usize,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Mean value.
    pub mean: f64,
    /// Number of values per quartile class, lowest class first.
    pub classes: IndexMap<String, usize>,
}

impl DatasetSummary {
    /// Summarize `table`; `cluster_bars` is added to the element count and
    /// values are counted per `class` bucket.
    pub fn new(
        metadata: &Metadata,
        table: &Table,
        cluster_bars: usize,
        class: &QuantileScale,
    ) -> Self {
        let (min, max) = table.extent().unwrap_or((0.0, 0.0));
        let mut classes: IndexMap<String, usize> =
            class.labels().iter().map(|l| (l.clone(), 0)).collect();
        for &value in &table.values {
            if let Some(count) = classes.get_mut(class.label(value)) {
                *count += 1;
            }
        }
        Self {
            title: metadata.title_or_default().to_string(),
            table: table.name.clone(),
            matrix_size: format!("{} × {}", table.rows(), table.cols()),
            total_bars: table.len() + cluster_bars,
            min,
            max,
            mean: table.mean().unwrap_or(0.0),
            classes,
        }
    }
}

/// Frame counter and session clock.
#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    started_at: Millis,
    last_frame: Millis,
    frames: u64,
}

impl SessionStats {
    /// Start counting at `now`.
    pub fn new(now: Millis) -> Self {
        Self {
            started_at: now,
            last_frame: now,
            frames: 0,
        }
    }

    /// Count a rendered frame.
    pub fn frame(&mut self, now: Millis) {
        self.frames += 1;
        self.last_frame = self.last_frame.max(now);
    }

    /// Frames counted so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Time from start to `now`.
    pub fn duration_ms(&self, now: Millis) -> Millis {
        now.saturating_sub(self.started_at)
    }

    /// Frames per second over the session up to the last frame.
    pub fn average_fps(&self) -> f64 {
        let elapsed = self.last_frame.saturating_sub(self.started_at);
        if elapsed == 0 {
            return 0.0;
        }
        self.frames as f64 * 1000.0 / elapsed as f64
    }
}
