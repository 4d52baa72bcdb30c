//! Chart, analytics and loading configuration.
//!
//! Every field has a default, so a JSON config file only needs to name the
//! values it overrides.

use crate::error::{BarscapeError, Result};
use crate::scale::ColorScheme;
use crate::scene::ChartType;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do when the dataset cannot be loaded or fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPolicy {
    /// Surface the error and stop initialization.
    #[default]
    Strict,
    /// Log a warning and continue with the built-in fallback dataset.
    Fallback,
}

impl LoadPolicy {
    /// Get display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Fallback => "fallback",
        }
    }
}

/// Layout and encoding parameters for the chart scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    /// Distance between neighbouring bars along both ground axes.
    pub spacing: f32,
    /// Bar footprint along X.
    pub bar_width: f32,
    /// Bar footprint along Z.
    pub bar_depth: f32,
    /// Lower bound of the height range.
    pub min_height: f64,
    /// Upper bound of the height range.
    pub max_height: f64,
    /// Labels are attached only to bars taller than this.
    pub label_threshold: f64,
    /// Attach value labels at all.
    pub value_labels: bool,
    /// Build the six satellite clusters around the main chart.
    pub clustering: bool,
    /// Entrance animation length in milliseconds.
    pub animation_ms: u64,
    /// Delay between consecutive entrance animations.
    pub stagger_ms: u64,
    /// How long an info overlay stays up.
    pub overlay_ms: u64,
    /// Initial color scheme.
    pub color_scheme: ColorScheme,
    /// Initial chart type.
    pub chart_type: ChartType,
    /// Load failure policy.
    pub load_policy: LoadPolicy,
    /// Analytics parameters.
    pub analytics: AnalyticsConfig,
    /// Simulated streaming parameters.
    pub realtime: RealtimeConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            spacing: 3.5,
            bar_width: 2.2,
            bar_depth: 2.2,
            min_height: 0.1,
            max_height: 35.0,
            label_threshold: 5.0,
            value_labels: true,
            clustering: true,
            animation_ms: 1000,
            stagger_ms: 30,
            overlay_ms: 3000,
            color_scheme: ColorScheme::default(),
            chart_type: ChartType::default(),
            load_policy: LoadPolicy::default(),
            analytics: AnalyticsConfig::default(),
            realtime: RealtimeConfig::default(),
        }
    }
}

impl ChartConfig {
    /// Read a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| BarscapeError::file_open(path.to_path_buf(), e))?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| BarscapeError::parse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would produce degenerate geometry.
    pub fn validate(&self) -> Result<()> {
        if !(self.spacing > 0.0) {
            return Err(BarscapeError::Config("spacing must be positive".into()));
        }
        if !(self.bar_width > 0.0 && self.bar_depth > 0.0) {
            return Err(BarscapeError::Config(
                "bar dimensions must be positive".into(),
            ));
        }
        if !(self.max_height > self.min_height) {
            return Err(BarscapeError::Config(
                "maxHeight must exceed minHeight".into(),
            ));
        }
        if self.animation_ms > MAX_DURATION_MS || self.stagger_ms > MAX_DURATION_MS {
            return Err(BarscapeError::Config(format!(
                "animationMs and staggerMs must not exceed {}",
                MAX_DURATION_MS
            )));
        }
        self.analytics.validate()?;
        self.realtime.validate()
    }
}

/// Upper bound for animation timings, in milliseconds.
pub const MAX_DURATION_MS: u64 = 60_000;

/// Upper bound for the forecast horizon.
pub const MAX_HORIZON: usize = 1000;

/// Parameters of the trend/forecast/anomaly engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyticsConfig {
    /// Number of future points to forecast.
    pub horizon: usize,
    /// Short moving-average window.
    pub short_window: usize,
    /// Long moving-average window.
    pub long_window: usize,
    /// Z-score at or above which a point is anomalous.
    pub anomaly_threshold: f64,
    /// Confidence reported with every forecast.
    pub confidence: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            horizon: 3,
            short_window: 3,
            long_window: 6,
            anomaly_threshold: 2.0,
            confidence: 0.85,
        }
    }
}

impl AnalyticsConfig {
    fn validate(&self) -> Result<()> {
        if self.short_window == 0 || self.long_window == 0 {
            return Err(BarscapeError::Config(
                "moving-average windows must be at least 1".into(),
            ));
        }
        if !(self.anomaly_threshold > 0.0) {
            return Err(BarscapeError::Config(
                "anomalyThreshold must be positive".into(),
            ));
        }
        if self.horizon > MAX_HORIZON {
            return Err(BarscapeError::Config(format!(
                "horizon must not exceed {}",
                MAX_HORIZON
            )));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(BarscapeError::Config(
                "confidence must be between 0 and 1".into(),
            ));
        }
        Ok(())
    }
}

/// Simulated real-time data ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RealtimeConfig {
    /// Start with ticking enabled.
    pub enabled: bool,
    /// Milliseconds between ticks.
    pub interval_ms: u64,
    /// Maximum relative change applied per tick.
    pub jitter: f64,
    /// RNG seed, so runs are reproducible.
    pub seed: u64,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_ms: 2000,
            jitter: 0.1,
            seed: 42,
        }
    }
}

impl RealtimeConfig {
    fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(BarscapeError::Config(
                "realtime.intervalMs must be positive".into(),
            ));
        }
        // NaN fails the range check too
        if !(0.0..=1.0).contains(&self.jitter) {
            return Err(BarscapeError::Config(
                "realtime.jitter must be between 0 and 1".into(),
            ));
        }
        Ok(())
    }
}
