//! Trend forecasting, moving averages and anomaly flags.
//!
//! The engine holds no incremental state: every call to
//! [`AnalyticsEngine::analyze`] produces a fresh [`AnalyticsSnapshot`] that
//! replaces the previous one wholesale.

pub mod anomaly;
pub mod insights;
pub mod regression;
pub mod trend;

pub use anomaly::Anomaly;
pub use insights::{Insight, InsightKind, Severity};
pub use regression::{Forecast, LinearFit, Trend};
pub use trend::{AveragePoint, TrendStats};

use crate::config::AnalyticsConfig;
use crate::data::Table;
use serde::Serialize;

/// Which series of a table the engine analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "row")]
pub enum SeriesSource {
    /// Sum of each column.
    #[default]
    Totals,
    /// A single row.
    Row(usize),
}

impl SeriesSource {
    /// Extract the series from a table. Out-of-range rows fall back to totals.
    pub fn extract(self, table: &Table) -> Vec<f64> {
        match self {
            Self::Totals => table.column_totals(),
            Self::Row(row) => table.row(row).unwrap_or_else(|| table.column_totals()),
        }
    }

    /// Human-readable description against a table.
    pub fn describe(self, table: &Table) -> String {
        match self {
            Self::Row(row) if row < table.rows() => table.row_label(row).to_string(),
            _ => format!("{} (totals)", table.name),
        }
    }
}

/// Everything derived from one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    /// Which series was analysed.
    pub source: SeriesSource,
    /// Description of the series.
    pub label: String,
    /// The series itself.
    pub series: Vec<f64>,
    /// Forecast of the next points; absent for an empty series.
    pub forecast: Option<Forecast>,
    /// Moving averages, growth and volatility.
    pub trend: TrendStats,
    /// Points at or above the z-score threshold.
    pub anomalies: Vec<Anomaly>,
    /// Rule-based observations.
    pub insights: Vec<Insight>,
}

/// Stateless analytics over a configured set of parameters.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    config: AnalyticsConfig,
}

impl AnalyticsEngine {
    /// Create an engine.
    pub fn new(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    /// The engine's parameters.
    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Analyse a raw series.
    pub fn analyze(&self, series: &[f64]) -> AnalyticsSnapshot {
        self.analyze_labelled(series, SeriesSource::Totals, String::new())
    }

    /// Analyse the chosen series of a table.
    pub fn analyze_table(&self, table: &Table, source: SeriesSource) -> AnalyticsSnapshot {
        let series = source.extract(table);
        self.analyze_labelled(&series, source, source.describe(table))
    }

    fn analyze_labelled(
        &self,
        series: &[f64],
        source: SeriesSource,
        label: String,
    ) -> AnalyticsSnapshot {
        let forecast = regression::forecast(series, self.config.horizon, self.config.confidence);
        let trend = TrendStats::compute(series, self.config.short_window, self.config.long_window);
        let anomalies = anomaly::detect(series, self.config.anomaly_threshold);
        let insights = insights::generate(&insights::InsightInput {
            series,
            trend: &trend,
            forecast: forecast.as_ref(),
            anomalies: &anomalies,
        });

        tracing::debug!(
            points = series.len(),
            anomalies = anomalies.len(),
            insights = insights.len(),
            "Analytics recomputed"
        );

        AnalyticsSnapshot {
            source,
            label,
            series: series.to_vec(),
            forecast,
            trend,
            anomalies,
            insights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::from_rows(
            "sales",
            &[vec![10.0, 20.0, 30.0, 40.0], vec![5.0, 5.0, 5.0, 5.0]],
            vec!["north".into(), "south".into()],
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn test_row_series_forecast() {
        let engine = AnalyticsEngine::default();
        let snapshot = engine.analyze_table(&table(), SeriesSource::Row(0));

        assert_eq!(snapshot.label, "north");
        let forecast = snapshot.forecast.unwrap();
        assert_eq!(forecast.values, vec![50.0, 60.0, 70.0]);
        assert_eq!(forecast.trend, Trend::Increasing);
    }

    #[test]
    fn test_totals_series() {
        let engine = AnalyticsEngine::default();
        let snapshot = engine.analyze_table(&table(), SeriesSource::Totals);
        assert_eq!(snapshot.series, vec![15.0, 25.0, 35.0, 45.0]);
        assert_eq!(snapshot.label, "sales (totals)");
    }

    #[test]
    fn test_out_of_range_row_uses_totals() {
        let t = table();
        assert_eq!(SeriesSource::Row(9).extract(&t), t.column_totals());
    }

    #[test]
    fn test_snapshot_is_replaced_not_merged() {
        let engine = AnalyticsEngine::default();
        let first = engine.analyze(&[1.0, 1.0, 1.0, 1.0, 100.0]);
        let second = engine.analyze(&[1.0, 2.0, 3.0]);
        assert_eq!(first.anomalies.len(), 1);
        assert!(second.anomalies.is_empty());
        assert_eq!(second.series.len(), 3);
    }

    #[test]
    fn test_empty_series() {
        let snapshot = AnalyticsEngine::default().analyze(&[]);
        assert!(snapshot.forecast.is_none());
        assert!(snapshot.insights.is_empty());
    }
}
