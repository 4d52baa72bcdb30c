//! Rule-based insight generation.
//!
//! Insights come from a fixed table of threshold rules evaluated in order.

use super::anomaly::Anomaly;
use super::regression::{Forecast, Trend};
use super::trend::TrendStats;
use serde::Serialize;

const STRONG_GROWTH_PCT: f64 = 10.0;
const DECLINE_PCT: f64 = -5.0;
const HIGH_VOLATILITY_PCT: f64 = 25.0;
const STABLE_VOLATILITY_PCT: f64 = 5.0;
const MOMENTUM_RATIO: f64 = 1.05;

/// What an insight is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    /// Sustained growth.
    Growth,
    /// Sustained decline.
    Decline,
    /// Erratic period-to-period changes.
    Volatility,
    /// Outlying points.
    Anomaly,
    /// Forecast points above the latest value.
    Momentum,
    /// Little change.
    Stable,
}

/// How much attention an insight deserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational.
    Info,
    /// Worth a look.
    Notice,
    /// Needs attention.
    Warning,
}

/// A generated insight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    /// Category.
    pub kind: InsightKind,
    /// Severity.
    pub severity: Severity,
    /// Human-readable text.
    pub message: String,
}

/// Everything the rules look at.
#[derive(Debug, Clone, Copy)]
pub struct InsightInput<'a> {
    /// The analysed series.
    pub series: &'a [f64],
    /// Its trend statistics.
    pub trend: &'a TrendStats,
    /// Its forecast, if the series was non-empty.
    pub forecast: Option<&'a Forecast>,
    /// Flagged points.
    pub anomalies: &'a [Anomaly],
}

struct Rule {
    kind: InsightKind,
    severity: Severity,
    applies: fn(&InsightInput<'_>) -> bool,
    message: fn(&InsightInput<'_>) -> String,
}

const RULES: &[Rule] = &[
    Rule {
        kind: InsightKind::Growth,
        severity: Severity::Info,
        applies: |i| i.trend.average_growth.is_some_and(|g| g > STRONG_GROWTH_PCT),
        message: |i| {
            format!(
                "Strong growth: {:.1}% per period on average",
                i.trend.average_growth.unwrap_or_default()
            )
        },
    },
    Rule {
        kind: InsightKind::Decline,
        severity: Severity::Warning,
        applies: |i| i.trend.average_growth.is_some_and(|g| g < DECLINE_PCT),
        message: |i| {
            format!(
                "Declining: {:.1}% per period on average",
                i.trend.average_growth.unwrap_or_default()
            )
        },
    },
    Rule {
        kind: InsightKind::Volatility,
        severity: Severity::Notice,
        applies: |i| i.trend.volatility.is_some_and(|v| v > HIGH_VOLATILITY_PCT),
        message: |i| {
            format!(
                "High volatility: growth swings by {:.1} points",
                i.trend.volatility.unwrap_or_default()
            )
        },
    },
    Rule {
        kind: InsightKind::Anomaly,
        severity: Severity::Warning,
        applies: |i| !i.anomalies.is_empty(),
        message: |i| {
            let worst = i
                .anomalies
                .iter()
                .map(|a| a.z_score)
                .fold(0.0_f64, f64::max);
            format!(
                "{} anomalous point(s) detected (max z-score {:.2})",
                i.anomalies.len(),
                worst
            )
        },
    },
    Rule {
        kind: InsightKind::Momentum,
        severity: Severity::Info,
        applies: |i| match (i.forecast, i.series.last()) {
            (Some(f), Some(&last)) => {
                f.trend == Trend::Increasing
                    && f.values.first().is_some_and(|&next| next > last * MOMENTUM_RATIO)
            },
            _ => false,
        },
        message: |i| {
            let next = i
                .forecast
                .and_then(|f| f.values.first().copied())
                .unwrap_or_default();
            format!("Upward momentum: next period forecast {:.1}", next)
        },
    },
    Rule {
        kind: InsightKind::Stable,
        severity: Severity::Info,
        applies: |i| {
            i.trend
                .volatility
                .is_some_and(|v| v <= STABLE_VOLATILITY_PCT)
                && i.trend
                    .average_growth
                    .is_some_and(|g| (DECLINE_PCT..=STRONG_GROWTH_PCT).contains(&g))
        },
        message: |_| "Stable performance with little period-to-period change".to_string(),
    },
];

/// Evaluate the rule table.
pub fn generate(input: &InsightInput<'_>) -> Vec<Insight> {
    RULES
        .iter()
        .filter(|rule| (rule.applies)(input))
        .map(|rule| Insight {
            kind: rule.kind,
            severity: rule.severity,
            message: (rule.message)(input),
        })
        .collect()
}
