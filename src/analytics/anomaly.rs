//! Z-score anomaly detection.

use super::trend::mean_std;
use serde::Serialize;

/// Absorbs rounding so a score that is mathematically on the threshold
/// still counts.
const SCORE_TOLERANCE: f64 = 1e-9;

/// A point whose z-score reached the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Anomaly {
    /// Position in the series.
    pub index: usize,
    /// The value.
    pub value: f64,
    /// `|value - mean| / stddev`.
    pub z_score: f64,
}

/// Flag every point whose z-score is at or above `threshold`.
///
/// Uses the population standard deviation. A series with zero spread has no
/// anomalies.
pub fn detect(values: &[f64], threshold: f64) -> Vec<Anomaly> {
    let (mean, std) = match mean_std(values) {
        Some((mean, std)) if std > 0.0 && std.is_finite() => (mean, std),
        _ => return Vec::new(),
    };

    values
        .iter()
        .enumerate()
        .filter_map(|(index, &value)| {
            let z_score = (value - mean).abs() / std;
            (z_score + SCORE_TOLERANCE >= threshold).then_some(Anomaly {
                index,
                value,
                z_score,
            })
        })
        .collect()
}
