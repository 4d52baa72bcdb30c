//! Moving averages, growth rates and volatility.

use serde::Serialize;

/// A moving-average value ending at `index`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AveragePoint {
    /// Index of the last point in the window.
    pub index: usize,
    /// Mean of the window.
    pub value: f64,
}

/// Trailing simple moving average.
///
/// The first `window - 1` indices have no complete window and are skipped.
/// A zero window yields nothing.
pub fn moving_average(values: &[f64], window: usize) -> Vec<AveragePoint> {
    if window == 0 {
        return Vec::new();
    }
    values
        .windows(window)
        .enumerate()
        .map(|(i, w)| AveragePoint {
            index: i + window - 1,
            value: w.iter().sum::<f64>() / window as f64,
        })
        .collect()
}

/// Percentage change between consecutive points.
///
/// Entry `i` is the change from `values[i]` to `values[i + 1]`; it is `None`
/// when `values[i]` is exactly zero.
pub fn growth_rates(values: &[f64]) -> Vec<Option<f64>> {
    values
        .windows(2)
        .map(|w| (w[0] != 0.0).then(|| (w[1] - w[0]) / w[0] * 100.0))
        .collect()
}

/// Population mean and standard deviation, or `None` when empty.
pub fn mean_std(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some((mean, var.sqrt()))
}

/// Trend statistics for one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendStats {
    /// Short-window moving average.
    pub short_average: Vec<AveragePoint>,
    /// Long-window moving average.
    pub long_average: Vec<AveragePoint>,
    /// Consecutive growth rates in percent; `None` where undefined.
    pub growth_rates: Vec<Option<f64>>,
    /// Mean of the defined growth rates.
    pub average_growth: Option<f64>,
    /// Standard deviation of the defined growth rates.
    pub volatility: Option<f64>,
}

impl TrendStats {
    /// Compute statistics with the given window sizes.
    pub fn compute(values: &[f64], short_window: usize, long_window: usize) -> Self {
        let growth_rates = growth_rates(values);
        let defined: Vec<f64> = growth_rates.iter().flatten().copied().collect();
        let stats = mean_std(&defined);

        Self {
            short_average: moving_average(values, short_window),
            long_average: moving_average(values, long_window),
            growth_rates,
            average_growth: stats.map(|(mean, _)| mean),
            volatility: stats.map(|(_, std)| std),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moving_average_skips_incomplete_windows() {
        let ma = moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(
            ma,
            vec![
                AveragePoint { index: 2, value: 2.0 },
                AveragePoint { index: 3, value: 3.0 },
                AveragePoint { index: 4, value: 4.0 },
            ]
        );
        assert!(moving_average(&[1.0, 2.0], 3).is_empty());
        assert!(moving_average(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn test_growth_rate_doubling() {
        assert_eq!(growth_rates(&[50.0, 100.0]), vec![Some(100.0)]);
    }

    #[test]
    fn test_growth_rate_from_zero_is_undefined() {
        let rates = growth_rates(&[0.0, 50.0, 25.0]);
        assert_eq!(rates, vec![None, Some(-50.0)]);
        assert!(rates.iter().flatten().all(|r| r.is_finite()));
    }

    #[test]
    fn test_stats_ignore_undefined_rates() {
        let stats = TrendStats::compute(&[0.0, 50.0, 100.0, 150.0], 3, 6);
        assert_eq!(stats.growth_rates.iter().filter(|g| g.is_none()).count(), 1);
        assert_eq!(stats.average_growth, Some(75.0));
        assert_eq!(stats.volatility, Some(25.0));
        assert_eq!(stats.short_average.len(), 2);
        assert!(stats.long_average.is_empty());
    }

    #[test]
    fn test_stats_single_point() {
        let stats = TrendStats::compute(&[10.0], 3, 6);
        assert!(stats.growth_rates.is_empty());
        assert_eq!(stats.average_growth, None);
        assert_eq!(stats.volatility, None);
    }

    #[test]
    fn test_mean_std() {
        assert_eq!(mean_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), Some((5.0, 2.0)));
        assert_eq!(mean_std(&[]), None);
    }
}
