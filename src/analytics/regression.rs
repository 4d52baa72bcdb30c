//! Least-squares trend fit and forecast.

use serde::Serialize;

/// Direction of a fitted trend.
///
/// A slope of exactly zero is reported as `Decreasing`: only a strictly
/// positive slope counts as growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Slope > 0.
    Increasing,
    /// Slope <= 0.
    Decreasing,
}

impl Trend {
    /// Classify a slope.
    pub fn from_slope(slope: f64) -> Self {
        if slope > 0.0 {
            Self::Increasing
        } else {
            Self::Decreasing
        }
    }

    /// Get display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
        }
    }
}

/// Ordinary least-squares line through `(index, value)` points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearFit {
    /// Change per index step.
    pub slope: f64,
    /// Value at index 0.
    pub intercept: f64,
}

impl LinearFit {
    /// Fitted value at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Extrapolated values past the end of a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    /// Next `horizon` values, never negative.
    pub values: Vec<f64>,
    /// Trend direction.
    pub trend: Trend,
    /// Fixed confidence reported with the forecast.
    pub confidence: f64,
    /// The underlying fit.
    pub fit: LinearFit,
}

/// Fit `value = slope·index + intercept` over the series.
///
/// Returns `None` for an empty series. A single point yields a flat line.
pub fn fit(values: &[f64]) -> Option<LinearFit> {
    let n = values.len() as f64;
    if values.is_empty() {
        return None;
    }

    let (mut sx, mut sy, mut sxy, mut sxx) = (0.0, 0.0, 0.0, 0.0);
    for (i, &y) in values.iter().enumerate() {
        let x = i as f64;
        sx += x;
        sy += y;
        sxy += x * y;
        sxx += x * x;
    }

    let denom = n * sxx - sx * sx;
    let slope = if denom == 0.0 {
        0.0
    } else {
        (n * sxy - sx * sy) / denom
    };
    let intercept = (sy - slope * sx) / n;

    Some(LinearFit { slope, intercept })
}

/// Forecast the next `horizon` points by extending the fitted line.
pub fn forecast(values: &[f64], horizon: usize, confidence: f64) -> Option<Forecast> {
    let fit = fit(values)?;
    let start = values.len();
    let values = (start..start.saturating_add(horizon))
        .map(|i| fit.predict(i as f64).max(0.0))
        .collect();

    Some(Forecast {
        values,
        trend: Trend::from_slope(fit.slope),
        confidence,
        fit,
    })
}
