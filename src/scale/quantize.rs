//! Discretizing scales: thresholds and quantiles.
//!
//! A value equal to a boundary belongs to the lower bucket.

/// Maps values to ordered labelled buckets separated by fixed boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdScale {
    thresholds: Vec<f64>,
    labels: Vec<String>,
}

impl ThresholdScale {
    /// Create a threshold scale.
    ///
    /// Needs exactly one more label than thresholds, and thresholds in
    /// non-decreasing order.
    pub fn new<S: AsRef<str>>(thresholds: Vec<f64>, labels: &[S]) -> Option<Self> {
        if labels.len() != thresholds.len() + 1 {
            return None;
        }
        if thresholds.iter().any(|t| !t.is_finite()) || thresholds.windows(2).any(|w| w[0] > w[1]) {
            return None;
        }
        Some(Self {
            thresholds,
            labels: labels.iter().map(|l| l.as_ref().to_string()).collect(),
        })
    }

    /// Bucket boundaries.
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Bucket labels, lowest first.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Index of the bucket containing `value`.
    pub fn bucket(&self, value: f64) -> usize {
        self.thresholds
            .iter()
            .position(|&t| value <= t)
            .unwrap_or(self.thresholds.len())
    }

    /// Label of the bucket containing `value`.
    pub fn label(&self, value: f64) -> &str {
        &self.labels[self.bucket(value)]
    }
}

/// A threshold scale whose boundaries are quantiles of a sample.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileScale {
    inner: ThresholdScale,
}

impl QuantileScale {
    /// Build from a sample, one bucket per label.
    ///
    /// Returns `None` when the sample has no finite values or no labels
    /// were given.
    pub fn new<I, S>(sample: I, labels: &[S]) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
        S: AsRef<str>,
    {
        if labels.is_empty() {
            return None;
        }
        let mut sorted: Vec<f64> = sample.into_iter().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|a, b| a.total_cmp(b));

        let buckets = labels.len();
        let thresholds = (1..buckets)
            .map(|k| quantile_sorted(&sorted, k as f64 / buckets as f64))
            .collect();

        ThresholdScale::new(thresholds, labels).map(|inner| Self { inner })
    }

    /// A scale with a single bucket.
    pub fn single(label: &str) -> Self {
        Self {
            inner: ThresholdScale {
                thresholds: Vec::new(),
                labels: vec![label.to_string()],
            },
        }
    }

    /// Quantile boundaries.
    pub fn thresholds(&self) -> &[f64] {
        self.inner.thresholds()
    }

    /// Bucket labels, lowest first.
    pub fn labels(&self) -> &[String] {
        self.inner.labels()
    }

    /// Index of the bucket containing `value`.
    pub fn bucket(&self, value: f64) -> usize {
        self.inner.bucket(value)
    }

    /// Label of the bucket containing `value`.
    pub fn label(&self, value: f64) -> &str {
        self.inner.label(value)
    }
}

/// Quantile `p` of a sorted, non-empty slice, interpolating between order
/// statistics.
fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundary_goes_low() {
        let s = ThresholdScale::new(vec![10.0, 20.0], &["low", "mid", "high"]).unwrap();
        assert_eq!(s.label(5.0), "low");
        assert_eq!(s.label(10.0), "low");
        assert_eq!(s.label(10.5), "mid");
        assert_eq!(s.label(20.0), "mid");
        assert_eq!(s.label(20.1), "high");
    }

    #[test]
    fn test_threshold_validation() {
        assert!(ThresholdScale::new(vec![1.0], &["a"]).is_none());
        assert!(ThresholdScale::new(vec![2.0, 1.0], &["a", "b", "c"]).is_none());
        assert!(ThresholdScale::new(vec![f64::NAN], &["a", "b"]).is_none());
    }

    #[test]
    fn test_quartiles() {
        let s = QuantileScale::new((1..=9).map(f64::from), &["q1", "q2", "q3", "q4"]).unwrap();
        assert_eq!(s.thresholds(), &[3.0, 5.0, 7.0]);
        assert_eq!(s.label(3.0), "q1");
        assert_eq!(s.label(4.0), "q2");
        assert_eq!(s.label(9.0), "q4");
    }

    #[test]
    fn test_quantile_interpolates() {
        let s = QuantileScale::new([0.0, 10.0], &["lo", "hi"]).unwrap();
        assert_eq!(s.thresholds(), &[5.0]);
    }

    #[test]
    fn test_quantile_degenerate_inputs() {
        assert!(QuantileScale::new(Vec::<f64>::new(), &["a"]).is_none());
        assert!(QuantileScale::new([1.0], &[] as &[&str]).is_none());

        let flat = QuantileScale::new([4.0, 4.0, 4.0], &["a", "b"]).unwrap();
        assert_eq!(flat.label(4.0), "a");
        assert_eq!(QuantileScale::single("only").label(99.0), "only");
    }
}
