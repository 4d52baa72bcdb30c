//! Discrete band scale.

/// Splits a continuous range into `count` equal bands.
///
/// `padding` is the fraction of each band's step reserved as gap, split
/// evenly on both sides of the band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    count: usize,
    range: (f64, f64),
    padding: f64,
}

impl BandScale {
    /// Create a band scale. Padding is clamped to `[0, 1)`.
    pub fn new(count: usize, range: (f64, f64), padding: f64) -> Self {
        let padding = if padding.is_finite() {
            padding.clamp(0.0, 0.99)
        } else {
            0.0
        };
        Self {
            count,
            range,
            padding,
        }
    }

    /// Number of bands.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Distance between the starts of neighbouring bands.
    pub fn step(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.range.1 - self.range.0) / self.count as f64
    }

    /// Width of a single band, excluding padding.
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding)
    }

    /// Start of band `index`, or `None` if out of range.
    pub fn position(&self, index: usize) -> Option<f64> {
        (index < self.count).then(|| {
            let step = self.step();
            self.range.0 + index as f64 * step + step * self.padding / 2.0
        })
    }

    /// Center of band `index`.
    pub fn center(&self, index: usize) -> Option<f64> {
        self.position(index).map(|p| p + self.bandwidth() / 2.0)
    }

    /// Band containing a range coordinate.
    pub fn index_at(&self, coord: f64) -> Option<usize> {
        let step = self.step();
        if step == 0.0 {
            return None;
        }
        let offset = (coord - self.range.0) / step;
        if offset < 0.0 {
            return None;
        }
        let index = offset.floor() as usize;
        (index < self.count).then_some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_padding() {
        let s = BandScale::new(4, (0.0, 100.0), 0.0);
        assert_eq!(s.step(), 25.0);
        assert_eq!(s.bandwidth(), 25.0);
        assert_eq!(s.position(0), Some(0.0));
        assert_eq!(s.position(3), Some(75.0));
        assert_eq!(s.position(4), None);
    }

    #[test]
    fn test_padding_reserves_gap() {
        let s = BandScale::new(4, (0.0, 100.0), 0.2);
        assert_eq!(s.bandwidth(), 20.0);
        assert_eq!(s.position(0), Some(2.5));
        assert_eq!(s.center(1), Some(37.5));
    }

    #[test]
    fn test_index_at() {
        let s = BandScale::new(5, (10.0, 60.0), 0.1);
        assert_eq!(s.index_at(10.0), Some(0));
        assert_eq!(s.index_at(34.9), Some(2));
        assert_eq!(s.index_at(60.0), None);
        assert_eq!(s.index_at(5.0), None);
    }

    #[test]
    fn test_empty_scale() {
        let s = BandScale::new(0, (0.0, 10.0), 0.5);
        assert_eq!(s.step(), 0.0);
        assert_eq!(s.center(0), None);
        assert_eq!(s.index_at(1.0), None);
    }
}
