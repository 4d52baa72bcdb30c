//! Continuous linear scale.

/// A linear mapping from a continuous domain to a continuous range.
///
/// A zero-width domain maps every input to the midpoint of the range, so
/// constant data never produces NaN or infinite geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Whether the domain has zero (or non-finite) width.
    pub fn is_degenerate(&self) -> bool {
        let width = self.domain.1 - self.domain.0;
        width == 0.0 || !width.is_finite()
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if self.is_degenerate() {
            return lerp(r0, r1, 0.5);
        }
        lerp(r0, r1, (x - d0) / (d1 - d0))
    }

    /// Maps a value from range space back into domain space.
    pub fn invert(&self, y: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let width = r1 - r0;
        if width == 0.0 || !width.is_finite() {
            return lerp(d0, d1, 0.5);
        }
        lerp(d0, d1, (y - r0) / width)
    }

    /// Roughly `count` evenly spaced round values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        if count == 0 || !lo.is_finite() || !hi.is_finite() {
            return Vec::new();
        }
        if lo == hi {
            return vec![lo];
        }

        let step = tick_step(lo, hi, count);
        let start = (lo / step).ceil() as i64;
        let stop = (hi / step).floor() as i64;

        if step >= 1.0 {
            (start..=stop).map(|i| i as f64 * step).collect()
        } else {
            // Divide by the inverse so 0.1-steps stay exact.
            let inv = (1.0 / step).round();
            (start..=stop).map(|i| i as f64 / inv).collect()
        }
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// 1, 2 or 5 times a power of ten, close to `(hi - lo) / count`.
fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    let raw = (hi - lo) / count as f64;
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * power
}
