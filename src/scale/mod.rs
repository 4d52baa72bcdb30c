//! Scales: mappings from data domains to visual ranges.
//!
//! Scales are derived once from a table's observed extent and are immutable
//! until the data changes; [`ScaleSet`] bundles the ones the scene needs.

mod band;
mod color;
mod linear;
mod quantize;

pub use band::BandScale;
pub use color::{ColorScheme, Rgb, SequentialScale, CATEGORY10};
pub use linear::LinearScale;
pub use quantize::{QuantileScale, ThresholdScale};

use crate::config::ChartConfig;
use crate::data::Table;

/// Labels of the quartile classification.
pub const CLASS_LABELS: [&str; 4] = ["Low", "Medium", "High", "Very High"];

/// Minimum and maximum of the finite values, or `None` if there are none.
pub fn extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// The scales derived from one table.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleSet {
    /// Observed value extent.
    pub extent: (f64, f64),
    /// Value → bar height.
    pub height: LinearScale,
    /// Value → color.
    pub color: SequentialScale,
    /// Column index → X offset.
    pub x: LinearScale,
    /// Row index → Z offset.
    pub z: LinearScale,
    /// Value → quartile class.
    pub class: QuantileScale,
}

impl ScaleSet {
    /// Derive all scales from a table.
    pub fn build(table: &Table, config: &ChartConfig, scheme: ColorScheme) -> Self {
        let extent = table.extent().unwrap_or((0.0, 0.0));
        let spacing = f64::from(config.spacing);
        let last_col = table.cols().saturating_sub(1) as f64;
        let last_row = table.rows().saturating_sub(1) as f64;

        let class = QuantileScale::new(table.values.iter().copied(), &CLASS_LABELS)
            .unwrap_or_else(|| QuantileScale::single(CLASS_LABELS[0]));

        tracing::debug!(
            min = extent.0,
            max = extent.1,
            scheme = scheme.name(),
            "Built scales"
        );

        Self {
            extent,
            height: LinearScale::new(extent, (config.min_height, config.max_height)),
            color: SequentialScale::new(extent, scheme),
            x: LinearScale::new((0.0, last_col), (0.0, last_col * spacing)),
            z: LinearScale::new((0.0, last_row), (0.0, last_row * spacing)),
            class,
        }
    }

    /// Swap the color scheme, keeping the domain.
    pub fn set_scheme(&mut self, scheme: ColorScheme) {
        self.color = SequentialScale::new(self.extent, scheme);
    }
}
