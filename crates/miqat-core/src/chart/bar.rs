//! Vertical bar chart layout.

use serde::{Deserialize, Serialize};

use super::{ChartDatum, max_magnitude, round_coord};

/// Plot area and spacing for a bar chart, in view-box units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub width: f64,
    pub height: f64,
    /// Blank margin on every side of the plot area.
    pub padding: f64,
    /// Fraction of each slot left empty between neighbouring bars
    /// (`0.0` = touching bars).
    pub gap_ratio: f64,
}

impl BarGeometry {
    pub const DEFAULT_WIDTH: f64 = 300.0;
    pub const DEFAULT_HEIGHT: f64 = 200.0;
    pub const DEFAULT_PADDING: f64 = 20.0;
    pub const DEFAULT_GAP_RATIO: f64 = 0.2;

    /// Width of the plot area inside the padding.
    #[must_use]
    pub fn plot_width(&self) -> f64 {
        2.0f64.mul_add(-self.padding, self.width).max(0.0)
    }

    /// Height of the plot area inside the padding.
    #[must_use]
    pub fn plot_height(&self) -> f64 {
        2.0f64.mul_add(-self.padding, self.height).max(0.0)
    }

    /// Y coordinate of the baseline all bars grow from.
    #[must_use]
    pub fn baseline(&self) -> f64 {
        self.padding + self.plot_height()
    }
}

impl Default for BarGeometry {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            padding: Self::DEFAULT_PADDING,
            gap_ratio: Self::DEFAULT_GAP_RATIO,
        }
    }
}

/// One laid-out bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarRect {
    pub name: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Lay out one bar per datum, left to right, heights scaled so the
/// largest value fills the plot height.
///
/// A series whose largest value is zero yields zero-height bars sitting
/// on the baseline.
#[must_use]
pub fn bar_layout(data: &[ChartDatum], geometry: &BarGeometry) -> Vec<BarRect> {
    if data.is_empty() {
        return Vec::new();
    }

    let max = max_magnitude(data);
    #[allow(clippy::cast_precision_loss)]
    let slot = geometry.plot_width() / data.len() as f64;
    let gap = slot * geometry.gap_ratio.clamp(0.0, 1.0);
    let bar_width = slot - gap;
    let plot_height = geometry.plot_height();
    let baseline = geometry.baseline();

    data.iter()
        .enumerate()
        .map(|(i, datum)| {
            let height = if max > 0.0 {
                datum.magnitude() / max * plot_height
            } else {
                0.0
            };
            #[allow(clippy::cast_precision_loss)]
            let x = slot.mul_add(i as f64, geometry.padding) + gap / 2.0;
            BarRect {
                name: datum.name.clone(),
                value: datum.value,
                x: round_coord(x),
                y: round_coord(baseline - height),
                width: round_coord(bar_width),
                height: round_coord(height),
            }
        })
        .collect()
}
