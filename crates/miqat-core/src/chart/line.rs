//! Line chart layout.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use super::{ChartDatum, max_magnitude, round_coord};

/// Plot area for a line chart, in view-box units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineGeometry {
    pub width: f64,
    pub height: f64,
    /// Blank margin on every side of the plot area.
    pub padding: f64,
}

impl LineGeometry {
    pub const DEFAULT_WIDTH: f64 = 300.0;
    pub const DEFAULT_HEIGHT: f64 = 200.0;
    pub const DEFAULT_PADDING: f64 = 20.0;

    #[must_use]
    pub fn plot_width(&self) -> f64 {
        2.0f64.mul_add(-self.padding, self.width).max(0.0)
    }

    #[must_use]
    pub fn plot_height(&self) -> f64 {
        2.0f64.mul_add(-self.padding, self.height).max(0.0)
    }
}

impl Default for LineGeometry {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            padding: Self::DEFAULT_PADDING,
        }
    }
}

/// One plotted point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub name: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
}

/// Points plus the SVG path that connects them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LinePlot {
    pub points: Vec<LinePoint>,
    /// `M`/`L` path data through every point; empty for an empty series.
    pub path: String,
}

/// Lay out a line chart: points evenly spaced along x, y scaled so the
/// largest value touches the top of the plot area.
///
/// A single datum is placed at the horizontal center.  A series whose
/// largest value is zero is drawn flat along the bottom edge.
#[must_use]
pub fn line_layout(data: &[ChartDatum], geometry: &LineGeometry) -> LinePlot {
    if data.is_empty() {
        return LinePlot::default();
    }

    let max = max_magnitude(data);
    let plot_width = geometry.plot_width();
    let plot_height = geometry.plot_height();
    let bottom = geometry.padding + plot_height;
    #[allow(clippy::cast_precision_loss)]
    let step = if data.len() > 1 {
        plot_width / (data.len() - 1) as f64
    } else {
        0.0
    };

    let points: Vec<LinePoint> = data
        .iter()
        .enumerate()
        .map(|(i, datum)| {
            #[allow(clippy::cast_precision_loss)]
            let x = if data.len() > 1 {
                step.mul_add(i as f64, geometry.padding)
            } else {
                geometry.padding + plot_width / 2.0
            };
            let scaled = if max > 0.0 {
                datum.magnitude() / max * plot_height
            } else {
                0.0
            };
            LinePoint {
                name: datum.name.clone(),
                value: datum.value,
                x: round_coord(x),
                y: round_coord(bottom - scaled),
            }
        })
        .collect();

    let mut path = String::new();
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { "M" } else { " L" };
        let _ = write!(path, "{cmd} {} {}", p.x, p.y);
    }

    LinePlot { points, path }
}
