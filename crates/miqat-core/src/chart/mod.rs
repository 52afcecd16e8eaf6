//! Chart geometry for the analytics dashboards.
//!
//! Each chart kind turns an ordered list of [`ChartDatum`] into plain
//! geometry (SVG path strings, rectangles, points) that the UI and the
//! SVG exporter draw verbatim.  All functions here are pure, synchronous
//! and deterministic: identical input always yields identical output.
//!
//! Magnitudes are sanitized with [`ChartDatum::magnitude`] before any
//! arithmetic: negative and non-finite values count as zero.  This keeps
//! the "percentages sum to 100" and "bars fit the plot" invariants
//! intact for garbage input instead of producing reversed wedges or NaN
//! coordinates.

pub mod bar;
pub mod donut;
pub mod line;

use serde::{Deserialize, Serialize};

use crate::types::Pilgrim;

pub use bar::{BarGeometry, BarRect, bar_layout};
pub use donut::{ChartSegment, DonutGeometry, donut_segments};
pub use line::{LineGeometry, LinePlot, LinePoint, line_layout};

/// One named value in a chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDatum {
    pub name: String,
    pub value: f64,
}

impl ChartDatum {
    #[must_use]
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// The value used for layout: `value` if it is finite and positive,
    /// otherwise `0.0`.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        if self.value.is_finite() && self.value > 0.0 {
            self.value
        } else {
            0.0
        }
    }
}

/// Count pilgrims per nationality, in order of first appearance.
///
/// Pilgrims without a nationality are counted under `"Unknown"`.
#[must_use]
pub fn nationality_breakdown(pilgrims: &[Pilgrim]) -> Vec<ChartDatum> {
    let mut counts: Vec<ChartDatum> = Vec::new();
    for pilgrim in pilgrims {
        let name = pilgrim
            .nationality
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or("Unknown");
        match counts.iter_mut().find(|d| d.name == name) {
            Some(datum) => datum.value += 1.0,
            None => counts.push(ChartDatum::new(name, 1.0)),
        }
    }
    counts
}

/// Fill colours cycled across series items, shared by every chart kind
/// so the same category keeps its colour across dashboards.
pub const CHART_PALETTE: [&str; 8] = [
    "#10b981", "#3b82f6", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899", "#14b8a6", "#6366f1",
];

/// Palette colour for the series item at `index`.
#[must_use]
pub const fn palette_color(index: usize) -> &'static str {
    CHART_PALETTE[index % CHART_PALETTE.len()]
}

/// Round a coordinate to 3 decimal places for compact path data.
///
/// Also normalizes `-0.0` to `0.0` so formatted output never shows
/// `-0`.
pub(crate) fn round_coord(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0 + 0.0
}

/// Largest sanitized magnitude in `data`, or `0.0` for empty input.
pub(crate) fn max_magnitude(data: &[ChartDatum]) -> f64 {
    data.iter().map(ChartDatum::magnitude).fold(0.0, f64::max)
}
