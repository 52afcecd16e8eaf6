//! Donut chart segment geometry.
//!
//! Converts an ordered list of [`ChartDatum`] into [`ChartSegment`]s whose
//! `path` strings draw contiguous donut wedges.  Wedges are laid out
//! clockwise starting at 12 o'clock (-90°); each wedge starts where the
//! previous one ended, so the layout is a running fold over the input
//! rather than an independent per-item computation.
//!
//! Wedge path construction order:
//!
//! 1. `M` to the outer start point
//! 2. `A` clockwise along the outer radius to the outer end point
//! 3. `L` to the inner end point
//! 4. `A` counter-clockwise along the inner radius back to the inner
//!    start point
//! 5. `Z`

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use super::{ChartDatum, round_coord};

/// Angle (degrees) at which the first wedge starts: the top of the circle.
pub const START_ANGLE: f64 = -90.0;

/// Geometry of the donut in its `0 0 100 100` view box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DonutGeometry {
    /// Outer radius.
    pub radius: f64,
    /// Inner (hole) radius.
    pub inner_radius: f64,
    /// Horizontal center.
    pub center_x: f64,
    /// Vertical center.
    pub center_y: f64,
}

impl DonutGeometry {
    pub const DEFAULT_RADIUS: f64 = 40.0;
    pub const DEFAULT_INNER_RADIUS: f64 = 25.0;
    pub const DEFAULT_CENTER: f64 = 50.0;
}

impl Default for DonutGeometry {
    fn default() -> Self {
        Self {
            radius: Self::DEFAULT_RADIUS,
            inner_radius: Self::DEFAULT_INNER_RADIUS,
            center_x: Self::DEFAULT_CENTER,
            center_y: Self::DEFAULT_CENTER,
        }
    }
}

/// One wedge of a donut chart.
///
/// Derived data: recomputed from the current series on every render and
/// never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSegment {
    pub name: String,
    /// The datum's original value (unsanitized).
    pub value: f64,
    /// SVG path data for the wedge.
    pub path: String,
    /// Share of the total, `0.0..=100.0`.
    pub percentage: f64,
    /// Start angle in degrees (0° = 3 o'clock, clockwise positive).
    pub start_angle: f64,
    /// End angle in degrees.
    pub end_angle: f64,
    /// SVG large-arc flag: set when the wedge spans more than 180°.
    pub large_arc: bool,
}

impl ChartSegment {
    /// Angular extent of the wedge in degrees.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// Compute donut wedges for `data`.
///
/// The output has the same length and order as the input.  When the
/// (sanitized) total is zero every segment gets `percentage = 0` and a
/// degenerate zero-angle wedge; this is not an error.
///
/// # Examples
///
/// ```
/// use miqat_core::{ChartDatum, DonutGeometry, donut_segments};
///
/// let data = vec![ChartDatum::new("a", 25.0), ChartDatum::new("b", 75.0)];
/// let segments = donut_segments(&data, &DonutGeometry::default());
/// assert_eq!(segments.len(), 2);
/// assert!((segments[0].percentage - 25.0).abs() < 1e-9);
/// assert!((segments[1].start_angle - 0.0).abs() < 1e-9);
/// assert!((segments[1].end_angle - 270.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn donut_segments(data: &[ChartDatum], geometry: &DonutGeometry) -> Vec<ChartSegment> {
    let total: f64 = data.iter().map(ChartDatum::magnitude).sum();

    let mut current_angle = START_ANGLE;
    data.iter()
        .map(|datum| {
            let percentage = if total > 0.0 {
                datum.magnitude() / total * 100.0
            } else {
                0.0
            };
            let angle = percentage / 100.0 * 360.0;
            let start_angle = current_angle;
            let end_angle = current_angle + angle;
            current_angle = end_angle;

            ChartSegment {
                name: datum.name.clone(),
                value: datum.value,
                path: wedge_path(geometry, start_angle, end_angle),
                percentage,
                start_angle,
                end_angle,
                large_arc: angle > 180.0,
            }
        })
        .collect()
}

/// Point on the circle of radius `r` around the geometry's center at
/// `degrees`.
fn polar(geometry: &DonutGeometry, r: f64, degrees: f64) -> (f64, f64) {
    let rad = degrees.to_radians();
    (
        round_coord(r.mul_add(rad.cos(), geometry.center_x)),
        round_coord(r.mul_add(rad.sin(), geometry.center_y)),
    )
}

/// Build the SVG path for one wedge between `start` and `end` degrees.
///
/// An arc whose start and end points are identical is not drawn at all.
/// That happens for the full circle and, after coordinate rounding, for
/// wedges just short of it; such wedges are drawn as two half arcs per
/// radius instead.
fn wedge_path(geometry: &DonutGeometry, start: f64, end: f64) -> String {
    let angle = end - start;
    let r = geometry.radius;
    let ir = geometry.inner_radius;

    let outer_start = polar(geometry, r, start);
    let outer_end = polar(geometry, r, end);
    let inner_end = polar(geometry, ir, end);
    let inner_start = polar(geometry, ir, start);

    let mut d = String::new();
    let _ = write!(d, "M {} {}", outer_start.0, outer_start.1);

    // Exact comparison: the points are already rounded.
    #[allow(clippy::float_cmp)]
    let endpoints_meet = outer_start == outer_end || inner_start == inner_end;
    if angle > 180.0 && endpoints_meet {
        let mid = start + angle / 2.0;
        let outer_mid = polar(geometry, r, mid);
        let inner_mid = polar(geometry, ir, mid);
        let _ = write!(d, " A {r} {r} 0 0 1 {} {}", outer_mid.0, outer_mid.1);
        let _ = write!(d, " A {r} {r} 0 0 1 {} {}", outer_end.0, outer_end.1);
        let _ = write!(d, " L {} {}", inner_end.0, inner_end.1);
        let _ = write!(d, " A {ir} {ir} 0 0 0 {} {}", inner_mid.0, inner_mid.1);
        let _ = write!(d, " A {ir} {ir} 0 0 0 {} {}", inner_start.0, inner_start.1);
    } else {
        let large = u8::from(angle > 180.0);
        let _ = write!(d, " A {r} {r} 0 {large} 1 {} {}", outer_end.0, outer_end.1);
        let _ = write!(d, " L {} {}", inner_end.0, inner_end.1);
        let _ = write!(
            d,
            " A {ir} {ir} 0 {large} 0 {} {}",
            inner_start.0, inner_start.1
        );
    }
    d.push_str(" Z");
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn data(values: &[f64]) -> Vec<ChartDatum> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| ChartDatum::new(format!("item-{i}"), v))
            .collect()
    }

    fn segments(values: &[f64]) -> Vec<ChartSegment> {
        donut_segments(&data(values), &DonutGeometry::default())
    }

    #[test]
    fn defaults_match_view_box_layout() {
        let g = DonutGeometry::default();
        assert!((g.radius - 40.0).abs() < TOLERANCE);
        assert!((g.inner_radius - 25.0).abs() < TOLERANCE);
        assert!((g.center_x - 50.0).abs() < TOLERANCE);
        assert!((g.center_y - 50.0).abs() < TOLERANCE);
    }

    #[test]
    fn empty_input_yields_no_segments() {
        assert!(segments(&[]).is_empty());
    }

    #[test]
    fn single_datum_spans_full_circle() {
        let segs = donut_segments(&[ChartDatum::new("A", 10.0)], &DonutGeometry::default());
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].name, "A");
        assert!((segs[0].percentage - 100.0).abs() < TOLERANCE);
        assert!((segs[0].start_angle - -90.0).abs() < TOLERANCE);
        assert!((segs[0].end_angle - 270.0).abs() < TOLERANCE);
        assert!(segs[0].large_arc);
    }

    #[test]
    fn full_circle_wedge_is_drawn_as_two_half_arcs() {
        let segs = segments(&[10.0]);
        let path = &segs[0].path;
        assert_eq!(path.matches(" A ").count(), 4, "path: {path}");
        // Outer half arcs pass through the bottom of the circle.
        assert!(path.contains("A 40 40 0 0 1 50 90"), "path: {path}");
    }

    /// Walk `path` and return every arc as `(from, to)` points.
    fn arcs(path: &str) -> Vec<((String, String), (String, String))> {
        let tokens: Vec<&str> = path.split_whitespace().collect();
        let mut current = (String::new(), String::new());
        let mut arcs = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            match tokens[i] {
                "M" | "L" => {
                    current = (tokens[i + 1].to_owned(), tokens[i + 2].to_owned());
                    i += 3;
                }
                "A" => {
                    let to = (tokens[i + 6].to_owned(), tokens[i + 7].to_owned());
                    arcs.push((current.clone(), to.clone()));
                    current = to;
                    i += 8;
                }
                _ => i += 1,
            }
        }
        arcs
    }

    #[test]
    fn nearly_full_wedge_is_still_drawn() {
        let segs = segments(&[1.0, 999_999.0]);
        let huge = &segs[1];
        assert!(huge.sweep() < 360.0);
        assert!(huge.large_arc);
        let arcs = arcs(&huge.path);
        assert_eq!(arcs.len(), 4, "path: {}", huge.path);
        for (from, to) in &arcs {
            assert_ne!(from, to, "degenerate arc in {}", huge.path);
        }
    }

    #[test]
    fn large_wedge_with_distinct_endpoints_uses_one_arc() {
        let segs = segments(&[25.0, 75.0]);
        let arcs = arcs(&segs[1].path);
        assert_eq!(arcs.len(), 2, "path: {}", segs[1].path);
        assert!(segs[1].path.contains("A 40 40 0 1 1 50 10"));
    }

    #[test]
    fn quarter_and_three_quarters() {
        let segs = segments(&[25.0, 75.0]);
        assert!((segs[0].percentage - 25.0).abs() < TOLERANCE);
        assert!((segs[1].percentage - 75.0).abs() < TOLERANCE);
        assert!((segs[0].start_angle - -90.0).abs() < TOLERANCE);
        assert!((segs[1].start_angle - 0.0).abs() < TOLERANCE);
        assert!((segs[0].end_angle - 0.0).abs() < TOLERANCE);
        assert!((segs[1].end_angle - 270.0).abs() < TOLERANCE);
        assert!(!segs[0].large_arc);
        assert!(segs[1].large_arc);
    }

    #[test]
    fn quarter_wedge_path_follows_outer_line_inner_order() {
        let segs = segments(&[25.0, 75.0]);
        assert_eq!(
            segs[0].path,
            "M 50 10 A 40 40 0 0 1 90 50 L 75 50 A 25 25 0 0 0 50 25 Z"
        );
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        let segs = segments(&[3.0, 7.5, 11.0, 0.25, 42.0]);
        let sum: f64 = segs.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-6, "sum was {sum}");
    }

    #[test]
    fn segments_are_contiguous() {
        let segs = segments(&[1.0, 2.0, 3.0, 4.0]);
        for pair in segs.windows(2) {
            assert!((pair[1].start_angle - pair[0].end_angle).abs() < TOLERANCE);
        }
        let last = segs.last().map_or(0.0, |s| s.end_angle);
        assert!((last - 270.0).abs() < 1e-6);
    }

    #[test]
    fn large_arc_iff_more_than_half() {
        for seg in segments(&[49.0, 51.0, 200.0, 1.0]) {
            assert_eq!(seg.large_arc, seg.sweep() > 180.0, "segment {}", seg.name);
        }
    }

    #[test]
    fn exactly_half_is_not_large() {
        let segs = segments(&[1.0, 1.0]);
        assert!((segs[0].sweep() - 180.0).abs() < TOLERANCE);
        assert!(!segs[0].large_arc);
    }

    #[test]
    fn zero_total_yields_zero_percent_everywhere() {
        let segs = segments(&[0.0, 0.0, 0.0]);
        assert_eq!(segs.len(), 3);
        for seg in &segs {
            assert!(seg.percentage.abs() < TOLERANCE);
            assert!(seg.sweep().abs() < TOLERANCE);
            assert!((seg.start_angle - -90.0).abs() < TOLERANCE);
            assert!(!seg.large_arc);
            assert!(seg.path.starts_with('M'));
            assert!(seg.path.ends_with('Z'));
        }
    }

    #[test]
    fn negative_values_count_as_zero() {
        let segs = segments(&[-10.0, 30.0, 10.0]);
        assert!(segs[0].percentage.abs() < TOLERANCE);
        assert!((segs[1].percentage - 75.0).abs() < TOLERANCE);
        assert!((segs[2].percentage - 25.0).abs() < TOLERANCE);
        // The original value is preserved for labelling.
        assert!((segs[0].value - -10.0).abs() < TOLERANCE);
    }

    #[test]
    fn non_finite_values_do_not_poison_the_total() {
        let segs = segments(&[f64::NAN, 5.0, f64::INFINITY]);
        assert!((segs[1].percentage - 100.0).abs() < TOLERANCE);
        assert!(segs.iter().all(|s| s.path.chars().all(|c| c != 'N')));
    }

    #[test]
    fn output_is_deterministic() {
        let input = data(&[4.0, 8.0, 15.0, 16.0, 23.0, 42.0]);
        let geometry = DonutGeometry::default();
        assert_eq!(
            donut_segments(&input, &geometry),
            donut_segments(&input, &geometry)
        );
    }

    #[test]
    fn order_and_names_follow_input() {
        let segs = donut_segments(
            &[ChartDatum::new("zeta", 1.0), ChartDatum::new("alpha", 2.0)],
            &DonutGeometry::default(),
        );
        let names: Vec<_> = segs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha"]);
    }

    #[test]
    fn custom_geometry_moves_the_wedge() {
        let geometry = DonutGeometry {
            radius: 10.0,
            inner_radius: 5.0,
            center_x: 0.0,
            center_y: 0.0,
        };
        let segs = donut_segments(&data(&[1.0, 3.0]), &geometry);
        assert!(segs[0].path.starts_with("M 0 -10 A 10 10 0 0 1 10 0"));
    }
}
