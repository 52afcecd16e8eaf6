//! Standalone SVG serializers for the analytics charts.
//!
//! Each function lays a series out with the geometry in
//! [`miqat_core::chart`] and builds an SVG document with the [`svg`]
//! crate.  The output is the same drawing the dashboard shows, so
//! charts can be saved or embedded in reports.
//!
//! These are pure functions with no I/O; they return a `String`.

use ::svg::Document;
use ::svg::node::element::{Circle, Description, Element, Group, Path, Rectangle, Title};
use ::svg::node::{Node, Text};

use miqat_core::chart::{
    BarGeometry, ChartDatum, DonutGeometry, LineGeometry, bar_layout, donut_segments, line_layout,
    palette_color,
};

/// Metadata to embed in a chart document.
///
/// When present, `<title>` and `<desc>` are emitted right after the
/// opening `<svg>` tag.  Text is XML-escaped by the `svg` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartSvgMetadata<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
}

fn start_document(width: f64, height: f64, metadata: &ChartSvgMetadata<'_>) -> Document {
    let mut doc = Document::new()
        .set("width", width)
        .set("height", height)
        .set("viewBox", (0, 0, width, height));
    if let Some(title) = metadata.title {
        doc = doc.add(Title::new(title));
    }
    if let Some(description) = metadata.description {
        doc = doc.add(Description::new().add(Text::new(description)));
    }
    doc
}

fn finish_document(doc: &Document) -> String {
    // The svg crate omits the XML declaration.
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n")
}

fn label(x: f64, y: f64, anchor: &str, content: &str) -> Element {
    let mut text = Element::new("text");
    text.assign("x", x);
    text.assign("y", y);
    text.assign("font-size", 8);
    text.assign("text-anchor", anchor.to_owned());
    text.assign("fill", "#475569");
    text.append(Text::new(content));
    text
}

/// Serialize a donut chart into a `0 0 100 100` SVG document (at the
/// default geometry).
///
/// Each segment becomes one `<path>` filled from the shared palette and
/// carrying a `<title>` tooltip of the form `name: value (pct%)`.
/// Zero-sweep segments are skipped; an all-zero series yields only the
/// background ring.
#[must_use]
pub fn donut_to_svg(
    data: &[ChartDatum],
    geometry: &DonutGeometry,
    metadata: &ChartSvgMetadata<'_>,
) -> String {
    let size = geometry.center_x.max(geometry.center_y) * 2.0;
    let mut doc = start_document(size, size, metadata);

    let ring_width = geometry.radius - geometry.inner_radius;
    doc = doc.add(
        Circle::new()
            .set("class", "donut-track")
            .set("cx", geometry.center_x)
            .set("cy", geometry.center_y)
            .set("r", geometry.inner_radius + ring_width / 2.0)
            .set("fill", "none")
            .set("stroke", "#e2e8f0")
            .set("stroke-width", ring_width),
    );

    let mut wedges = Group::new().set("class", "donut-segments");
    for (i, segment) in donut_segments(data, geometry).iter().enumerate() {
        if segment.sweep() <= 0.0 {
            continue;
        }
        let tooltip = format!(
            "{}: {} ({:.1}%)",
            segment.name, segment.value, segment.percentage
        );
        wedges = wedges.add(
            Path::new()
                .set("d", segment.path.clone())
                .set("fill", palette_color(i))
                .set("stroke", "#ffffff")
                .set("stroke-width", 0.5)
                .add(Title::new(tooltip)),
        );
    }
    doc = doc.add(wedges);
    finish_document(&doc)
}

/// Serialize a vertical bar chart.
///
/// Bars are `<rect>` elements; each has its category name centred below
/// the baseline.
#[must_use]
pub fn bar_to_svg(
    data: &[ChartDatum],
    geometry: &BarGeometry,
    metadata: &ChartSvgMetadata<'_>,
) -> String {
    let mut doc = start_document(geometry.width, geometry.height, metadata);

    doc = doc.add(
        Path::new()
            .set("class", "axis")
            .set(
                "d",
                format!(
                    "M {} {} L {} {}",
                    geometry.padding,
                    geometry.baseline(),
                    geometry.width - geometry.padding,
                    geometry.baseline()
                ),
            )
            .set("stroke", "#cbd5e1")
            .set("stroke-width", 1),
    );

    let mut bars = Group::new().set("class", "bars");
    for (i, bar) in bar_layout(data, geometry).iter().enumerate() {
        bars = bars.add(
            Rectangle::new()
                .set("x", bar.x)
                .set("y", bar.y)
                .set("width", bar.width)
                .set("height", bar.height)
                .set("fill", palette_color(i))
                .add(Title::new(format!("{}: {}", bar.name, bar.value))),
        );
        bars = bars.add(label(
            bar.x + bar.width / 2.0,
            geometry.baseline() + 10.0,
            "middle",
            &bar.name,
        ));
    }
    doc = doc.add(bars);
    finish_document(&doc)
}

/// Serialize a line chart: one polyline plus a marker per point.
#[must_use]
pub fn line_to_svg(
    data: &[ChartDatum],
    geometry: &LineGeometry,
    metadata: &ChartSvgMetadata<'_>,
) -> String {
    let mut doc = start_document(geometry.width, geometry.height, metadata);
    let plot = line_layout(data, geometry);

    if !plot.path.is_empty() {
        doc = doc.add(
            Path::new()
                .set("class", "line")
                .set("d", plot.path.clone())
                .set("fill", "none")
                .set("stroke", palette_color(1))
                .set("stroke-width", 2),
        );
    }

    let mut markers = Group::new().set("class", "points");
    for point in &plot.points {
        markers = markers.add(
            Circle::new()
                .set("cx", point.x)
                .set("cy", point.y)
                .set("r", 3)
                .set("fill", palette_color(1))
                .add(Title::new(format!("{}: {}", point.name, point.value))),
        );
        markers = markers.add(label(
            point.x,
            geometry.height - geometry.padding + 12.0,
            "middle",
            &point.name,
        ));
    }
    doc = doc.add(markers);
    finish_document(&doc)
}
