//! Dashboard chart components.
//!
//! Each chart draws inline SVG from the geometry in
//! [`miqat_core::chart`] and lists its series in a legend below.

use dioxus::prelude::*;
use miqat_core::chart::{
    BarGeometry, ChartDatum, DonutGeometry, LineGeometry, bar_layout, donut_segments, line_layout,
    palette_color,
};

/// Props shared by every chart component.
#[derive(Props, Clone, PartialEq)]
pub struct ChartProps {
    /// Series to draw, in display order.
    data: Vec<ChartDatum>,
    /// Heading shown above the chart.
    #[props(into)]
    title: String,
}

/// Donut chart with a percentage legend.
#[component]
pub fn DonutChart(props: ChartProps) -> Element {
    let geometry = DonutGeometry::default();
    let segments = donut_segments(&props.data, &geometry);
    let size = geometry.center_x.max(geometry.center_y) * 2.0;
    let view_box = format!("0 0 {size} {size}");
    let total: f64 = props.data.iter().map(ChartDatum::magnitude).sum();

    rsx! {
        ChartCard { title: props.title, empty: props.data.is_empty(),
            svg {
                xmlns: "http://www.w3.org/2000/svg",
                view_box: "{view_box}",
                class: "w-48 h-48 mx-auto",
                circle {
                    cx: geometry.center_x,
                    cy: geometry.center_y,
                    r: f64::midpoint(geometry.radius, geometry.inner_radius),
                    fill: "none",
                    stroke: "#e2e8f0",
                    stroke_width: geometry.radius - geometry.inner_radius,
                }
                for (i , segment) in segments.iter().enumerate().filter(|(_, s)| s.sweep() > 0.0) {
                    path {
                        key: "{i}",
                        d: segment.path.clone(),
                        fill: palette_color(i),
                        stroke: "#ffffff",
                        stroke_width: 0.5,
                        title { "{segment.name}: {segment.value}" }
                    }
                }
                text {
                    x: geometry.center_x,
                    y: geometry.center_y,
                    text_anchor: "middle",
                    dominant_baseline: "middle",
                    font_size: 10,
                    font_weight: 700,
                    fill: "#0f172a",
                    "{total}"
                }
            }
            ul { class: "mt-3 space-y-1 text-sm",
                for (i , segment) in segments.iter().enumerate() {
                    li { key: "{i}", class: "flex items-center gap-2",
                        span {
                            class: "inline-block w-3 h-3 rounded-sm",
                            style: format!("background:{}", palette_color(i)),
                        }
                        span { class: "flex-1 text-slate-700", "{segment.name}" }
                        span { class: "tabular-nums text-slate-500", {format!("{:.1}%", segment.percentage)} }
                    }
                }
            }
        }
    }
}

/// Vertical bar chart.
#[component]
pub fn BarChart(props: ChartProps) -> Element {
    let geometry = BarGeometry::default();
    let bars = bar_layout(&props.data, &geometry);
    let baseline = geometry.baseline();
    let axis = format!(
        "M {} {baseline} L {} {baseline}",
        geometry.padding,
        geometry.width - geometry.padding
    );
    let view_box = format!("0 0 {} {}", geometry.width, geometry.height);

    rsx! {
        ChartCard { title: props.title, empty: props.data.is_empty(),
            svg {
                xmlns: "http://www.w3.org/2000/svg",
                view_box: "{view_box}",
                class: "w-full h-auto",
                path { d: "{axis}", stroke: "#cbd5e1", stroke_width: 1 }
                for (i , bar) in bars.iter().enumerate() {
                    g { key: "{i}",
                        rect {
                            x: bar.x,
                            y: bar.y,
                            width: bar.width,
                            height: bar.height,
                            rx: 2,
                            fill: palette_color(i),
                            title { "{bar.name}: {bar.value}" }
                        }
                        text {
                            x: bar.x + bar.width / 2.0,
                            y: baseline + 12.0,
                            text_anchor: "middle",
                            font_size: 8,
                            fill: "#475569",
                            "{bar.name}"
                        }
                    }
                }
            }
        }
    }
}

/// Line chart with point markers.
#[component]
pub fn LineChart(props: ChartProps) -> Element {
    let geometry = LineGeometry::default();
    let plot = line_layout(&props.data, &geometry);
    let label_y = geometry.height - geometry.padding + 12.0;
    let stroke = palette_color(1);
    let view_box = format!("0 0 {} {}", geometry.width, geometry.height);

    rsx! {
        ChartCard { title: props.title, empty: props.data.is_empty(),
            svg {
                xmlns: "http://www.w3.org/2000/svg",
                view_box: "{view_box}",
                class: "w-full h-auto",
                if !plot.path.is_empty() {
                    path {
                        d: plot.path.clone(),
                        fill: "none",
                        stroke: stroke,
                        stroke_width: 2,
                        stroke_linejoin: "round",
                    }
                }
                for (i , point) in plot.points.iter().enumerate() {
                    g { key: "{i}",
                        circle {
                            cx: point.x,
                            cy: point.y,
                            r: 3,
                            fill: stroke,
                            title { "{point.name}: {point.value}" }
                        }
                        text {
                            x: point.x,
                            y: label_y,
                            text_anchor: "middle",
                            font_size: 8,
                            fill: "#475569",
                            "{point.name}"
                        }
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct ChartCardProps {
    title: String,
    empty: bool,
    children: Element,
}

#[component]
fn ChartCard(props: ChartCardProps) -> Element {
    rsx! {
        section { class: "bg-white rounded-lg shadow-sm border border-slate-200 p-4",
            h3 { class: "text-sm font-semibold text-slate-700 mb-3", "{props.title}" }
            if props.empty {
                p { class: "text-sm text-slate-400 italic", "No data" }
            } else {
                {props.children}
            }
        }
    }
}
