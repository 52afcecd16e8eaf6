//! miqat-export: Pure markup serializers (sans-IO)
//!
//! Turns core data into text: ID-card HTML, the standalone print
//! document, and chart SVG.  Nothing here touches a browser or the file
//! system, so every serializer is testable natively and reusable from
//! the command-line renderer.

pub mod card;
mod escape;
pub mod print;
pub mod svg;

pub use card::{CardMarkup, CardRenderer, RETURN_NOTICE, render_card};
pub use escape::escape;
pub use print::{
    PageSide, PrintDocumentOptions, PrintPage, page_dimensions, paginate, render_job_cards,
    to_print_document,
};
pub use self::svg::{ChartSvgMetadata, bar_to_svg, donut_to_svg, line_to_svg};
