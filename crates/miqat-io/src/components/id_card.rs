//! On-screen ID-card preview.

use dioxus::prelude::*;
use miqat_core::{CardContext, CardDesign, CardSize, Company, Orientation, Package, Pilgrim};
use miqat_export::{CardRenderer, PageSide, page_dimensions};

/// Props for the [`IdCard`] component.
#[derive(Props, Clone, PartialEq)]
pub struct IdCardProps {
    /// Position of the pilgrim in the print job; determines the card's
    /// element id.
    index: usize,
    pilgrim: Pilgrim,
    package: Package,
    company: Company,
    design: CardDesign,
    side: PageSide,
    size: CardSize,
    orientation: Orientation,
}

/// One side of one pilgrim's card, drawn by the export renderer.
///
/// The wrapper keeps the physical aspect ratio of the selected size and
/// orientation; the card markup fills it.  The markup is the same string
/// the print flow captures by element id.
#[component]
pub fn IdCard(props: IdCardProps) -> Element {
    let ctx = CardContext::new(props.index, &props.pilgrim, &props.package, &props.company);
    let markup = match props.side {
        PageSide::Front => props.design.render_front(&ctx),
        PageSide::Back => props.design.render_back(&ctx),
    };
    let page = page_dimensions(&props.size, props.orientation);
    let wrapper_style = format!(
        "aspect-ratio:{} / {};width:100%",
        page.width_mm, page.height_mm
    );

    rsx! {
        div {
            class: "id-card-preview shadow-md rounded-lg overflow-hidden bg-white",
            style: "{wrapper_style}",
            dangerous_inner_html: "{markup}",
        }
    }
}
