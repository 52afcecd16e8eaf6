//! Print document assembly.
//!
//! Turns rendered card markup into a standalone HTML document with one
//! `.card-page` per physical page.  The `@page` size matches the card
//! exactly, with zero margin, so each page prints on one card blank.
//!
//! Page order for double-sided jobs is front, back, front, back, ... so
//! that duplex printing lines each back up behind its front.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use miqat_core::print::PageSize;
use miqat_core::{CardContext, CardPrintJob, Company, Package, PrintMode};

use crate::card::{CardMarkup, render_card};
use crate::escape::escape;

pub use miqat_core::print::page_dimensions;

/// Which face of a card a page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSide {
    Front,
    Back,
}

/// One physical page of the print document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintPage {
    /// Position of the pilgrim in the job.
    pub pilgrim_index: usize,
    pub side: PageSide,
    pub markup: String,
}

/// Order card faces into pages.
///
/// Single mode emits only fronts.  Double mode emits each pilgrim's front
/// immediately followed by its back.
#[must_use]
pub fn paginate(cards: &[CardMarkup], mode: PrintMode) -> Vec<PrintPage> {
    let mut pages = Vec::with_capacity(cards.len() * mode.sides());
    for (pilgrim_index, card) in cards.iter().enumerate() {
        pages.push(PrintPage {
            pilgrim_index,
            side: PageSide::Front,
            markup: card.front.clone(),
        });
        if mode == PrintMode::Double {
            pages.push(PrintPage {
                pilgrim_index,
                side: PageSide::Back,
                markup: card.back.clone(),
            });
        }
    }
    pages
}

/// Render every card in `job` with the job's design.
#[must_use]
pub fn render_job_cards(job: &CardPrintJob, package: &Package, company: &Company) -> Vec<CardMarkup> {
    let design = job.design();
    job.pilgrims
        .iter()
        .enumerate()
        .map(|(index, pilgrim)| render_card(&design, &CardContext::new(index, pilgrim, package, company)))
        .collect()
}

/// Options for [`to_print_document`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintDocumentOptions {
    /// Document `<title>`.
    pub title: String,

    /// URL of the utility-CSS runtime injected into `<head>`.  `None`
    /// emits no script tag; cards then rely on their inline styles only.
    pub tailwind_cdn: Option<String>,

    /// Embed a script that opens the print dialog once the document has
    /// loaded.  Used for documents opened directly from disk; the
    /// browser app drives printing itself and leaves this off.
    pub auto_print: bool,

    /// Embed a script that closes the window once printing finishes.
    /// Independent of `auto_print`, so a popup whose opener stopped
    /// driving it still goes away after the dialog.
    pub close_after_print: bool,

    /// Milliseconds to wait after load before printing, giving images
    /// and styles time to settle.
    pub print_delay_ms: u32,
}

impl PrintDocumentOptions {
    pub const DEFAULT_TITLE: &'static str = "ID Cards";
    pub const DEFAULT_TAILWIND_CDN: &'static str = "https://cdn.tailwindcss.com";
    pub const DEFAULT_PRINT_DELAY_MS: u32 = 500;
}

impl Default for PrintDocumentOptions {
    fn default() -> Self {
        Self {
            title: Self::DEFAULT_TITLE.to_owned(),
            tailwind_cdn: Some(Self::DEFAULT_TAILWIND_CDN.to_owned()),
            auto_print: false,
            close_after_print: true,
            print_delay_ms: Self::DEFAULT_PRINT_DELAY_MS,
        }
    }
}

/// Build the standalone print document.
///
/// Every page is wrapped in `<div class="card-page">` sized to `page`;
/// pages break after each other except the last, so no trailing blank
/// page is printed.  An empty page list yields a valid document with an
/// empty body.
#[must_use]
pub fn to_print_document(
    pages: &[PrintPage],
    page: PageSize,
    options: &PrintDocumentOptions,
) -> String {
    let width = page.width_mm;
    let height = page.height_mm;

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\"/>\n");
    let _ = writeln!(out, "<title>{}</title>", escape(&options.title));
    if let Some(cdn) = &options.tailwind_cdn {
        let _ = writeln!(out, "<script src=\"{}\"></script>", escape(cdn));
    }

    let _ = writeln!(
        out,
        "<style>\n\
         @page {{ size: {width}mm {height}mm; margin: 0; }}\n\
         html, body {{ margin: 0; padding: 0; }}\n\
         * {{ -webkit-print-color-adjust: exact; print-color-adjust: exact; }}\n\
         .card-page {{ width: {width}mm; height: {height}mm; overflow: hidden; box-sizing: border-box; page-break-after: always; break-after: page; }}\n\
         .card-page:last-child {{ page-break-after: auto; break-after: auto; }}\n\
         </style>"
    );

    // Scripts stay in <head> so the last .card-page is the last child of <body>.
    if options.auto_print || options.close_after_print {
        out.push_str("<script>\n");
        if options.auto_print {
            let delay = options.print_delay_ms;
            let _ = writeln!(
                out,
                "window.addEventListener('load', function () {{\n\
                 \x20 setTimeout(function () {{ window.print(); }}, {delay});\n\
                 }});"
            );
        }
        if options.close_after_print {
            out.push_str(
                "window.addEventListener('afterprint', function () { window.close(); });\n",
            );
        }
        out.push_str("</script>\n");
    }
    out.push_str("</head>\n<body>\n");

    for p in pages {
        let side = match p.side {
            PageSide::Front => "front",
            PageSide::Back => "back",
        };
        let _ = writeln!(
            out,
            "<div class=\"card-page\" data-pilgrim=\"{}\" data-side=\"{side}\">{}</div>",
            p.pilgrim_index, p.markup
        );
    }

    out.push_str("</body>\n</html>\n");
    out
}
