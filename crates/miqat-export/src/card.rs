//! ID-card HTML renderers.
//!
//! Each [`CardDesign`] renders through one of three layout templates
//! (see [`CardLayout`]); the design supplies the colours.  The root
//! element of every card carries a predictable id,
//! `id-card-front-{index}` or `id-card-back-{index}`, which the browser
//! print flow uses to capture rendered cards.
//!
//! Cards size themselves to their container (`width:100%;height:100%`),
//! so the same markup works in an on-screen preview box and inside a
//! millimetre-sized print page.
//!
//! All interpolated text is HTML-escaped.  Missing optional fields render
//! as blanks.

use std::fmt::Write;

use miqat_core::design::{CardLayout, DesignStyle};
use miqat_core::{CardContext, CardDesign};

use crate::escape::{escape, escape_opt};

/// Notice printed on every card back.
pub const RETURN_NOTICE: &str = "If found, please return this card to the company below.";

/// Rendered markup for both sides of one pilgrim's card.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CardMarkup {
    pub front: String,
    pub back: String,
}

/// Strategy interface for card templates.
pub trait CardRenderer {
    /// Render the front side for `ctx`.
    fn render_front(&self, ctx: &CardContext<'_>) -> String;

    /// Render the back side for `ctx`.
    fn render_back(&self, ctx: &CardContext<'_>) -> String;
}

impl CardRenderer for CardDesign {
    fn render_front(&self, ctx: &CardContext<'_>) -> String {
        let style = self.style();
        match self.layout() {
            CardLayout::Banner => banner_front(*self, &style, ctx),
            CardLayout::Framed => framed_front(*self, &style, ctx),
            CardLayout::Sidebar => sidebar_front(*self, &style, ctx),
        }
    }

    fn render_back(&self, ctx: &CardContext<'_>) -> String {
        let style = self.style();
        match self.layout() {
            CardLayout::Banner => banner_back(*self, &style, ctx),
            CardLayout::Framed => framed_back(*self, &style, ctx),
            CardLayout::Sidebar => sidebar_back(*self, &style, ctx),
        }
    }
}

/// Render both sides of a card with `renderer`.
#[must_use]
pub fn render_card(renderer: &impl CardRenderer, ctx: &CardContext<'_>) -> CardMarkup {
    CardMarkup {
        front: renderer.render_front(ctx),
        back: renderer.render_back(ctx),
    }
}

// ---------------------------------------------------------------------------
// Shared fragments
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
enum Side {
    Front,
    Back,
}

impl Side {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
        }
    }
}

/// Open the card root element.  `extra_style` is appended to the base
/// sizing rules.
fn open_root(out: &mut String, design: CardDesign, side: Side, ctx: &CardContext<'_>, extra_style: &str) {
    let id = match side {
        Side::Front => ctx.front_id(),
        Side::Back => ctx.back_id(),
    };
    let key = design.key();
    let side = side.as_str();
    let _ = write!(
        out,
        r#"<div id="{id}" class="id-card id-card--{key} id-card--{side}" data-design="{key}" style="position:relative;box-sizing:border-box;width:100%;height:100%;overflow:hidden;font-family:'Noto Sans',Arial,sans-serif;line-height:1.25;{extra_style}">"#,
    );
}

/// Passport photo, or an initials disc when no photo URL is known.
fn photo(out: &mut String, ctx: &CardContext<'_>, style: &DesignStyle, size: &str, round: bool) {
    let radius = if round { "50%" } else { "4px" };
    let frame = format!(
        "width:{size};height:{size};flex-shrink:0;border-radius:{radius};border:2px solid {};overflow:hidden;",
        style.border
    );
    match ctx.pilgrim.photo_url.as_deref() {
        Some(url) => {
            let _ = write!(
                out,
                r#"<img class="id-card__photo" src="{}" alt="{}" style="{frame}object-fit:cover;background:#e2e8f0"/>"#,
                escape(url),
                escape(&ctx.pilgrim.full_name),
            );
        }
        None => {
            let _ = write!(
                out,
                r#"<div class="id-card__photo id-card__photo--placeholder" style="{frame}display:flex;align-items:center;justify-content:center;background:#e2e8f0;color:{};font-weight:700;font-size:14px">{}</div>"#,
                style.text_secondary,
                escape(&ctx.pilgrim.initials()),
            );
        }
    }
}

/// Company logo, if any.
fn logo(out: &mut String, ctx: &CardContext<'_>, size: &str) {
    if let Some(url) = ctx.company.logo_url.as_deref() {
        let _ = write!(
            out,
            r#"<img class="id-card__logo" src="{}" alt="{}" style="width:{size};height:{size};object-fit:contain;flex-shrink:0"/>"#,
            escape(url),
            escape(&ctx.company.name),
        );
    }
}

/// A caption/value pair.
fn field(out: &mut String, style: &DesignStyle, label: &str, value: Option<&str>) {
    let _ = write!(
        out,
        r#"<div class="id-card__field" style="margin-top:2px"><span style="display:block;font-size:6.5px;text-transform:uppercase;letter-spacing:.04em;color:{}">{}</span><span style="display:block;font-size:8.5px;font-weight:600;color:{};white-space:nowrap;overflow:hidden;text-overflow:ellipsis">{}</span></div>"#,
        style.label,
        escape(label),
        style.text_primary,
        escape_opt(value),
    );
}

fn name_line(out: &mut String, style: &DesignStyle, ctx: &CardContext<'_>, font_size: &str) {
    let _ = write!(
        out,
        r#"<div class="id-card__name" style="font-weight:700;font-size:{font_size};color:{};white-space:nowrap;overflow:hidden;text-overflow:ellipsis">{}</div>"#,
        style.text_primary,
        escape(&ctx.pilgrim.full_name),
    );
}

/// The identity fields shown on every front.
fn front_fields(out: &mut String, style: &DesignStyle, ctx: &CardContext<'_>) {
    let pilgrim = ctx.pilgrim;
    field(out, style, "Passport", pilgrim.passport_number.as_deref());
    field(out, style, "Nationality", pilgrim.nationality.as_deref());
    field(out, style, "Travel", ctx.travel_dates().as_deref());
}

fn package_caption(ctx: &CardContext<'_>) -> String {
    let kind = ctx.package.kind.label();
    if ctx.package.name.is_empty() {
        kind.to_owned()
    } else {
        format!("{kind} \u{b7} {}", escape(&ctx.package.name))
    }
}

fn registration_line(out: &mut String, style: &DesignStyle, ctx: &CardContext<'_>, extra_style: &str) {
    let _ = write!(
        out,
        r#"<div class="id-card__registration" style="font-size:7.5px;font-weight:600;color:{};{extra_style}">Reg. No. {}</div>"#,
        style.accent,
        escape_opt(ctx.pilgrim.registration_number.as_deref()),
    );
}

/// The emergency and accommodation details shown on every back, plus
/// the return notice and company contact block.
fn back_details(out: &mut String, style: &DesignStyle, ctx: &CardContext<'_>) {
    let pilgrim = ctx.pilgrim;
    let package = ctx.package;
    let company = ctx.company;

    out.push_str(r#"<div style="display:grid;grid-template-columns:1fr 1fr;column-gap:8px">"#);
    field(out, style, "Emergency contact", pilgrim.emergency_contact.as_deref());
    field(out, style, "Group leader", pilgrim.group_leader.as_deref());
    field(out, style, "Blood group", pilgrim.blood_group.as_deref());
    field(out, style, "Phone", pilgrim.phone.as_deref());
    field(out, style, "Makkah hotel", package.makkah_hotel.as_deref());
    field(out, style, "Madinah hotel", package.madinah_hotel.as_deref());
    out.push_str("</div>");

    let _ = write!(
        out,
        r#"<div class="id-card__notice" style="margin-top:5px;font-size:7px;font-style:italic;color:{}">{}</div>"#,
        style.text_secondary,
        escape(RETURN_NOTICE),
    );
    let _ = write!(
        out,
        r#"<div class="id-card__company" style="margin-top:3px;font-size:7.5px;color:{}"><strong style="color:{}">{}</strong>"#,
        style.text_secondary,
        style.text_primary,
        escape(&company.name),
    );
    for line in [
        company.phone.as_deref(),
        company.address.as_deref(),
        company.license_number.as_deref(),
    ]
    .into_iter()
    .flatten()
    {
        let _ = write!(out, "<br/>{}", escape(line));
    }
    out.push_str("</div>");
}

// ---------------------------------------------------------------------------
// Banner template (Modern, Elegant)
// ---------------------------------------------------------------------------

fn banner_header(out: &mut String, style: &DesignStyle, ctx: &CardContext<'_>) {
    let _ = write!(
        out,
        r#"<div class="id-card__header" style="background:{};color:#ffffff;padding:5px 10px;display:flex;align-items:center;gap:6px;height:26%;box-sizing:border-box">"#,
        style.gradient_css(),
    );
    logo(out, ctx, "22px");
    let _ = write!(
        out,
        r#"<div style="min-width:0"><div style="font-weight:700;font-size:10px;white-space:nowrap;overflow:hidden;text-overflow:ellipsis">{}</div><div style="font-size:7.5px;opacity:.85">{}</div></div></div>"#,
        escape(&ctx.company.name),
        package_caption(ctx),
    );
}

fn banner_front(design: CardDesign, style: &DesignStyle, ctx: &CardContext<'_>) -> String {
    let mut out = String::new();
    let root_style = format!("background:#ffffff;border:1px solid {};border-radius:8px", style.border);
    open_root(&mut out, design, Side::Front, ctx, &root_style);
    banner_header(&mut out, style, ctx);

    out.push_str(r#"<div class="id-card__body" style="display:flex;gap:10px;padding:6px 10px">"#);
    photo(&mut out, ctx, style, "25mm", true);
    out.push_str(r#"<div style="flex:1;min-width:0">"#);
    name_line(&mut out, style, ctx, "11px");
    front_fields(&mut out, style, ctx);
    out.push_str("</div></div>");

    let footer = format!(
        "position:absolute;left:0;right:0;bottom:0;padding:3px 10px;border-top:2px solid {}",
        style.accent
    );
    registration_line(&mut out, style, ctx, &footer);
    out.push_str("</div>");
    out
}

fn banner_back(design: CardDesign, style: &DesignStyle, ctx: &CardContext<'_>) -> String {
    let mut out = String::new();
    let root_style = format!("background:#ffffff;border:1px solid {};border-radius:8px", style.border);
    open_root(&mut out, design, Side::Back, ctx, &root_style);
    let _ = write!(
        out,
        r#"<div style="height:6px;background:{}"></div><div style="padding:6px 10px">"#,
        style.gradient_css(),
    );
    back_details(&mut out, style, ctx);
    out.push_str("</div></div>");
    out
}

// ---------------------------------------------------------------------------
// Framed template (Classic, Minimal)
// ---------------------------------------------------------------------------

fn framed_front(design: CardDesign, style: &DesignStyle, ctx: &CardContext<'_>) -> String {
    let mut out = String::new();
    let root_style = format!(
        "background:#ffffff;border:4px double {};border-radius:4px;padding:6px 9px",
        style.border
    );
    open_root(&mut out, design, Side::Front, ctx, &root_style);

    let _ = write!(
        out,
        r#"<div class="id-card__header" style="display:flex;align-items:center;justify-content:space-between;border-bottom:1px solid {};padding-bottom:3px">"#,
        style.accent,
    );
    let _ = write!(
        out,
        r#"<div style="font-weight:700;font-size:10px;color:{};text-transform:uppercase;letter-spacing:.06em">{}</div>"#,
        style.gradient_from,
        escape(&ctx.company.name),
    );
    logo(&mut out, ctx, "18px");
    out.push_str("</div>");

    out.push_str(r#"<div class="id-card__body" style="display:flex;gap:9px;margin-top:5px">"#);
    photo(&mut out, ctx, style, "23mm", false);
    out.push_str(r#"<div style="flex:1;min-width:0">"#);
    name_line(&mut out, style, ctx, "10.5px");
    let _ = write!(
        out,
        r#"<div style="font-size:7.5px;color:{}">{}</div>"#,
        style.text_secondary,
        package_caption(ctx),
    );
    front_fields(&mut out, style, ctx);
    registration_line(&mut out, style, ctx, "margin-top:3px");
    out.push_str("</div></div></div>");
    out
}

fn framed_back(design: CardDesign, style: &DesignStyle, ctx: &CardContext<'_>) -> String {
    let mut out = String::new();
    let root_style = format!(
        "background:#ffffff;border:4px double {};border-radius:4px;padding:6px 9px",
        style.border
    );
    open_root(&mut out, design, Side::Back, ctx, &root_style);
    back_details(&mut out, style, ctx);
    out.push_str("</div>");
    out
}

// ---------------------------------------------------------------------------
// Sidebar template (Corporate)
// ---------------------------------------------------------------------------

fn sidebar_open(out: &mut String, style: &DesignStyle) {
    let _ = write!(
        out,
        r#"<div class="id-card__sidebar" style="width:34%;height:100%;background:{};color:#ffffff;display:flex;flex-direction:column;align-items:center;justify-content:center;gap:5px;padding:6px;box-sizing:border-box;text-align:center">"#,
        style.gradient_css(),
    );
}

fn sidebar_front(design: CardDesign, style: &DesignStyle, ctx: &CardContext<'_>) -> String {
    let mut out = String::new();
    let root_style = format!("background:#ffffff;border:1px solid {};display:flex", style.border);
    open_root(&mut out, design, Side::Front, ctx, &root_style);

    sidebar_open(&mut out, style);
    photo(&mut out, ctx, style, "22mm", false);
    let _ = write!(
        out,
        r#"<div style="font-size:7.5px;font-weight:600">{}</div></div>"#,
        escape(&ctx.company.name),
    );

    out.push_str(r#"<div class="id-card__body" style="flex:1;min-width:0;padding:8px 10px">"#);
    name_line(&mut out, style, ctx, "11px");
    let _ = write!(
        out,
        r#"<div style="font-size:7.5px;color:{}">{}</div>"#,
        style.accent,
        package_caption(ctx),
    );
    front_fields(&mut out, style, ctx);
    registration_line(&mut out, style, ctx, "margin-top:4px");
    out.push_str("</div></div>");
    out
}

fn sidebar_back(design: CardDesign, style: &DesignStyle, ctx: &CardContext<'_>) -> String {
    let mut out = String::new();
    let root_style = format!("background:#ffffff;border:1px solid {};display:flex", style.border);
    open_root(&mut out, design, Side::Back, ctx, &root_style);

    sidebar_open(&mut out, style);
    logo(&mut out, ctx, "24px");
    let _ = write!(
        out,
        r#"<div style="font-size:8px;font-weight:700">{}</div></div>"#,
        escape(&ctx.company.name),
    );

    out.push_str(r#"<div style="flex:1;min-width:0;padding:6px 9px">"#);
    back_details(&mut out, style, ctx);
    out.push_str("</div></div>");
    out
}

#[cfg(test)]
mod tests {
    use miqat_core::{Company, Package, PackageKind, Pilgrim};

    use super::*;

    fn pilgrim() -> Pilgrim {
        Pilgrim {
            passport_number: Some("A1234567".into()),
            nationality: Some("Indonesia".into()),
            registration_number: Some("REG-0042".into()),
            emergency_contact: Some("+62 812 000".into()),
            group_leader: Some("Ustadh Rahman".into()),
            blood_group: Some("O+".into()),
            ..Pilgrim::new(42, "Siti Nurhaliza")
        }
    }

    fn package() -> Package {
        Package {
            name: "Ramadan Premium".into(),
            kind: PackageKind::Umrah,
            start_date: Some("2027-02-10".into()),
            end_date: Some("2027-02-24".into()),
            makkah_hotel: Some("Swissotel Makkah".into()),
            madinah_hotel: None,
            ..Package::default()
        }
    }

    fn company() -> Company {
        Company {
            name: "Baraka Travel".into(),
            phone: Some("+966 11 000 0000".into()),
            ..Company::default()
        }
    }

    #[test]
    fn every_design_tags_front_and_back_ids() {
        let (p, pk, c) = (pilgrim(), package(), company());
        let ctx = CardContext::new(5, &p, &pk, &c);
        for design in CardDesign::ALL {
            let card = render_card(&design, &ctx);
            assert!(
                card.front.starts_with(r#"<div id="id-card-front-5""#),
                "{design} front: {}",
                card.front
            );
            assert!(
                card.back.starts_with(r#"<div id="id-card-back-5""#),
                "{design} back: {}",
                card.back
            );
            assert!(card.front.contains(&format!("data-design=\"{}\"", design.key())));
        }
    }

    #[test]
    fn front_shows_identity_fields() {
        let (p, pk, c) = (pilgrim(), package(), company());
        let ctx = CardContext::new(0, &p, &pk, &c);
        for design in CardDesign::ALL {
            let front = design.render_front(&ctx);
            for needle in ["Siti Nurhaliza", "A1234567", "Indonesia", "REG-0042", "Baraka Travel"] {
                assert!(front.contains(needle), "{design} front lacks {needle}");
            }
            assert!(front.contains("2027-02-10 \u{2013} 2027-02-24"));
        }
    }

    #[test]
    fn back_shows_emergency_details_and_notice() {
        let (p, pk, c) = (pilgrim(), package(), company());
        let ctx = CardContext::new(0, &p, &pk, &c);
        for design in CardDesign::ALL {
            let back = design.render_back(&ctx);
            for needle in ["+62 812 000", "Ustadh Rahman", "O+", "Swissotel Makkah", "+966 11 000 0000", RETURN_NOTICE] {
                assert!(back.contains(needle), "{design} back lacks {needle}");
            }
        }
    }

    #[test]
    fn text_is_escaped() {
        let p = Pilgrim::new(1, "<script>alert(1)</script>");
        let c = Company {
            name: "A & B \"Tours\"".into(),
            ..Company::default()
        };
        let pk = Package::default();
        let ctx = CardContext::new(0, &p, &pk, &c);
        let card = render_card(&CardDesign::Corporate, &ctx);
        assert!(!card.front.contains("<script>"));
        assert!(card.front.contains("&lt;script&gt;"));
        assert!(card.front.contains("A &amp; B &quot;Tours&quot;"));
    }

    #[test]
    fn missing_photo_renders_initials() {
        let (p, pk, c) = (pilgrim(), package(), company());
        let ctx = CardContext::new(0, &p, &pk, &c);
        let front = CardDesign::Modern.render_front(&ctx);
        assert!(front.contains("id-card__photo--placeholder"));
        assert!(front.contains(">SN<"));
    }

    #[test]
    fn photo_url_renders_img() {
        let p = Pilgrim {
            photo_url: Some("/photos/42.jpg".into()),
            ..pilgrim()
        };
        let (pk, c) = (package(), company());
        let ctx = CardContext::new(0, &p, &pk, &c);
        let front = CardDesign::Classic.render_front(&ctx);
        assert!(front.contains(r#"src="/photos/42.jpg""#));
        assert!(!front.contains("id-card__photo--placeholder"));
    }

    #[test]
    fn blank_record_still_renders() {
        let p = Pilgrim::default();
        let pk = Package::default();
        let c = Company::default();
        let ctx = CardContext::new(0, &p, &pk, &c);
        for design in CardDesign::ALL {
            let card = render_card(&design, &ctx);
            assert!(card.front.ends_with("</div>"));
            assert!(card.back.ends_with("</div>"));
        }
    }

    #[test]
    fn designs_sharing_a_layout_differ_in_colour() {
        let (p, pk, c) = (pilgrim(), package(), company());
        let ctx = CardContext::new(0, &p, &pk, &c);
        let modern = CardDesign::Modern.render_front(&ctx);
        let elegant = CardDesign::Elegant.render_front(&ctx);
        assert_ne!(modern, elegant);
        assert!(elegant.contains(CardDesign::Elegant.style().gradient_from));
    }

    #[test]
    fn div_tags_are_balanced() {
        let (p, pk, c) = (pilgrim(), package(), company());
        let ctx = CardContext::new(0, &p, &pk, &c);
        for design in CardDesign::ALL {
            let card = render_card(&design, &ctx);
            for html in [&card.front, &card.back] {
                assert_eq!(
                    html.matches("<div").count(),
                    html.matches("</div>").count(),
                    "{design}: {html}"
                );
            }
        }
    }
}
