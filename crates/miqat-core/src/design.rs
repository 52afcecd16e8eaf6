//! ID-card design catalog.
//!
//! Each [`CardDesign`] variant is a named style bundle plus a choice of
//! layout template.  Renderers match exhaustively on the variant (see
//! `miqat_export::card::CardRenderer`), so adding a design is a compile
//! error everywhere a template must be chosen.
//!
//! [`CardDesign::Modern`] is the single fallback for unknown keys.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::CatalogError;

/// Colours for one design.  All values are CSS colour strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesignStyle {
    pub gradient_from: &'static str,
    pub gradient_to: &'static str,
    pub border: &'static str,
    /// Main text (names, values).
    pub text_primary: &'static str,
    /// Secondary text (subtitles, footers).
    pub text_secondary: &'static str,
    /// Highlights: badges, rules, the registration number.
    pub accent: &'static str,
    /// Field captions.
    pub label: &'static str,
}

impl DesignStyle {
    /// CSS `linear-gradient` for the card header or background.
    #[must_use]
    pub fn gradient_css(&self) -> String {
        format!(
            "linear-gradient(135deg, {} 0%, {} 100%)",
            self.gradient_from, self.gradient_to
        )
    }
}

/// Layout templates shared between designs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardLayout {
    /// Full-width gradient header band with the photo overlapping it.
    Banner,
    /// White card inside a thick coloured frame.
    Framed,
    /// Gradient sidebar on the left carrying the photo and company.
    Sidebar,
}

/// An English/Arabic text pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalizedText {
    pub en: &'static str,
    pub ar: &'static str,
}

impl LocalizedText {
    /// The text for a language tag; anything not starting with `ar`
    /// gets English.
    #[must_use]
    pub fn get(&self, lang: &str) -> &'static str {
        if lang.to_ascii_lowercase().starts_with("ar") {
            self.ar
        } else {
            self.en
        }
    }
}

/// A selectable ID-card design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardDesign {
    #[default]
    Modern,
    Classic,
    Corporate,
    Elegant,
    Minimal,
}

impl CardDesign {
    /// All designs, in picker order.
    pub const ALL: [Self; 5] = [
        Self::Modern,
        Self::Classic,
        Self::Corporate,
        Self::Elegant,
        Self::Minimal,
    ];

    /// Catalog key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Modern => "modern",
            Self::Classic => "classic",
            Self::Corporate => "corporate",
            Self::Elegant => "elegant",
            Self::Minimal => "minimal",
        }
    }

    /// Look up a design by key, falling back to [`CardDesign::Modern`].
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        Self::lookup(key).unwrap_or_default()
    }

    /// Look up a design by key.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownDesign`] when `key` is not in the
    /// catalog.
    pub fn lookup(key: &str) -> Result<Self, CatalogError> {
        Self::ALL
            .into_iter()
            .find(|d| d.key().eq_ignore_ascii_case(key.trim()))
            .ok_or_else(|| CatalogError::UnknownDesign(key.to_owned()))
    }

    /// Which template this design renders with.
    #[must_use]
    pub const fn layout(self) -> CardLayout {
        match self {
            Self::Modern | Self::Elegant => CardLayout::Banner,
            Self::Classic | Self::Minimal => CardLayout::Framed,
            Self::Corporate => CardLayout::Sidebar,
        }
    }

    #[must_use]
    pub const fn style(self) -> DesignStyle {
        match self {
            Self::Modern => DesignStyle {
                gradient_from: "#059669",
                gradient_to: "#0d9488",
                border: "#10b981",
                text_primary: "#0f172a",
                text_secondary: "#475569",
                accent: "#059669",
                label: "#64748b",
            },
            Self::Classic => DesignStyle {
                gradient_from: "#1e3a8a",
                gradient_to: "#1e40af",
                border: "#b45309",
                text_primary: "#1e293b",
                text_secondary: "#334155",
                accent: "#b45309",
                label: "#78716c",
            },
            Self::Corporate => DesignStyle {
                gradient_from: "#111827",
                gradient_to: "#374151",
                border: "#4b5563",
                text_primary: "#111827",
                text_secondary: "#4b5563",
                accent: "#2563eb",
                label: "#6b7280",
            },
            Self::Elegant => DesignStyle {
                gradient_from: "#4c1d95",
                gradient_to: "#9d174d",
                border: "#d4af37",
                text_primary: "#1f2937",
                text_secondary: "#4b5563",
                accent: "#a16207",
                label: "#6b7280",
            },
            Self::Minimal => DesignStyle {
                gradient_from: "#f8fafc",
                gradient_to: "#f1f5f9",
                border: "#cbd5e1",
                text_primary: "#0f172a",
                text_secondary: "#64748b",
                accent: "#0f172a",
                label: "#94a3b8",
            },
        }
    }

    #[must_use]
    pub const fn name(self) -> LocalizedText {
        match self {
            Self::Modern => LocalizedText {
                en: "Modern",
                ar: "\u{639}\u{635}\u{631}\u{64a}",
            },
            Self::Classic => LocalizedText {
                en: "Classic",
                ar: "\u{643}\u{644}\u{627}\u{633}\u{64a}\u{643}\u{64a}",
            },
            Self::Corporate => LocalizedText {
                en: "Corporate",
                ar: "\u{645}\u{624}\u{633}\u{633}\u{64a}",
            },
            Self::Elegant => LocalizedText {
                en: "Elegant",
                ar: "\u{623}\u{646}\u{64a}\u{642}",
            },
            Self::Minimal => LocalizedText {
                en: "Minimal",
                ar: "\u{628}\u{633}\u{64a}\u{637}",
            },
        }
    }

    /// One-line description shown under the design picker.  Not every
    /// design has one.
    #[must_use]
    pub const fn description(self) -> Option<LocalizedText> {
        match self {
            Self::Modern => Some(LocalizedText {
                en: "Green gradient header with a round photo",
                ar: "\u{62a}\u{62f}\u{631}\u{62c} \u{623}\u{62e}\u{636}\u{631} \u{645}\u{639} \u{635}\u{648}\u{631}\u{629} \u{62f}\u{627}\u{626}\u{631}\u{64a}\u{629}",
            }),
            Self::Classic => Some(LocalizedText {
                en: "Navy frame with gold accents",
                ar: "\u{625}\u{637}\u{627}\u{631} \u{643}\u{62d}\u{644}\u{64a} \u{628}\u{644}\u{645}\u{633}\u{627}\u{62a} \u{630}\u{647}\u{628}\u{64a}\u{629}",
            }),
            Self::Corporate => Some(LocalizedText {
                en: "Dark sidebar for company branding",
                ar: "\u{634}\u{631}\u{64a}\u{637} \u{62c}\u{627}\u{646}\u{628}\u{64a} \u{62f}\u{627}\u{643}\u{646}",
            }),
            Self::Elegant | Self::Minimal => None,
        }
    }
}

impl fmt::Display for CardDesign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().en)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_fallback() {
        assert_eq!(CardDesign::default(), CardDesign::Modern);
        assert_eq!(CardDesign::from_key("does-not-exist"), CardDesign::Modern);
        assert_eq!(CardDesign::from_key(""), CardDesign::Modern);
    }

    #[test]
    fn every_key_round_trips() {
        for design in CardDesign::ALL {
            assert_eq!(CardDesign::from_key(design.key()), design);
            assert_eq!(CardDesign::lookup(design.key()), Ok(design));
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(CardDesign::from_key("Corporate"), CardDesign::Corporate);
    }

    #[test]
    fn strict_lookup_reports_unknown_key() {
        assert_eq!(
            CardDesign::lookup("neon"),
            Err(CatalogError::UnknownDesign("neon".into()))
        );
    }

    #[test]
    fn every_layout_is_used() {
        let layouts: std::collections::HashSet<_> =
            CardDesign::ALL.iter().map(|d| d.layout()).collect();
        assert!(layouts.contains(&CardLayout::Banner));
        assert!(layouts.contains(&CardLayout::Framed));
        assert!(layouts.contains(&CardLayout::Sidebar));
    }

    #[test]
    fn localized_names_pick_language() {
        let name = CardDesign::Classic.name();
        assert_eq!(name.get("en-GB"), "Classic");
        assert_ne!(name.get("ar-SA"), "Classic");
    }

    #[test]
    fn gradient_css_uses_both_stops() {
        let css = CardDesign::Modern.style().gradient_css();
        assert!(css.contains("#059669 0%"));
        assert!(css.contains("#0d9488 100%"));
    }
}
