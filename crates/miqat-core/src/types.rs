//! Shared domain records and error types.
//!
//! The records mirror the JSON payloads served by the back-office REST
//! API, restricted to the fields the ID-card renderer reads.  Every field
//! other than the identifier and display name is optional: a missing value
//! renders as a blank rather than an error.

use serde::{Deserialize, Serialize};

use crate::print::{PrintEvent, PrintWindowState};

/// A registered pilgrim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Pilgrim {
    /// Back-office identifier.
    pub id: u64,
    /// Name as printed on the card.
    pub full_name: String,
    pub passport_number: Option<String>,
    pub nationality: Option<String>,
    pub gender: Option<String>,
    /// Date of birth as delivered by the API (already formatted).
    pub date_of_birth: Option<String>,
    pub phone: Option<String>,
    pub blood_group: Option<String>,
    /// Absolute or site-relative URL of the passport photo.
    pub photo_url: Option<String>,
    pub emergency_contact: Option<String>,
    /// Display name of the assigned group leader.
    pub group_leader: Option<String>,
    pub registration_number: Option<String>,
}

impl Pilgrim {
    /// Create a pilgrim with only the required fields set.
    #[must_use]
    pub fn new(id: u64, full_name: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            ..Self::default()
        }
    }

    /// Up to two uppercase initials, used when no photo is available.
    ///
    /// ```
    /// use miqat_core::Pilgrim;
    ///
    /// assert_eq!(Pilgrim::new(1, "Amina bint Yusuf").initials(), "AB");
    /// assert_eq!(Pilgrim::new(2, "  ").initials(), "");
    /// ```
    #[must_use]
    pub fn initials(&self) -> String {
        self.full_name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Which pilgrimage a package covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageKind {
    Hajj,
    #[default]
    Umrah,
}

impl PackageKind {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hajj => "Hajj",
            Self::Umrah => "Umrah",
        }
    }
}

/// A travel package a pilgrim is registered on.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Package {
    pub name: String,
    pub kind: PackageKind,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub makkah_hotel: Option<String>,
    pub madinah_hotel: Option<String>,
}

/// The operating company whose branding appears on the cards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    pub name: String,
    pub license_number: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub logo_url: Option<String>,
}

/// Everything a card renderer needs to draw one pilgrim's card.
///
/// `index` is the pilgrim's position in the print job; it determines the
/// element ids (`id-card-front-{index}` / `id-card-back-{index}`) that the
/// print flow uses to locate rendered cards.
#[derive(Debug, Clone, Copy)]
pub struct CardContext<'a> {
    pub index: usize,
    pub pilgrim: &'a Pilgrim,
    pub package: &'a Package,
    pub company: &'a Company,
}

impl<'a> CardContext<'a> {
    #[must_use]
    pub const fn new(
        index: usize,
        pilgrim: &'a Pilgrim,
        package: &'a Package,
        company: &'a Company,
    ) -> Self {
        Self {
            index,
            pilgrim,
            package,
            company,
        }
    }

    /// Element id of the rendered front card.
    #[must_use]
    pub fn front_id(&self) -> String {
        front_element_id(self.index)
    }

    /// Element id of the rendered back card.
    #[must_use]
    pub fn back_id(&self) -> String {
        back_element_id(self.index)
    }

    /// Package travel window, `"start – end"`, or whichever side is known.
    #[must_use]
    pub fn travel_dates(&self) -> Option<String> {
        match (&self.package.start_date, &self.package.end_date) {
            (Some(start), Some(end)) => Some(format!("{start} \u{2013} {end}")),
            (Some(only), None) | (None, Some(only)) => Some(only.clone()),
            (None, None) => None,
        }
    }
}

/// Element id of the front card for the pilgrim at `index`.
#[must_use]
pub fn front_element_id(index: usize) -> String {
    format!("id-card-front-{index}")
}

/// Element id of the back card for the pilgrim at `index`.
#[must_use]
pub fn back_element_id(index: usize) -> String {
    format!("id-card-back-{index}")
}

/// Errors raised by the print flow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrintError {
    /// The browser refused to open the print window.
    #[error("the print window was blocked; allow pop-ups for this site and try again")]
    PopupBlocked,

    /// An event arrived that the print window cannot accept in its
    /// current state.
    #[error("cannot apply {event:?} while the print window is {from:?}")]
    InvalidTransition {
        from: PrintWindowState,
        event: PrintEvent,
    },
}

/// Errors raised by strict catalog lookups.
///
/// The lenient lookups (`from_key`) never fail and fall back to the
/// catalog default instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown card size: {0}")]
    UnknownSize(String),

    #[error("unknown card design: {0}")]
    UnknownDesign(String),

    #[error("unknown orientation: {0}")]
    UnknownOrientation(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(Pilgrim::new(1, "omar farouk ali").initials(), "OF");
        assert_eq!(Pilgrim::new(1, "Bilal").initials(), "B");
    }

    #[test]
    fn element_ids_are_predictable() {
        let pilgrim = Pilgrim::new(9, "X");
        let package = Package::default();
        let company = Company::default();
        let ctx = CardContext::new(3, &pilgrim, &package, &company);
        assert_eq!(ctx.front_id(), "id-card-front-3");
        assert_eq!(ctx.back_id(), "id-card-back-3");
    }

    #[test]
    fn travel_dates_handle_partial_windows() {
        let pilgrim = Pilgrim::new(1, "X");
        let company = Company::default();
        let mut package = Package {
            start_date: Some("2026-05-20".into()),
            end_date: Some("2026-06-10".into()),
            ..Package::default()
        };
        let ctx = CardContext::new(0, &pilgrim, &package, &company);
        assert_eq!(
            ctx.travel_dates().as_deref(),
            Some("2026-05-20 \u{2013} 2026-06-10")
        );

        package.end_date = None;
        let ctx = CardContext::new(0, &pilgrim, &package, &company);
        assert_eq!(ctx.travel_dates().as_deref(), Some("2026-05-20"));

        package.start_date = None;
        let ctx = CardContext::new(0, &pilgrim, &package, &company);
        assert_eq!(ctx.travel_dates(), None);
    }

    #[test]
    fn pilgrim_deserializes_with_missing_optionals() {
        let pilgrim: Pilgrim =
            serde_json::from_str(r#"{"id": 4, "full_name": "Hafsa"}"#).unwrap();
        assert_eq!(pilgrim.id, 4);
        assert_eq!(pilgrim.full_name, "Hafsa");
        assert!(pilgrim.passport_number.is_none());
    }

    #[test]
    fn package_kind_uses_lowercase_names() {
        let package: Package =
            serde_json::from_str(r#"{"name": "Premium", "kind": "hajj"}"#).unwrap();
        assert_eq!(package.kind, PackageKind::Hajj);
        assert_eq!(package.kind.label(), "Hajj");
    }

    #[test]
    fn popup_blocked_message_asks_user_to_allow_popups() {
        assert!(PrintError::PopupBlocked.to_string().contains("allow pop-ups"));
    }

    #[test]
    fn catalog_error_display() {
        assert_eq!(
            CatalogError::UnknownSize("huge".into()).to_string(),
            "unknown card size: huge"
        );
    }
}
