//! Physical ID-card sizes and orientations.
//!
//! Sizes are stated in landscape terms (width >= height) in millimetres.
//! Portrait printing transposes them at page-layout time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::CatalogError;

/// A physical card size from the catalog.
///
/// Only serializable: sizes are always resolved from the static catalog
/// by key, never constructed from external input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardSize {
    /// Catalog key (e.g. `"standard"`).
    pub key: &'static str,
    /// Human-readable label for pickers.
    pub label: &'static str,
    /// Long edge in millimetres.
    pub width_mm: f64,
    /// Short edge in millimetres.
    pub height_mm: f64,
}

impl CardSize {
    /// CR80, the credit-card format.
    pub const STANDARD: Self = Self {
        key: "standard",
        label: "Standard (CR80)",
        width_mm: 85.6,
        height_mm: 54.0,
    };

    pub const LARGE: Self = Self {
        key: "large",
        label: "Large",
        width_mm: 100.0,
        height_mm: 70.0,
    };

    /// 4 × 3 inch event badge.
    pub const BADGE: Self = Self {
        key: "badge",
        label: "Badge (4 \u{d7} 3 in)",
        width_mm: 101.6,
        height_mm: 76.2,
    };

    pub const A6: Self = Self {
        key: "a6",
        label: "A6",
        width_mm: 148.0,
        height_mm: 105.0,
    };

    /// Every catalog entry, in picker order.
    pub const ALL: [Self; 4] = [Self::STANDARD, Self::LARGE, Self::BADGE, Self::A6];

    /// Look up a size by key, falling back to [`CardSize::STANDARD`].
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        Self::lookup(key).unwrap_or(Self::STANDARD)
    }

    /// Look up a size by key.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownSize`] when `key` is not in the
    /// catalog.
    pub fn lookup(key: &str) -> Result<Self, CatalogError> {
        Self::ALL
            .into_iter()
            .find(|size| size.key.eq_ignore_ascii_case(key.trim()))
            .ok_or_else(|| CatalogError::UnknownSize(key.to_owned()))
    }
}

impl Default for CardSize {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Card orientation on the printed page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    #[default]
    Landscape,
}

impl Orientation {
    pub const ALL: [Self; 2] = [Self::Landscape, Self::Portrait];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Portrait => "Portrait",
            Self::Landscape => "Landscape",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Orientation {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|o| o.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::UnknownOrientation(s.to_owned()))
    }
}
