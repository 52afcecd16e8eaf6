//! Card print jobs and the print-window lifecycle.
//!
//! A [`CardPrintJob`] is built when the print modal opens and consumed
//! exactly once by the print action.  The browser side of printing drives
//! a popup window through the states of [`PrintWindowState`]:
//!
//! ```text
//! Opened -> DocumentWritten -> PrintDialogShown -> Printed ---> Closed
//!                  |                   |                       ^
//!                  +-------------------+----> Cancelled -------+
//! ```
//!
//! The state machine is kept here, free of browser types, so the legal
//! orderings can be tested natively.

use serde::{Deserialize, Serialize};

use crate::card::{CardSize, Orientation};
use crate::design::CardDesign;
use crate::types::{Pilgrim, PrintError};

/// Whether each pilgrim gets only a front page or a front and a back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintMode {
    #[default]
    Single,
    Double,
}

impl PrintMode {
    /// Printed sides per pilgrim.
    #[must_use]
    pub const fn sides(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Double => 2,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Single => "Front only",
            Self::Double => "Front and back",
        }
    }
}

/// Physical page size in millimetres after orientation is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

/// Effective page size for a card size and orientation.
///
/// Catalog sizes are stated in landscape terms; portrait swaps width and
/// height.
///
/// ```
/// use miqat_core::{CardSize, Orientation};
/// use miqat_core::print::page_dimensions;
///
/// let page = page_dimensions(&CardSize::STANDARD, Orientation::Portrait);
/// assert!((page.width_mm - 54.0).abs() < 1e-9);
/// assert!((page.height_mm - 85.6).abs() < 1e-9);
/// ```
#[must_use]
pub const fn page_dimensions(size: &CardSize, orientation: Orientation) -> PageSize {
    match orientation {
        Orientation::Landscape => PageSize {
            width_mm: size.width_mm,
            height_mm: size.height_mm,
        },
        Orientation::Portrait => PageSize {
            width_mm: size.height_mm,
            height_mm: size.width_mm,
        },
    }
}

/// Everything needed to print a batch of ID cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardPrintJob {
    /// Pilgrims in print order.
    pub pilgrims: Vec<Pilgrim>,
    pub size: CardSize,
    pub orientation: Orientation,
    /// Design key as chosen in the UI; resolved leniently by
    /// [`design`](Self::design).
    pub design: String,
    pub print_mode: PrintMode,
}

impl CardPrintJob {
    /// A job with the catalog defaults: standard size, landscape,
    /// modern design, single-sided.
    #[must_use]
    pub fn new(pilgrims: Vec<Pilgrim>) -> Self {
        Self {
            pilgrims,
            size: CardSize::default(),
            orientation: Orientation::default(),
            design: CardDesign::default().key().to_owned(),
            print_mode: PrintMode::default(),
        }
    }

    /// The design to render with; unknown keys resolve to
    /// [`CardDesign::Modern`].
    #[must_use]
    pub fn design(&self) -> CardDesign {
        CardDesign::from_key(&self.design)
    }

    #[must_use]
    pub const fn page_size(&self) -> PageSize {
        page_dimensions(&self.size, self.orientation)
    }

    /// Number of physical pages the job produces.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pilgrims.len() * self.print_mode.sides()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pilgrims.is_empty()
    }
}

/// Lifecycle state of the print popup window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum PrintWindowState {
    /// The popup exists but is blank.
    #[default]
    Opened,
    /// The print document has been written into the popup.
    DocumentWritten,
    /// The browser's print dialog is up.
    PrintDialogShown,
    /// The print dialog returned.
    Printed,
    /// The user closed the popup before or during the dialog.
    Cancelled,
    /// The popup is gone. Terminal.
    Closed,
}

/// Something that happened to the print popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrintEvent {
    DocumentWritten,
    DialogShown,
    DialogFinished,
    Cancelled,
    Closed,
}

impl PrintWindowState {
    /// Whether the state machine has finished.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Apply `event`, returning the next state.
    ///
    /// `Closed` is accepted from every non-terminal state so that error
    /// paths can always tear the popup down.
    ///
    /// # Errors
    ///
    /// Returns [`PrintError::InvalidTransition`] when `event` is not
    /// legal in the current state.
    pub const fn advance(self, event: PrintEvent) -> Result<Self, PrintError> {
        let next = match (self, event) {
            (Self::Opened, PrintEvent::DocumentWritten) => Self::DocumentWritten,
            (Self::DocumentWritten, PrintEvent::DialogShown) => Self::PrintDialogShown,
            (Self::DocumentWritten | Self::PrintDialogShown, PrintEvent::Cancelled) => {
                Self::Cancelled
            }
            (Self::PrintDialogShown, PrintEvent::DialogFinished) => Self::Printed,
            (
                Self::Opened
                | Self::DocumentWritten
                | Self::PrintDialogShown
                | Self::Printed
                | Self::Cancelled,
                PrintEvent::Closed,
            ) => Self::Closed,
            (from, event) => return Err(PrintError::InvalidTransition { from, event }),
        };
        Ok(next)
    }
}
