//! Dioxus UI components for miqat.
//!
//! Provides the dashboard charts, the ID-card preview, and the card
//! print dialog.

mod charts;
mod id_card;
mod print_modal;

pub use charts::{BarChart, DonutChart, LineChart};
pub use id_card::IdCard;
pub use print_modal::CardPrintModal;
