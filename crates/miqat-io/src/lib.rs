//! miqat-io: Browser I/O and Dioxus component library.
//!
//! Drives the ID-card print popup, saves files through Blob downloads,
//! persists app state in `localStorage`, and provides the reusable UI
//! components of the miqat web application.

pub mod components;
pub mod download;
pub mod print_window;
pub mod storage;

pub use components::{BarChart, CardPrintModal, DonutChart, IdCard, LineChart};
pub use print_window::{
    CardMarkupSource, PrintHost, PrintPopup, PrintWindowError, capture_card_markup, print_cards,
    print_with,
};
pub use storage::LocalStoragePersistence;
