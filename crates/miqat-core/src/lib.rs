//! miqat-core: Pure domain logic for the miqat back office (sans-IO).
//!
//! Provides the pieces of the back office that are computation rather
//! than presentation:
//!
//! - chart geometry (donut wedges, bar rectangles, line plots)
//! - the ID-card size and design catalogs
//! - the card print-job model and the print-window state machine
//! - an observable application-state store with pluggable persistence
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! data and returns structured results. All browser interaction lives in
//! `miqat-io`; all markup serialization lives in `miqat-export`.

pub mod card;
pub mod chart;
pub mod design;
pub mod print;
pub mod store;
pub mod types;

pub use card::{CardSize, Orientation};
pub use chart::{ChartDatum, ChartSegment, DonutGeometry, donut_segments, nationality_breakdown};
pub use design::{CardDesign, DesignStyle};
pub use print::{CardPrintJob, PrintEvent, PrintMode, PrintWindowState};
pub use store::{AuthAction, AuthState, Store, User};
pub use types::{CardContext, CatalogError, Company, Package, PackageKind, Pilgrim, PrintError};
