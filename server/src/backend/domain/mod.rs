//! # Domain Module
//!
//! Contains the business logic of the daily reports service, independent of
//! HTTP and of the storage backend.
//!
//! ## Module Organization
//!
//! - **time_codec**: 12-hour display times <-> 24-hour edit times
//! - **calendar**: the half-open day interval used by every date query
//! - **roster_service**: reconciles attendance, reports and the children
//!   directory into the day's roster
//! - **roster_view**: roster display state that ignores stale fetches
//! - **edit_session**: immutable report form state and its toggle rules
//! - **report_service**: form validation, conversion to a stored report, upsert
//! - **theme_service**: theme-of-the-week labels
//! - **export_service**: CSV export of a roster
//!
//! ## Business Rules
//!
//! - Only children marked present get a roster row
//! - At most one report per child and day is expected; duplicates resolve to
//!   the one the store enumerates last
//! - Stored times are "h:mm AM/PM", edited times are "HH:mm"
//! - Saving always writes the whole report

pub mod calendar;
pub mod edit_session;
pub mod error;
pub mod export_service;
pub mod report_service;
pub mod roster_service;
pub mod roster_view;
pub mod theme_service;
pub mod time_codec;

pub use calendar::{format_report_date, parse_report_date, DayInterval};
pub use edit_session::EditSession;
pub use error::ReportError;
pub use export_service::ExportService;
pub use report_service::ReportService;
pub use roster_service::RosterService;
pub use roster_view::{FetchTicket, RosterView, RosterViewHandle};
pub use theme_service::ThemeService;
