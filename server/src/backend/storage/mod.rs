//! # Storage Module
//!
//! Handles all data persistence for the daily reports service.
//!
//! The domain layer only sees the traits in [`traits`]; the YAML document
//! store in [`yaml`] is the implementation wired up at startup. Attendance
//! and the children directory are written by the attendance-taking side of
//! the application, so this service only reads them outside of tests.

pub mod traits;
pub mod yaml;

pub use traits::{AppConfigStorage, AttendanceStorage, ChildDirectoryStorage, DailyReportStorage};
pub use yaml::{
    AppConfigRepository, AttendanceRepository, ChildRepository, DailyReportRepository,
    YamlConnection,
};
