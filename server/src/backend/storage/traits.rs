//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! document stores to be used interchangeably in the domain layer.
//!
//! Listing order is whatever the backing store enumerates. The domain layer
//! never assumes it is chronological.

use anyhow::Result;
use async_trait::async_trait;
use shared::{AttendanceRecord, Child, DailyReport};

use crate::backend::domain::DayInterval;

/// Attendance records, owned by the attendance-taking side of the app
#[async_trait]
pub trait AttendanceStorage: Send + Sync {
    /// All attendance records whose date falls inside the interval
    async fn list_attendance_in(&self, interval: &DayInterval) -> Result<Vec<AttendanceRecord>>;

    /// Store (or replace) an attendance record by ID
    async fn store_attendance(&self, record: &AttendanceRecord) -> Result<()>;
}

/// Daily reports keyed by document ID
#[async_trait]
pub trait DailyReportStorage: Send + Sync {
    /// All reports whose date falls inside the interval
    async fn list_reports_in(&self, interval: &DayInterval) -> Result<Vec<DailyReport>>;

    /// Retrieve a specific report by ID
    async fn get_report(&self, report_id: &str) -> Result<Option<DailyReport>>;

    /// Store a new report. Fails if the ID is already taken.
    async fn insert_report(&self, report: &DailyReport) -> Result<()>;

    /// Overwrite an existing report in full. Fails if the ID is unknown.
    async fn update_report(&self, report: &DailyReport) -> Result<()>;
}

/// The children directory
#[async_trait]
pub trait ChildDirectoryStorage: Send + Sync {
    /// List all children
    async fn list_children(&self) -> Result<Vec<Child>>;

    /// Store (or replace) a child entry by name
    async fn store_child(&self, child: &Child) -> Result<()>;
}

/// Application-level configuration documents
#[async_trait]
pub trait AppConfigStorage: Send + Sync {
    /// Theme labels of the week, `None` when the document does not exist
    async fn get_theme_of_the_week(&self) -> Result<Option<Vec<String>>>;

    /// Store the raw theme value (a list or a comma-separated string)
    async fn store_theme_of_the_week(&self, theme: serde_json::Value) -> Result<()>;
}
