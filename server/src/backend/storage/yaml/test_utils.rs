//! Test utilities for the YAML document store.
//!
//! `TestEnvironment` owns a temporary directory that is removed when the
//! environment is dropped, even if the test panics.

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use shared::{DailyReport, ReportAnswers};
use std::path::PathBuf;
use tempfile::TempDir;

use super::{
    AppConfigRepository, AttendanceRepository, ChildRepository, DailyReportRepository,
    YamlConnection,
};

/// RAII test environment that automatically cleans up on drop
pub struct TestEnvironment {
    /// Kept alive to prevent cleanup until drop
    _temp_dir: TempDir,
    pub connection: YamlConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::with_prefix("daily_reports_test_")?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = YamlConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    pub fn attendance_repository(&self) -> AttendanceRepository {
        AttendanceRepository::new(self.connection.clone())
    }

    pub fn daily_report_repository(&self) -> DailyReportRepository {
        DailyReportRepository::new(self.connection.clone())
    }

    pub fn child_repository(&self) -> ChildRepository {
        ChildRepository::new(self.connection.clone())
    }

    pub fn app_config_repository(&self) -> AppConfigRepository {
        AppConfigRepository::new(self.connection.clone())
    }

    /// Write a document by hand, bypassing serialization
    pub fn write_raw_document(&self, collection: &str, document_id: &str, yaml: &str) {
        let directory = self.connection.collection_directory(collection);
        std::fs::create_dir_all(&directory).expect("create collection directory");
        std::fs::write(directory.join(format!("{}.yaml", document_id)), yaml)
            .expect("write raw document");
    }
}

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .expect("valid test timestamp")
}

pub fn sample_report(id: &str, child_name: &str, date: NaiveDateTime) -> DailyReport {
    DailyReport {
        id: id.to_string(),
        child_name: child_name.to_string(),
        emails: Vec::new(),
        date,
        email: None,
        email2: None,
        answers: ReportAnswers {
            in_time: "8:00 AM".to_string(),
            out_time: "4:30 PM".to_string(),
            snack: "Most".to_string(),
            meal: "All".to_string(),
            ..ReportAnswers::default()
        },
    }
}
