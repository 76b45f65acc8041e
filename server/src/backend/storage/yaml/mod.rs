//! # YAML Document Store
//!
//! Stores each collection as a directory of YAML documents under the data
//! directory. Writes replace whole documents through a temp file and rename.

pub mod app_config_repository;
pub mod attendance_repository;
pub mod child_repository;
pub mod connection;
pub mod daily_report_repository;

#[cfg(test)]
pub mod test_utils;

pub use app_config_repository::AppConfigRepository;
pub use attendance_repository::AttendanceRepository;
pub use child_repository::ChildRepository;
pub use connection::YamlConnection;
pub use daily_report_repository::DailyReportRepository;
