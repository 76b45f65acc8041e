use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use shared::AttendanceRecord;

use super::connection::{YamlConnection, ATTENDANCE_COLLECTION};
use crate::backend::domain::DayInterval;
use crate::backend::storage::AttendanceStorage;

/// YAML-backed attendance records, one document per record ID
#[derive(Clone)]
pub struct AttendanceRepository {
    connection: YamlConnection,
}

impl AttendanceRepository {
    pub fn new(connection: YamlConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl AttendanceStorage for AttendanceRepository {
    async fn list_attendance_in(&self, interval: &DayInterval) -> Result<Vec<AttendanceRecord>> {
        let records: Vec<AttendanceRecord> =
            self.connection.list_documents(ATTENDANCE_COLLECTION).await?;
        let matching: Vec<AttendanceRecord> = records
            .into_iter()
            .filter(|record| interval.contains(record.date))
            .collect();

        debug!(
            "Found {} attendance records for {}",
            matching.len(),
            interval.date()
        );
        Ok(matching)
    }

    async fn store_attendance(&self, record: &AttendanceRecord) -> Result<()> {
        self.connection
            .write_document(ATTENDANCE_COLLECTION, &record.id, record)
            .await
    }
}
