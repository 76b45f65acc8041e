use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use shared::DailyReport;

use super::connection::{is_safe_document_id, YamlConnection, DAILY_REPORTS_COLLECTION};
use crate::backend::domain::DayInterval;
use crate::backend::storage::DailyReportStorage;

/// YAML-backed daily reports, one document per report ID.
///
/// Reports for a day are enumerated in ID order, which is unrelated to when
/// they were written.
#[derive(Clone)]
pub struct DailyReportRepository {
    connection: YamlConnection,
}

impl DailyReportRepository {
    pub fn new(connection: YamlConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl DailyReportStorage for DailyReportRepository {
    async fn list_reports_in(&self, interval: &DayInterval) -> Result<Vec<DailyReport>> {
        let reports: Vec<DailyReport> =
            self.connection.list_documents(DAILY_REPORTS_COLLECTION).await?;
        let matching: Vec<DailyReport> = reports
            .into_iter()
            .filter(|report| interval.contains(report.date))
            .collect();

        debug!("Found {} reports for {}", matching.len(), interval.date());
        Ok(matching)
    }

    async fn get_report(&self, report_id: &str) -> Result<Option<DailyReport>> {
        if !is_safe_document_id(report_id) {
            debug!("Report ID {:?} is not a valid document ID", report_id);
            return Ok(None);
        }
        self.connection
            .read_document(DAILY_REPORTS_COLLECTION, report_id)
            .await
    }

    async fn insert_report(&self, report: &DailyReport) -> Result<()> {
        if self
            .connection
            .document_exists(DAILY_REPORTS_COLLECTION, &report.id)
            .await?
        {
            return Err(anyhow::anyhow!("Report already exists: {}", report.id));
        }

        self.connection
            .write_document(DAILY_REPORTS_COLLECTION, &report.id, report)
            .await?;
        info!("Inserted report {} for {}", report.id, report.child_name);
        Ok(())
    }

    async fn update_report(&self, report: &DailyReport) -> Result<()> {
        if !self
            .connection
            .document_exists(DAILY_REPORTS_COLLECTION, &report.id)
            .await?
        {
            return Err(anyhow::anyhow!("Report not found: {}", report.id));
        }

        self.connection
            .write_document(DAILY_REPORTS_COLLECTION, &report.id, report)
            .await?;
        info!("Updated report {} for {}", report.id, report.child_name);
        Ok(())
    }
}
