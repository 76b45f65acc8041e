//! Daily roster reconciliation.
//!
//! Combines a day's attendance, the reports already stored for that day and
//! the children directory into one row per present child. A row either wraps
//! the stored report or is a pending placeholder carrying the child's contact
//! emails.
//!
//! When several reports exist for the same child on the same day the one
//! enumerated last by the store wins. Store enumeration order is not
//! chronological, so which duplicate wins is not meaningful.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{error, info};
use shared::{AttendanceRecord, Child, DailyReport, ReportRow};
use std::collections::HashMap;
use std::sync::Arc;

use super::calendar::{format_report_date, DayInterval};
use super::ReportError;
use crate::backend::storage::{AttendanceStorage, ChildDirectoryStorage, DailyReportStorage};

/// Build the roster for one day from already-fetched records.
///
/// One row is produced per `present` attendance entry, in attendance order,
/// so a child listed present in two records gets two rows.
pub fn reconcile(
    interval: &DayInterval,
    attendance: &[AttendanceRecord],
    reports: Vec<DailyReport>,
    directory: &[Child],
) -> Vec<ReportRow> {
    let present_children: Vec<&str> = attendance
        .iter()
        .flat_map(|record| record.attendance.iter())
        .filter(|(_, entry)| entry.is_present())
        .map(|(name, _)| name.as_str())
        .collect();

    let mut reports_by_child: HashMap<String, DailyReport> = HashMap::new();
    for report in reports {
        reports_by_child.insert(report.child_name.clone(), report);
    }

    let children_by_name: HashMap<&str, &Child> = directory
        .iter()
        .map(|child| (child.name.as_str(), child))
        .collect();

    present_children
        .into_iter()
        .map(|name| match reports_by_child.get(name) {
            Some(report) => ReportRow::from(report.clone()),
            None => {
                let emails = children_by_name
                    .get(name)
                    .map(|child| child.contact_emails())
                    .unwrap_or_default();
                ReportRow::pending(name, emails, interval.start)
            }
        })
        .collect()
}

/// Service that fetches a day's records and reconciles them into a roster
#[derive(Clone)]
pub struct RosterService {
    attendance: Arc<dyn AttendanceStorage>,
    reports: Arc<dyn DailyReportStorage>,
    children: Arc<dyn ChildDirectoryStorage>,
}

impl RosterService {
    pub fn new(
        attendance: Arc<dyn AttendanceStorage>,
        reports: Arc<dyn DailyReportStorage>,
        children: Arc<dyn ChildDirectoryStorage>,
    ) -> Self {
        Self {
            attendance,
            reports,
            children,
        }
    }

    /// Roster for the given day.
    ///
    /// Any retrieval failure is returned as is; nothing is retried and no
    /// partial roster is produced.
    pub async fn roster_for_date(&self, date: NaiveDate) -> Result<Vec<ReportRow>> {
        let interval = DayInterval::for_date(date);
        info!("Building roster for {}", date);

        let fetched = self.fetch(&interval).await;
        let (attendance, reports, directory) = match fetched {
            Ok(records) => records,
            Err(e) => {
                error!("Failed to fetch roster data for {}: {:#}", date, e);
                return Err(e);
            }
        };

        let rows = reconcile(&interval, &attendance, reports, &directory);
        info!(
            "Roster for {}: {} rows, {} submitted",
            date,
            rows.len(),
            rows.iter().filter(|row| row.has_report).count()
        );
        Ok(rows)
    }

    /// The roster row for one child, or `ChildNotOnRoster` if the child was not present
    pub async fn row_for_child(&self, date: NaiveDate, child_name: &str) -> Result<ReportRow> {
        let rows = self.roster_for_date(date).await?;
        rows.into_iter()
            .find(|row| row.child_name == child_name)
            .ok_or_else(|| {
                ReportError::ChildNotOnRoster {
                    child_name: child_name.to_string(),
                    date: format_report_date(date),
                }
                .into()
            })
    }

    async fn fetch(
        &self,
        interval: &DayInterval,
    ) -> Result<(Vec<AttendanceRecord>, Vec<DailyReport>, Vec<Child>)> {
        let reports = self
            .reports
            .list_reports_in(interval)
            .await
            .context("Failed to load daily reports")?;
        let attendance = self
            .attendance
            .list_attendance_in(interval)
            .await
            .context("Failed to load attendance")?;
        let directory = self
            .children
            .list_children()
            .await
            .context("Failed to load children directory")?;
        Ok((attendance, reports, directory))
    }
}
