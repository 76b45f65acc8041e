//! Saving daily reports.
//!
//! The edit form is converted back into a full `DailyReport`: the four
//! time-of-day fields go through [`to_12_hour`], everything else is copied
//! as is, and the report date is the start of the selected day. Saving is an
//! upsert by ID that always writes the whole document.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use log::{error, info, warn};
use shared::{
    DailyReport, ReportAnswers, ReportForm, SaveReportRequest, SaveReportResponse,
    COUNT_OPTIONS, FEELING_OPTIONS, PORTION_OPTIONS,
};
use std::sync::Arc;

use super::calendar::{parse_report_date, DayInterval};
use super::roster_service::RosterService;
use super::time_codec::to_12_hour;
use super::ReportError;
use crate::backend::storage::DailyReportStorage;

/// Build the stored report for a form, with display-form times and the
/// start of the selected day as its date.
pub fn to_daily_report(report_id: String, date: NaiveDate, form: &ReportForm) -> DailyReport {
    let edited = &form.answers;
    DailyReport {
        id: report_id,
        child_name: form.child_name.clone(),
        emails: form.emails.clone(),
        date: DayInterval::for_date(date).start,
        email: None,
        email2: None,
        answers: ReportAnswers {
            in_time: to_12_hour(&edited.in_time),
            out_time: to_12_hour(&edited.out_time),
            sleep_from: to_12_hour(&edited.sleep_from),
            sleep_to: to_12_hour(&edited.sleep_to),
            ..edited.clone()
        },
    }
}

/// Check a form before it is written. Empty answers are always allowed.
pub fn validate_form(form: &ReportForm) -> Result<(), ReportError> {
    let answers = &form.answers;

    if form.child_name.trim().is_empty() {
        return Err(ReportError::Validation("child name cannot be empty".to_string()));
    }

    for (label, value) in [
        ("in time", &answers.in_time),
        ("out time", &answers.out_time),
        ("sleep from", &answers.sleep_from),
        ("sleep to", &answers.sleep_to),
    ] {
        if !value.is_empty() && NaiveTime::parse_from_str(value, "%H:%M").is_err() {
            return Err(ReportError::Validation(format!(
                "{} must be HH:MM, got '{}'",
                label, value
            )));
        }
    }

    for (label, value) in [("snack", &answers.snack), ("meal", &answers.meal)] {
        if !value.is_empty() && !PORTION_OPTIONS.contains(&value.as_str()) {
            return Err(ReportError::Validation(format!("unknown {} portion '{}'", label, value)));
        }
    }

    for (label, value) in [
        ("diaper changes", &answers.diaper_changes),
        ("toilet visits", &answers.toilet_visits),
        ("poops", &answers.poops),
    ] {
        if !value.is_empty() && !COUNT_OPTIONS.contains(&value.as_str()) {
            return Err(ReportError::Validation(format!(
                "{} must be between 0 and 4, got '{}'",
                label, value
            )));
        }
    }

    if let Some(feeling) = answers
        .feelings
        .iter()
        .find(|f| !FEELING_OPTIONS.contains(&f.as_str()))
    {
        return Err(ReportError::Validation(format!("unknown feeling '{}'", feeling)));
    }

    if answers.sleep_not && !(answers.sleep_from.is_empty() && answers.sleep_to.is_empty()) {
        return Err(ReportError::Validation(
            "sleep times must be empty when the child did not sleep".to_string(),
        ));
    }
    if answers.no_diaper && !answers.diaper_changes.is_empty() {
        return Err(ReportError::Validation(
            "diaper changes must be empty when no diaper is ticked".to_string(),
        ));
    }
    if !answers.no_diaper && !answers.toilet_visits.is_empty() {
        return Err(ReportError::Validation(
            "toilet visits are only recorded when no diaper is ticked".to_string(),
        ));
    }
    if !answers.ouch && !answers.ouch_report.is_empty() {
        return Err(ReportError::Validation(
            "ouch description must be empty without an ouch".to_string(),
        ));
    }

    Ok(())
}

/// Service that creates and overwrites daily reports
#[derive(Clone)]
pub struct ReportService {
    reports: Arc<dyn DailyReportStorage>,
    roster_service: RosterService,
}

impl ReportService {
    pub fn new(reports: Arc<dyn DailyReportStorage>, roster_service: RosterService) -> Self {
        Self {
            reports,
            roster_service,
        }
    }

    /// Create or overwrite a report, then rebuild the day's roster.
    ///
    /// A request without an ID overwrites the child's existing report for the
    /// day when there is one, so submitting the same request twice leaves a
    /// single report. Nothing is retried. On error the caller still holds its
    /// request and may submit it again.
    pub async fn save_report(&self, request: SaveReportRequest) -> Result<SaveReportResponse> {
        let date = parse_report_date(&request.date)?;
        validate_form(&request.form)?;

        info!(
            "Saving report for {} on {} (id: {:?})",
            request.form.child_name, date, request.id
        );

        let (report_id, created) = match request.id {
            Some(existing_id) => {
                if self.reports.get_report(&existing_id).await?.is_none() {
                    warn!("Cannot update missing report {}", existing_id);
                    return Err(ReportError::ReportNotFound(existing_id).into());
                }
                let report = to_daily_report(existing_id, date, &request.form);
                self.write(&report, false).await?;
                (report.id, false)
            }
            None => match self.existing_report_id(date, &request.form.child_name).await? {
                Some(existing_id) => {
                    info!(
                        "{} already has report {} on {}, overwriting it",
                        request.form.child_name, existing_id, date
                    );
                    let report = to_daily_report(existing_id, date, &request.form);
                    self.write(&report, false).await?;
                    (report.id, false)
                }
                None => {
                    let report = to_daily_report(DailyReport::generate_id(), date, &request.form);
                    self.write(&report, true).await?;
                    (report.id, true)
                }
            },
        };

        // The report is stored; a refresh failure is only a warning.
        let (rows, warning) = match self.roster_service.roster_for_date(date).await {
            Ok(rows) => (Some(rows), None),
            Err(e) => {
                warn!("Saved report {} but could not rebuild roster: {:#}", report_id, e);
                (
                    None,
                    Some(format!("Report saved, but the roster could not be refreshed: {:#}", e)),
                )
            }
        };
        let success_message = if created {
            "Report created successfully!".to_string()
        } else {
            "Report updated successfully!".to_string()
        };

        Ok(SaveReportResponse {
            id: report_id,
            created,
            rows,
            success_message,
            warning,
        })
    }

    /// ID of the report already stored for this child on this day, if any.
    /// Duplicates resolve the same way as on the roster: last enumerated wins.
    async fn existing_report_id(&self, date: NaiveDate, child_name: &str) -> Result<Option<String>> {
        let reports = self
            .reports
            .list_reports_in(&DayInterval::for_date(date))
            .await
            .context("Failed to look up existing reports")?;
        Ok(reports
            .into_iter()
            .filter(|report| report.child_name == child_name)
            .last()
            .map(|report| report.id))
    }

    async fn write(&self, report: &DailyReport, create: bool) -> Result<()> {
        let result = if create {
            self.reports.insert_report(report).await
        } else {
            self.reports.update_report(report).await
        };

        if let Err(e) = &result {
            error!("Failed to save report {} for {}: {:#}", report.id, report.child_name, e);
        }
        result
    }
}
