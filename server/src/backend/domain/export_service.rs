//! CSV export of a day's roster.
//!
//! One line per roster row, in roster order. List fields are joined with
//! "; " so they stay inside a single cell.

use anyhow::{Context, Result};
use log::info;
use shared::ReportRow;

const EXPORT_HEADERS: [&str; 22] = [
    "child_name",
    "status",
    "report_id",
    "emails",
    "in_time",
    "out_time",
    "snack",
    "meal",
    "sleep_from",
    "sleep_to",
    "did_not_sleep",
    "no_diaper",
    "diaper_changes",
    "toilet_visits",
    "poops",
    "feelings",
    "theme_of_the_day",
    "notes",
    "ouch",
    "ouch_report",
    "common_parents_note",
    "date",
];

/// Export service for roster data
#[derive(Clone, Default)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Render roster rows as CSV text with a header line
    pub fn export_roster_csv(&self, rows: &[ReportRow]) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(EXPORT_HEADERS)?;

        for row in rows {
            let answers = &row.answers;
            let emails = row.emails.join("; ");
            let feelings = answers.feelings.join("; ");
            let themes = answers.theme_of_the_day.join("; ");
            let date = row.date.format("%Y-%m-%d").to_string();
            let record: [&str; 22] = [
                &row.child_name,
                if row.has_report { "submitted" } else { "pending" },
                row.id.as_deref().unwrap_or(""),
                &emails,
                &answers.in_time,
                &answers.out_time,
                &answers.snack,
                &answers.meal,
                &answers.sleep_from,
                &answers.sleep_to,
                yes_no(answers.sleep_not),
                yes_no(answers.no_diaper),
                &answers.diaper_changes,
                &answers.toilet_visits,
                &answers.poops,
                &feelings,
                &themes,
                &answers.notes,
                yes_no(answers.ouch),
                &answers.ouch_report,
                &answers.common_parents_note,
                &date,
            ];
            writer.write_record(record)?;
        }

        let bytes = writer.into_inner().context("Failed to flush CSV export")?;
        let csv_text = String::from_utf8(bytes).context("CSV export is not valid UTF-8")?;
        info!("Exported {} roster rows as CSV", rows.len());
        Ok(csv_text)
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
