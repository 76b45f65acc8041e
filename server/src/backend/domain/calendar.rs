//! Day-level date handling for report queries.
//!
//! Attendance and reports are looked up with a half-open interval
//! `[start_of_day, start_of_day + 1 day)` so stored timestamps that carry a
//! time component still land on the right day.

use chrono::{Days, NaiveDate, NaiveDateTime};

use super::ReportError;

/// Date format used on the wire for a selected day
pub const REPORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Half-open interval covering one calendar day in local (naive) time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DayInterval {
    pub fn for_date(date: NaiveDate) -> Self {
        let start = date.and_time(chrono::NaiveTime::MIN);
        let end = start
            .checked_add_days(Days::new(1))
            .unwrap_or(NaiveDateTime::MAX);
        Self { start, end }
    }

    pub fn contains(&self, moment: NaiveDateTime) -> bool {
        self.start <= moment && moment < self.end
    }

    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }
}

/// Parse a selected day ("YYYY-MM-DD")
pub fn parse_report_date(text: &str) -> Result<NaiveDate, ReportError> {
    NaiveDate::parse_from_str(text.trim(), REPORT_DATE_FORMAT)
        .map_err(|_| ReportError::InvalidDate(text.to_string()))
}

pub fn format_report_date(date: NaiveDate) -> String {
    date.format(REPORT_DATE_FORMAT).to_string()
}
