use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Attendance status string that marks a child as present for the day
pub const PRESENT_STATUS: &str = "present";

/// Feelings a caregiver can tick on a report
pub const FEELING_OPTIONS: [&str; 6] = ["Happy", "Sad", "Restless", "Quiet", "Playful", "Sick"];

/// How much of a snack or meal the child ate
pub const PORTION_OPTIONS: [&str; 5] = ["None", "Some", "Half", "Most", "All"];

/// Allowed values for diaper changes, toilet visits and bowel movements
pub const COUNT_OPTIONS: [&str; 5] = ["0", "1", "2", "3", "4"];

/// A child in the center directory, keyed by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Child {
    pub name: String,
    /// Primary parent contact
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Secondary parent contact
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email2: Option<String>,
}

impl Child {
    /// Non-empty contact addresses, primary first
    pub fn contact_emails(&self) -> Vec<String> {
        [&self.email, &self.email2]
            .into_iter()
            .flatten()
            .filter(|email| !email.is_empty())
            .cloned()
            .collect()
    }
}

/// Status of a single child within an attendance record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub status: String,
}

impl AttendanceEntry {
    pub fn present() -> Self {
        Self {
            status: PRESENT_STATUS.to_string(),
        }
    }

    pub fn is_present(&self) -> bool {
        self.status == PRESENT_STATUS
    }
}

/// Attendance taken for one day, written by the attendance-taking side of the app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: String,
    pub date: NaiveDateTime,
    /// Child name -> status
    #[serde(default)]
    pub attendance: BTreeMap<String, AttendanceEntry>,
}

/// The answers a caregiver fills in for a child's day.
///
/// Stored reports carry times in 12-hour display form ("2:30 PM"); the edit
/// form carries the same struct with times in 24-hour form ("14:30").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportAnswers {
    pub in_time: String,
    pub out_time: String,
    pub snack: String,
    pub meal: String,
    pub sleep_from: String,
    pub sleep_to: String,
    pub sleep_not: bool,
    pub no_diaper: bool,
    pub diaper_changes: String,
    pub toilet_visits: String,
    pub poops: String,
    #[serde(deserialize_with = "deserialize_label_list")]
    pub feelings: Vec<String>,
    pub notes: String,
    #[serde(deserialize_with = "deserialize_label_list")]
    pub theme_of_the_day: Vec<String>,
    pub ouch: bool,
    pub ouch_report: String,
    pub common_parents_note: String,
}

/// A persisted daily report, at most one per (child, date)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    pub id: String,
    pub child_name: String,
    #[serde(default)]
    pub emails: Vec<String>,
    pub date: NaiveDateTime,
    /// Older reports stored single addresses instead of `emails`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email2: Option<String>,
    #[serde(flatten)]
    pub answers: ReportAnswers,
}

impl DailyReport {
    /// Generate a new report ID in format "report_<uuid>"
    pub fn generate_id() -> String {
        format!("report_{}", Uuid::new_v4().simple())
    }
}

/// One entry of a day's roster: either a submitted report or a pending placeholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Present only when a report has been stored
    pub id: Option<String>,
    pub child_name: String,
    pub emails: Vec<String>,
    pub date: NaiveDateTime,
    pub has_report: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email2: Option<String>,
    #[serde(flatten)]
    pub answers: ReportAnswers,
}

impl ReportRow {
    /// Placeholder row for a present child with no report yet
    pub fn pending(child_name: &str, emails: Vec<String>, date: NaiveDateTime) -> Self {
        Self {
            id: None,
            child_name: child_name.to_string(),
            emails,
            date,
            has_report: false,
            email: None,
            email2: None,
            answers: ReportAnswers::default(),
        }
    }
}

impl From<DailyReport> for ReportRow {
    fn from(report: DailyReport) -> Self {
        Self {
            id: Some(report.id),
            child_name: report.child_name,
            emails: report.emails,
            date: report.date,
            has_report: true,
            email: report.email,
            email2: report.email2,
            answers: report.answers,
        }
    }
}

/// The editable form for one child's report, times in 24-hour form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportForm {
    pub child_name: String,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(flatten)]
    pub answers: ReportAnswers,
}

/// Free-text and single-choice fields of the report form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    InTime,
    OutTime,
    Snack,
    Meal,
    SleepFrom,
    SleepTo,
    DiaperChanges,
    ToiletVisits,
    Poops,
    Notes,
    OuchReport,
    CommonParentsNote,
}

/// A single user action on the report form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FormEdit {
    SetText { field: TextField, value: String },
    SleepNot(bool),
    NoDiaper(bool),
    Ouch(bool),
    ToggleFeeling(String),
    ToggleTheme(String),
}

/// Roster for a selected day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterResponse {
    /// Selected day (YYYY-MM-DD)
    pub date: String,
    pub rows: Vec<ReportRow>,
}

/// Report form loaded for one child on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportFormResponse {
    pub date: String,
    pub report_id: Option<String>,
    pub form: ReportForm,
}

/// Apply one edit to an open report form; the reply is the resulting
/// `ReportFormResponse`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormEditRequest {
    pub session: ReportFormResponse,
    pub edit: FormEdit,
}

/// Create (no id) or overwrite (id) the report for `form.child_name` on `date`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveReportRequest {
    pub id: Option<String>,
    /// Selected day (YYYY-MM-DD)
    pub date: String,
    pub form: ReportForm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveReportResponse {
    pub id: String,
    pub created: bool,
    /// Fresh roster for the saved day, absent if it could not be rebuilt
    pub rows: Option<Vec<ReportRow>>,
    pub success_message: String,
    /// Set when the report was saved but the roster refresh failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeListResponse {
    pub themes: Vec<String>,
}

/// Split a comma-separated label string, dropping blank entries
pub fn split_label_text(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabelList {
    List(Vec<String>),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Accepts a label list stored either as an array or as a comma-separated
/// string. Anything else reads as an empty list.
pub fn deserialize_label_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawLabelList::deserialize(deserializer)? {
        RawLabelList::List(labels) => labels,
        RawLabelList::Text(text) => split_label_text(&text),
        RawLabelList::Other(_) => Vec::new(),
    })
}
