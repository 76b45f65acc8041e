//! The report edit session.
//!
//! An `EditSession` is an immutable value: opening a roster row produces one,
//! and every form action produces a new one. The form keeps these rules on
//! every transition:
//!
//! - ticking "did not sleep" clears both sleep times
//! - "no diaper" clears diaper changes, unticking it clears toilet visits
//! - unticking "ouch" clears the ouch description
//!
//! Text edits to a field that the current toggles hide (for example diaper
//! changes while "no diaper" is ticked) are ignored.

use chrono::NaiveDate;
use shared::{FormEdit, ReportAnswers, ReportForm, ReportFormResponse, ReportRow, TextField};

use super::calendar::{format_report_date, parse_report_date};
use super::ReportError;
use super::time_codec::to_24_hour;

#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    date: NaiveDate,
    report_id: Option<String>,
    form: ReportForm,
}

impl EditSession {
    /// Start editing a roster row for the selected day
    pub fn open(date: NaiveDate, row: &ReportRow) -> Self {
        Self {
            date,
            report_id: row.id.clone(),
            form: form_from_row(row),
        }
    }

    /// Session resulting from one user action
    pub fn apply(&self, edit: FormEdit) -> Self {
        Self {
            date: self.date,
            report_id: self.report_id.clone(),
            form: apply_edit(&self.form, edit),
        }
    }

    pub fn report_id(&self) -> Option<&str> {
        self.report_id.as_deref()
    }

    pub fn form(&self) -> &ReportForm {
        &self.form
    }

    /// Pick a session back up from the form a client was sent
    pub fn resume(snapshot: &ReportFormResponse) -> Result<Self, ReportError> {
        Ok(Self {
            date: parse_report_date(&snapshot.date)?,
            report_id: snapshot.report_id.clone(),
            form: snapshot.form.clone(),
        })
    }

    pub fn to_response(&self) -> ReportFormResponse {
        ReportFormResponse {
            date: format_report_date(self.date),
            report_id: self.report_id.clone(),
            form: self.form.clone(),
        }
    }
}

/// Load a roster row into the edit form, converting times to 24-hour form.
///
/// Rows without an `emails` list fall back to the legacy `email`/`email2`
/// fields.
fn form_from_row(row: &ReportRow) -> ReportForm {
    let emails = if row.emails.is_empty() {
        [&row.email, &row.email2]
            .into_iter()
            .flatten()
            .filter(|email| !email.is_empty())
            .cloned()
            .collect()
    } else {
        row.emails.clone()
    };

    let stored = &row.answers;
    ReportForm {
        child_name: row.child_name.clone(),
        emails,
        answers: ReportAnswers {
            in_time: to_24_hour(&stored.in_time),
            out_time: to_24_hour(&stored.out_time),
            sleep_from: to_24_hour(&stored.sleep_from),
            sleep_to: to_24_hour(&stored.sleep_to),
            ..stored.clone()
        },
    }
}

/// Apply one user action to a form
fn apply_edit(form: &ReportForm, edit: FormEdit) -> ReportForm {
    let mut next = form.clone();
    let answers = &mut next.answers;

    match edit {
        FormEdit::SetText { field, value } => {
            if field_is_editable(answers, field) {
                *text_field_mut(answers, field) = value;
            }
        }
        FormEdit::SleepNot(checked) => {
            answers.sleep_not = checked;
            answers.sleep_from.clear();
            answers.sleep_to.clear();
        }
        FormEdit::NoDiaper(checked) => {
            answers.no_diaper = checked;
            if checked {
                answers.diaper_changes.clear();
            } else {
                answers.toilet_visits.clear();
            }
        }
        FormEdit::Ouch(checked) => {
            answers.ouch = checked;
            if !checked {
                answers.ouch_report.clear();
            }
        }
        FormEdit::ToggleFeeling(label) => toggle_label(&mut answers.feelings, label),
        FormEdit::ToggleTheme(label) => toggle_label(&mut answers.theme_of_the_day, label),
    }

    next
}

fn field_is_editable(answers: &ReportAnswers, field: TextField) -> bool {
    match field {
        TextField::SleepFrom | TextField::SleepTo => !answers.sleep_not,
        TextField::DiaperChanges => !answers.no_diaper,
        TextField::ToiletVisits => answers.no_diaper,
        TextField::OuchReport => answers.ouch,
        _ => true,
    }
}

fn text_field_mut(answers: &mut ReportAnswers, field: TextField) -> &mut String {
    match field {
        TextField::InTime => &mut answers.in_time,
        TextField::OutTime => &mut answers.out_time,
        TextField::Snack => &mut answers.snack,
        TextField::Meal => &mut answers.meal,
        TextField::SleepFrom => &mut answers.sleep_from,
        TextField::SleepTo => &mut answers.sleep_to,
        TextField::DiaperChanges => &mut answers.diaper_changes,
        TextField::ToiletVisits => &mut answers.toilet_visits,
        TextField::Poops => &mut answers.poops,
        TextField::Notes => &mut answers.notes,
        TextField::OuchReport => &mut answers.ouch_report,
        TextField::CommonParentsNote => &mut answers.common_parents_note,
    }
}

fn toggle_label(labels: &mut Vec<String>, label: String) {
    if let Some(position) = labels.iter().position(|l| *l == label) {
        labels.remove(position);
    } else {
        labels.push(label);
    }
}
