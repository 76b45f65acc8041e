use thiserror::Error;

/// Failures the REST layer reports as client errors rather than 500s.
///
/// Services return `anyhow::Result`; handlers downcast to this type to pick
/// a status code.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReportError {
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid report: {0}")]
    Validation(String),

    #[error("report not found: {0}")]
    ReportNotFound(String),

    #[error("{child_name} is not on the roster for {date}")]
    ChildNotOnRoster { child_name: String, date: String },
}
