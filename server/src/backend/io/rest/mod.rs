//! # REST API Interface Layer
//!
//! HTTP endpoints of the daily reports service. Each submodule exposes a
//! `router()` that is nested under `/api` in [`crate::backend::create_router`].
//!
//! Domain errors map to status codes as follows:
//! - invalid date or failed form validation: 400
//! - unknown report ID, child not on the day's roster: 404
//! - anything else (store failures): 500

pub mod report_apis;
pub mod theme_apis;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;

use crate::backend::domain::ReportError;

/// Translate a service error into an HTTP response
pub(crate) fn error_response(context: &str, err: anyhow::Error) -> Response {
    match err.downcast_ref::<ReportError>() {
        Some(report_error) => {
            let status = match report_error {
                ReportError::InvalidDate(_) | ReportError::Validation(_) => StatusCode::BAD_REQUEST,
                ReportError::ReportNotFound(_) | ReportError::ChildNotOnRoster { .. } => {
                    StatusCode::NOT_FOUND
                }
            };
            (status, report_error.to_string()).into_response()
        }
        None => {
            error!("{}: {:#}", context, err);
            (StatusCode::INTERNAL_SERVER_ERROR, context.to_string()).into_response()
        }
    }
}
