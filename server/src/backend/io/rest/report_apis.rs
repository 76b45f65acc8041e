//! # REST API for Daily Reports
//!
//! Endpoints for the day's roster, the per-child report form, saving a
//! report and exporting a roster as CSV.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::{debug, error, info};
use serde::Deserialize;

use super::error_response;
use crate::backend::domain::{format_report_date, parse_report_date, EditSession};
use crate::backend::AppState;
use shared::{FormEditRequest, RosterResponse, SaveReportRequest};

#[derive(Debug, Deserialize)]
pub struct RosterQuery {
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct ReportFormQuery {
    pub date: String,
    pub child_name: String,
}

/// Create a router for daily report APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_roster).post(save_report))
        .route("/form", get(get_report_form))
        .route("/form/edit", post(edit_report_form))
        .route("/export", get(export_roster))
}

/// Roster of present children for a day
async fn get_roster(
    State(state): State<AppState>,
    Query(query): Query<RosterQuery>,
) -> impl IntoResponse {
    info!("GET /api/reports - query: {:?}", query);

    let date = match parse_report_date(&query.date) {
        Ok(date) => date,
        Err(e) => return error_response("Invalid date", e.into()),
    };

    match state.roster_service.roster_for_date(date).await {
        Ok(rows) => (
            StatusCode::OK,
            Json(RosterResponse {
                date: format_report_date(date),
                rows,
            }),
        )
            .into_response(),
        Err(e) => error_response("Error loading roster", e),
    }
}

/// Report form for one child, prefilled from the stored report if any
async fn get_report_form(
    State(state): State<AppState>,
    Query(query): Query<ReportFormQuery>,
) -> impl IntoResponse {
    info!("GET /api/reports/form - query: {:?}", query);

    let date = match parse_report_date(&query.date) {
        Ok(date) => date,
        Err(e) => return error_response("Invalid date", e.into()),
    };

    match state.roster_service.row_for_child(date, &query.child_name).await {
        Ok(row) => {
            let session = EditSession::open(date, &row);
            debug!(
                "Opened report form for {} (report: {:?})",
                session.form().child_name,
                session.report_id()
            );
            (StatusCode::OK, Json(session.to_response())).into_response()
        }
        Err(e) => error_response("Error loading report form", e),
    }
}

/// Apply one form action to an open form and return the resulting form
async fn edit_report_form(Json(request): Json<FormEditRequest>) -> impl IntoResponse {
    info!(
        "POST /api/reports/form/edit - child: {}, edit: {:?}",
        request.session.form.child_name, request.edit
    );

    match EditSession::resume(&request.session) {
        Ok(session) => {
            let edited = session.apply(request.edit);
            (StatusCode::OK, Json(edited.to_response())).into_response()
        }
        Err(e) => error_response("Invalid report form", e.into()),
    }
}

/// Create or overwrite a report
async fn save_report(
    State(state): State<AppState>,
    Json(request): Json<SaveReportRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/reports - child: {}, date: {}, id: {:?}",
        request.form.child_name, request.date, request.id
    );

    match state.report_service.save_report(request).await {
        Ok(response) => {
            let status = if response.created {
                StatusCode::CREATED
            } else {
                StatusCode::OK
            };
            (status, Json(response)).into_response()
        }
        Err(e) => error_response("Error saving report", e),
    }
}

/// Day's roster as a CSV download
async fn export_roster(
    State(state): State<AppState>,
    Query(query): Query<RosterQuery>,
) -> impl IntoResponse {
    info!("GET /api/reports/export - query: {:?}", query);

    let date = match parse_report_date(&query.date) {
        Ok(date) => date,
        Err(e) => return error_response("Invalid date", e.into()),
    };

    let rows = match state.roster_service.roster_for_date(date).await {
        Ok(rows) => rows,
        Err(e) => return error_response("Error loading roster", e),
    };

    match state.export_service.export_roster_csv(&rows) {
        Ok(csv) => {
            let disposition = format!(
                "attachment; filename=\"daily_reports_{}.csv\"",
                format_report_date(date)
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                csv,
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to export roster for {}: {:#}", date, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error exporting roster").into_response()
        }
    }
}
