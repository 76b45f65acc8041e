//! # Backend Module
//!
//! Contains all non-UI logic for the daily reports service.
//!
//! This module serves as the orchestration layer that brings together:
//! - **Domain**: roster reconciliation, the report form and its rules
//! - **Storage**: the YAML document store
//! - **IO**: the REST API the caregiver's browser talks to
//!
//! ## Architecture
//!
//! ```text
//! UI Layer (browser)
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (services)
//!     ↓
//! Storage Layer (document store)
//! ```

pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::backend::domain::{ExportService, ReportService, RosterService, ThemeService};
use crate::backend::storage::{
    AppConfigRepository, AttendanceRepository, ChildRepository, DailyReportRepository,
    YamlConnection,
};
use crate::config::AppConfig;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub roster_service: RosterService,
    pub report_service: ReportService,
    pub theme_service: ThemeService,
    pub export_service: ExportService,
}

/// Initialize the backend with all required services
pub fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up document store in {}", config.data_directory.display());
    let connection = YamlConnection::new(&config.data_directory)?;
    Ok(initialize_backend_with_connection(connection))
}

/// Wire every service onto an already opened document store
pub fn initialize_backend_with_connection(connection: YamlConnection) -> AppState {
    info!("Setting up domain model");
    let reports = Arc::new(DailyReportRepository::new(connection.clone()));
    let roster_service = RosterService::new(
        Arc::new(AttendanceRepository::new(connection.clone())),
        reports.clone(),
        Arc::new(ChildRepository::new(connection.clone())),
    );
    let report_service = ReportService::new(reports, roster_service.clone());
    let theme_service = ThemeService::new(Arc::new(AppConfigRepository::new(connection)));

    AppState {
        roster_service,
        report_service,
        theme_service,
        export_service: ExportService::new(),
    }
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &AppConfig) -> Result<Router> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin {:?}", config.cors_origin))?;

    // CORS setup to allow the frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let api_routes = Router::new()
        .nest("/reports", io::rest::report_apis::router())
        .nest("/themes", io::rest::theme_apis::router());

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state))
}
