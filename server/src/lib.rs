//! Daily childcare reports service.
//!
//! Builds the day's roster of present children from attendance, stored
//! reports and the children directory, and saves the report a caregiver
//! fills in for each child.

pub mod backend;
pub mod config;
pub mod logging;

pub use backend::{create_router, initialize_backend, AppState};
pub use config::AppConfig;
