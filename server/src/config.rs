//! Runtime configuration, read from the environment with defaults.
//!
//! - `DAILY_REPORTS_DATA_DIR`: root of the document store
//!   (default `<Documents>/Daily Reports`)
//! - `DAILY_REPORTS_ADDR`: listen address (default `127.0.0.1:3000`)
//! - `DAILY_REPORTS_CORS_ORIGIN`: allowed browser origin
//!   (default `http://localhost:8080`)

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DATA_DIR_VAR: &str = "DAILY_REPORTS_DATA_DIR";
pub const ADDR_VAR: &str = "DAILY_REPORTS_ADDR";
pub const CORS_ORIGIN_VAR: &str = "DAILY_REPORTS_CORS_ORIGIN";

const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_directory: PathBuf,
    pub bind_address: SocketAddr,
    pub cors_origin: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup (the environment in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_directory = value(DATA_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(default_data_directory);

        let bind_address = value(ADDR_VAR)
            .unwrap_or_else(|| DEFAULT_ADDR.to_string())
            .trim()
            .parse::<SocketAddr>()
            .with_context(|| format!("{} is not a valid socket address", ADDR_VAR))?;

        let cors_origin = value(CORS_ORIGIN_VAR).unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());

        Ok(Self {
            data_directory,
            bind_address,
            cors_origin,
        })
    }

    /// Default settings with the store rooted at `data_directory`
    pub fn for_data_directory<P: AsRef<Path>>(data_directory: P) -> Self {
        Self {
            data_directory: data_directory.as_ref().to_path_buf(),
            bind_address: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
        }
    }
}

/// `<Documents>/Daily Reports`, or `./daily-reports-data` when there is no
/// documents directory (headless servers)
pub fn default_data_directory() -> PathBuf {
    dirs::document_dir()
        .map(|documents| documents.join("Daily Reports"))
        .unwrap_or_else(|| PathBuf::from("daily-reports-data"))
}
