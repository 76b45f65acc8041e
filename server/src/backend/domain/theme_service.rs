use anyhow::{Context, Result};
use log::{error, info};
use std::sync::Arc;

use crate::backend::storage::AppConfigStorage;

/// Service for the theme-of-the-week labels offered on the report form
#[derive(Clone)]
pub struct ThemeService {
    config: Arc<dyn AppConfigStorage>,
}

impl ThemeService {
    pub fn new(config: Arc<dyn AppConfigStorage>) -> Self {
        Self { config }
    }

    /// Current theme labels. A missing configuration document means no themes.
    pub async fn available_themes(&self) -> Result<Vec<String>> {
        let themes = match self
            .config
            .get_theme_of_the_week()
            .await
            .context("Failed to load theme of the week")
        {
            Ok(themes) => themes.unwrap_or_default(),
            Err(e) => {
                error!("{:#}", e);
                return Err(e);
            }
        };

        info!("Loaded {} themes of the week", themes.len());
        Ok(themes)
    }
}
