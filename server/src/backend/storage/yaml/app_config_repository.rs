use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serde::Deserialize;

use super::connection::{YamlConnection, APP_CONFIG_COLLECTION};
use crate::backend::storage::AppConfigStorage;

const THEME_OF_THE_WEEK_DOCUMENT: &str = "theme_of_the_week";

#[derive(Debug, Deserialize)]
struct ThemeOfTheWeekDocument {
    #[serde(default, deserialize_with = "shared::deserialize_label_list")]
    theme: Vec<String>,
}

/// YAML-backed application configuration documents
#[derive(Clone)]
pub struct AppConfigRepository {
    connection: YamlConnection,
}

impl AppConfigRepository {
    pub fn new(connection: YamlConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl AppConfigStorage for AppConfigRepository {
    async fn get_theme_of_the_week(&self) -> Result<Option<Vec<String>>> {
        let document: Option<ThemeOfTheWeekDocument> = self
            .connection
            .read_document(APP_CONFIG_COLLECTION, THEME_OF_THE_WEEK_DOCUMENT)
            .await?;
        Ok(document.map(|d| d.theme))
    }

    async fn store_theme_of_the_week(&self, theme: serde_json::Value) -> Result<()> {
        let document = serde_json::json!({ "theme": theme });
        self.connection
            .write_document(APP_CONFIG_COLLECTION, THEME_OF_THE_WEEK_DOCUMENT, &document)
            .await?;
        info!("Stored theme of the week");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::yaml::test_utils::TestEnvironment;
    use serde_json::json;

    #[tokio::test]
    async fn test_missing_theme_document() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = env.app_config_repository();

        assert!(repo.get_theme_of_the_week().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_theme_as_list() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = env.app_config_repository();

        repo.store_theme_of_the_week(json!(["Ocean", "Farm Animals"]))
            .await
            .unwrap();
        assert_eq!(
            repo.get_theme_of_the_week().await.unwrap(),
            Some(vec!["Ocean".to_string(), "Farm Animals".to_string()])
        );
    }

    #[tokio::test]
    async fn test_theme_as_comma_separated_string() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = env.app_config_repository();

        repo.store_theme_of_the_week(json!("Ocean,  Farm Animals ,Space"))
            .await
            .unwrap();
        assert_eq!(
            repo.get_theme_of_the_week().await.unwrap(),
            Some(vec![
                "Ocean".to_string(),
                "Farm Animals".to_string(),
                "Space".to_string()
            ])
        );
    }

    #[tokio::test]
    async fn test_theme_of_unexpected_type_reads_empty() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = env.app_config_repository();

        repo.store_theme_of_the_week(json!(12)).await.unwrap();
        assert_eq!(repo.get_theme_of_the_week().await.unwrap(), Some(Vec::new()));
    }
}
