use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use shared::Child;

use super::connection::{document_id_for_name, YamlConnection, KIDS_INFO_COLLECTION};
use crate::backend::storage::ChildDirectoryStorage;

/// YAML-backed children directory, one document per child name
#[derive(Clone)]
pub struct ChildRepository {
    connection: YamlConnection,
}

impl ChildRepository {
    pub fn new(connection: YamlConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl ChildDirectoryStorage for ChildRepository {
    async fn list_children(&self) -> Result<Vec<Child>> {
        let children: Vec<Child> = self.connection.list_documents(KIDS_INFO_COLLECTION).await?;
        debug!("Directory holds {} children", children.len());
        Ok(children)
    }

    async fn store_child(&self, child: &Child) -> Result<()> {
        let document_id = document_id_for_name(&child.name);
        self.connection
            .write_document(KIDS_INFO_COLLECTION, &document_id, child)
            .await?;
        info!("Saved child {} as {}", child.name, document_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::yaml::test_utils::TestEnvironment;

    #[tokio::test]
    async fn test_store_and_list_children() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = env.child_repository();

        let carol = Child {
            name: "Carol Jones".to_string(),
            email: Some("c@x.com".to_string()),
            email2: Some("c2@x.com".to_string()),
        };
        let bob = Child {
            name: "Bob".to_string(),
            email: Some("b@x.com".to_string()),
            email2: None,
        };
        repo.store_child(&carol).await.unwrap();
        repo.store_child(&bob).await.unwrap();

        let children = repo.list_children().await.unwrap();
        assert_eq!(children, vec![bob, carol]);
    }

    #[tokio::test]
    async fn test_store_child_replaces_same_name() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = env.child_repository();

        let mut child = Child {
            name: "Bob".to_string(),
            email: Some("old@x.com".to_string()),
            email2: None,
        };
        repo.store_child(&child).await.unwrap();
        child.email = Some("new@x.com".to_string());
        repo.store_child(&child).await.unwrap();

        let children = repo.list_children().await.unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].email.as_deref(), Some("new@x.com"));
    }

    #[tokio::test]
    async fn test_similar_names_keep_separate_entries() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = env.child_repository();

        for name in ["Emma Smith", "Emma-Smith", "李明", "王芳"] {
            repo.store_child(&Child {
                name: name.to_string(),
                email: Some(format!("{}@x.com", name.len())),
                email2: None,
            })
            .await
            .unwrap();
        }

        let mut names: Vec<String> = repo
            .list_children()
            .await
            .unwrap()
            .into_iter()
            .map(|child| child.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["Emma Smith", "Emma-Smith", "李明", "王芳"]);
    }
}
