use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

pub const ATTENDANCE_COLLECTION: &str = "attendance";
pub const DAILY_REPORTS_COLLECTION: &str = "daily_reports";
pub const KIDS_INFO_COLLECTION: &str = "kids_info";
pub const APP_CONFIG_COLLECTION: &str = "app_config";

const DOCUMENT_EXTENSION: &str = "yaml";

/// YamlConnection maps document collections onto directories of YAML files.
///
/// Layout: `<base>/<collection>/<document id>.yaml`. Listing a collection
/// returns documents in file-name order.
#[derive(Clone, Debug)]
pub struct YamlConnection {
    base_directory: PathBuf,
}

impl YamlConnection {
    /// Create a new connection rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            std::fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {}", base_path.display()))?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn collection_directory(&self, collection: &str) -> PathBuf {
        self.base_directory.join(collection)
    }

    fn document_path(&self, collection: &str, document_id: &str) -> Result<PathBuf> {
        if !is_safe_document_id(document_id) {
            return Err(anyhow::anyhow!("Invalid document ID: {:?}", document_id));
        }
        Ok(self
            .collection_directory(collection)
            .join(format!("{}.{}", document_id, DOCUMENT_EXTENSION)))
    }

    /// Read every document in a collection.
    ///
    /// Documents that fail to parse are skipped with a warning. I/O failures
    /// are returned to the caller.
    pub async fn list_documents<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>> {
        let directory = self.collection_directory(collection);
        if !fs::try_exists(&directory).await? {
            debug!("Collection {} doesn't exist yet, returning no documents", collection);
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        let mut entries = fs::read_dir(&directory)
            .await
            .with_context(|| format!("Failed to list collection {}", collection))?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some(DOCUMENT_EXTENSION) {
                paths.push(path);
            }
        }
        paths.sort();

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let content = fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            match serde_yaml::from_str::<T>(&content) {
                Ok(document) => documents.push(document),
                Err(e) => warn!("Skipping unreadable document {}: {}", path.display(), e),
            }
        }

        debug!("Read {} documents from {}", documents.len(), collection);
        Ok(documents)
    }

    /// Read a single document by ID
    pub async fn read_document<T: DeserializeOwned>(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<Option<T>> {
        let path = self.document_path(collection, document_id)?;
        if !fs::try_exists(&path).await? {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let document = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(document))
    }

    pub async fn document_exists(&self, collection: &str, document_id: &str) -> Result<bool> {
        let path = self.document_path(collection, document_id)?;
        Ok(fs::try_exists(&path).await?)
    }

    /// Write a whole document, replacing any previous version
    pub async fn write_document<T: Serialize>(
        &self,
        collection: &str,
        document_id: &str,
        document: &T,
    ) -> Result<()> {
        let path = self.document_path(collection, document_id)?;
        let directory = self.collection_directory(collection);
        fs::create_dir_all(&directory)
            .await
            .with_context(|| format!("Failed to create collection {}", collection))?;

        let yaml_content = serde_yaml::to_string(document)?;

        // Atomic write using temp file
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)
            .await
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &path)
            .await
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        debug!("Wrote document {}/{}", collection, document_id);
        Ok(())
    }
}

/// Document IDs become file names, so only a conservative character set is allowed
pub fn is_safe_document_id(document_id: &str) -> bool {
    !document_id.is_empty()
        && document_id.len() <= 128
        && document_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Generate a document ID from a child name.
///
/// A readable prefix ("Emma Smith" -> "Emma_Smith", "José María" ->
/// "Jose_Maria") followed by a name-based UUID, so distinct names never
/// share a document.
pub fn document_id_for_name(name: &str) -> String {
    let prefix = name
        .trim()
        .chars()
        .map(|c| match c {
            c if c.is_ascii_alphanumeric() => c,
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            'ç' => 'c',
            _ => '_',
        })
        .take(48)
        .collect::<String>();
    let prefix = prefix.trim_matches('_');
    let key = Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()).simple();

    if prefix.is_empty() {
        format!("child_{}", key)
    } else {
        format!("{}_{}", prefix, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Note {
        text: String,
    }

    #[test]
    fn test_document_id_for_name() {
        let emma = document_id_for_name("Emma Smith");
        assert!(emma.starts_with("Emma_Smith_"));
        assert!(document_id_for_name("José María").starts_with("Jose_Maria_"));
        assert!(document_id_for_name("  ../etc ").starts_with("etc_"));
        assert!(document_id_for_name("!!!").starts_with("child_"));

        assert_eq!(document_id_for_name("Emma Smith"), emma);
        let long_name = "x".repeat(300);
        for name in ["Emma Smith", "  ../etc ", "李明", long_name.as_str()] {
            assert!(is_safe_document_id(&document_id_for_name(name)), "unsafe id for {:?}", name);
        }
    }

    #[test]
    fn test_document_id_for_name_keeps_similar_names_apart() {
        let names = ["Emma Smith", "Emma-Smith", "Emma_Smith", "李明", "王芳", "!!!"];
        let ids: std::collections::HashSet<String> =
            names.iter().map(|name| document_id_for_name(name)).collect();
        assert_eq!(ids.len(), names.len());
    }

    #[test]
    fn test_is_safe_document_id() {
        assert!(is_safe_document_id("report_0a1b"));
        assert!(is_safe_document_id("att-2025-06-13"));
        assert!(!is_safe_document_id(""));
        assert!(!is_safe_document_id("../escape"));
        assert!(!is_safe_document_id("a/b"));
    }

    #[tokio::test]
    async fn test_write_then_read_document() {
        let temp_dir = TempDir::new().unwrap();
        let connection = YamlConnection::new(temp_dir.path()).unwrap();

        let note = Note { text: "hello".to_string() };
        connection.write_document("notes", "n1", &note).await.unwrap();

        assert!(connection.document_exists("notes", "n1").await.unwrap());
        let loaded: Option<Note> = connection.read_document("notes", "n1").await.unwrap();
        assert_eq!(loaded, Some(note));

        let missing: Option<Note> = connection.read_document("notes", "n2").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_documents_in_file_name_order_and_skips_garbage() {
        let temp_dir = TempDir::new().unwrap();
        let connection = YamlConnection::new(temp_dir.path()).unwrap();

        connection
            .write_document("notes", "b", &Note { text: "second".to_string() })
            .await
            .unwrap();
        connection
            .write_document("notes", "a", &Note { text: "first".to_string() })
            .await
            .unwrap();
        std::fs::write(connection.collection_directory("notes").join("c.yaml"), "- not a note").unwrap();
        std::fs::write(connection.collection_directory("notes").join("ignored.txt"), "text: x").unwrap();

        let notes: Vec<Note> = connection.list_documents("notes").await.unwrap();
        let texts: Vec<&str> = notes.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_missing_collection_lists_empty() {
        let temp_dir = TempDir::new().unwrap();
        let connection = YamlConnection::new(temp_dir.path()).unwrap();

        let notes: Vec<Note> = connection.list_documents("nothing_here").await.unwrap();
        assert!(notes.is_empty());
    }

    #[tokio::test]
    async fn test_rejects_unsafe_document_id() {
        let temp_dir = TempDir::new().unwrap();
        let connection = YamlConnection::new(temp_dir.path()).unwrap();

        let result = connection
            .write_document("notes", "../outside", &Note { text: "x".to_string() })
            .await;
        assert!(result.is_err());
    }
}
