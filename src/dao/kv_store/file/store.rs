use std::{fmt::Write as _, io::ErrorKind, path::PathBuf, sync::Arc};

use futures::future::BoxFuture;
use tokio::fs;

use crate::dao::{kv_store::KeyValueStore, storage::StorageResult};

use super::{
    config::FileStoreConfig,
    error::{FileResult, FileStoreError},
};

/// Key-value backend storing each key as one file under a root directory.
#[derive(Clone)]
pub struct FileKvStore {
    root: Arc<PathBuf>,
}

impl FileKvStore {
    /// Open the store, creating the data directory when it does not exist.
    pub async fn connect(config: FileStoreConfig) -> FileResult<Self> {
        fs::create_dir_all(&config.root)
            .await
            .map_err(|source| FileStoreError::CreateRoot {
                path: config.root.clone(),
                source,
            })?;

        Ok(Self {
            root: Arc::new(config.root),
        })
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.root.join(encode_key(key))
    }

    async fn read_value(&self, key: &str) -> FileResult<Option<String>> {
        let path = self.value_path(key);
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(FileStoreError::ReadValue { path, source }),
        }
    }

    async fn write_value(&self, key: &str, value: &str) -> FileResult<()> {
        let path = self.value_path(key);
        // Stage then rename so a crash mid-write leaves the previous value intact.
        let staging = self.root.join(format!("{}.tmp", encode_key(key)));
        fs::write(&staging, value)
            .await
            .map_err(|source| FileStoreError::WriteValue {
                path: staging.clone(),
                source,
            })?;
        fs::rename(&staging, &path)
            .await
            .map_err(|source| FileStoreError::ReplaceValue { path, source })
    }

    async fn check_root(&self) -> FileResult<()> {
        let metadata = fs::metadata(self.root.as_path()).await.map_err(|source| {
            FileStoreError::RootUnavailable {
                path: self.root.as_ref().clone(),
                source,
            }
        })?;

        if metadata.is_dir() {
            Ok(())
        } else {
            Err(FileStoreError::RootNotADirectory {
                path: self.root.as_ref().clone(),
            })
        }
    }
}

impl KeyValueStore for FileKvStore {
    fn get(&self, key: String) -> BoxFuture<'static, StorageResult<Option<String>>> {
        let store = self.clone();
        Box::pin(async move { store.read_value(&key).await.map_err(Into::into) })
    }

    fn set(&self, key: String, value: String) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.write_value(&key, &value).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.check_root().await.map_err(Into::into) })
    }
}

/// Map an arbitrary storage key to a safe file name.
///
/// Alphanumerics, `-`, `_`, and `.` pass through; every other byte becomes
/// `%XX`, so keys like `FLASHCARDS:DATABASE` stay portable across filesystems.
fn encode_key(key: &str) -> String {
    let mut name = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' => name.push(byte as char),
            other => {
                let _ = write!(name, "%{other:02X}");
            }
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn open(dir: &tempfile::TempDir) -> FileKvStore {
        FileKvStore::connect(FileStoreConfig::new(dir.path()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn missing_key_reads_back_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = open(&dir).await;
        assert_eq!(store.get("absent".into()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = open(&dir).await;

        store
            .set("FLASHCARDS:DATABASE".into(), "{}".into())
            .await
            .unwrap();
        assert_eq!(
            store
                .get("FLASHCARDS:DATABASE".into())
                .await
                .unwrap()
                .as_deref(),
            Some("{}")
        );
    }

    #[tokio::test]
    async fn values_survive_reopening_the_store() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = open(&dir).await;
            store.set("k".into(), "persisted".into()).await.unwrap();
        }

        let reopened = open(&dir).await;
        assert_eq!(
            reopened.get("k".into()).await.unwrap().as_deref(),
            Some("persisted")
        );
    }

    #[tokio::test]
    async fn health_check_reports_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = open(&dir).await;
        store.health_check().await.unwrap();

        drop(dir);
        assert!(store.health_check().await.is_err());
    }

    #[test]
    fn keys_with_separators_encode_to_flat_names() {
        assert_eq!(encode_key("FLASHCARDS:DATABASE"), "FLASHCARDS%3ADATABASE");
        assert_eq!(encode_key("a/b"), "a%2Fb");
        assert_eq!(encode_key("plain-key_1.0"), "plain-key_1.0");
    }
}
