use std::path::PathBuf;

use super::error::{FileResult, FileStoreError};

/// Runtime configuration describing where the file backend keeps its data.
#[derive(Debug, Clone)]
pub struct FileStoreConfig {
    /// Directory holding one file per storage key.
    pub root: PathBuf,
}

impl FileStoreConfig {
    /// Construct a configuration from an explicit data directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Build a configuration by reading the expected environment variable.
    pub fn from_env() -> FileResult<Self> {
        let root = std::env::var("FLASHCARDS_DATA_DIR").map_err(|_| {
            FileStoreError::MissingEnvVar {
                var: "FLASHCARDS_DATA_DIR",
            }
        })?;
        Ok(Self::new(root))
    }
}
