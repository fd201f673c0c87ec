mod config;
mod error;
mod store;

pub use config::FileStoreConfig;
pub use error::{FileResult, FileStoreError};
pub use store::FileKvStore;

use crate::dao::storage::StorageError;

impl From<FileStoreError> for StorageError {
    fn from(err: FileStoreError) -> Self {
        StorageError::unavailable(err.to_string(), err)
    }
}
