//! Error types shared by the file-backed storage implementation.

use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias returning [`FileStoreError`] failures.
pub type FileResult<T> = Result<T, FileStoreError>;

/// Failures that can occur while reading or writing value files.
#[derive(Debug, Error)]
pub enum FileStoreError {
    /// Required environment variable is missing.
    #[error("missing file store environment variable `{var}`")]
    MissingEnvVar {
        /// Name of the missing variable.
        var: &'static str,
    },
    /// The data directory could not be created.
    #[error("failed to create file store root `{}`", path.display())]
    CreateRoot {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The data directory is missing or unreadable.
    #[error("file store root `{}` is not usable", path.display())]
    RootUnavailable {
        /// Directory that was being checked.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The configured root path exists but is not a directory.
    #[error("file store root `{}` is not a directory", path.display())]
    RootNotADirectory {
        /// Offending path.
        path: PathBuf,
    },
    /// A value file could not be read.
    #[error("failed to read value file `{}`", path.display())]
    ReadValue {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// A staged value file could not be written.
    #[error("failed to write value file `{}`", path.display())]
    WriteValue {
        /// File that was being written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Moving a staged value file into place failed.
    #[error("failed to replace value file `{}`", path.display())]
    ReplaceValue {
        /// Destination file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}
