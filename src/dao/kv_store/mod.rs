/// File-per-key backend storing values under a configured directory.
#[cfg(feature = "file-store")]
pub mod file;
/// In-process backend for tests and ephemeral runs.
#[cfg(feature = "memory-store")]
pub mod memory;

use futures::future::BoxFuture;

use crate::dao::storage::StorageResult;

/// Abstraction over the key-value primitive backing the deck store.
///
/// The contract is deliberately minimal: whole-value get/set by key, no
/// partial updates, no compare-and-swap. Atomicity across a read-modify-write
/// cycle is the caller's problem (the deck service serializes those cycles
/// behind a single gate).
pub trait KeyValueStore: Send + Sync {
    /// Fetch the raw value stored under `key`, if any.
    fn get(&self, key: String) -> BoxFuture<'static, StorageResult<Option<String>>>;
    /// Replace the value stored under `key` in full, durably.
    fn set(&self, key: String, value: String) -> BoxFuture<'static, StorageResult<()>>;
    /// Verify the backend is currently usable.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}
