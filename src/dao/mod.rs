/// Key-value storage backends and the backend abstraction.
pub mod kv_store;
/// Persisted entity definitions.
pub mod models;
/// Storage error layer shared by all backends.
pub mod storage;
