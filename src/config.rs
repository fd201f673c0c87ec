//! Deck store configuration loading, including the persisted storage key.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the library looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/deck-store.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "FLASHDECK_CONFIG_PATH";
/// Storage key used when no configuration overrides it.
const DEFAULT_STORAGE_KEY: &str = "FLASHCARDS:DATABASE";

#[derive(Debug, Clone)]
/// Immutable runtime configuration for the deck store.
pub struct DeckStoreConfig {
    storage_key: String,
}

impl DeckStoreConfig {
    /// Load the configuration from disk, falling back to the baked-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        key = %config.storage_key,
                        "loaded deck store configuration"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Configuration persisting under an explicit storage key.
    ///
    /// Tests use this to give every run its own namespace instead of sharing
    /// the process-wide default key.
    pub fn with_storage_key(key: impl Into<String>) -> Self {
        Self {
            storage_key: key.into(),
        }
    }

    /// Key under which the serialized deck collection is stored.
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }
}

impl Default for DeckStoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    storage_key: String,
}

impl From<RawConfig> for DeckStoreConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            storage_key: value.storage_key,
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_the_shared_storage_key() {
        let config = DeckStoreConfig::default();
        assert_eq!(config.storage_key(), "FLASHCARDS:DATABASE");
    }

    #[test]
    fn explicit_key_overrides_the_default() {
        let config = DeckStoreConfig::with_storage_key("test:namespace");
        assert_eq!(config.storage_key(), "test:namespace");
    }

    #[test]
    fn raw_config_converts_into_runtime_config() {
        let raw: RawConfig = serde_json::from_str(r#"{"storage_key":"CUSTOM"}"#).unwrap();
        let config: DeckStoreConfig = raw.into();
        assert_eq!(config.storage_key(), "CUSTOM");
    }
}
