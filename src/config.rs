//! Configuration loading and the persisted settings store.
//!
//! Configuration is a TOML file in the user config directory, parsed
//! section-by-section with serde defaults so that a partial or missing
//! file always yields a usable config. [`SettingsStore`] wraps the parsed
//! config with atomic read-modify-write updates (write to a temp file,
//! then rename) and broadcasts every committed change over a watch
//! channel for reactive consumers.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{watch, Mutex};

use crate::error::{LumenError, LumenResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub location_search: LocationSearchConfig,
    pub weather: WeatherConfig,
}

/// Settings for the location-search feature (enabled flag + search radius).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationSearchConfig {
    pub enabled: bool,
    /// Search radius in meters.
    pub search_radius: u32,
}

impl Default for LocationSearchConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            search_radius: 1000,
        }
    }
}

/// Weather provider selection and provider bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Name of the active provider implementation.
    pub provider: String,

    /// Credential for the provider's HTTP API, if it needs one.
    pub api_key: Option<String>,

    /// Time of the last successful forecast update.
    pub last_update: Option<DateTime<Utc>>,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            provider: "here".to_string(),
            api_key: None,
            last_update: None,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                // ~ is not expanded by PathBuf, so fall back through home_dir
                dirs::home_dir()
                    .map(|h| h.join(".config"))
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
            })
            .join("lumen")
            .join("config.toml")
    }
}

/// Persistent, watchable settings store.
///
/// Each [`update`](Self::update) call is atomic: the closure runs under a
/// lock against the current config, and the result is committed to disk
/// via temp-file-then-rename before observers are notified.
pub struct SettingsStore {
    path: PathBuf,
    current: Mutex<Config>,
    tx: watch::Sender<Config>,
}

impl SettingsStore {
    /// Open the store at the default config path.
    pub fn load() -> LumenResult<Arc<Self>> {
        Self::open(Config::config_path())
    }

    /// Open the store at an explicit path, creating defaults if the file
    /// does not exist yet.
    pub fn open(path: PathBuf) -> LumenResult<Arc<Self>> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("failed to parse {}: {e}", path.display());
                    Config::default()
                }
            }
        } else {
            Config::default()
        };

        let (tx, _) = watch::channel(config.clone());
        Ok(Arc::new(Self {
            path,
            current: Mutex::new(config),
            tx,
        }))
    }

    /// Subscribe to config changes. The receiver always holds the most
    /// recently committed config.
    pub fn data(&self) -> watch::Receiver<Config> {
        self.tx.subscribe()
    }

    /// Snapshot of the current config.
    pub async fn get(&self) -> Config {
        self.current.lock().await.clone()
    }

    /// Snapshot of the most recently committed config, without awaiting.
    /// May trail an in-flight [`update`](Self::update) by one commit.
    pub fn snapshot(&self) -> Config {
        self.tx.borrow().clone()
    }

    /// Atomically read-modify-write the config.
    pub async fn update<F>(&self, f: F) -> LumenResult<()>
    where
        F: FnOnce(&mut Config),
    {
        let mut guard = self.current.lock().await;
        let mut next = guard.clone();
        f(&mut next);

        if next != *guard {
            self.persist(&next).await?;
            *guard = next.clone();
            self.tx.send_replace(next);
        }
        Ok(())
    }

    async fn persist(&self, config: &Config) -> LumenResult<()> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| LumenError::Config("config path has no parent".to_string()))?;
        tokio::fs::create_dir_all(parent).await?;

        let content = toml::to_string_pretty(config)?;
        let tmp = self.path.with_extension("toml.tmp");
        tokio::fs::write(&tmp, content).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
