//! Location-search settings projection.

use std::sync::Arc;

use tokio::sync::watch;

use crate::config::{Config, SettingsStore};

/// State holder for the location-search settings screen: an enabled flag
/// and a search radius, both persisted through the settings store.
pub struct LocationSearchSettings {
    store: Arc<SettingsStore>,
}

impl LocationSearchSettings {
    pub fn new(store: Arc<SettingsStore>) -> Self {
        Self { store }
    }

    pub fn enabled(&self) -> bool {
        self.store.snapshot().location_search.enabled
    }

    /// Search radius in meters.
    pub fn search_radius(&self) -> u32 {
        self.store.snapshot().location_search.search_radius
    }

    /// Change notification for the underlying config.
    pub fn subscribe(&self) -> watch::Receiver<Config> {
        self.store.data()
    }

    pub async fn set_enabled(&self, enabled: bool) {
        let committed = self
            .store
            .update(|c| c.location_search.enabled = enabled)
            .await;
        if let Err(e) = committed {
            tracing::warn!("failed to persist location search flag: {e}");
        }
    }

    pub async fn set_search_radius(&self, radius: u32) {
        let committed = self
            .store
            .update(|c| c.location_search.search_radius = radius)
            .await;
        if let Err(e) = committed {
            tracing::warn!("failed to persist location search radius: {e}");
        }
    }
}
