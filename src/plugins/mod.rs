//! Plugin package model.
//!
//! Plugins extend the launcher with additional data sources (weather
//! providers, cloud file search). One installable package groups one or
//! more typed plugin entries; install, uninstall, and state tracking
//! live in an external plugin-management collaborator that this crate
//! only calls, through [`PluginHost`].

use async_trait::async_trait;
use tokio::sync::watch;

use crate::icons::LauncherIcon;

/// Kinds of functionality a plugin can contribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginType {
    Weather,
    FileSearch,
}

/// Readiness of one plugin entry, queried from its host package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginState {
    /// Usable as a data source right now.
    Ready,

    /// The plugin needs user interaction before it can be used.
    SetupRequired { message: Option<String> },

    /// The plugin does not have the platform permissions it needs.
    NoPermission,

    /// The host package answered, but with an unusable response.
    Error,
}

/// One typed plugin entry inside a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugin {
    /// Stable id, unique within the package.
    pub id: String,
    pub package_name: String,
    pub plugin_type: PluginType,
    pub label: String,
}

/// An installed package offering one or more plugins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginPackage {
    pub package_name: String,
    pub label: String,
    pub author: Option<String>,
    pub plugins: Vec<Plugin>,
    pub enabled: bool,
}

/// The external plugin-management collaborator.
///
/// Package resolution is reactive: the returned receiver tracks install,
/// uninstall, and state changes of the requested package for as long as
/// the caller observes it. Commands are fire-and-forget.
#[async_trait]
pub trait PluginHost: Send + Sync {
    /// Observe the package with the given name; the receiver holds
    /// absence while no such package is installed.
    fn plugin_package(&self, package_name: &str) -> watch::Receiver<Option<PluginPackage>>;

    /// Icon of an installed package.
    async fn package_icon(&self, package: &PluginPackage) -> Option<LauncherIcon>;

    /// Current state of one plugin entry.
    async fn plugin_state(&self, plugin: &Plugin) -> Option<PluginState>;

    async fn enable_package(&self, package: &PluginPackage);

    async fn disable_package(&self, package: &PluginPackage);

    async fn uninstall_package(&self, package: &PluginPackage);
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory plugin host for projection tests.

    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    pub struct FakePluginHost {
        senders: Mutex<HashMap<String, watch::Sender<Option<PluginPackage>>>>,
        pub states: Mutex<HashMap<String, PluginState>>,
        pub enabled_calls: Mutex<Vec<(String, bool)>>,
        pub uninstalled: Mutex<Vec<String>>,
        pub icon_requests: Mutex<Vec<String>>,
    }

    impl FakePluginHost {
        pub fn new() -> Self {
            Self {
                senders: Mutex::new(HashMap::new()),
                states: Mutex::new(HashMap::new()),
                enabled_calls: Mutex::new(Vec::new()),
                uninstalled: Mutex::new(Vec::new()),
                icon_requests: Mutex::new(Vec::new()),
            }
        }

        /// Install or update a package, notifying observers.
        pub fn publish(&self, package: PluginPackage) {
            let mut senders = self.senders.lock().unwrap();
            let tx = senders
                .entry(package.package_name.clone())
                .or_insert_with(|| watch::channel(None).0);
            tx.send_replace(Some(package));
        }

        pub fn remove(&self, package_name: &str) {
            if let Some(tx) = self.senders.lock().unwrap().get(package_name) {
                tx.send_replace(None);
            }
        }
    }

    #[async_trait]
    impl PluginHost for FakePluginHost {
        fn plugin_package(&self, package_name: &str) -> watch::Receiver<Option<PluginPackage>> {
            self.senders
                .lock()
                .unwrap()
                .entry(package_name.to_string())
                .or_insert_with(|| watch::channel(None).0)
                .subscribe()
        }

        async fn package_icon(&self, package: &PluginPackage) -> Option<LauncherIcon> {
            self.icon_requests
                .lock()
                .unwrap()
                .push(package.package_name.clone());
            None
        }

        async fn plugin_state(&self, plugin: &Plugin) -> Option<PluginState> {
            self.states.lock().unwrap().get(&plugin.id).cloned()
        }

        async fn enable_package(&self, package: &PluginPackage) {
            self.enabled_calls
                .lock()
                .unwrap()
                .push((package.package_name.clone(), true));
        }

        async fn disable_package(&self, package: &PluginPackage) {
            self.enabled_calls
                .lock()
                .unwrap()
                .push((package.package_name.clone(), false));
        }

        async fn uninstall_package(&self, package: &PluginPackage) {
            self.uninstalled
                .lock()
                .unwrap()
                .push(package.package_name.clone());
        }
    }
}
