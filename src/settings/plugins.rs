//! Plugin package settings projection.
//!
//! Given a package identifier, tracks the resolved package through the
//! plugin host and derives icon, offered plugin types, and per-entry
//! states from it. Switching the identifier cancels the previous
//! subscription before the new one starts; releasing the view keeps the
//! subscription alive for a short grace period so a quickly recreated
//! screen resumes without a reload.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::icons::LauncherIcon;
use crate::plugins::{PluginHost, PluginPackage, PluginState, PluginType};

/// Grace period before an unobserved subscription is torn down.
const RELEASE_GRACE: Duration = Duration::from_millis(100);

/// Reactive view over one plugin package.
pub struct PluginPackageView {
    host: Arc<dyn PluginHost>,
    tx: watch::Sender<Option<PluginPackage>>,
    forward: Mutex<Option<JoinHandle<()>>>,
    icon_cache: tokio::sync::Mutex<Option<(String, Option<LauncherIcon>)>>,
}

impl PluginPackageView {
    pub fn new(host: Arc<dyn PluginHost>) -> Self {
        let (tx, _) = watch::channel(None);
        Self {
            host,
            tx,
            forward: Mutex::new(None),
            icon_cache: tokio::sync::Mutex::new(None),
        }
    }

    /// Point the view at a package. The previous package subscription, if
    /// any, is cancelled before the new one starts.
    pub fn init(&self, package_name: &str) {
        let mut upstream = self.host.plugin_package(package_name);
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            tx.send_replace(upstream.borrow_and_update().clone());
            while upstream.changed().await.is_ok() {
                let next = upstream.borrow_and_update().clone();
                tx.send_replace(next);
            }
        });

        let previous = self.forward.lock().unwrap().replace(task);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// The resolved package, reactively. Holds absence while no package
    /// is resolved.
    pub fn package(&self) -> watch::Receiver<Option<PluginPackage>> {
        self.tx.subscribe()
    }

    fn current(&self) -> Option<PluginPackage> {
        self.tx.borrow().clone()
    }

    /// Icon of the resolved package. Recomputed only when the package
    /// identity changes, not on every package update.
    pub async fn icon(&self) -> Option<LauncherIcon> {
        let package = self.current()?;

        let mut cache = self.icon_cache.lock().await;
        if let Some((name, icon)) = cache.as_ref() {
            if *name == package.package_name {
                return icon.clone();
            }
        }

        let icon = self.host.package_icon(&package).await;
        *cache = Some((package.package_name.clone(), icon.clone()));
        icon
    }

    /// Distinct plugin types offered by the resolved package, in package
    /// order.
    pub fn plugin_types(&self) -> Vec<PluginType> {
        let mut types = Vec::new();
        if let Some(package) = self.current() {
            for plugin in &package.plugins {
                if !types.contains(&plugin.plugin_type) {
                    types.push(plugin.plugin_type);
                }
            }
        }
        types
    }

    /// Per-entry plugin states, in package order.
    pub async fn plugin_states(&self) -> Vec<Option<PluginState>> {
        let Some(package) = self.current() else {
            return Vec::new();
        };

        let mut states = Vec::with_capacity(package.plugins.len());
        for plugin in &package.plugins {
            states.push(self.host.plugin_state(plugin).await);
        }
        states
    }

    /// Enable or disable the resolved package. No-op while nothing is
    /// resolved.
    pub async fn set_enabled(&self, enabled: bool) {
        let Some(package) = self.current() else {
            return;
        };
        if enabled {
            self.host.enable_package(&package).await;
        } else {
            self.host.disable_package(&package).await;
        }
    }

    /// Uninstall the resolved package. No-op while nothing is resolved.
    pub async fn uninstall(&self) {
        let Some(package) = self.current() else {
            return;
        };
        self.host.uninstall_package(&package).await;
    }

    /// Signal that no frontend is observing this view. The subscription
    /// survives for a short grace period to tolerate rapid resubscription.
    pub fn release(&self) {
        if let Some(task) = self.forward.lock().unwrap().as_ref() {
            let abort = task.abort_handle();
            tokio::spawn(async move {
                tokio::time::sleep(RELEASE_GRACE).await;
                abort.abort();
            });
        }
    }
}

impl Drop for PluginPackageView {
    fn drop(&mut self) {
        if let Some(task) = self.forward.lock().unwrap().take() {
            task.abort();
        }
    }
}
