//! Settings view state holders.
//!
//! Thin reactive projections consumed by a settings frontend: each one
//! wraps a collaborator (settings store, plugin host) and exposes current
//! values plus change notification, with setters that delegate atomic
//! updates back to the collaborator.

mod banner;
mod locations;
mod plugins;

pub use banner::{BannerAction, MissingPermissionBanner};
pub use locations::LocationSearchSettings;
pub use plugins::PluginPackageView;
