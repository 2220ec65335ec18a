//! Lumen - launcher core library.
//!
//! Lumen is the headless backend of a home-screen launcher: the
//! searchable-entity model, local file results with thumbnails and
//! metadata, pluggable weather and badge providers, and the reactive
//! settings projections a frontend binds to.
//!
//! # Architecture
//!
//! The library is organized into these main modules:
//!
//! - [`config`] - Configuration loading and the persisted settings store
//! - [`search`] - Searchable entity contracts and deferred refresh
//! - [`files`] - Local file entities (thumbnails, metadata, launch/delete)
//! - [`platform`] - Platform collaborator traits (opener, storage index,
//!   media retriever, package inspector, geocoder)
//! - [`weather`] - Weather provider abstraction and implementations
//! - [`badges`] - Badge decoration providers
//! - [`plugins`] - Plugin package model and host collaborator
//! - [`settings`] - Settings view state holders
//!
//! # Example
//!
//! ```ignore
//! use lumen::{Platform, SettingsStore};
//!
//! // Open the persisted settings store
//! let store = SettingsStore::load().expect("Failed to open settings");
//!
//! // Wire the platform collaborators
//! let platform = Platform::minimal(my_file_index);
//!
//! // Pick the configured weather provider
//! let weather = lumen::weather::provider_from_config(&store);
//! ```

// Public modules
pub mod badges;
pub mod config;
pub mod files;
pub mod icons;
pub mod platform;
pub mod plugins;
pub mod search;
pub mod settings;
pub mod weather;

// Internal modules
mod error;

// Re-export commonly used types for convenience
pub use config::{Config, SettingsStore};
pub use error::{LumenError, LumenResult};
pub use files::LocalFile;
pub use icons::{IconRef, LauncherIcon};
pub use platform::Platform;
pub use search::{DeferredUpdate, SavableSearchable, Searchable};
