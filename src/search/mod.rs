//! Searchable entity contracts.
//!
//! Everything the launcher can surface (files, apps, contacts) is a
//! [`Searchable`]. Entities that can be pinned, launched, and restored
//! across sessions additionally implement [`SavableSearchable`], which
//! fixes their identity as `"{domain}://{identifier}"`.
//!
//! Capabilities beyond the base contract (file accessors, deferred
//! refresh) are modeled as dedicated accessors with absent defaults
//! rather than downcasts, so the set of entity kinds stays closed and
//! explicit.

mod deferred;

pub use deferred::DeferredUpdate;

use async_trait::async_trait;

use crate::icons::{IconRef, LauncherIcon};
use crate::platform::Platform;

/// Base trait for anything the launcher can display.
pub trait Searchable: Send + Sync {
    /// File-backed entities return their file accessors here; everything
    /// else reports absence.
    fn as_file(&self) -> Option<&dyn FileEntity> {
        None
    }
}

/// A discoverable, launchable item with a stable identity.
#[async_trait]
pub trait SavableSearchable: Searchable {
    /// Entity kind, e.g. `"file"`.
    fn domain(&self) -> &str;

    /// Identity of this entity within its domain.
    fn identifier(&self) -> &str;

    /// Globally unique, stable key. Two entities with the same domain and
    /// identifier are the same entity, label overrides notwithstanding.
    fn key(&self) -> String {
        format!("{}://{}", self.domain(), self.identifier())
    }

    /// Intrinsic display label.
    fn label(&self) -> &str;

    /// User-assigned label, if any.
    fn label_override(&self) -> Option<&str> {
        None
    }

    /// The label frontends should render.
    fn display_label(&self) -> &str {
        self.label_override().unwrap_or_else(|| self.label())
    }

    /// Copy of this entity with a user-assigned label. Does not change
    /// the entity's key.
    fn with_label_override(&self, label: &str) -> Box<dyn SavableSearchable>;

    fn is_stored_in_cloud(&self) -> bool {
        false
    }

    /// Best-effort icon for this entity, `None` when no icon or thumbnail
    /// can be derived. Blocking work is dispatched off the caller's
    /// thread; callers may await this without blocking rendering.
    async fn load_icon(
        &self,
        platform: &Platform,
        size: u32,
        themed: bool,
    ) -> Option<LauncherIcon>;

    /// Open this entity with the system handler. Returns whether any
    /// launch attempt succeeded.
    fn launch(&self, platform: &Platform) -> bool;

    fn can_share(&self) -> bool {
        false
    }

    fn share(&self, _platform: &Platform) {}

    /// Whether [`delete`](Self::delete) may be offered. Deletion itself
    /// does not re-check this.
    fn is_deletable(&self) -> bool {
        false
    }

    /// Generic cleanup hook that runs before entity-specific deletion.
    async fn on_delete(&self, _platform: &Platform) {}

    /// Remove the entity and its backing records. Each step is attempted
    /// independently; a partial failure does not stop the rest.
    async fn delete(&self, platform: &Platform) {
        self.on_delete(platform).await;
    }

    /// Optional in-flight refresh of this entity. Entities that cannot
    /// refresh themselves report absence; see [`DeferredUpdate`] for the
    /// consumer contract.
    fn updated_self(&self, _platform: &Platform) -> Option<DeferredUpdate> {
        None
    }
}

/// Accessors of file-backed entities.
pub trait FileEntity: Send + Sync {
    fn path(&self) -> &str;

    fn mime_type(&self) -> &str;

    /// Size in bytes.
    fn size(&self) -> u64;

    fn is_directory(&self) -> bool;

    /// Structured metadata as ordered (field, value) pairs.
    fn meta_data(&self) -> &[(MetaField, String)];

    /// Icon of the storage provider this file came from, for files
    /// surfaced by a cloud-storage plugin.
    fn provider_icon(&self) -> Option<&IconRef> {
        None
    }
}

/// Label keys for file metadata rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaField {
    Title,
    Artist,
    Album,
    Duration,
    Year,
    Dimensions,
    Location,
    AppName,
    AppPackageName,
    AppVersion,
    AppMinVersion,
}
