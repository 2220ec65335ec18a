//! Badge decoration providers.
//!
//! Badges are small transient markers attached to an entity's display
//! representation (a cloud-origin cloudlet, a work-profile dot). They
//! carry no identity and are never persisted. Providers must not fail:
//! an entity kind a provider does not understand simply yields absence.

mod cloud;

pub use cloud::CloudBadgeProvider;

use async_trait::async_trait;

use crate::icons::IconRef;
use crate::search::Searchable;

/// A decoration attached to a search result while it is displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub icon: IconRef,
}

/// Supplies at most one badge per entity.
#[async_trait]
pub trait BadgeProvider: Send + Sync {
    /// The badge for this entity, or absence. Must never panic or error
    /// for unsupported entity kinds.
    async fn badge(&self, searchable: &dyn Searchable) -> Option<Badge>;
}
