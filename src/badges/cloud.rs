//! Cloud-storage origin badges.

use async_trait::async_trait;

use crate::search::Searchable;

use super::{Badge, BadgeProvider};

/// Marks files that were indexed from a cloud storage provider with that
/// provider's icon.
pub struct CloudBadgeProvider;

#[async_trait]
impl BadgeProvider for CloudBadgeProvider {
    async fn badge(&self, searchable: &dyn Searchable) -> Option<Badge> {
        let file = searchable.as_file()?;
        let icon = file.provider_icon()?;
        Some(Badge { icon: icon.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::LocalFile;
    use crate::search::testing::{CloudFile, PlainEntity};

    #[tokio::test]
    async fn test_cloud_file_gets_provider_badge() {
        let provider = CloudBadgeProvider;
        let file = CloudFile::new("ic_cloud_drive");

        let badge = provider.badge(&file).await.unwrap();
        assert_eq!(badge.icon.name(), "ic_cloud_drive");
    }

    #[tokio::test]
    async fn test_local_file_has_no_badge() {
        let provider = CloudBadgeProvider;
        let file = LocalFile::new(1, "/home/u/a.txt".into(), "text/plain".into(), 1, false);

        assert!(provider.badge(&file).await.is_none());
    }

    #[tokio::test]
    async fn test_non_file_entity_yields_absence() {
        let provider = CloudBadgeProvider;

        assert!(provider.badge(&PlainEntity).await.is_none());
    }
}
