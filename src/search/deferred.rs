//! Deferred entity refresh.
//!
//! An already-displayed entity may expose an in-flight computation that
//! resolves to an updated copy of itself, or to absence when the entity
//! no longer exists. Consumers await the update without blocking the
//! initial render and swap the displayed entity on resolution, keeping
//! the stale one if the update reports absence.
//!
//! The capability itself mandates no retry or cancellation policy;
//! cancellation is the caller's responsibility, typically bound to the
//! visible lifetime of the consuming view.

use tokio::task::JoinHandle;

use super::SavableSearchable;

/// Handle to an in-flight refresh of a [`SavableSearchable`].
pub struct DeferredUpdate {
    handle: JoinHandle<Option<Box<dyn SavableSearchable>>>,
}

impl DeferredUpdate {
    /// Start the refresh on the current runtime.
    pub fn spawn<F>(fut: F) -> Self
    where
        F: std::future::Future<Output = Option<Box<dyn SavableSearchable>>> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(fut),
        }
    }

    /// Await the refreshed entity. Resolves to `None` when the entity is
    /// gone, or when the update was aborted.
    pub async fn resolve(self) -> Option<Box<dyn SavableSearchable>> {
        self.handle.await.ok().flatten()
    }

    /// Cancel the in-flight refresh.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::LocalFile;

    fn entity() -> Box<dyn SavableSearchable> {
        Box::new(LocalFile::new(
            7,
            "/tmp/notes.txt".to_string(),
            "text/plain".to_string(),
            42,
            false,
        ))
    }

    #[tokio::test]
    async fn test_resolves_to_updated_entity() {
        let update = DeferredUpdate::spawn(async { Some(entity()) });
        let updated = update.resolve().await;
        assert_eq!(updated.unwrap().key(), "file:///tmp/notes.txt");
    }

    #[tokio::test]
    async fn test_resolves_to_absence() {
        let update = DeferredUpdate::spawn(async { None });
        assert!(update.resolve().await.is_none());
    }

    #[tokio::test]
    async fn test_aborted_update_is_absence() {
        let update = DeferredUpdate::spawn(async {
            tokio::time::sleep(std::time::Duration::from_secs(60)).await;
            Some(entity())
        });
        update.abort();
        assert!(update.resolve().await.is_none());
    }
}
