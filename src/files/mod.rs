//! Local file search results.
//!
//! A [`LocalFile`] is one row of the platform storage index turned into a
//! launchable entity: it can render a thumbnail, open with the system
//! handler, be shared, and be deleted together with its index row. Files
//! are immutable values; the only mutation is producing a copy with a
//! label override.

mod metadata;
mod thumbnails;

pub use metadata::{extract_metadata, mime_by_extension};
pub use thumbnails::PACKAGE_ARCHIVE_MIME;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::icons::LauncherIcon;
use crate::platform::{FileRecord, Platform};
use crate::search::{DeferredUpdate, FileEntity, MetaField, SavableSearchable, Searchable};

/// A file or directory on device-local storage.
#[derive(Debug, Clone)]
pub struct LocalFile {
    /// Storage index id.
    pub id: i64,
    pub path: String,
    pub mime_type: String,
    pub size: u64,
    pub is_directory: bool,
    pub meta_data: Vec<(MetaField, String)>,
    pub label_override: Option<String>,
}

impl LocalFile {
    pub const DOMAIN: &'static str = "file";

    pub fn new(id: i64, path: String, mime_type: String, size: u64, is_directory: bool) -> Self {
        Self {
            id,
            path,
            mime_type,
            size,
            is_directory,
            meta_data: Vec::new(),
            label_override: None,
        }
    }

    /// Build a file entity from its index record, extracting metadata for
    /// the record's MIME category.
    pub async fn from_record(platform: &Platform, record: FileRecord) -> Self {
        let meta_data = extract_metadata(platform, &record.mime_type, &record.path).await;
        Self {
            id: record.id,
            path: record.path,
            mime_type: record.mime_type,
            size: record.size,
            is_directory: record.is_directory,
            meta_data,
            label_override: None,
        }
    }
}

impl Searchable for LocalFile {
    fn as_file(&self) -> Option<&dyn FileEntity> {
        Some(self)
    }
}

impl FileEntity for LocalFile {
    fn path(&self) -> &str {
        &self.path
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn is_directory(&self) -> bool {
        self.is_directory
    }

    fn meta_data(&self) -> &[(MetaField, String)] {
        &self.meta_data
    }
}

#[async_trait]
impl SavableSearchable for LocalFile {
    fn domain(&self) -> &str {
        Self::DOMAIN
    }

    fn identifier(&self) -> &str {
        &self.path
    }

    fn label(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    fn label_override(&self) -> Option<&str> {
        self.label_override.as_deref()
    }

    fn with_label_override(&self, label: &str) -> Box<dyn SavableSearchable> {
        Box::new(Self {
            label_override: Some(label.to_string()),
            ..self.clone()
        })
    }

    async fn load_icon(
        &self,
        platform: &Platform,
        size: u32,
        themed: bool,
    ) -> Option<LauncherIcon> {
        thumbnails::load_icon(self, platform, size, themed).await
    }

    fn launch(&self, platform: &Platform) -> bool {
        let path = Path::new(&self.path);
        if platform.opener.open(path, &self.mime_type) {
            return true;
        }

        // starts_with allows the path to end with a slash
        if self.is_directory {
            if let Some(downloads) = &platform.downloads_dir {
                if path.starts_with(downloads) {
                    return platform.opener.open_downloads();
                }
            }
        }

        false
    }

    fn can_share(&self) -> bool {
        !self.is_directory
    }

    fn share(&self, platform: &Platform) {
        platform.opener.share(Path::new(&self.path), &self.mime_type);
    }

    fn is_deletable(&self) -> bool {
        let path = Path::new(&self.path);
        is_writable(path) && path.parent().map(is_writable).unwrap_or(false)
    }

    async fn delete(&self, platform: &Platform) {
        self.on_delete(platform).await;

        let path = PathBuf::from(&self.path);
        let is_directory = self.is_directory;
        let removed = tokio::task::spawn_blocking(move || {
            if is_directory {
                std::fs::remove_dir_all(&path)
            } else {
                std::fs::remove_file(&path)
            }
        })
        .await;
        if let Ok(Err(e)) = removed {
            tracing::warn!(path = %self.path, "failed to remove file: {e}");
        }

        // Attempted regardless of whether the filesystem entry went away
        if !platform.index.remove(self.id).await {
            tracing::debug!(id = self.id, "no index row to remove");
        }
    }

    fn updated_self(&self, platform: &Platform) -> Option<DeferredUpdate> {
        let platform = platform.clone();
        let path = self.path.clone();
        let label_override = self.label_override.clone();
        Some(DeferredUpdate::spawn(async move {
            match platform.index.lookup_by_path(&path).await {
                Some(record) => {
                    let mut updated = LocalFile::from_record(&platform, record).await;
                    updated.label_override = label_override;
                    Some(Box::new(updated) as Box<dyn SavableSearchable>)
                }
                None => None,
            }
        }))
    }
}

fn is_writable(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| !m.permissions().readonly())
        .unwrap_or(false)
}
