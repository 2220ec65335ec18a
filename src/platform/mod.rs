//! Platform abstraction layer.
//!
//! The platform's file opener, storage index, media-metadata subsystem,
//! package inspector, and geocoder are external collaborators. Each is
//! consumed through a narrow trait so that entities and providers stay
//! testable with injected fakes, and so that a platform plugin can swap
//! in richer implementations.
//!
//! All methods are best-effort: absence means the platform could not
//! produce the value, which is always a valid outcome.

mod system;

pub use system::SystemOpener;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use image::DynamicImage;

/// A row of the platform storage index.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub id: i64,
    pub path: String,
    pub mime_type: String,
    pub size: u64,
    pub is_directory: bool,
}

/// Open files and directories with the system default handlers.
pub trait Opener: Send + Sync {
    /// Open a file or directory. Returns whether the handler accepted it.
    fn open(&self, path: &Path, mime_type: &str) -> bool;

    /// Open the downloads folder in the system file manager.
    fn open_downloads(&self) -> bool;

    /// Hand a file to the system send-to target.
    fn share(&self, path: &Path, mime_type: &str) -> bool;
}

/// Query and maintain the platform storage index.
#[async_trait]
pub trait FileIndex: Send + Sync {
    /// Look up the index record for a path.
    async fn lookup_by_path(&self, path: &str) -> Option<FileRecord>;

    /// Remove the index row for a storage id. Returns whether a row was
    /// removed.
    async fn remove(&self, id: i64) -> bool;
}

/// Tags extracted from an audio container.
#[derive(Debug, Clone, Default)]
pub struct AudioTags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<String>,
    pub duration_ms: Option<u64>,
}

/// Stream properties of a video container.
#[derive(Debug, Clone)]
pub struct VideoInfo {
    pub width: u32,
    pub height: u32,
    pub duration_ms: Option<u64>,
    /// Recording location as (latitude, longitude), when the container
    /// carries one.
    pub location: Option<(f64, f64)>,
}

/// The platform media-metadata subsystem.
#[async_trait]
pub trait MediaRetriever: Send + Sync {
    async fn audio_tags(&self, path: &Path) -> Option<AudioTags>;

    /// Embedded artwork bytes of an audio file.
    async fn embedded_artwork(&self, path: &Path) -> Option<Vec<u8>>;

    async fn video_info(&self, path: &Path) -> Option<VideoInfo>;

    /// A representative frame of a video, at roughly the given edge size.
    async fn video_thumbnail(&self, path: &Path, size: u32) -> Option<DynamicImage>;
}

/// Application info read from an installable package archive.
#[derive(Debug, Clone)]
pub struct ArchiveInfo {
    pub app_name: String,
    pub package_name: String,
    pub version: Option<String>,
    pub min_platform_version: Option<u32>,
}

/// Icon of a package archive, either split into adaptive layers or flat.
#[derive(Debug, Clone)]
pub enum ArchiveIcon {
    Adaptive {
        foreground: Option<DynamicImage>,
        background: Option<DynamicImage>,
    },
    Flat(DynamicImage),
}

/// The platform package manager's archive inspection.
#[async_trait]
pub trait ArchiveInspector: Send + Sync {
    async fn inspect(&self, path: &Path) -> Option<ArchiveInfo>;

    async fn icon(&self, path: &Path) -> Option<ArchiveIcon>;
}

/// Reverse geocoding of coordinates to a display string.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn reverse(&self, lat: f64, lon: f64) -> Option<String>;
}

/// Aggregate struct holding the platform collaborators.
#[derive(Clone)]
pub struct Platform {
    pub opener: Arc<dyn Opener>,
    pub index: Arc<dyn FileIndex>,
    pub media: Arc<dyn MediaRetriever>,
    pub archives: Arc<dyn ArchiveInspector>,
    pub geocoder: Arc<dyn Geocoder>,

    /// The user downloads directory, used by the directory launch
    /// fallback. `None` disables the fallback.
    pub downloads_dir: Option<PathBuf>,
}

impl Platform {
    /// A platform with the system opener and no media/archive/geocoding
    /// support. Platform plugins replace the absent pieces.
    pub fn minimal(index: Arc<dyn FileIndex>) -> Self {
        Self {
            opener: Arc::new(SystemOpener),
            index,
            media: Arc::new(UnsupportedMedia),
            archives: Arc::new(UnsupportedArchives),
            geocoder: Arc::new(NoGeocoder),
            downloads_dir: dirs::download_dir(),
        }
    }
}

/// Media retriever for platforms without a media subsystem.
pub struct UnsupportedMedia;

#[async_trait]
impl MediaRetriever for UnsupportedMedia {
    async fn audio_tags(&self, _path: &Path) -> Option<AudioTags> {
        None
    }

    async fn embedded_artwork(&self, _path: &Path) -> Option<Vec<u8>> {
        None
    }

    async fn video_info(&self, _path: &Path) -> Option<VideoInfo> {
        None
    }

    async fn video_thumbnail(&self, _path: &Path, _size: u32) -> Option<DynamicImage> {
        None
    }
}

/// Archive inspector for platforms without package inspection.
pub struct UnsupportedArchives;

#[async_trait]
impl ArchiveInspector for UnsupportedArchives {
    async fn inspect(&self, _path: &Path) -> Option<ArchiveInfo> {
        None
    }

    async fn icon(&self, _path: &Path) -> Option<ArchiveIcon> {
        None
    }
}

/// Geocoder that reports absence for every coordinate.
pub struct NoGeocoder;

#[async_trait]
impl Geocoder for NoGeocoder {
    async fn reverse(&self, _lat: f64, _lon: f64) -> Option<String> {
        None
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Fake collaborators for entity and provider tests.

    use super::*;
    use std::sync::Mutex;

    /// Opener that records calls and answers from a script.
    pub struct FakeOpener {
        pub open_succeeds: bool,
        pub downloads_succeeds: bool,
        pub opened: Mutex<Vec<PathBuf>>,
        pub shared: Mutex<Vec<PathBuf>>,
        pub downloads_opened: Mutex<u32>,
    }

    impl FakeOpener {
        pub fn new(open_succeeds: bool, downloads_succeeds: bool) -> Self {
            Self {
                open_succeeds,
                downloads_succeeds,
                opened: Mutex::new(Vec::new()),
                shared: Mutex::new(Vec::new()),
                downloads_opened: Mutex::new(0),
            }
        }
    }

    impl Opener for FakeOpener {
        fn open(&self, path: &Path, _mime_type: &str) -> bool {
            self.opened.lock().unwrap().push(path.to_path_buf());
            self.open_succeeds
        }

        fn open_downloads(&self) -> bool {
            *self.downloads_opened.lock().unwrap() += 1;
            self.downloads_succeeds
        }

        fn share(&self, path: &Path, _mime_type: &str) -> bool {
            self.shared.lock().unwrap().push(path.to_path_buf());
            true
        }
    }

    /// Index backed by an in-memory list of records.
    pub struct FakeIndex {
        pub records: Mutex<Vec<FileRecord>>,
        pub removed: Mutex<Vec<i64>>,
    }

    impl FakeIndex {
        pub fn new(records: Vec<FileRecord>) -> Self {
            Self {
                records: Mutex::new(records),
                removed: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl FileIndex for FakeIndex {
        async fn lookup_by_path(&self, path: &str) -> Option<FileRecord> {
            self.records
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.path == path)
                .cloned()
        }

        async fn remove(&self, id: i64) -> bool {
            self.removed.lock().unwrap().push(id);
            let mut records = self.records.lock().unwrap();
            let before = records.len();
            records.retain(|r| r.id != id);
            records.len() != before
        }
    }

    /// Media retriever answering with fixed values.
    #[derive(Default)]
    pub struct FakeMedia {
        pub tags: Option<AudioTags>,
        pub artwork: Option<Vec<u8>>,
        pub video: Option<VideoInfo>,
        pub thumbnail: Option<DynamicImage>,
    }

    #[async_trait]
    impl MediaRetriever for FakeMedia {
        async fn audio_tags(&self, _path: &Path) -> Option<AudioTags> {
            self.tags.clone()
        }

        async fn embedded_artwork(&self, _path: &Path) -> Option<Vec<u8>> {
            self.artwork.clone()
        }

        async fn video_info(&self, _path: &Path) -> Option<VideoInfo> {
            self.video.clone()
        }

        async fn video_thumbnail(&self, _path: &Path, _size: u32) -> Option<DynamicImage> {
            self.thumbnail.clone()
        }
    }

    /// Archive inspector answering with fixed values.
    #[derive(Default)]
    pub struct FakeArchives {
        pub info: Option<ArchiveInfo>,
        pub archive_icon: Option<ArchiveIcon>,
    }

    #[async_trait]
    impl ArchiveInspector for FakeArchives {
        async fn inspect(&self, _path: &Path) -> Option<ArchiveInfo> {
            self.info.clone()
        }

        async fn icon(&self, _path: &Path) -> Option<ArchiveIcon> {
            self.archive_icon.clone()
        }
    }

    /// Geocoder with a single canned answer.
    pub struct FakeGeocoder(pub Option<String>);

    #[async_trait]
    impl Geocoder for FakeGeocoder {
        async fn reverse(&self, _lat: f64, _lon: f64) -> Option<String> {
            self.0.clone()
        }
    }

    /// A platform where every collaborator reports absence.
    pub fn platform() -> Platform {
        Platform {
            opener: Arc::new(FakeOpener::new(true, true)),
            index: Arc::new(FakeIndex::new(Vec::new())),
            media: Arc::new(UnsupportedMedia),
            archives: Arc::new(UnsupportedArchives),
            geocoder: Arc::new(NoGeocoder),
            downloads_dir: None,
        }
    }
}
