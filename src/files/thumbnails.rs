//! Best-effort file thumbnails.
//!
//! Dispatches on the MIME-type prefix and produces a layered icon, or
//! absence when the file is gone or nothing displayable can be derived.
//! Decoding runs on the blocking pool.

use std::path::Path;

use image::DynamicImage;

use crate::icons::{IconLayer, LauncherIcon};
use crate::platform::{ArchiveIcon, Platform};

use super::LocalFile;

/// MIME type of installable application archives.
pub const PACKAGE_ARCHIVE_MIME: &str = "application/vnd.android.package-archive";

/// Scale for adaptive archive icon layers.
const ADAPTIVE_LAYER_SCALE: f32 = 1.5;

/// Scale for flat archive icons wrapped onto a generated background.
const FLAT_ICON_SCALE: f32 = 0.7;

pub(super) async fn load_icon(
    file: &LocalFile,
    platform: &Platform,
    size: u32,
    _themed: bool,
) -> Option<LauncherIcon> {
    let path = Path::new(&file.path);
    if !path.exists() {
        return None;
    }

    if file.mime_type.starts_with("image/") {
        let path = file.path.clone();
        let thumbnail = tokio::task::spawn_blocking(move || {
            image::open(&path).ok().map(|img| square_thumbnail(img, size))
        })
        .await
        .ok()
        .flatten()?;
        return Some(LauncherIcon::from_thumbnail(thumbnail));
    }

    if file.mime_type.starts_with("video/") {
        let frame = platform.media.video_thumbnail(path, size).await?;
        return Some(LauncherIcon::from_thumbnail(square_thumbnail(frame, size)));
    }

    if file.mime_type.starts_with("audio/") {
        let artwork = platform.media.embedded_artwork(path).await?;
        let thumbnail = tokio::task::spawn_blocking(move || {
            image::load_from_memory(&artwork)
                .ok()
                .map(|img| square_thumbnail(img, size))
        })
        .await
        .ok()
        .flatten()?;
        return Some(LauncherIcon::from_thumbnail(thumbnail));
    }

    if file.mime_type == PACKAGE_ARCHIVE_MIME {
        let icon = platform.archives.icon(path).await?;
        return Some(match icon {
            ArchiveIcon::Adaptive {
                foreground,
                background,
            } => LauncherIcon {
                foreground: adaptive_layer(foreground),
                background: adaptive_layer(background),
            },
            ArchiveIcon::Flat(image) => LauncherIcon {
                foreground: IconLayer::Static {
                    image,
                    scale: FLAT_ICON_SCALE,
                },
                background: IconLayer::Color,
            },
        });
    }

    None
}

fn adaptive_layer(image: Option<DynamicImage>) -> IconLayer {
    match image {
        Some(image) => IconLayer::Static {
            image,
            scale: ADAPTIVE_LAYER_SCALE,
        },
        None => IconLayer::Transparent,
    }
}

/// Center-crop to a square, then scale to the target edge size.
fn square_thumbnail(image: DynamicImage, size: u32) -> DynamicImage {
    let (w, h) = (image.width(), image.height());
    let edge = w.min(h);
    if edge == 0 {
        return image;
    }
    image
        .crop_imm((w - edge) / 2, (h - edge) / 2, edge, edge)
        .thumbnail_exact(size, size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform;
    use crate::platform::testing::{FakeArchives, FakeMedia};
    use crate::search::SavableSearchable;
    use image::RgbaImage;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn file_at(path: &Path, mime: &str) -> LocalFile {
        LocalFile::new(1, path.to_str().unwrap().to_string(), mime.to_string(), 0, false)
    }

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(w, h));
        let mut bytes = std::io::Cursor::new(Vec::new());
        img.write_to(&mut bytes, image::ImageOutputFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    #[tokio::test]
    async fn test_absence_for_unhandled_mime() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.bin");
        std::fs::write(&path, b"binary").unwrap();

        let platform = platform::testing::platform();
        let f = file_at(&path, "application/octet-stream");

        assert!(f.load_icon(&platform, 48, false).await.is_none());
    }

    #[tokio::test]
    async fn test_absence_when_file_is_gone_regardless_of_mime() {
        let platform = platform::testing::platform();

        for mime in ["image/png", "video/mp4", "audio/ogg", PACKAGE_ARCHIVE_MIME] {
            let f = LocalFile::new(1, "/nonexistent/x".to_string(), mime.to_string(), 0, false);
            assert!(f.load_icon(&platform, 48, false).await.is_none());
        }
    }

    #[tokio::test]
    async fn test_image_thumbnail_is_square() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("photo.png");
        std::fs::write(&path, png_bytes(16, 8)).unwrap();

        let platform = platform::testing::platform();
        let f = file_at(&path, "image/png");

        let icon = f.load_icon(&platform, 4, false).await.unwrap();
        match icon.foreground {
            IconLayer::Static { image, scale } => {
                assert_eq!((image.width(), image.height()), (4, 4));
                assert_eq!(scale, 1.0);
            }
            other => panic!("unexpected foreground layer: {other:?}"),
        }
        assert!(matches!(icon.background, IconLayer::Color));
    }

    #[tokio::test]
    async fn test_audio_artwork_thumbnail() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("track.ogg");
        std::fs::write(&path, b"not actually audio").unwrap();

        let mut platform = platform::testing::platform();
        platform.media = Arc::new(FakeMedia {
            artwork: Some(png_bytes(8, 8)),
            ..FakeMedia::default()
        });

        let f = file_at(&path, "audio/ogg");
        assert!(f.load_icon(&platform, 4, false).await.is_some());
    }

    #[tokio::test]
    async fn test_audio_without_artwork_is_absent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("track.ogg");
        std::fs::write(&path, b"not actually audio").unwrap();

        let platform = platform::testing::platform();
        let f = file_at(&path, "audio/ogg");

        assert!(f.load_icon(&platform, 4, false).await.is_none());
    }

    #[tokio::test]
    async fn test_adaptive_archive_icon_layers() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.apk");
        std::fs::write(&path, b"zip").unwrap();

        let mut platform = platform::testing::platform();
        platform.archives = Arc::new(FakeArchives {
            archive_icon: Some(ArchiveIcon::Adaptive {
                foreground: Some(DynamicImage::ImageRgba8(RgbaImage::new(8, 8))),
                background: None,
            }),
            ..FakeArchives::default()
        });

        let f = file_at(&path, PACKAGE_ARCHIVE_MIME);
        let icon = f.load_icon(&platform, 48, false).await.unwrap();

        assert!(
            matches!(icon.foreground, IconLayer::Static { scale, .. } if scale == ADAPTIVE_LAYER_SCALE)
        );
        assert!(matches!(icon.background, IconLayer::Transparent));
    }

    #[tokio::test]
    async fn test_flat_archive_icon_gets_generated_background() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.apk");
        std::fs::write(&path, b"zip").unwrap();

        let mut platform = platform::testing::platform();
        platform.archives = Arc::new(FakeArchives {
            archive_icon: Some(ArchiveIcon::Flat(DynamicImage::ImageRgba8(RgbaImage::new(
                8, 8,
            )))),
            ..FakeArchives::default()
        });

        let f = file_at(&path, PACKAGE_ARCHIVE_MIME);
        let icon = f.load_icon(&platform, 48, false).await.unwrap();

        assert!(
            matches!(icon.foreground, IconLayer::Static { scale, .. } if scale == FLAT_ICON_SCALE)
        );
        assert!(matches!(icon.background, IconLayer::Color));
    }

    #[test]
    fn test_square_thumbnail_center_crops() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(100, 40));
        let thumb = square_thumbnail(img, 10);
        assert_eq!((thumb.width(), thumb.height()), (10, 10));
    }
}
