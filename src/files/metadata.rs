//! Structured file metadata extraction.
//!
//! Per MIME category, pulls displayable (field, value) rows out of the
//! file: tags for audio, stream properties for video, dimensions and EXIF
//! location for images, application info for package archives. Everything
//! is best-effort; a category that yields nothing produces an empty list.

use std::io::BufReader;
use std::path::Path;

use crate::platform::Platform;
use crate::search::MetaField;

use super::thumbnails::PACKAGE_ARCHIVE_MIME;

/// Extract metadata rows for a file of the given MIME type.
pub async fn extract_metadata(
    platform: &Platform,
    mime_type: &str,
    path: &str,
) -> Vec<(MetaField, String)> {
    let mut meta = Vec::new();

    if mime_type.starts_with("audio/") {
        if let Some(tags) = platform.media.audio_tags(Path::new(path)).await {
            if let Some(title) = tags.title {
                meta.push((MetaField::Title, title));
            }
            if let Some(artist) = tags.artist {
                meta.push((MetaField::Artist, artist));
            }
            if let Some(album) = tags.album {
                meta.push((MetaField::Album, album));
            }
            if let Some(year) = tags.year {
                meta.push((MetaField::Year, year));
            }
            if let Some(duration) = tags.duration_ms {
                let at = meta.len().min(3);
                meta.insert(at, (MetaField::Duration, format_elapsed(duration / 1000)));
            }
        }
    } else if mime_type.starts_with("video/") {
        if let Some(info) = platform.media.video_info(Path::new(path)).await {
            meta.push((
                MetaField::Dimensions,
                format!("{}x{}", info.width, info.height),
            ));
            if let Some(duration) = info.duration_ms {
                meta.push((MetaField::Duration, format_elapsed(duration / 1000)));
            }
            if let Some((lat, lon)) = info.location {
                match platform.geocoder.reverse(lat, lon).await {
                    Some(place) => meta.push((MetaField::Location, place)),
                    None => tracing::debug!(path, "no geocoder result for video location"),
                }
            }
        }
    } else if mime_type.starts_with("image/") {
        let owned_path = path.to_string();
        let decoded = tokio::task::spawn_blocking(move || {
            let dimensions = image::image_dimensions(&owned_path).ok();
            let gps = exif_gps(Path::new(&owned_path));
            (dimensions, gps)
        })
        .await
        .unwrap_or((None, None));

        if let (Some((width, height)), gps) = decoded {
            meta.push((MetaField::Dimensions, format!("{width}x{height}")));
            if let Some((lat, lon)) = gps {
                match platform.geocoder.reverse(lat, lon).await {
                    Some(place) => meta.push((MetaField::Location, place)),
                    None => tracing::debug!(path, "no geocoder result for image location"),
                }
            }
        }
    } else if mime_type == PACKAGE_ARCHIVE_MIME {
        if let Some(info) = platform.archives.inspect(Path::new(path)).await {
            meta.push((MetaField::AppName, info.app_name));
            meta.push((MetaField::AppPackageName, info.package_name));
            if let Some(version) = info.version {
                meta.push((MetaField::AppVersion, version));
            }
            if let Some(min) = info.min_platform_version {
                meta.push((MetaField::AppMinVersion, min.to_string()));
            }
        }
    }

    meta
}

/// Well-known MIME type for a file extension, `application/octet-stream`
/// for everything unrecognized.
pub fn mime_by_extension(extension: &str) -> &'static str {
    match extension {
        "apk" => PACKAGE_ARCHIVE_MIME,
        "zip" => "application/zip",
        "jar" => "application/java-archive",
        "txt" => "text/plain",
        "js" => "text/javascript",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "gif" => "image/gif",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "midi" => "audio/midi",
        "mp3" => "audio/mpeg3",
        "webm" => "audio/webm",
        "ogg" => "audio/ogg",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        "lumen" => "application/vnd.lumen.backup",
        "lumentheme" => "application/vnd.lumen.theme",
        _ => "application/octet-stream",
    }
}

/// Format a duration in seconds the way media players display it,
/// `m:ss` or `h:mm:ss`.
fn format_elapsed(seconds: u64) -> String {
    let (h, m, s) = (seconds / 3600, (seconds / 60) % 60, seconds % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

/// GPS coordinates embedded in an image's EXIF block.
fn exif_gps(path: &Path) -> Option<(f64, f64)> {
    let file = std::fs::File::open(path).ok()?;
    let exif = exif::Reader::new()
        .read_from_container(&mut BufReader::new(file))
        .ok()?;

    let lat = dms_degrees(&exif, exif::Tag::GPSLatitude)?
        * hemisphere_sign(&exif, exif::Tag::GPSLatitudeRef, b'S');
    let lon = dms_degrees(&exif, exif::Tag::GPSLongitude)?
        * hemisphere_sign(&exif, exif::Tag::GPSLongitudeRef, b'W');
    Some((lat, lon))
}

fn dms_degrees(exif: &exif::Exif, tag: exif::Tag) -> Option<f64> {
    let field = exif.get_field(tag, exif::In::PRIMARY)?;
    match field.value {
        exif::Value::Rational(ref dms) if dms.len() >= 3 => {
            Some(dms[0].to_f64() + dms[1].to_f64() / 60.0 + dms[2].to_f64() / 3600.0)
        }
        _ => None,
    }
}

fn hemisphere_sign(exif: &exif::Exif, tag: exif::Tag, negative: u8) -> f64 {
    match exif.get_field(tag, exif::In::PRIMARY) {
        Some(field) => match field.value {
            exif::Value::Ascii(ref refs)
                if refs.first().map_or(false, |r| r.first() == Some(&negative)) =>
            {
                -1.0
            }
            _ => 1.0,
        },
        None => 1.0,
    }
}
