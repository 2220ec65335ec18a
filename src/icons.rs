//! Launcher icon model.
//!
//! Icons are composed of a foreground and a background layer so that
//! frontends can render them adaptively (masked shapes, themed
//! backgrounds). Thumbnails and badges both end up here.

use image::DynamicImage;

/// A single layer of a launcher icon.
#[derive(Debug, Clone)]
pub enum IconLayer {
    /// A rasterized image, scaled relative to the icon bounds.
    Static { image: DynamicImage, scale: f32 },

    /// A solid fill; the concrete color is picked by the frontend theme.
    Color,

    /// Nothing is drawn for this layer.
    Transparent,
}

/// A two-layer icon as displayed by the launcher.
#[derive(Debug, Clone)]
pub struct LauncherIcon {
    pub foreground: IconLayer,
    pub background: IconLayer,
}

impl LauncherIcon {
    /// A static image at full scale over a themed background.
    pub fn from_thumbnail(image: DynamicImage) -> Self {
        Self {
            foreground: IconLayer::Static { image, scale: 1.0 },
            background: IconLayer::Color,
        }
    }
}

/// Reference to a named icon resource bundled with the frontend.
///
/// Used where an icon is identified rather than rasterized, e.g. the
/// cloud-storage origin marker a badge points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IconRef(String);

impl IconRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}
