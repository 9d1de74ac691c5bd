//! Image CDN URL construction.

use std::fmt;

/// Base URL of the TMDB image CDN.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Placeholder returned for posters without an image path.
pub const POSTER_PLACEHOLDER: &str = "/api/placeholder/300/450";

/// Placeholder returned for backdrops without an image path.
pub const BACKDROP_PLACEHOLDER: &str = "/api/placeholder/1280/720";

/// Image size variant accepted by the CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// 300px wide.
    W300,
    /// 500px wide (poster default).
    W500,
    /// 780px wide.
    W780,
    /// 1280px wide (backdrop default).
    W1280,
    /// Original upload.
    Original,
}

impl ImageSize {
    /// Default size for posters.
    pub const POSTER: Self = Self::W500;

    /// Default size for backdrops.
    pub const BACKDROP: Self = Self::W1280;

    /// Returns the CDN path token for this size.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::W300 => "w300",
            Self::W500 => "w500",
            Self::W780 => "w780",
            Self::W1280 => "w1280",
            Self::Original => "original",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds a CDN URL for `path`, or returns `placeholder` when the path is
/// absent or empty.
#[must_use]
pub fn image_url(path: Option<&str>, size: ImageSize, placeholder: &str) -> String {
    match path {
        Some(p) if !p.is_empty() => {
            let sep = if p.starts_with('/') { "" } else { "/" };
            format!("{IMAGE_BASE_URL}/{size}{sep}{p}")
        }
        _ => String::from(placeholder),
    }
}

/// Builds a poster URL (placeholder: 300x450).
#[must_use]
pub fn poster_url(path: Option<&str>, size: ImageSize) -> String {
    image_url(path, size, POSTER_PLACEHOLDER)
}

/// Builds a backdrop URL (placeholder: 1280x720).
#[must_use]
pub fn backdrop_url(path: Option<&str>, size: ImageSize) -> String {
    image_url(path, size, BACKDROP_PLACEHOLDER)
}
