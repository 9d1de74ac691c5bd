//! Trailer selection for the video overlay.

use flixrow_api::tmdb::TmdbVideo;

/// Video type preferred for playback.
const TRAILER_TYPE: &str = "Trailer";

/// Hosting site the player can embed.
const TRAILER_SITE: &str = "YouTube";

/// Picks the video to play: the first YouTube trailer, else the first
/// video of any kind. `None` only when `videos` is empty.
#[must_use]
pub fn select_trailer(videos: &[TmdbVideo]) -> Option<&TmdbVideo> {
    videos
        .iter()
        .find(|v| v.video_type == TRAILER_TYPE && v.site == TRAILER_SITE)
        .or_else(|| videos.first())
}

/// State of the trailer overlay.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VideoSelection {
    /// YouTube video key; empty when closed.
    pub video_key: String,
    /// Title shown above the player; empty when closed.
    pub title: String,
    /// Whether the overlay is open.
    pub is_open: bool,
}

impl VideoSelection {
    /// An open overlay playing `video_key`.
    #[must_use]
    pub fn open(video_key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            video_key: video_key.into(),
            title: title.into(),
            is_open: true,
        }
    }

    /// A closed overlay.
    #[must_use]
    pub fn closed() -> Self {
        Self::default()
    }

    /// Watch URL, or `None` when closed.
    #[must_use]
    pub fn watch_url(&self) -> Option<String> {
        self.is_open
            .then(|| format!("https://www.youtube.com/watch?v={}", self.video_key))
    }

    /// Autoplaying embed URL, or `None` when closed.
    #[must_use]
    pub fn embed_url(&self) -> Option<String> {
        self.is_open.then(|| {
            format!(
                "https://www.youtube.com/embed/{}?autoplay=1&controls=1&rel=0",
                self.video_key
            )
        })
    }
}
