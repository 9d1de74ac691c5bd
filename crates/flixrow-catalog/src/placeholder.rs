//! Static sample content used when the provider yields nothing.

use flixrow_api::tmdb::TmdbMovie;

use crate::media::MediaItem;

/// YouTube key played when a title has no usable video.
pub const PLACEHOLDER_VIDEO_KEY: &str = "dQw4w9WgXcQ";

/// Poster path of the sample items.
const SAMPLE_POSTER: &str = "/api/placeholder/300/450";

/// Backdrop path of the sample items.
const SAMPLE_BACKDROP: &str = "/api/placeholder/1280/720";

/// Returns a fresh copy of the two sample titles.
#[must_use]
pub fn placeholder_items() -> Vec<MediaItem> {
    vec![
        sample(
            1,
            "Stranger Things",
            "When a young boy vanishes, a small town uncovers a mystery involving secret \
             experiments, terrifying supernatural forces, and one strange little girl.",
        ),
        sample(
            2,
            "The Crown",
            "Follows the political rivalries and romance of Queen Elizabeth II's reign and the \
             events that shaped the second half of the twentieth century.",
        ),
    ]
}

fn sample(id: u64, title: &str, overview: &str) -> MediaItem {
    MediaItem::Movie(TmdbMovie {
        id,
        title: String::from(title),
        overview: Some(String::from(overview)),
        poster_path: Some(String::from(SAMPLE_POSTER)),
        backdrop_path: Some(String::from(SAMPLE_BACKDROP)),
        release_date: None,
        vote_average: None,
        genre_ids: Vec::new(),
    })
}
