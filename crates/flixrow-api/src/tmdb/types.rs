//! TMDB API response types.

use serde::Deserialize;

// --- Paged lists ---

/// Paged response shared by list endpoints (`movie/popular`,
/// `trending/movie/week`, `discover/*`, ...).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TmdbPage<T> {
    /// Current page number.
    #[serde(default)]
    pub page: u32,
    /// Page entries.
    pub results: Vec<T>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
}

/// A movie entry from a list endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TmdbMovie {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Overview text.
    pub overview: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Release date (YYYY-MM-DD).
    pub release_date: Option<String>,
    /// Vote average (0-10).
    pub vote_average: Option<f64>,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

/// A TV series entry from a list endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TmdbSeries {
    /// TMDB series ID.
    pub id: u64,
    /// Localized name.
    pub name: String,
    /// Overview text.
    pub overview: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// First air date (YYYY-MM-DD).
    pub first_air_date: Option<String>,
    /// Vote average (0-10).
    pub vote_average: Option<f64>,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Origin countries (ISO 3166-1).
    #[serde(default)]
    pub origin_country: Vec<String>,
}

// --- Videos ---

/// Response from `movie/{id}/videos` and `tv/{id}/videos`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TmdbVideoList {
    /// Owning movie or series ID.
    #[serde(default)]
    pub id: u64,
    /// Videos attached to the title.
    pub results: Vec<TmdbVideo>,
}

/// A single video attached to a title.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TmdbVideo {
    /// Site-specific video key (YouTube video ID for YouTube).
    pub key: String,
    /// Video name.
    #[serde(default)]
    pub name: String,
    /// Hosting site (e.g., "YouTube", "Vimeo").
    pub site: String,
    /// Video type (e.g., "Trailer", "Teaser", "Featurette").
    #[serde(rename = "type")]
    pub video_type: String,
    /// Whether the video is an official release.
    #[serde(default)]
    pub official: bool,
}

// --- Details ---

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TmdbGenre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Response from `movie/{movie_id}` endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TmdbMovieDetails {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Overview text.
    pub overview: Option<String>,
    /// Tagline.
    pub tagline: Option<String>,
    /// Release date (YYYY-MM-DD).
    pub release_date: Option<String>,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// Vote average (0-10).
    pub vote_average: Option<f64>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
}

/// Response from `tv/{series_id}` endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TmdbTvDetails {
    /// TMDB series ID.
    pub id: u64,
    /// Localized name.
    pub name: String,
    /// Overview text.
    pub overview: Option<String>,
    /// First air date (YYYY-MM-DD).
    pub first_air_date: Option<String>,
    /// Total number of seasons.
    pub number_of_seasons: Option<u32>,
    /// Vote average (0-10).
    pub vote_average: Option<f64>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[allow(dead_code)]
    #[serde(default)]
    pub success: bool,
}
