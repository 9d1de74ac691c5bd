//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 endpoints used by the browse
//! screen, rotating between API keys when the provider rate-limits.

mod api;
mod client;
mod image;
mod key_pool;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
pub use image::{
    BACKDROP_PLACEHOLDER, IMAGE_BASE_URL, ImageSize, POSTER_PLACEHOLDER, backdrop_url, image_url,
    poster_url,
};
pub use key_pool::AccessKeyPool;
#[allow(clippy::module_name_repetitions)]
pub use types::{
    TmdbGenre, TmdbMovie, TmdbMovieDetails, TmdbPage, TmdbSeries, TmdbTvDetails, TmdbVideo,
    TmdbVideoList,
};
