//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use super::types::{
    TmdbMovie, TmdbMovieDetails, TmdbPage, TmdbSeries, TmdbTvDetails, TmdbVideoList,
};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
///
/// Every operation resolves to `None` instead of an error: failures are
/// logged by the implementation and callers supply their own fallback.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Fetches page 1 of `movie/popular`.
    async fn popular_movies(&self) -> Option<TmdbPage<TmdbMovie>>;

    /// Fetches `trending/movie/week`.
    async fn trending_movies(&self) -> Option<TmdbPage<TmdbMovie>>;

    /// Fetches page 1 of `tv/popular`.
    async fn popular_tv(&self) -> Option<TmdbPage<TmdbSeries>>;

    /// Fetches page 1 of `discover/movie` filtered by genre.
    async fn movies_by_genre(&self, genre_id: u32) -> Option<TmdbPage<TmdbMovie>>;

    /// Fetches page 1 of `discover/tv` filtered by genre.
    async fn tv_by_genre(&self, genre_id: u32) -> Option<TmdbPage<TmdbSeries>>;

    /// Fetches the videos attached to a movie.
    async fn movie_videos(&self, movie_id: u64) -> Option<TmdbVideoList>;

    /// Fetches the videos attached to a TV series.
    async fn tv_videos(&self, series_id: u64) -> Option<TmdbVideoList>;

    /// Fetches movie details (runtime, genres, rating).
    async fn movie_details(&self, movie_id: u64) -> Option<TmdbMovieDetails>;

    /// Fetches TV series details (genres, rating, first air date).
    async fn tv_details(&self, series_id: u64) -> Option<TmdbTvDetails>;
}
