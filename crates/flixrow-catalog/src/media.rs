//! `MediaItem` - a movie or TV series shown on the browse screen.

use std::fmt;

use flixrow_api::tmdb::{
    ImageSize, TmdbMovie, TmdbMovieDetails, TmdbSeries, TmdbTvDetails, backdrop_url, poster_url,
};

/// Discriminant of a [`MediaItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Feature film.
    Movie,
    /// TV series.
    Series,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Movie => "movie",
            Self::Series => "tv",
        })
    }
}

/// A title shown in a row, the hero banner or an overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaItem {
    /// Movie entry (`title`, `release_date`).
    Movie(TmdbMovie),
    /// TV series entry (`name`, `first_air_date`).
    Series(TmdbSeries),
}

impl MediaItem {
    /// Returns the item's kind.
    #[must_use]
    pub const fn kind(&self) -> MediaKind {
        match self {
            Self::Movie(_) => MediaKind::Movie,
            Self::Series(_) => MediaKind::Series,
        }
    }

    /// TMDB ID (unique per kind only).
    #[must_use]
    pub const fn id(&self) -> u64 {
        match self {
            Self::Movie(m) => m.id,
            Self::Series(s) => s.id,
        }
    }

    /// Movie title or series name.
    #[must_use]
    pub fn display_title(&self) -> &str {
        match self {
            Self::Movie(m) => &m.title,
            Self::Series(s) => &s.name,
        }
    }

    /// Overview text, empty when the provider has none.
    #[must_use]
    pub fn overview(&self) -> &str {
        match self {
            Self::Movie(m) => m.overview.as_deref(),
            Self::Series(s) => s.overview.as_deref(),
        }
        .unwrap_or_default()
    }

    /// Raw poster path.
    #[must_use]
    pub fn poster_path(&self) -> Option<&str> {
        match self {
            Self::Movie(m) => m.poster_path.as_deref(),
            Self::Series(s) => s.poster_path.as_deref(),
        }
    }

    /// Raw backdrop path.
    #[must_use]
    pub fn backdrop_path(&self) -> Option<&str> {
        match self {
            Self::Movie(m) => m.backdrop_path.as_deref(),
            Self::Series(s) => s.backdrop_path.as_deref(),
        }
    }

    /// Poster URL at `size`, or the poster placeholder.
    #[must_use]
    pub fn poster_url(&self, size: ImageSize) -> String {
        poster_url(self.poster_path(), size)
    }

    /// Backdrop URL at `size`, or the backdrop placeholder.
    #[must_use]
    pub fn backdrop_url(&self, size: ImageSize) -> String {
        backdrop_url(self.backdrop_path(), size)
    }

    /// True when both items refer to the same TMDB title.
    #[must_use]
    pub fn same_title(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.id() == other.id()
    }
}

impl From<TmdbMovie> for MediaItem {
    fn from(movie: TmdbMovie) -> Self {
        Self::Movie(movie)
    }
}

impl From<TmdbSeries> for MediaItem {
    fn from(series: TmdbSeries) -> Self {
        Self::Series(series)
    }
}

impl From<TmdbMovieDetails> for MediaItem {
    fn from(d: TmdbMovieDetails) -> Self {
        Self::Movie(TmdbMovie {
            id: d.id,
            title: d.title,
            overview: d.overview,
            poster_path: d.poster_path,
            backdrop_path: d.backdrop_path,
            release_date: d.release_date,
            vote_average: d.vote_average,
            genre_ids: d.genres.into_iter().map(|g| g.id).collect(),
        })
    }
}

impl From<TmdbTvDetails> for MediaItem {
    fn from(d: TmdbTvDetails) -> Self {
        Self::Series(TmdbSeries {
            id: d.id,
            name: d.name,
            overview: d.overview,
            poster_path: d.poster_path,
            backdrop_path: d.backdrop_path,
            first_air_date: d.first_air_date,
            vote_average: d.vote_average,
            genre_ids: d.genres.into_iter().map(|g| g.id).collect(),
            origin_country: Vec::new(),
        })
    }
}
