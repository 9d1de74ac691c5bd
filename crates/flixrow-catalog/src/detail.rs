//! Detail overlay state and its display formatting.

use chrono::{Datelike, NaiveDate};
use flixrow_api::tmdb::{TmdbMovieDetails, TmdbTvDetails};

use crate::media::MediaItem;

/// Absorbs binary representation error so that e.g. 8.45 rounds up.
const ROUNDING_SLACK: f64 = 1e-9;

/// Formats a runtime in minutes as `"{h}h {m}m"`.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn format_runtime(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Formats a 0-10 vote average with one decimal, rounding half up.
#[must_use]
pub fn format_rating(vote_average: f64) -> String {
    let tenths = (vote_average.mul_add(10.0, 0.5) + ROUNDING_SLACK).floor();
    format!("{:.1}", tenths / 10.0)
}

/// Extended fields fetched when the detail overlay opens.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtendedDetails {
    /// Release date (movies) or first air date (series), YYYY-MM-DD.
    pub release_date: Option<String>,
    /// Runtime in minutes (movies only).
    pub runtime_minutes: Option<u32>,
    /// Vote average (0-10).
    pub rating: Option<f64>,
    /// Genre names.
    pub genres: Vec<String>,
}

impl From<TmdbMovieDetails> for ExtendedDetails {
    fn from(d: TmdbMovieDetails) -> Self {
        Self {
            release_date: d.release_date,
            runtime_minutes: d.runtime,
            rating: d.vote_average,
            genres: d.genres.into_iter().map(|g| g.name).collect(),
        }
    }
}

impl From<TmdbTvDetails> for ExtendedDetails {
    fn from(d: TmdbTvDetails) -> Self {
        Self {
            release_date: d.first_air_date,
            runtime_minutes: None,
            rating: d.vote_average,
            genres: d.genres.into_iter().map(|g| g.name).collect(),
        }
    }
}

impl ExtendedDetails {
    /// Year of the release or first air date.
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        let date = self.release_date.as_deref()?;
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .ok()
            .map(|d| d.year())
    }

    /// Runtime label, omitted when unknown or zero.
    #[must_use]
    pub fn runtime_label(&self) -> Option<String> {
        self.runtime_minutes
            .filter(|m| *m > 0)
            .map(format_runtime)
    }

    /// Rating label, omitted when unknown or zero.
    #[must_use]
    pub fn rating_label(&self) -> Option<String> {
        self.rating.filter(|r| *r > 0.0).map(format_rating)
    }

    /// Comma-separated genre names, omitted when there are none.
    #[must_use]
    pub fn genres_label(&self) -> Option<String> {
        (!self.genres.is_empty()).then(|| self.genres.join(", "))
    }

    /// The fact line under the title: year, runtime, rating.
    #[must_use]
    pub fn facts(&self) -> Vec<String> {
        [
            self.release_year().map(|y| y.to_string()),
            self.runtime_label(),
            self.rating_label().map(|r| format!("⭐ {r}")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Progress of the extended-detail lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailStatus {
    /// Request in flight; show the skeleton.
    Loading,
    /// Extended fields available.
    Loaded(ExtendedDetails),
    /// Lookup failed; show title and overview only.
    Unavailable,
}

/// State of the detail overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailSelection {
    /// Item the overlay was opened for.
    pub item: MediaItem,
    /// Extended-detail lookup progress.
    pub status: DetailStatus,
}

impl DetailSelection {
    /// Overlay for `item` with the lookup in flight.
    #[must_use]
    pub const fn loading(item: MediaItem) -> Self {
        Self {
            item,
            status: DetailStatus::Loading,
        }
    }

    /// Title shown in the overlay header.
    #[must_use]
    pub fn title(&self) -> &str {
        self.item.display_title()
    }

    /// Overview from the item the caller already had.
    #[must_use]
    pub fn overview(&self) -> &str {
        self.item.overview()
    }

    /// True while the lookup is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.status, DetailStatus::Loading)
    }

    /// Extended fields, if the lookup succeeded.
    #[must_use]
    pub const fn extended(&self) -> Option<&ExtendedDetails> {
        match &self.status {
            DetailStatus::Loaded(d) => Some(d),
            DetailStatus::Loading | DetailStatus::Unavailable => None,
        }
    }
}
