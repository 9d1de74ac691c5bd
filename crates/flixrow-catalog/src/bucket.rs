//! Category rows (`Bucket`) and the genres behind them.

use std::fmt;

use crate::media::MediaItem;

/// TMDB genre filters used by the genre rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    /// Action (28).
    Action,
    /// Comedy (35).
    Comedy,
    /// Horror (27).
    Horror,
    /// Documentary (99).
    Documentary,
}

impl Genre {
    /// TMDB genre ID.
    #[must_use]
    pub const fn id(self) -> u32 {
        match self {
            Self::Action => 28,
            Self::Comedy => 35,
            Self::Horror => 27,
            Self::Documentary => 99,
        }
    }
}

/// The seven rows of the browse screen, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BucketKind {
    /// Weekly trending movies; also supplies the hero item.
    Trending,
    /// Popular movies.
    PopularMovies,
    /// Popular TV series.
    PopularTv,
    /// Action movies.
    ActionMovies,
    /// Comedy movies.
    ComedyMovies,
    /// Horror movies.
    HorrorMovies,
    /// Documentaries.
    Documentaries,
}

impl BucketKind {
    /// All rows in display order.
    pub const ALL: [Self; 7] = [
        Self::Trending,
        Self::PopularMovies,
        Self::PopularTv,
        Self::ActionMovies,
        Self::ComedyMovies,
        Self::HorrorMovies,
        Self::Documentaries,
    ];

    /// Row heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Trending => "Trending Now",
            Self::PopularMovies => "Popular Movies",
            Self::PopularTv => "Popular TV Shows",
            Self::ActionMovies => "Action Movies",
            Self::ComedyMovies => "Comedy Movies",
            Self::HorrorMovies => "Horror Movies",
            Self::Documentaries => "Documentaries",
        }
    }

    /// Genre filter for the `discover/movie` rows.
    #[must_use]
    pub const fn genre(self) -> Option<Genre> {
        match self {
            Self::ActionMovies => Some(Genre::Action),
            Self::ComedyMovies => Some(Genre::Comedy),
            Self::HorrorMovies => Some(Genre::Horror),
            Self::Documentaries => Some(Genre::Documentary),
            Self::Trending | Self::PopularMovies | Self::PopularTv => None,
        }
    }

    /// Position in [`BucketKind::ALL`].
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Trending => 0,
            Self::PopularMovies => 1,
            Self::PopularTv => 2,
            Self::ActionMovies => 3,
            Self::ComedyMovies => 4,
            Self::HorrorMovies => 5,
            Self::Documentaries => 6,
        }
    }
}

impl fmt::Display for BucketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One row: its items and whether it is still loading.
///
/// A bucket starts loading and becomes ready on the first `fill`. There is
/// no way back to loading.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    kind: BucketKind,
    items: Vec<MediaItem>,
    loading: bool,
}

impl Bucket {
    /// Creates an empty, loading bucket.
    #[must_use]
    pub const fn new(kind: BucketKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
            loading: true,
        }
    }

    /// Replaces the items and marks the bucket ready.
    pub(crate) fn fill(&mut self, items: Vec<MediaItem>) {
        self.items = items;
        self.loading = false;
    }

    /// Row identity.
    #[must_use]
    pub const fn kind(&self) -> BucketKind {
        self.kind
    }

    /// Row heading.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.kind.title()
    }

    /// Items in display order.
    #[must_use]
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    /// True until the row's query has resolved.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }
}
