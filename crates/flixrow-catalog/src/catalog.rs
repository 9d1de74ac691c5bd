//! `Catalog` - loads the browse screen and serves the overlay callbacks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use flixrow_api::tmdb::{TmdbApi, TmdbMovie, TmdbPage, TmdbSeries};
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::instrument;

use crate::bucket::{Bucket, BucketKind};
use crate::detail::{DetailSelection, DetailStatus, ExtendedDetails};
use crate::media::MediaItem;
use crate::placeholder::{PLACEHOLDER_VIDEO_KEY, placeholder_items};
use crate::trailer::{VideoSelection, select_trailer};

/// Everything the browse screen renders in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeScreen {
    featured: Option<MediaItem>,
    buckets: [Bucket; 7],
    video: VideoSelection,
    detail: Option<DetailSelection>,
}

impl HomeScreen {
    fn new() -> Self {
        Self {
            featured: None,
            buckets: BucketKind::ALL.map(Bucket::new),
            video: VideoSelection::closed(),
            detail: None,
        }
    }

    /// Hero banner item; `None` until the trending row resolves.
    #[must_use]
    pub const fn featured(&self) -> Option<&MediaItem> {
        self.featured.as_ref()
    }

    /// All rows in display order.
    #[must_use]
    pub const fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// The row for `kind`.
    #[must_use]
    #[allow(clippy::indexing_slicing)] // index() < 7
    pub const fn bucket(&self, kind: BucketKind) -> &Bucket {
        &self.buckets[kind.index()]
    }

    #[allow(clippy::indexing_slicing)] // index() < 7
    const fn bucket_mut(&mut self, kind: BucketKind) -> &mut Bucket {
        &mut self.buckets[kind.index()]
    }

    /// True while any row is still loading.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.buckets.iter().any(Bucket::is_loading)
    }

    /// Trailer overlay state.
    #[must_use]
    pub const fn video(&self) -> &VideoSelection {
        &self.video
    }

    /// Detail overlay state; `None` when closed.
    #[must_use]
    pub const fn detail(&self) -> Option<&DetailSelection> {
        self.detail.as_ref()
    }
}

/// Browse-screen controller.
///
/// Owns the API handle and publishes [`HomeScreen`] snapshots through a
/// `watch` channel. Rows load once per `Catalog`.
#[derive(Debug)]
pub struct Catalog<A> {
    api: Arc<A>,
    screen: watch::Sender<HomeScreen>,
    started: AtomicBool,
}

impl<A> Catalog<A>
where
    A: TmdbApi + Send + Sync + 'static,
{
    /// Creates a catalog with every row loading.
    pub fn new(api: A) -> Self {
        Self::from_arc(Arc::new(api))
    }

    /// Creates a catalog sharing an existing API handle.
    #[must_use]
    pub fn from_arc(api: Arc<A>) -> Self {
        let (screen, _) = watch::channel(HomeScreen::new());
        Self {
            api,
            screen,
            started: AtomicBool::new(false),
        }
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<HomeScreen> {
        self.screen.subscribe()
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> HomeScreen {
        self.screen.borrow().clone()
    }

    /// Loads the hero item and all rows. Later calls are no-ops.
    ///
    /// Rows load concurrently. Each row is published together with its
    /// ready flag as soon as its query resolves; an empty or failed query
    /// publishes the placeholder list instead. If a row task dies, the
    /// remaining tasks are aborted and every row is reset to placeholders.
    #[instrument(skip_all)]
    pub async fn load(&self) {
        if self.started.swap(true, Ordering::AcqRel) {
            tracing::debug!("Catalog already loaded");
            return;
        }

        let mut tasks = JoinSet::new();
        for kind in BucketKind::ALL {
            let api = Arc::clone(&self.api);
            tasks.spawn(async move {
                let items = fetch_bucket(&*api, kind).await;
                (kind, items)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((kind, items)) => self.publish_bucket(kind, items),
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        "Row loading failed, falling back to placeholder content"
                    );
                    tasks.abort_all();
                    self.publish_placeholders();
                    return;
                }
            }
        }

        tracing::info!("Catalog loaded");
    }

    /// Opens the trailer overlay for `item` and returns its state.
    ///
    /// Never fails: without a usable video the placeholder key is played.
    #[instrument(skip_all, fields(kind = %item.kind(), id = item.id()))]
    pub async fn play(&self, item: &MediaItem) -> VideoSelection {
        let videos = match item {
            MediaItem::Movie(m) => self.api.movie_videos(m.id).await,
            MediaItem::Series(s) => self.api.tv_videos(s.id).await,
        };

        let key = videos
            .as_ref()
            .and_then(|list| select_trailer(&list.results))
            .map_or_else(
                || {
                    tracing::warn!("No video found, using placeholder trailer");
                    String::from(PLACEHOLDER_VIDEO_KEY)
                },
                |video| video.key.clone(),
            );

        let selection = VideoSelection::open(key, item.display_title());
        self.screen.send_modify(|s| s.video = selection.clone());
        selection
    }

    /// Closes the trailer overlay.
    pub fn close_video(&self) {
        self.screen.send_modify(|s| s.video = VideoSelection::closed());
    }

    /// Opens the detail overlay for `item`, fetches extended details, and
    /// returns the final overlay state.
    ///
    /// A result for an item that is no longer selected is not published.
    #[instrument(skip_all, fields(kind = %item.kind(), id = item.id()))]
    pub async fn more_info(&self, item: &MediaItem) -> DetailSelection {
        self.screen
            .send_modify(|s| s.detail = Some(DetailSelection::loading(item.clone())));

        let details = match item {
            MediaItem::Movie(m) => self
                .api
                .movie_details(m.id)
                .await
                .map(ExtendedDetails::from),
            MediaItem::Series(s) => self.api.tv_details(s.id).await.map(ExtendedDetails::from),
        };

        let status = details.map_or_else(
            || {
                tracing::warn!("Extended details unavailable");
                DetailStatus::Unavailable
            },
            DetailStatus::Loaded,
        );
        let selection = DetailSelection {
            item: item.clone(),
            status,
        };

        self.screen.send_if_modified(|s| match s.detail.as_mut() {
            Some(open) if open.item.same_title(item) => {
                *open = selection.clone();
                true
            }
            _ => {
                tracing::debug!("Detail overlay changed while loading, discarding result");
                false
            }
        });
        selection
    }

    /// Closes the detail overlay.
    pub fn close_details(&self) {
        self.screen.send_modify(|s| s.detail = None);
    }

    /// Search box callback. Search is not implemented; the query is logged.
    pub fn search(&self, query: &str) {
        tracing::info!(query, "Search query");
    }

    /// Publishes one row. The first trending row also picks the hero item.
    fn publish_bucket(&self, kind: BucketKind, items: Vec<MediaItem>) {
        tracing::debug!(bucket = %kind, count = items.len(), "Row loaded");
        self.screen.send_modify(|s| {
            if kind == BucketKind::Trending && s.featured.is_none() {
                s.featured = items.first().cloned();
            }
            s.bucket_mut(kind).fill(items);
        });
    }

    /// Resets the hero and every row to placeholder content.
    fn publish_placeholders(&self) {
        self.screen.send_modify(|s| {
            s.featured = placeholder_items().into_iter().next();
            for bucket in &mut s.buckets {
                bucket.fill(placeholder_items());
            }
        });
    }
}

/// Queries one row, substituting placeholders for an empty or failed result.
async fn fetch_bucket<A: TmdbApi + Sync>(api: &A, kind: BucketKind) -> Vec<MediaItem> {
    let items = match (kind, kind.genre()) {
        (_, Some(genre)) => movies(api.movies_by_genre(genre.id()).await),
        (BucketKind::Trending, None) => movies(api.trending_movies().await),
        (BucketKind::PopularTv, None) => series(api.popular_tv().await),
        (_, None) => movies(api.popular_movies().await),
    };

    if items.is_empty() {
        tracing::warn!(bucket = %kind, "No results, using placeholder content");
        placeholder_items()
    } else {
        items
    }
}

fn movies(page: Option<TmdbPage<TmdbMovie>>) -> Vec<MediaItem> {
    page.map(|p| p.results.into_iter().map(MediaItem::from).collect())
        .unwrap_or_default()
}

fn series(page: Option<TmdbPage<TmdbSeries>>) -> Vec<MediaItem> {
    page.map(|p| p.results.into_iter().map(MediaItem::from).collect())
        .unwrap_or_default()
}
