//! Content orchestration for the flixrow browse screen.
//!
//! Loads the hero item and the seven category rows through a
//! [`flixrow_api::tmdb::TmdbApi`] implementation, substitutes placeholder
//! content wherever the provider yields nothing, and resolves trailers and
//! extended details for the overlays.

mod bucket;
mod catalog;
mod detail;
mod media;
mod placeholder;
mod trailer;

pub use bucket::{Bucket, BucketKind, Genre};
pub use catalog::{Catalog, HomeScreen};
pub use detail::{DetailSelection, DetailStatus, ExtendedDetails, format_rating, format_runtime};
pub use media::{MediaItem, MediaKind};
pub use placeholder::{PLACEHOLDER_VIDEO_KEY, placeholder_items};
pub use trailer::{VideoSelection, select_trailer};
