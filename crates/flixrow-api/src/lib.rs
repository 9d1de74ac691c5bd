//! API client library for flixrow.
//!
//! Provides the TMDB metadata client used to populate the browse screen.

/// TMDB API client.
pub mod tmdb;
