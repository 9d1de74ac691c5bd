//! Application configuration module.
//!
//! Manages the TOML config file holding the TMDB API keys and the
//! response language.

#[allow(clippy::module_inception)]
mod config;

#[allow(clippy::module_name_repetitions)]
pub use config::AppConfig;
