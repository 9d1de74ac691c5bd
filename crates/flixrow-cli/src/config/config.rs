//! `AppConfig` struct, config file location and TOML read/write.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// API keys used when the config file does not list any.
const DEFAULT_API_KEYS: [&str; 2] = [
    "c8dea14dc917687ac631a52620e4f7ad",
    "3cb41ecea3bf606c56552db3d17adefd",
];

/// Response language used when the config file does not set one.
const DEFAULT_LANGUAGE: &str = "en-US";

/// Config file name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Application directory under the user config root.
const APP_DIR: &str = "flixrow";

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

/// TMDB client configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TmdbConfig {
    /// API keys, rotated in order when the provider rate-limits.
    #[serde(default = "default_api_keys")]
    pub api_keys: Vec<String>,
    /// Response language (e.g., "en-US").
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_keys: default_api_keys(),
            language: default_language(),
        }
    }
}

fn default_api_keys() -> Vec<String> {
    DEFAULT_API_KEYS.into_iter().map(String::from).collect()
}

fn default_language() -> String {
    String::from(DEFAULT_LANGUAGE)
}

impl AppConfig {
    /// Resolves the config file path.
    ///
    /// `dir` wins when given. Otherwise `$XDG_CONFIG_HOME/flixrow` is used,
    /// then `$HOME/.config/flixrow`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither `dir`, `XDG_CONFIG_HOME` nor `HOME` is available.
    pub fn resolve_path(dir: Option<&Path>) -> Result<PathBuf> {
        config_path_from(
            dir,
            std::env::var_os("XDG_CONFIG_HOME"),
            std::env::var_os("HOME"),
        )
    }

    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}

fn config_path_from(
    dir: Option<&Path>,
    xdg_config_home: Option<OsString>,
    home: Option<OsString>,
) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }
    let root = match xdg_config_home.filter(|v| !v.is_empty()) {
        Some(xdg) => PathBuf::from(xdg),
        None => PathBuf::from(
            home.filter(|v| !v.is_empty())
                .context("neither XDG_CONFIG_HOME nor HOME is set")?,
        )
        .join(".config"),
    };
    Ok(root.join(APP_DIR).join(CONFIG_FILE))
}
