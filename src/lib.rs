//! WatchTier: a terminal movie tier list backed by a remote movie catalog.
//!
//! WatchTier lets a user browse movies from the TMDB catalog, collect them into
//! a personal pool and arrange them into S/A/B/C/D tiers:
//! - Debounced title search, trending and genre listings with paging
//! - Detail pages with up to five recommendations
//! - A pool of unranked movies and five ordered tier rows
//! - Drag-and-drop style moves: rank, reorder, move across tiers, unrank
//! - Write-through JSON persistence of pool and tiers
//! - Plain-text export of the board
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI / interactive shell (main.rs, cli, runtime)    │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, actions                          │
//! │  - Collection store, drag coordinator               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Worker Layer  │
//! │ (ui/)         │   │ (storage/)    │   │ (worker/)     │
//! │ - Rendering   │   │ - JSON I/O    │   │ - tokio tasks │
//! │ - Theming     │   │ - Repair      │   │ - Catalog I/O │
//! │ - Export      │   │ - Backend API │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Catalog client (catalog/), domain types (domain/), │
//! │  paths (infrastructure/), logging (observability/)  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! Settings are read from `~/.config/watchtier/config.toml`:
//!
//! ```toml
//! api_key = "your-tmdb-v3-key"
//! language = "en-US"
//! debounce_ms = 500
//! trace_level = "debug"
//! theme_file = "~/.config/watchtier/theme.toml"
//! ```
//!
//! `TMDB_API_KEY`, `WATCHTIER_DATA_DIR` and `WATCHTIER_LOG` override the file;
//! command-line flags override both.
//!
//! # Examples
//!
//! ```rust
//! use watchtier::{handle_event, initialize, Config, Event};
//!
//! let dir = tempfile::tempdir()?;
//! let config = Config {
//!     data_dir: Some(dir.path().to_path_buf()),
//!     ..Config::default()
//! };
//!
//! let mut state = initialize(&config)?;
//! let (_render, actions) = handle_event(&mut state, &Event::ShowBoard)?;
//! assert!(actions.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod catalog;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod runtime;
pub mod storage;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, TierStore, View};
pub use domain::{Result, WatchTierError};
pub use ui::Theme;

use crate::app::Debouncer;
use crate::catalog::IMAGE_BASE_URL;
use crate::storage::{JsonStorage, STORAGE_FILE_NAME};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration.
///
/// Every field has a default, so an empty or missing config file is valid.
///
/// # Example
///
/// ```rust
/// use watchtier::Config;
///
/// let config = Config::from_toml_str("api_key = \"abc\"\ndebounce_ms = 250\n")?;
/// assert_eq!(config.api_key.as_deref(), Some("abc"));
/// assert_eq!(config.debounce_ms, 250);
/// assert_eq!(config.language, "en-US");
/// # Ok::<(), watchtier::WatchTierError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// TMDB v3 API key. Required for any catalog request.
    pub api_key: Option<String>,

    /// Catalog API root. Default: `https://api.themoviedb.org/3`
    pub api_base_url: String,

    /// Base URL poster references are joined onto.
    pub image_base_url: String,

    /// Language sent with every catalog request. Default: `"en-US"`
    pub language: String,

    /// Where the tier list and the log file live.
    ///
    /// Default: `$XDG_DATA_HOME/watchtier` or `~/.local/share/watchtier`.
    pub data_dir: Option<PathBuf>,

    /// Where exports are written. Default: the current directory.
    pub export_dir: Option<PathBuf>,

    /// Log filter directive (`trace`, `debug`, `info`, `warn`, `error`, or a full
    /// `EnvFilter` expression). `RUST_LOG` takes precedence. Default: `"info"`
    pub trace_level: Option<String>,

    /// Quiet interval before typed input is searched, in milliseconds.
    pub debounce_ms: u64,

    /// Path to a custom TOML theme file. See [`ui::theme`] for format.
    pub theme_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: IMAGE_BASE_URL.to_string(),
            language: "en-US".to_string(),
            data_dir: None,
            export_dir: None,
            trace_level: None,
            debounce_ms: 500,
            theme_file: None,
        }
    }
}

impl Config {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`WatchTierError::Config`] on invalid TOML, unknown keys, or
    /// mistyped values.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| WatchTierError::Config(format!("invalid config: {e}")))
    }

    /// Loads the config file at `path`; a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = ?path, "no config file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Applies environment overrides.
    ///
    /// - `TMDB_API_KEY` → `api_key`
    /// - `WATCHTIER_DATA_DIR` → `data_dir`
    /// - `WATCHTIER_LOG` → `trace_level`
    ///
    /// Empty values are ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use watchtier::Config;
    ///
    /// let mut env = BTreeMap::new();
    /// env.insert("TMDB_API_KEY".to_string(), "from-env".to_string());
    ///
    /// let config = Config::default().apply_env(&env);
    /// assert_eq!(config.api_key.as_deref(), Some("from-env"));
    /// ```
    #[must_use]
    pub fn apply_env(mut self, env: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| env.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        if let Some(key) = get("TMDB_API_KEY") {
            self.api_key = Some(key.to_string());
        }
        if let Some(dir) = get("WATCHTIER_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(infrastructure::expand_tilde(dir)));
        }
        if let Some(level) = get("WATCHTIER_LOG") {
            self.trace_level = Some(level.to_string());
        }
        self
    }

    /// Debounce interval as a duration.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Data directory after applying platform defaults.
    #[must_use]
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(infrastructure::paths::default_data_dir)
    }

    /// Export directory after applying the default.
    #[must_use]
    pub fn resolved_export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Theme from `theme_file`, or the built-in one.
    ///
    /// A theme file that cannot be loaded is logged and replaced by the default.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme_file.as_ref().map_or_else(Theme::default, |theme_file| {
            let path = infrastructure::expand_tilde(theme_file);
            Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        })
    }
}

/// Initializes application state from configuration.
///
/// Opens (or creates) the persisted tier list in the data directory, loads the
/// theme and applies the debounce interval.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or the persisted
/// tier list cannot be read.
pub fn initialize(config: &Config) -> Result<AppState> {
    let data_dir = config.resolved_data_dir();
    let _span = tracing::debug_span!("initialize", data_dir = ?data_dir).entered();

    let storage = JsonStorage::new(data_dir.join(STORAGE_FILE_NAME))?;
    let store = TierStore::with_storage(Box::new(storage))?;

    tracing::info!(
        pool = store.pool().len(),
        ranked = store.ranked_count(),
        "tier list loaded"
    );

    Ok(AppState::new(store, config.theme()).with_debouncer(Debouncer::new(config.debounce())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = Config::from_toml_str("scan_paths = \"~/x\"").unwrap_err();
        assert!(matches!(err, WatchTierError::Config(_)));
    }

    #[test]
    fn env_overrides_file_values() {
        let config = Config::from_toml_str("api_key = \"file\"\ntrace_level = \"warn\"").unwrap();
        let env: BTreeMap<String, String> = [
            ("TMDB_API_KEY", "env"),
            ("WATCHTIER_LOG", "debug"),
            ("WATCHTIER_DATA_DIR", "  "),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = config.apply_env(&env);

        assert_eq!(config.api_key.as_deref(), Some("env"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert_eq!(config.data_dir, None);
    }

    #[test]
    fn missing_config_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn initialize_restores_persisted_board() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        };

        {
            let mut state = initialize(&config).unwrap();
            state
                .store
                .add_to_pool(domain::Movie::new(1, "Heat", "https://img/heat.jpg"))
                .unwrap();
        }

        let state = initialize(&config).unwrap();
        assert_eq!(state.store.pool().len(), 1);
        assert!(dir.path().join(STORAGE_FILE_NAME).exists());
    }
}
