//! Platform path resolution.
//!
//! Locates the data directory (tier list, log file) and the config file, and
//! expands `~` in user-supplied paths. Each lookup has a pure `*_from` variant
//! taking the relevant environment values so it can be tested without touching
//! the process environment.

use std::path::{Path, PathBuf};

/// Application directory name under the XDG roots.
pub const APP_DIR: &str = "watchtier";

/// Returns the default data directory.
///
/// `$XDG_DATA_HOME/watchtier`, else `~/.local/share/watchtier`, else
/// `./.watchtier` when no home directory is known.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    data_dir_from(env_path("XDG_DATA_HOME").as_deref(), home_dir().as_deref())
}

/// Returns the default config file path.
///
/// `$XDG_CONFIG_HOME/watchtier/config.toml`, else
/// `~/.config/watchtier/config.toml`.
#[must_use]
pub fn default_config_path() -> PathBuf {
    config_path_from(env_path("XDG_CONFIG_HOME").as_deref(), home_dir().as_deref())
}

/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use watchtier::infrastructure::paths::data_dir_from;
///
/// assert_eq!(
///     data_dir_from(None, Some(Path::new("/home/ana"))),
///     PathBuf::from("/home/ana/.local/share/watchtier")
/// );
/// assert_eq!(
///     data_dir_from(Some(Path::new("/xdg")), Some(Path::new("/home/ana"))),
///     PathBuf::from("/xdg/watchtier")
/// );
/// ```
#[must_use]
pub fn data_dir_from(xdg_data_home: Option<&Path>, home: Option<&Path>) -> PathBuf {
    if let Some(xdg) = xdg_data_home {
        return xdg.join(APP_DIR);
    }
    home.map_or_else(
        || PathBuf::from(".").join(format!(".{APP_DIR}")),
        |home| home.join(".local").join("share").join(APP_DIR),
    )
}

#[must_use]
pub fn config_path_from(xdg_config_home: Option<&Path>, home: Option<&Path>) -> PathBuf {
    let root = xdg_config_home.map_or_else(
        || {
            home.map_or_else(|| PathBuf::from("."), |h| h.join(".config"))
        },
        Path::to_path_buf,
    );
    root.join(APP_DIR).join("config.toml")
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a leading `~`, or with no known home directory, are returned
/// unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    expand_tilde_from(path, home_dir().as_deref())
}

/// # Examples
///
/// ```
/// use std::path::Path;
/// use watchtier::infrastructure::paths::expand_tilde_from;
///
/// let home = Some(Path::new("/home/ana"));
/// assert_eq!(expand_tilde_from("~/movies", home), "/home/ana/movies");
/// assert_eq!(expand_tilde_from("~", home), "/home/ana");
/// assert_eq!(expand_tilde_from("/absolute/path", home), "/absolute/path");
/// assert_eq!(expand_tilde_from("~/movies", None), "~/movies");
/// ```
#[must_use]
pub fn expand_tilde_from(path: &str, home: Option<&Path>) -> String {
    let Some(home) = home else {
        return path.to_string();
    };
    if path == "~" {
        home.display().to_string()
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest).display().to_string()
    } else {
        path.to_string()
    }
}

fn home_dir() -> Option<PathBuf> {
    env_path("HOME")
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_without_home_is_local() {
        assert_eq!(data_dir_from(None, None), PathBuf::from("./.watchtier"));
    }

    #[test]
    fn config_path_prefers_xdg() {
        assert_eq!(
            config_path_from(Some(Path::new("/cfg")), Some(Path::new("/home/ana"))),
            PathBuf::from("/cfg/watchtier/config.toml")
        );
        assert_eq!(
            config_path_from(None, Some(Path::new("/home/ana"))),
            PathBuf::from("/home/ana/.config/watchtier/config.toml")
        );
    }
}
