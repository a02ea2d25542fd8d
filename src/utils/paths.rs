use std::borrow::Cow;
use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Directory name under the platform config/data roots
const APP_DIR_NAME: &str = "popcorn";
/// Storage slot holding the watched list
const WATCHED_SLOT: &str = "watched";

/// Resolves where configuration, the watched list and logs live.
///
/// - Linux: `~/.config/popcorn/config.toml`, `~/.local/share/popcorn/watched.json`
/// - macOS: `~/Library/Application Support/popcorn/...`
/// - Windows: `%APPDATA%\popcorn\...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .context("Failed to get platform config directory")?
            .join(APP_DIR_NAME);
        let data_dir =
            dirs::data_dir().context("Failed to get platform data directory")?.join(APP_DIR_NAME);

        Ok(Self { config_dir, data_dir })
    }

    /// Root both directories at `base` (used by tests and portable installs)
    pub fn with_base(base: &Path) -> Self {
        Self { config_dir: base.join("config"), data_dir: base.join("data") }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn watched_file(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", WATCHED_SLOT))
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join("logs").join("popcorn.log")
    }
}

/// Formats a path with ~ substitution for the home directory
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use popcorn_tui::format_path_with_tilde;
///
/// let path = PathBuf::from("/definitely/not/home/watched.json");
/// assert_eq!(format_path_with_tilde(&path), "/definitely/not/home/watched.json");
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref()).filter(|h| !h.is_empty() && *h != "/");

    let path_str = path.to_string_lossy();
    if let Some(home) = home
        && path.starts_with(home)
    {
        return path_str.replacen(home, "~", 1);
    }

    match path_str {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}
