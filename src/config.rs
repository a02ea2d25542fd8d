//! Application configuration loaded from `config.toml`.
//!
//! Every field has a default, so a missing file is not an error. CLI flags and
//! environment variables are layered on top by [`Config::apply_overrides`].

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://www.omdbapi.com/";
/// Queries at or below this many characters never hit the network
pub const DEFAULT_MIN_QUERY_LEN: usize = 3;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub min_query_len: usize,
    pub request_timeout_secs: u64,
    pub watched_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            watched_file: None,
        }
    }
}

impl Config {
    /// Load from `path`, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Layer CLI/environment values over the file contents
    pub fn apply_overrides(&mut self, api_key: Option<String>, watched_file: Option<PathBuf>) {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(path) = watched_file {
            self.watched_file = Some(path);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            bail!("endpoint cannot be empty");
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn require_api_key(&self) -> Result<&str> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => bail!(
                "No OMDb API key configured. Pass --api-key, set OMDB_API_KEY, or add api_key to config.toml"
            ),
        }
    }

    /// Watched list location: explicit setting, else the platform data dir
    pub fn watched_file_or(&self, default: PathBuf) -> PathBuf {
        self.watched_file.clone().unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.min_query_len, 3);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = \"abc123\"\nmin_query_len = 2\n").unwrap();

        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.min_query_len, 2);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = [").unwrap();

        let err = Config::load_or_default(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = Config { request_timeout_secs: 0, ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config { api_key: Some("k".to_string()), ..Config::default() };

        config.save_to_file(&path).unwrap();
        assert_eq!(Config::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_overrides_win_over_file() {
        let mut config = Config { api_key: Some("from-file".to_string()), ..Config::default() };
        config.apply_overrides(Some("from-flag".to_string()), Some(PathBuf::from("/tmp/w.json")));

        assert_eq!(config.api_key.as_deref(), Some("from-flag"));
        assert_eq!(config.watched_file_or(PathBuf::from("/default")), PathBuf::from("/tmp/w.json"));
    }

    #[test]
    fn test_blank_override_ignored() {
        let mut config = Config { api_key: Some("from-file".to_string()), ..Config::default() };
        config.apply_overrides(Some("  ".to_string()), None);
        assert_eq!(config.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_require_api_key() {
        assert!(Config::default().require_api_key().is_err());

        let config = Config { api_key: Some(" abc ".to_string()), ..Config::default() };
        assert_eq!(config.require_api_key().unwrap(), "abc");
    }
}
