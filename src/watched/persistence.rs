//! Watched list persistence: tolerant load, atomic full-overwrite save

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::models::WatchedEntry;

/// Read the watched list from `path`.
///
/// Returns an empty list when the file is missing, unreadable or does not
/// hold a JSON array of entries. Problems are logged, never returned.
pub fn load_entries(path: &Path) -> Vec<WatchedEntry> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no watched list yet, starting empty");
            return Vec::new();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read watched list, starting empty");
            return Vec::new();
        }
    };

    if content.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Vec<WatchedEntry>>(&content) {
        Ok(entries) => {
            info!(path = %path.display(), count = entries.len(), "loaded watched list");
            entries
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "watched list is corrupt, starting empty");
            Vec::new()
        }
    }
}

/// Overwrite `path` with the full list (temp file + rename)
pub fn save_entries(path: &Path, entries: &[WatchedEntry]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("Failed to create watched list directory")?;
    }

    let json = serde_json::to_string_pretty(entries).context("Failed to serialize watched list")?;
    let temp = path.with_extension("json.tmp");
    fs::write(&temp, json).context("Failed to write watched list temp file")?;
    fs::rename(&temp, path).context("Failed to rename watched list temp file")?;

    debug!(path = %path.display(), count = entries.len(), "saved watched list");
    Ok(())
}
