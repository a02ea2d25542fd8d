use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, info};

use super::persistence::{load_entries, save_entries};
use crate::models::{WatchedEntry, WatchedSummary};

/// Ordered watched list mirrored to a JSON file.
///
/// Mutations update memory first and then rewrite the file. If the write fails
/// the in-memory list keeps the change and the error is returned to the caller.
#[derive(Debug)]
pub struct WatchedStore {
    path: PathBuf,
    entries: Vec<WatchedEntry>,
}

impl WatchedStore {
    /// Initialise from `path`. Never fails; see [`load_entries`].
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_entries(&path);
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[WatchedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&WatchedEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Append to the end of the list
    pub fn add(&mut self, entry: WatchedEntry) -> Result<()> {
        info!(id = %entry.id, title = %entry.title, rating = entry.user_rating, "adding to watched");
        self.entries.push(entry);
        self.persist()
    }

    /// Remove every entry with `id`, returning how many were dropped
    pub fn remove(&mut self, id: &str) -> Result<usize> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let removed = before - self.entries.len();
        if removed == 0 {
            debug!(id, "nothing to remove from watched");
            return Ok(0);
        }
        info!(id, removed, "removing from watched");
        self.persist()?;
        Ok(removed)
    }

    pub fn summary(&self) -> WatchedSummary {
        WatchedSummary::from_entries(&self.entries)
    }

    fn persist(&self) -> Result<()> {
        save_entries(&self.path, &self.entries)
    }
}
