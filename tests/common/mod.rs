//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use popcorn_tui::{ApiError, MovieApi, MovieDetail, SearchResult};
use serde_json::json;
use tempfile::TempDir;

/// Builder for a temp directory holding a `watched.json`
pub struct WatchedFileBuilder {
    temp_dir: TempDir,
    entries: Vec<serde_json::Value>,
    raw: Option<String>,
}

impl WatchedFileBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir, entries: Vec::new(), raw: None }
    }

    /// Add an entry in the persisted layout
    pub fn with_entry(mut self, id: &str, title: &str, imdb: f64, user: u8, runtime: u32) -> Self {
        self.entries.push(json!({
            "imdbID": id,
            "title": title,
            "year": "2010",
            "poster": "N/A",
            "imdbRating": imdb,
            "runtime": runtime,
            "userRating": user,
        }));
        self
    }

    /// Write `content` verbatim instead of the collected entries
    pub fn with_raw(mut self, content: &str) -> Self {
        self.raw = Some(content.to_string());
        self
    }

    /// Write the file and return (temp dir, file path)
    pub fn build(self) -> (TempDir, PathBuf) {
        let path = self.temp_dir.path().join("watched.json");
        let content = match self.raw {
            Some(raw) => raw,
            None => serde_json::to_string_pretty(&self.entries).expect("Failed to serialize"),
        };
        fs::write(&path, content).expect("Failed to write watched.json");
        (self.temp_dir, path)
    }
}

impl Default for WatchedFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Read the persisted file back as raw JSON
pub fn read_watched_json(path: &Path) -> serde_json::Value {
    let content = fs::read_to_string(path).expect("Failed to read watched.json");
    serde_json::from_str(&content).expect("watched.json is not valid JSON")
}

pub fn detail(id: &str, title: &str, rating: f64, runtime: u32) -> MovieDetail {
    MovieDetail {
        id: id.to_string(),
        title: title.to_string(),
        year: "2010".to_string(),
        poster_url: String::new(),
        runtime_minutes: runtime,
        external_rating: rating,
        plot: String::new(),
        release_date: String::new(),
        actors: String::new(),
        director: String::new(),
        genre: String::new(),
    }
}

/// Scripted `MovieApi` with per-key delays
#[derive(Default)]
pub struct ScriptedApi {
    results: HashMap<String, Vec<SearchResult>>,
    details: HashMap<String, MovieDetail>,
    delays_ms: HashMap<String, u64>,
    search_calls: AtomicUsize,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(mut self, query: &str, titles: &[&str]) -> Self {
        let results = titles
            .iter()
            .enumerate()
            .map(|(i, title)| SearchResult {
                id: format!("tt{}{}", query.len(), i),
                title: title.to_string(),
                year: "2010".to_string(),
                poster_url: String::new(),
            })
            .collect();
        self.results.insert(query.to_string(), results);
        self
    }

    pub fn with_detail(mut self, detail: MovieDetail) -> Self {
        self.details.insert(detail.id.clone(), detail);
        self
    }

    pub fn with_delay(mut self, key: &str, ms: u64) -> Self {
        self.delays_ms.insert(key.to_string(), ms);
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    async fn delay(&self, key: &str) {
        if let Some(ms) = self.delays_ms.get(key) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }
    }
}

#[async_trait]
impl MovieApi for ScriptedApi {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ApiError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.delay(query).await;
        self.results
            .get(query)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("Movie not found!".to_string()))
    }

    async fn fetch_detail(&self, id: &str) -> Result<MovieDetail, ApiError> {
        self.delay(id).await;
        self.details.get(id).cloned().ok_or_else(|| ApiError::NotFound("Incorrect IMDb ID.".to_string()))
    }
}
