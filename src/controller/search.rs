use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{debug, warn};

use super::fetch::LatestFetch;
use crate::api::MovieApi;
use crate::models::SearchResult;

/// Longest query accepted from the keyboard
pub const MAX_QUERY_LEN: usize = 256;

/// Owns the query text and the results of the newest search for it.
///
/// Queries longer than `min_query_len` characters are sent to the API; each
/// change cancels the previous request. Shorter queries clear the results
/// without touching the network.
pub struct SearchController {
    api: Arc<dyn MovieApi>,
    min_query_len: usize,
    query: String,
    results: Vec<SearchResult>,
    is_loading: bool,
    error: Option<String>,
    fetch: LatestFetch<Vec<SearchResult>>,
}

impl SearchController {
    pub fn new(api: Arc<dyn MovieApi>, min_query_len: usize, runtime: Handle) -> Self {
        Self {
            api,
            min_query_len,
            query: String::new(),
            results: Vec::new(),
            is_loading: false,
            error: None,
            fetch: LatestFetch::new(runtime),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replace the query. Returns `true` when it actually changed (and a new search ran).
    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        let query = query.into();
        if query == self.query {
            return false;
        }
        self.query = query;
        self.refresh();
        true
    }

    pub fn push_char(&mut self, c: char) -> bool {
        if self.query.chars().count() >= MAX_QUERY_LEN {
            return false;
        }
        let mut query = self.query.clone();
        query.push(c);
        self.set_query(query)
    }

    pub fn pop_char(&mut self) -> bool {
        let mut query = self.query.clone();
        if query.pop().is_none() {
            return false;
        }
        self.set_query(query)
    }

    pub fn clear(&mut self) -> bool {
        self.set_query(String::new())
    }

    /// Run the search for the current query, superseding any in-flight one
    pub fn refresh(&mut self) {
        self.fetch.cancel();
        self.error = None;

        if self.query.chars().count() <= self.min_query_len {
            self.results.clear();
            self.is_loading = false;
            return;
        }

        self.is_loading = true;
        let api = Arc::clone(&self.api);
        let query = self.query.clone();
        debug!(query = %query, generation = self.fetch.generation() + 1, "dispatching search");
        self.fetch.start(async move { api.search(&query).await });
    }

    /// Apply a finished search, if any. Returns `true` when state changed.
    pub fn poll(&mut self) -> bool {
        let Some(result) = self.fetch.poll() else {
            return false;
        };
        self.is_loading = false;

        match result {
            Ok(results) => {
                debug!(query = %self.query, count = results.len(), "search finished");
                self.results = results;
                self.error = None;
            }
            Err(e) if e.is_cancelled() => {}
            Err(e) => {
                warn!(query = %self.query, error = %e, "search failed");
                self.results.clear();
                self.error = Some(e.to_string());
            }
        }
        true
    }
}
