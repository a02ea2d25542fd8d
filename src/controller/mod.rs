//! Controllers behind the TUI.
//!
//! - [`SearchController`] - query text and the newest search's results
//! - [`DetailController`] - selection toggle, detail fetch and rating input
//! - [`KeyListeners`] - global keys scoped to the UI state that owns them
//!
//! Both fetching controllers share [`LatestFetch`]: at most one request in
//! flight, superseded requests aborted, stale responses discarded.

pub mod detail;
pub mod fetch;
pub mod keys;
pub mod search;

pub use detail::DetailController;
pub use fetch::LatestFetch;
pub use keys::{Hotkey, KeyListeners, Subscription};
pub use search::{MAX_QUERY_LEN, SearchController};

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::{DetailController, SearchController};
    use crate::api::{ApiError, MovieApi};
    use crate::models::{MovieDetail, SearchResult};

    /// In-memory API with per-key delays and canned errors
    #[derive(Default)]
    pub struct MockApi {
        results: HashMap<String, Vec<SearchResult>>,
        details: HashMap<String, MovieDetail>,
        search_errors: HashMap<String, ApiError>,
        detail_errors: HashMap<String, ApiError>,
        delays_ms: HashMap<String, u64>,
        search_calls: AtomicUsize,
        detail_calls: AtomicUsize,
    }

    impl MockApi {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_results(mut self, query: &str, ids: &[&str]) -> Self {
            let results = ids
                .iter()
                .map(|id| SearchResult {
                    id: id.to_string(),
                    title: format!("{} {}", query, id),
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

        pub fn with_search_error(mut self, query: &str, error: ApiError) -> Self {
            self.search_errors.insert(query.to_string(), error);
            self
        }

        pub fn with_detail_error(mut self, id: &str, error: ApiError) -> Self {
            self.detail_errors.insert(id.to_string(), error);
            self
        }

        /// Delay responses for a query or id
        pub fn with_delay(mut self, key: &str, ms: u64) -> Self {
            self.delays_ms.insert(key.to_string(), ms);
            self
        }

        pub fn search_calls(&self) -> usize {
            self.search_calls.load(Ordering::SeqCst)
        }

        pub fn detail_calls(&self) -> usize {
            self.detail_calls.load(Ordering::SeqCst)
        }

        async fn delay(&self, key: &str) {
            if let Some(ms) = self.delays_ms.get(key) {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
            }
        }
    }

    #[async_trait]
    impl MovieApi for MockApi {
        async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ApiError> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            self.delay(query).await;
            if let Some(error) = self.search_errors.get(query) {
                return Err(error.clone());
            }
            self.results
                .get(query)
                .cloned()
                .ok_or_else(|| ApiError::NotFound("Movie not found!".to_string()))
        }

        async fn fetch_detail(&self, id: &str) -> Result<MovieDetail, ApiError> {
            self.detail_calls.fetch_add(1, Ordering::SeqCst);
            self.delay(id).await;
            if let Some(error) = self.detail_errors.get(id) {
                return Err(error.clone());
            }
            Ok(self.details.get(id).cloned().unwrap_or_else(|| movie_detail(id, "Untitled")))
        }
    }

    pub fn movie_detail(id: &str, title: &str) -> MovieDetail {
        MovieDetail {
            id: id.to_string(),
            title: title.to_string(),
            year: "2010".to_string(),
            poster_url: String::new(),
            runtime_minutes: 120,
            external_rating: 7.5,
            plot: "A plot.".to_string(),
            release_date: "01 Jan 2010".to_string(),
            actors: "Someone".to_string(),
            director: "Somebody".to_string(),
            genre: "Drama".to_string(),
        }
    }

    pub async fn settle_search(search: &mut SearchController) {
        for _ in 0..400 {
            search.poll();
            if !search.is_loading() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    pub async fn settle_detail(detail: &mut DetailController) {
        for _ in 0..400 {
            detail.poll();
            if !detail.is_loading() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}
