use std::sync::Arc;

use anyhow::Result;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use super::fetch::LatestFetch;
use crate::api::MovieApi;
use crate::models::{MAX_USER_RATING, MovieDetail, WatchedEntry};
use crate::watched::WatchedStore;

/// Selected title, its fetched detail and the rating being entered for it.
///
/// Detail fetches follow the same rule as searches: re-selecting aborts the
/// previous request and only the newest response is applied.
pub struct DetailController {
    api: Arc<dyn MovieApi>,
    selected_id: Option<String>,
    detail: Option<MovieDetail>,
    is_loading: bool,
    error: Option<String>,
    user_rating: u8,
    fetch: LatestFetch<MovieDetail>,
}

impl DetailController {
    pub fn new(api: Arc<dyn MovieApi>, runtime: Handle) -> Self {
        Self {
            api,
            selected_id: None,
            detail: None,
            is_loading: false,
            error: None,
            user_rating: 0,
            fetch: LatestFetch::new(runtime),
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.selected_id.is_some()
    }

    pub fn detail(&self) -> Option<&MovieDetail> {
        self.detail.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn user_rating(&self) -> u8 {
        self.user_rating
    }

    /// Select `id`, or clear the selection if `id` is already selected
    pub fn toggle(&mut self, id: &str) {
        if self.selected_id.as_deref() == Some(id) {
            self.close();
        } else {
            self.select(id);
        }
    }

    pub fn close(&mut self) {
        if self.selected_id.is_some() {
            debug!(id = ?self.selected_id, "closing detail view");
        }
        self.fetch.cancel();
        self.selected_id = None;
        self.detail = None;
        self.is_loading = false;
        self.error = None;
        self.user_rating = 0;
    }

    fn select(&mut self, id: &str) {
        self.selected_id = Some(id.to_string());
        self.detail = None;
        self.error = None;
        self.user_rating = 0;
        self.is_loading = true;

        let api = Arc::clone(&self.api);
        let id = id.to_string();
        debug!(id = %id, "fetching detail");
        self.fetch.start(async move { api.fetch_detail(&id).await });
    }

    /// Apply a finished detail fetch, if any. Returns `true` when state changed.
    pub fn poll(&mut self) -> bool {
        let Some(result) = self.fetch.poll() else {
            return false;
        };
        self.is_loading = false;

        match result {
            Ok(detail) => {
                self.detail = Some(detail);
                self.error = None;
            }
            Err(e) if e.is_cancelled() => {}
            Err(e) => {
                warn!(id = ?self.selected_id, error = %e, "detail fetch failed");
                self.error = Some(e.to_string());
            }
        }
        true
    }

    /// Rating callback from the star input. Values are clamped to 1..=10; 0 is ignored.
    pub fn set_rating(&mut self, rating: u8) {
        if rating == 0 || self.detail.is_none() {
            return;
        }
        self.user_rating = rating.min(MAX_USER_RATING);
    }

    pub fn adjust_rating(&mut self, delta: i8) {
        let next = (i16::from(self.user_rating) + i16::from(delta)).clamp(1, MAX_USER_RATING.into());
        self.set_rating(next as u8);
    }

    /// Rating stored for the selected title, if it is already watched
    pub fn watched_rating(&self, watched: &WatchedStore) -> Option<u8> {
        self.selected_id.as_deref().and_then(|id| watched.get(id)).map(|e| e.user_rating)
    }

    pub fn can_add(&self, watched: &WatchedStore) -> bool {
        self.detail.is_some() && self.user_rating > 0 && self.watched_rating(watched).is_none()
    }

    /// Append the selected title to `watched` and close the view.
    ///
    /// Returns `Ok(None)` when adding is not possible yet (no detail, no rating,
    /// or already watched).
    pub fn add_to_watched(&mut self, watched: &mut WatchedStore) -> Result<Option<WatchedEntry>> {
        if !self.can_add(watched) {
            return Ok(None);
        }
        let Some(detail) = self.detail.as_ref() else {
            return Ok(None);
        };

        let entry = WatchedEntry::from_detail(detail, self.user_rating);
        let saved = watched.add(entry.clone());
        self.close();
        saved.map(|()| Some(entry))
    }
}
