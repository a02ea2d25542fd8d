use serde::{Deserialize, Serialize};

use super::deserializers::{deserialize_rating, deserialize_runtime};
use super::movie::MovieDetail;

/// Highest value the rating input accepts
pub const MAX_USER_RATING: u8 = 10;

/// A title the user has watched and rated.
///
/// Field names match the persisted layout (`imdbID`, `imdbRating`, `runtime`, ...)
/// so existing `watched` data keeps loading. Ratings and runtimes written as
/// `null` (unknown values) load as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchedEntry {
    #[serde(rename = "imdbID")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub year: String,
    #[serde(rename = "poster", default)]
    pub poster_url: String,
    #[serde(rename = "imdbRating", default, deserialize_with = "deserialize_rating")]
    pub external_rating: f64,
    #[serde(rename = "runtime", default, deserialize_with = "deserialize_runtime")]
    pub runtime_minutes: u32,
    #[serde(rename = "userRating")]
    pub user_rating: u8,
}

impl WatchedEntry {
    /// Build an entry from a fetched detail and the rating the user picked
    pub fn from_detail(detail: &MovieDetail, user_rating: u8) -> Self {
        Self {
            id: detail.id.clone(),
            title: detail.title.clone(),
            year: detail.year.clone(),
            poster_url: detail.poster_url.clone(),
            external_rating: detail.external_rating,
            runtime_minutes: detail.runtime_minutes,
            user_rating,
        }
    }
}

/// Averages over the watched list. Every mean is 0 for an empty list.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct WatchedSummary {
    pub count: usize,
    pub avg_external_rating: f64,
    pub avg_user_rating: f64,
    pub avg_runtime_minutes: f64,
}

impl WatchedSummary {
    pub fn from_entries(entries: &[WatchedEntry]) -> Self {
        Self {
            count: entries.len(),
            avg_external_rating: average(entries.iter().map(|e| e.external_rating)),
            avg_user_rating: average(entries.iter().map(|e| f64::from(e.user_rating))),
            avg_runtime_minutes: average(entries.iter().map(|e| f64::from(e.runtime_minutes))),
        }
    }
}

fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}
