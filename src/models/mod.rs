//! Data models for movie search and the watched list.
//!
//! - [`SearchResult`] - one row of a title search
//! - [`MovieDetail`] - full record for a selected title
//! - [`WatchedEntry`] - a rated title persisted in the watched list
//! - [`WatchedSummary`] - averages across the watched list
//!
//! API records are decoded from OMDb's JSON using the helpers in `deserializers`.

pub mod deserializers;
pub mod movie;
pub mod watched;

pub use movie::{MovieDetail, SearchResult};
pub use watched::{MAX_USER_RATING, WatchedEntry, WatchedSummary};
