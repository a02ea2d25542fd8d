//! popcorn - search OMDb and keep a rated list of watched movies
//!
//! This library backs the `popcorn` terminal app. It provides:
//!
//! - An OMDb client behind the [`api::MovieApi`] trait
//! - Search and detail controllers where each new request supersedes the last
//! - A watched list mirrored to a JSON file on every change
//! - A ratatui interface and a small CLI over the same pieces
//!
//! # Example
//!
//! ```no_run
//! use popcorn_tui::{PathManager, WatchedStore};
//!
//! let paths = PathManager::new()?;
//! let store = WatchedStore::load(paths.watched_file());
//! let summary = store.summary();
//! println!("{} movies, average rating {:.2}", summary.count, summary.avg_user_rating);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod controller;
pub mod logging;
pub mod models;
pub mod tui;
pub mod utils;
pub mod watched;

// Re-export commonly used types
pub use api::{ApiError, MovieApi, OmdbClient};
pub use config::Config;
pub use controller::{DetailController, SearchController};
pub use models::{MovieDetail, SearchResult, WatchedEntry, WatchedSummary};
pub use utils::paths::{PathManager, format_path_with_tilde};
pub use watched::WatchedStore;
