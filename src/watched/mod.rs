//! Durable watched list
//!
//! The in-memory ordered list owned by [`WatchedStore`] is the source of truth.
//! After every mutation the whole list is rewritten to a single JSON file
//! (the `watched` slot). Loading never fails: missing or corrupt data starts
//! an empty list.

pub mod persistence;
pub mod store;

pub use persistence::{load_entries, save_entries};
pub use store::WatchedStore;
