//! Movie database access.
//!
//! [`MovieApi`] is the seam between the controllers and the network. The
//! production implementation is [`OmdbClient`]; tests substitute in-memory mocks.

pub mod error;
pub mod omdb;

use async_trait::async_trait;
pub use error::ApiError;
pub use omdb::OmdbClient;

use crate::models::{MovieDetail, SearchResult};

#[async_trait]
pub trait MovieApi: Send + Sync {
    /// Search titles matching `query`
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ApiError>;

    /// Fetch the full record for one title
    async fn fetch_detail(&self, id: &str) -> Result<MovieDetail, ApiError>;
}
