use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{ApiError, MovieApi};
use crate::config::Config;
use crate::models::{MovieDetail, SearchResult};

/// Shown when OMDb reports no match but omits its own message
const DEFAULT_NOT_FOUND: &str = "Movies not found";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "Search", default)]
    search: Vec<SearchResult>,
}

/// HTTP client for the OMDb API
#[derive(Clone)]
pub struct OmdbClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("popcorn/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, endpoint: endpoint.into(), api_key: api_key.into() })
    }

    /// Build a client from loaded configuration. Fails when no API key is set.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.require_api_key()?;
        Ok(Self::new(
            config.endpoint.clone(),
            api_key,
            Duration::from_secs(config.request_timeout_secs),
        )?)
    }

    async fn get(&self, params: &[(&str, &str)]) -> Result<String, ApiError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        check_status(response.status())?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl MovieApi for OmdbClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ApiError> {
        debug!(query, "searching OMDb");
        let body = self.get(&[("s", query)]).await?;
        parse_search_body(&body)
    }

    async fn fetch_detail(&self, id: &str) -> Result<MovieDetail, ApiError> {
        debug!(id, "fetching OMDb detail");
        let body = self.get(&[("i", id)]).await?;
        parse_detail_body(&body)
    }
}

fn check_status(status: StatusCode) -> Result<(), ApiError> {
    if status.is_success() { Ok(()) } else { Err(ApiError::Network { status: status.as_u16() }) }
}

/// OMDb answers 200 with `"Response": "False"` when nothing matches
fn check_response_flag(value: &Value) -> Result<(), ApiError> {
    let failed = value
        .get("Response")
        .and_then(Value::as_str)
        .map(|flag| flag.eq_ignore_ascii_case("false"))
        .unwrap_or(false);

    if failed {
        let message = value
            .get("Error")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_NOT_FOUND);
        return Err(ApiError::NotFound(message.to_string()));
    }
    Ok(())
}

pub(crate) fn parse_search_body(body: &str) -> Result<Vec<SearchResult>, ApiError> {
    let value: Value = serde_json::from_str(body)?;
    check_response_flag(&value)?;
    let response: SearchResponse = serde_json::from_value(value)?;
    Ok(response.search)
}

pub(crate) fn parse_detail_body(body: &str) -> Result<MovieDetail, ApiError> {
    let value: Value = serde_json::from_str(body)?;
    check_response_flag(&value)?;
    Ok(serde_json::from_value(value)?)
}
