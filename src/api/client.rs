//! The fetch collaborator: one read-only call that retrieves the entire
//! country collection. No pagination, no server-side filtering.
//!
//! The trait seam exists so the TUI layer and tests can swap in fakes;
//! `RestCountriesClient` is the only production implementation.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};

use super::types::Country;

/// Errors that can occur while fetching the collection.
/// None of these are fatal to the app — the caller degrades per layer.
#[derive(Debug)]
pub enum FetchError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned a non-success status.
    Api { status: u16 },
    /// Response body was not the expected JSON array.
    Parse(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "network error: {msg}"),
            FetchError::Api { status } => write!(f, "API error (HTTP {status})"),
            FetchError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// A source of country records.
#[async_trait]
pub trait CountrySource: Send + Sync {
    /// Fetch the full collection, sorted by common name.
    async fn fetch_all(&self) -> Result<Vec<Country>, FetchError>;
}

/// HTTP client for the restcountries v3.1 API.
pub struct RestCountriesClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestCountriesClient {
    /// Create a client against the given base URL (e.g. "https://restcountries.com").
    /// A trailing slash on the base is tolerated.
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl CountrySource for RestCountriesClient {
    async fn fetch_all(&self) -> Result<Vec<Country>, FetchError> {
        let url = format!("{}/v3.1/all", self.base_url);
        debug!("Fetching country collection from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Api {
                status: status.as_u16(),
            });
        }

        let mut countries: Vec<Country> = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        // One-time upstream sort; the list view preserves this order
        countries.sort_by(|a, b| a.name.common.cmp(&b.name.common));

        info!("Fetched {} countries", countries.len());
        Ok(countries)
    }
}
