//! HTTP client for the artwork listing endpoint.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, RETRY_AFTER, USER_AGENT};

use super::PageSource;
use super::types::ArtworkListing;
use crate::config::CatalogSettings;
use crate::error::{CatalogError, Result};

/// Catalog API client.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    endpoint: String,
}

impl CatalogClient {
    /// Creates a client for the endpoint and timeout in `settings`.
    pub fn new(settings: &CatalogSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let agent = HeaderValue::from_str(&settings.user_agent)
            .map_err(|e| CatalogError::Network(format!("invalid user agent: {e}")))?;
        headers.insert(USER_AGENT, agent);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(settings.request_timeout())
            .build()
            .map_err(|e| CatalogError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
        })
    }

    /// The listing endpoint this client talks to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Builds the listing URL for a one-based page.
    fn listing_url(&self, page: usize, limit: usize) -> String {
        let separator = if self.endpoint.contains('?') { '&' } else { '?' };
        format!(
            "{}{}page={}&limit={}",
            self.endpoint, separator, page, limit
        )
    }

    /// Fetches one page of the listing.
    pub async fn get_listing(&self, page: usize, limit: usize) -> Result<ArtworkListing> {
        let url = self.listing_url(page, limit);

        tracing::debug!("Fetching artworks from {}", url);

        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    /// Checks the status and parses the JSON body.
    async fn handle_response(&self, response: reqwest::Response) -> Result<ArtworkListing> {
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);

            return Err(CatalogError::RateLimited { retry_after });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let listing: ArtworkListing = serde_json::from_slice(&bytes)?;

        Ok(listing)
    }
}

impl PageSource for CatalogClient {
    async fn list_artworks(&self, page: usize, limit: usize) -> Result<ArtworkListing> {
        self.get_listing(page, limit).await
    }
}
