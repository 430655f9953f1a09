//! HTTP client for the data.gov.sg carpark availability feed.
//!
//! Every call fetches a complete snapshot; failures are returned as
//! [`FeedError`] without retrying.

use std::time::Duration;

use hdbpark_core::{AppConfig, AvailabilitySnapshot};
use reqwest::{Client, Url};

use crate::error::FeedError;
use crate::normalize::normalize_availability;
use crate::types::AvailabilityResponse;

/// Client for the live availability endpoint.
///
/// Use [`AvailabilityClient::from_config`] in the binary or
/// [`AvailabilityClient::new`] to point at a mock server in tests.
pub struct AvailabilityClient {
    client: Client,
    url: Url,
}

impl AvailabilityClient {
    /// Creates a client for the given feed URL.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`FeedError::InvalidUrl`] if `url` does not
    /// parse.
    pub fn new(url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let url = Url::parse(url).map_err(|e| FeedError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, url })
    }

    /// Creates a client from the feed settings in [`AppConfig`].
    ///
    /// # Errors
    ///
    /// See [`AvailabilityClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, FeedError> {
        Self::new(
            &config.availability_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetches and normalizes the current availability snapshot.
    ///
    /// # Errors
    ///
    /// - [`FeedError::Http`] on network failure.
    /// - [`FeedError::UnexpectedStatus`] on any non-2xx response.
    /// - [`FeedError::Deserialize`] if the body is not the expected JSON.
    /// - [`FeedError::EmptyPayload`] if the feed carries no items.
    pub async fn fetch_availability(&self) -> Result<AvailabilitySnapshot, FeedError> {
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.url.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed: AvailabilityResponse =
            serde_json::from_str(&body).map_err(|e| FeedError::Deserialize {
                context: self.url.to_string(),
                source: e,
            })?;

        let snapshot = normalize_availability(parsed, self.url.as_str())?;
        tracing::info!(carparks = snapshot.len(), "fetched availability snapshot");
        Ok(snapshot)
    }
}
