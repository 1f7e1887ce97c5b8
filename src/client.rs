//! HTTP transport for the weather feed
//!
//! Builds the feed URL from a location code and a unit-system flag and
//! returns the raw document body. Transient failures are retried by the
//! middleware stack; anything else surfaces as a transport error.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use tracing::{debug, error, instrument};

use crate::config::FeedConfig;
use crate::{Result, WeatherFeedError};

/// Weather feed HTTP client
pub struct FeedClient {
    client: ClientWithMiddleware,
    base_url: String,
}

impl FeedClient {
    /// Create a new client from the feed settings
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| WeatherFeedError::transport(format!("Failed to create HTTP client: {e}")))?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(inner)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Feed URL for a location code and unit system
    #[must_use]
    pub fn feed_url(&self, location: &str, metric: bool) -> String {
        format!(
            "{}{}&metric={}",
            self.base_url,
            urlencoding::encode(location),
            if metric { "1" } else { "0" }
        )
    }

    /// Fetch the raw feed document
    #[instrument(skip(self))]
    pub async fn fetch(&self, location: &str, metric: bool) -> Result<String> {
        let url = self.feed_url(location, metric);
        debug!("Retrieving weather feed for location {location} with metric {metric}");

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!("Feed request failed: {e}");
            WeatherFeedError::transport(format!("Unable to retrieve weather from feed: {e}"))
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            error!("Feed request failed with status {status}");
            return Err(WeatherFeedError::transport(format!(
                "Unable to retrieve weather from feed, invalid status code {status}"
            )));
        }

        response.text().await.map_err(|e| {
            WeatherFeedError::transport(format!("Failed to read feed response body: {e}"))
        })
    }
}
