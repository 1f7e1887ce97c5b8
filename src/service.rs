//! Weather feed service
//!
//! Wires the transport, the XML parser and the extractor together.

use std::path::Path;

use tracing::{info, instrument};

use crate::client::FeedClient;
use crate::config::WeatherFeedConfig;
use crate::dates::DatePatterns;
use crate::extractor::FeedExtractor;
use crate::models::WeatherSnapshot;
use crate::xml::parse_document;
use crate::Result;

/// Fetches a feed and turns it into a [`WeatherSnapshot`]
pub struct WeatherService {
    client: FeedClient,
    date_patterns: DatePatterns,
}

impl WeatherService {
    pub fn new(config: &WeatherFeedConfig) -> Result<Self> {
        Ok(Self {
            client: FeedClient::new(&config.feed)?,
            date_patterns: config.date_patterns(),
        })
    }

    /// Retrieve and extract the feed for a location code
    #[instrument(skip(self))]
    pub async fn current_weather(&self, location: &str, metric: bool) -> Result<WeatherSnapshot> {
        let xml = self.client.fetch(location, metric).await?;
        let snapshot = self.from_xml(&xml)?;
        info!(
            forecast_days = snapshot.forecast.len(),
            "Retrieved weather for {location}"
        );
        Ok(snapshot)
    }

    /// Extract an already-retrieved feed document
    pub fn from_xml(&self, xml: &str) -> Result<WeatherSnapshot> {
        snapshot_from_xml(xml, &self.date_patterns)
    }
}

/// Parse a feed document and extract every field
#[instrument(skip(xml, date_patterns), fields(bytes = xml.len()))]
pub fn snapshot_from_xml(xml: &str, date_patterns: &DatePatterns) -> Result<WeatherSnapshot> {
    let document = parse_document(xml)?;
    FeedExtractor::new(document.root_element(), date_patterns.clone()).snapshot()
}

/// Read a feed document from disk and extract every field
#[instrument(skip(path, date_patterns), fields(path = %path.display()))]
pub fn snapshot_from_file(path: &Path, date_patterns: &DatePatterns) -> Result<WeatherSnapshot> {
    let xml = std::fs::read_to_string(path)?;
    snapshot_from_xml(&xml, date_patterns)
}
