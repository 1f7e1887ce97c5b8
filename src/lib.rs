//! `weatherfeed` - weather feed adapter for portal widgets
//!
//! This library fetches an AccuWeather-style XML feed, extracts location,
//! current conditions, unit labels and forecast days from it, and exposes
//! them as typed display models.

pub mod client;
pub mod config;
pub mod dates;
pub mod error;
pub mod extractor;
pub mod models;
pub mod service;
pub mod xml;

// Re-export core types for public API
pub use client::FeedClient;
pub use config::WeatherFeedConfig;
pub use dates::DatePatterns;
pub use error::WeatherFeedError;
pub use extractor::FeedExtractor;
pub use models::{
    CurrentConditions, FeedLocation, ForecastDay, TimeOfDay, TimeOfDaySelection, Units,
    WeatherSnapshot,
};
pub use service::{WeatherService, snapshot_from_file, snapshot_from_xml};
pub use xml::{FeedNode, parse_document};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherFeedError>;
