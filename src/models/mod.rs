//! Display models produced from the weather feed
//!
//! - Location: city, state and coordinates reported by the feed
//! - Weather: current conditions, unit labels and the full snapshot
//! - Forecast: per-day forecast records and the day/night selection

pub mod forecast;
pub mod location;
pub mod weather;

pub use forecast::{ForecastDay, TimeOfDay, TimeOfDaySelection};
pub use location::FeedLocation;
pub use weather::{CurrentConditions, Units, WeatherSnapshot};
