//! Current conditions, unit labels and the assembled snapshot

use serde::{Deserialize, Serialize};

use super::{FeedLocation, ForecastDay};

/// Current observation block of the feed
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct CurrentConditions {
    pub temperature: Option<i32>,
    /// Human-readable description of weather conditions
    pub condition: Option<String>,
    /// Feed icon code for the condition
    pub icon: Option<String>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<String>,
    /// Relative humidity in percent
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub more_information_link: Option<String>,
    pub observation_time: Option<String>,
}

/// Unit labels the feed reports its values in
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Units {
    pub pressure: Option<String>,
    pub temperature: Option<String>,
    pub wind_speed: Option<String>,
}

/// Everything the widget renders for one feed document
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct WeatherSnapshot {
    pub location: FeedLocation,
    pub current: CurrentConditions,
    pub units: Units,
    pub forecast: Vec<ForecastDay>,
}

impl CurrentConditions {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self, units: &Units) -> Option<String> {
        self.temperature
            .map(|t| format!("{t}°{}", units.temperature.as_deref().unwrap_or_default()))
    }

    /// Format wind information
    #[must_use]
    pub fn format_wind(&self, units: &Units) -> Option<String> {
        let speed = self.wind_speed?;
        let unit = units.wind_speed.as_deref().unwrap_or_default();
        Some(match self.wind_direction.as_deref() {
            Some(direction) => format!("{direction} {speed:.0} {unit}").trim_end().to_string(),
            None => format!("{speed:.0} {unit}").trim_end().to_string(),
        })
    }

    /// Format atmospheric pressure with unit
    #[must_use]
    pub fn format_pressure(&self, units: &Units) -> Option<String> {
        self.pressure.map(|p| {
            format!("{p:.2} {}", units.pressure.as_deref().unwrap_or_default())
                .trim_end()
                .to_string()
        })
    }

    #[must_use]
    pub fn format_humidity(&self) -> Option<String> {
        self.humidity.map(|h| format!("{h:.0}%"))
    }
}
