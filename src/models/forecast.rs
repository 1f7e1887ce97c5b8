//! Forecast day records and the day/night selection

use serde::{Deserialize, Serialize};

/// Which half of each forecast day is shown
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    #[default]
    Day,
    Night,
}

impl TimeOfDay {
    /// Night once the sun has set before the observation, day otherwise
    #[must_use]
    pub fn from_times<T: PartialOrd>(sunset: &T, observed: &T) -> Self {
        if sunset < observed {
            TimeOfDay::Night
        } else {
            TimeOfDay::Day
        }
    }
}

/// Result of the day/night decision for a whole forecast
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDaySelection {
    pub period: TimeOfDay,
    /// Set when a timestamp could not be parsed and `Day` was assumed
    pub defaulted: bool,
}

/// One forecast day as shown in the widget
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ForecastDay {
    pub condition: String,
    /// Three-letter day abbreviation ("Wed")
    pub day: String,
    pub icon: String,
    pub high_temperature: i32,
    pub low_temperature: i32,
}

impl ForecastDay {
    /// Abbreviate a day code to its first three characters
    #[must_use]
    pub fn abbreviate_day(day_code: &str) -> String {
        day_code.trim().chars().take(3).collect()
    }

    #[must_use]
    pub fn format_range(&self) -> String {
        format!("{}°/{}°", self.high_temperature, self.low_temperature)
    }
}
