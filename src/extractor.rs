//! Field extraction from a parsed weather feed
//!
//! [`FeedExtractor`] locates the five top-level sections of the feed once
//! and then answers typed lookups against them. Missing sections and
//! missing leaves are `None`; present but malformed values are
//! [`WeatherFeedError::InvalidValue`]; missing structure that the forecast
//! cannot do without is [`WeatherFeedError::MissingElement`].

use std::str::FromStr;

use tracing::{debug, error, warn};

use crate::dates::DatePatterns;
use crate::models::{
    CurrentConditions, FeedLocation, ForecastDay, TimeOfDay, TimeOfDaySelection, Units,
    WeatherSnapshot,
};
use crate::xml::FeedNode;
use crate::{Result, WeatherFeedError};

/// Tag and attribute names of the feed schema
pub mod tags {
    pub const UNITS: &str = "units";
    pub const LOCAL: &str = "local";
    pub const CURRENT: &str = "currentconditions";
    pub const FORECAST: &str = "forecast";
    pub const PLANETS: &str = "planets";

    pub const CITY: &str = "city";
    pub const STATE: &str = "state";
    pub const LAT: &str = "lat";
    pub const LON: &str = "lon";

    pub const CURR_TEMP: &str = "temperature";
    pub const CURR_COND: &str = "weathertext";
    pub const CURR_ICON: &str = "weathericon";
    pub const CURR_WIND_SPEED: &str = "windspeed";
    pub const CURR_WIND_DIR: &str = "winddirection";
    pub const CURR_HUMIDITY: &str = "humidity";
    pub const CURR_PRESSURE: &str = "pressure";
    pub const OBSERVATION_TIME: &str = "observationtime";
    pub const URL: &str = "url";

    pub const PRES: &str = "pres";
    pub const TEMP: &str = "temp";
    pub const SPEED: &str = "speed";

    pub const SUN: &str = "sun";
    pub const SUNSET_ATTR: &str = "set";

    pub const FORECAST_DAY: &str = "day";
    pub const DAYTIME: &str = "daytime";
    pub const NIGHTTIME: &str = "nighttime";
    pub const FORECAST_DAYCODE: &str = "daycode";
    pub const FORECAST_COND: &str = "txtshort";
    pub const FORECAST_HIGH: &str = "hightemperature";
    pub const FORECAST_LOW: &str = "lowtemperature";
    pub const FORECAST_ICON: &str = "weathericon";
}

/// Pressure value the feed reports when no reading is available
const PRESSURE_UNAVAILABLE: &str = "-999";

/// Read-only view over one feed document
pub struct FeedExtractor<N: FeedNode> {
    units: Option<N>,
    local: Option<N>,
    current: Option<N>,
    forecast: Option<N>,
    planets: Option<N>,
    date_patterns: DatePatterns,
}

impl<N: FeedNode> FeedExtractor<N> {
    /// Locate the top-level sections below `root`
    pub fn new(root: N, date_patterns: DatePatterns) -> Self {
        let extractor = Self {
            units: root.child_element(tags::UNITS),
            local: root.child_element(tags::LOCAL),
            current: root.child_element(tags::CURRENT),
            forecast: root.child_element(tags::FORECAST),
            planets: root.child_element(tags::PLANETS),
            date_patterns,
        };

        debug!(
            root = root.element_name(),
            units = extractor.units.is_some(),
            local = extractor.local.is_some(),
            current = extractor.current.is_some(),
            forecast = extractor.forecast.is_some(),
            planets = extractor.planets.is_some(),
            "Located feed sections"
        );

        extractor
    }

    pub fn city(&self) -> Option<String> {
        leaf_text(self.local, tags::CITY)
    }

    pub fn state(&self) -> Option<String> {
        leaf_text(self.local, tags::STATE)
    }

    pub fn latitude(&self) -> Result<Option<f64>> {
        leaf_number(self.local, tags::LAT)
    }

    pub fn longitude(&self) -> Result<Option<f64>> {
        leaf_number(self.local, tags::LON)
    }

    pub fn current_temperature(&self) -> Result<Option<i32>> {
        leaf_number(self.current, tags::CURR_TEMP)
    }

    pub fn current_condition(&self) -> Option<String> {
        leaf_text(self.current, tags::CURR_COND)
    }

    pub fn current_condition_icon(&self) -> Option<String> {
        leaf_text(self.current, tags::CURR_ICON)
    }

    pub fn wind_speed(&self) -> Result<Option<f64>> {
        leaf_number(self.current, tags::CURR_WIND_SPEED)
    }

    pub fn wind_direction(&self) -> Option<String> {
        leaf_text(self.current, tags::CURR_WIND_DIR)
    }

    /// Relative humidity; the feed writes it as `"54%"`
    pub fn humidity(&self) -> Result<Option<f64>> {
        let Some(text) = leaf_text(self.current, tags::CURR_HUMIDITY) else {
            return Ok(None);
        };

        let number = match text.find('%') {
            Some(index) => &text[..index],
            None => text.as_str(),
        };

        parse_number(tags::CURR_HUMIDITY, number).map(Some)
    }

    /// Barometric pressure, `None` when the feed reports `-999`
    pub fn pressure(&self) -> Result<Option<f64>> {
        match leaf_text(self.current, tags::CURR_PRESSURE) {
            Some(text) if text.trim() == PRESSURE_UNAVAILABLE => {
                debug!("Pressure reported as unavailable");
                Ok(None)
            }
            Some(text) => parse_number(tags::CURR_PRESSURE, &text).map(Some),
            None => Ok(None),
        }
    }

    pub fn pressure_unit(&self) -> Option<String> {
        leaf_text(self.units, tags::PRES)
    }

    pub fn temperature_unit(&self) -> Option<String> {
        leaf_text(self.units, tags::TEMP)
    }

    pub fn wind_unit(&self) -> Option<String> {
        leaf_text(self.units, tags::SPEED)
    }

    pub fn more_information_link(&self) -> Option<String> {
        leaf_text(self.current, tags::URL)
    }

    pub fn observation_time(&self) -> Option<String> {
        leaf_text(self.current, tags::OBSERVATION_TIME)
    }

    /// Sunset time as written in the `set` attribute of `planets/sun`
    pub fn sunset_time(&self) -> Option<String> {
        self.planets
            .and_then(|planets| planets.child_element(tags::SUN))
            .and_then(|sun| sun.attribute_value(tags::SUNSET_ATTR).map(str::to_string))
    }

    /// Decide once whether the forecast shows the day or night half.
    ///
    /// Fails when the sunset or observation time is absent. Timestamps that
    /// are present but match no date pattern fall back to `Day`.
    pub fn time_of_day(&self) -> Result<TimeOfDaySelection> {
        let Some(sunset_text) = self.sunset_time() else {
            debug!("Unable to retrieve sunset time");
            return Err(WeatherFeedError::missing("planets/sun/@set"));
        };

        let Some(observed_text) = self.observation_time() else {
            debug!("Unable to retrieve observation time");
            return Err(WeatherFeedError::missing("currentconditions/observationtime"));
        };

        let sunset = self.date_patterns.parse(&sunset_text);
        if sunset.is_none() {
            warn!(sunset = %sunset_text, "Unable to parse sunset time");
        }

        let observed = self.date_patterns.parse(&observed_text);
        if observed.is_none() {
            warn!(observed = %observed_text, "Unable to parse observation time");
        }

        match (sunset, observed) {
            (Some(sunset), Some(observed)) => Ok(TimeOfDaySelection {
                period: TimeOfDay::from_times(&sunset, &observed),
                defaulted: false,
            }),
            _ => {
                warn!("Unable to determine time of day for forecast rendering, defaulting to day time");
                Ok(TimeOfDaySelection {
                    period: TimeOfDay::Day,
                    defaulted: true,
                })
            }
        }
    }

    /// Forecast days in feed order.
    ///
    /// An empty forecast list, or any day lacking the selected
    /// `daytime`/`nighttime` block, fails the whole retrieval.
    pub fn forecast(&self) -> Result<Vec<ForecastDay>> {
        let selection = self.time_of_day()?;

        let day_elements = self
            .forecast
            .map(|forecast| forecast.child_elements(tags::FORECAST_DAY))
            .unwrap_or_default();

        if day_elements.is_empty() {
            error!("Empty forecast list");
            return Err(WeatherFeedError::missing("forecast/day"));
        }

        let period_tag = match selection.period {
            TimeOfDay::Day => tags::DAYTIME,
            TimeOfDay::Night => tags::NIGHTTIME,
        };

        day_elements
            .iter()
            .map(|day| forecast_day(*day, period_tag))
            .collect()
    }

    pub fn location(&self) -> Result<FeedLocation> {
        Ok(FeedLocation {
            city: self.city(),
            state: self.state(),
            latitude: self.latitude()?,
            longitude: self.longitude()?,
        })
    }

    pub fn current_conditions(&self) -> Result<CurrentConditions> {
        Ok(CurrentConditions {
            temperature: self.current_temperature()?,
            condition: self.current_condition(),
            icon: self.current_condition_icon(),
            wind_speed: self.wind_speed()?,
            wind_direction: self.wind_direction(),
            humidity: self.humidity()?,
            pressure: self.pressure()?,
            more_information_link: self.more_information_link(),
            observation_time: self.observation_time(),
        })
    }

    pub fn units(&self) -> Units {
        Units {
            pressure: self.pressure_unit(),
            temperature: self.temperature_unit(),
            wind_speed: self.wind_unit(),
        }
    }

    /// Assemble every field; a forecast with missing structure is left empty
    pub fn snapshot(&self) -> Result<WeatherSnapshot> {
        let forecast = match self.forecast() {
            Ok(days) => days,
            Err(e) if e.is_missing() => {
                warn!("Omitting forecast: {e}");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        Ok(WeatherSnapshot {
            location: self.location()?,
            current: self.current_conditions()?,
            units: self.units(),
            forecast,
        })
    }
}

fn forecast_day<N: FeedNode>(day: N, period_tag: &str) -> Result<ForecastDay> {
    let period = day
        .child_element(period_tag)
        .ok_or_else(|| WeatherFeedError::missing(format!("forecast/day/{period_tag}")))?;

    let day_code = required_text(day, tags::FORECAST_DAYCODE)?;
    let condition = required_text(period, tags::FORECAST_COND)?;
    let high = required_text(period, tags::FORECAST_HIGH)?;
    let low = required_text(period, tags::FORECAST_LOW)?;
    let icon = required_text(period, tags::FORECAST_ICON)?;

    Ok(ForecastDay {
        condition,
        day: ForecastDay::abbreviate_day(&day_code),
        icon,
        high_temperature: parse_number(tags::FORECAST_HIGH, &high)?,
        low_temperature: parse_number(tags::FORECAST_LOW, &low)?,
    })
}

fn leaf_text<N: FeedNode>(section: Option<N>, tag: &str) -> Option<String> {
    section
        .and_then(|section| section.child_element(tag))
        .map(|element| element.text_content())
}

fn leaf_number<N: FeedNode, T: FeedNumber>(section: Option<N>, tag: &str) -> Result<Option<T>> {
    leaf_text(section, tag)
        .map(|text| parse_number(tag, &text))
        .transpose()
}

fn required_text<N: FeedNode>(parent: N, tag: &str) -> Result<String> {
    parent.child_element(tag).map(|e| e.text_content()).ok_or_else(|| {
        WeatherFeedError::missing(format!("{}/{tag}", parent.element_name()))
    })
}

/// Numeric values the feed carries as text
trait FeedNumber: FromStr {
    /// `inf` and `NaN` parse as `f64` but are not readings
    fn is_reading(&self) -> bool;
}

impl FeedNumber for f64 {
    fn is_reading(&self) -> bool {
        self.is_finite()
    }
}

impl FeedNumber for i32 {
    fn is_reading(&self) -> bool {
        true
    }
}

fn parse_number<T: FeedNumber>(field: &str, text: &str) -> Result<T> {
    text.trim()
        .parse::<T>()
        .ok()
        .filter(T::is_reading)
        .ok_or_else(|| WeatherFeedError::invalid(field, text))
}
