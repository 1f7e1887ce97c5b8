//! Ordered date pattern fallback for feed timestamps
//!
//! The feed reports sunset and observation times as free-form strings
//! (`"7:42 PM"`, `"19:42"`, ...). Patterns are tried in order and the first
//! one that parses wins.

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::{Result, WeatherFeedError};

/// Ordered list of chrono format strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePatterns {
    patterns: Vec<String>,
}

impl Default for DatePatterns {
    fn default() -> Self {
        Self::new(vec![
            "%I:%M %p".to_string(),
            "%H:%M".to_string(),
            "%m/%d/%Y %I:%M %p".to_string(),
        ])
    }
}

impl DatePatterns {
    #[must_use]
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }

    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Reject an empty list or a pattern chrono cannot compile
    pub fn validate(&self) -> Result<()> {
        if self.patterns.is_empty() {
            return Err(WeatherFeedError::config(
                "At least one date pattern must be configured",
            ));
        }

        for pattern in &self.patterns {
            let broken = pattern.trim().is_empty()
                || StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error));
            if broken {
                return Err(WeatherFeedError::config(format!(
                    "Invalid date pattern '{pattern}'"
                )));
            }
        }

        Ok(())
    }

    /// Parse `text` with the first pattern that accepts it.
    ///
    /// Time-only values land on 1970-01-01 and date-only values at midnight,
    /// so two values parsed by the same time pattern compare by time of day.
    #[must_use]
    pub fn parse(&self, text: &str) -> Option<NaiveDateTime> {
        let text = text.trim();
        self.patterns
            .iter()
            .find_map(|pattern| parse_with_pattern(text, pattern))
    }
}

fn parse_with_pattern(text: &str, pattern: &str) -> Option<NaiveDateTime> {
    if let Ok(date_time) = NaiveDateTime::parse_from_str(text, pattern) {
        return Some(date_time);
    }

    if let Ok(time) = NaiveTime::parse_from_str(text, pattern) {
        return epoch_date().map(|date| date.and_time(time));
    }

    NaiveDate::parse_from_str(text, pattern)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn epoch_date() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1970, 1, 1)
}
