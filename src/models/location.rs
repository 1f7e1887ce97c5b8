//! Location metadata reported by the feed

use serde::{Deserialize, Serialize};

/// Location block of the feed; every field is optional
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct FeedLocation {
    pub city: Option<String>,
    pub state: Option<String>,
    /// Latitude in decimal degrees
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees
    pub longitude: Option<f64>,
}

impl FeedLocation {
    /// "City, State", whichever parts are known
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        match (self.city.as_deref(), self.state.as_deref()) {
            (Some(city), Some(state)) => Some(format!("{city}, {state}")),
            (Some(city), None) => Some(city.to_string()),
            (None, Some(state)) => Some(state.to_string()),
            (None, None) => None,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> Option<String> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(format!("{lat:.4}, {lon:.4}")),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let mut location = FeedLocation {
            city: Some("Chicago".to_string()),
            state: Some("IL".to_string()),
            ..FeedLocation::default()
        };
        assert_eq!(location.display_name().as_deref(), Some("Chicago, IL"));

        location.state = None;
        assert_eq!(location.display_name().as_deref(), Some("Chicago"));

        location.city = None;
        assert!(location.display_name().is_none());
    }

    #[test]
    fn test_format_coordinates() {
        let location = FeedLocation {
            latitude: Some(41.88),
            longitude: Some(-87.63),
            ..FeedLocation::default()
        };
        assert_eq!(
            location.format_coordinates().as_deref(),
            Some("41.8800, -87.6300")
        );
        assert!(FeedLocation::default().format_coordinates().is_none());
    }
}
