//! Error types and handling for the weather feed adapter

use thiserror::Error;

/// Main error type for the weather feed adapter
#[derive(Error, Debug)]
pub enum WeatherFeedError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Feed retrieval failed (network failure or non-success status)
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The feed body could not be parsed as XML
    #[error("Document error: {message}")]
    Document { message: String },

    /// A structurally required element is not present in the feed
    #[error("Missing required element: {element}")]
    MissingElement { element: String },

    /// An element is present but its text cannot be converted
    #[error("Invalid value for {field}: '{value}'")]
    InvalidValue { field: String, value: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WeatherFeedError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a new document error
    pub fn document<S: Into<String>>(message: S) -> Self {
        Self::Document {
            message: message.into(),
        }
    }

    /// Create a new missing-element error
    pub fn missing<S: Into<String>>(element: S) -> Self {
        Self::MissingElement {
            element: element.into(),
        }
    }

    /// Create a new invalid-value error
    pub fn invalid<F: Into<String>, V: Into<String>>(field: F, value: V) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
        }
    }

    /// True when the error reports absent required structure
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::MissingElement { .. })
    }

    /// True when the error reports present but unparsable content
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::InvalidValue { .. })
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherFeedError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            WeatherFeedError::Transport { .. } => {
                "Unable to retrieve the weather feed. Please check your internet connection."
                    .to_string()
            }
            WeatherFeedError::Document { .. } => {
                "The weather feed returned a document that could not be read.".to_string()
            }
            WeatherFeedError::MissingElement { element } => {
                format!("The weather feed is missing required data: {element}")
            }
            WeatherFeedError::InvalidValue { field, .. } => {
                format!("The weather feed contains an invalid {field}")
            }
            WeatherFeedError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
