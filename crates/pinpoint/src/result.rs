//! Result and error types for Pinpoint.

use thiserror::Error;

/// Result type for Pinpoint operations
pub type PinpointResult<T> = Result<T, PinpointError>;

/// Errors that can occur in Pinpoint
///
/// None of these abort an inspection: the public synthesis, rendering and
/// placement operations recover from each of them. They surface through the
/// fallible companions so callers can report what was recovered.
#[derive(Debug, Error)]
pub enum PinpointError {
    /// Template configuration could not be parsed as a structured object
    #[error("Template config parse failed: {message}")]
    ConfigParse {
        /// Error message
        message: String,
    },

    /// Template type is not in the registry
    #[error("Unknown template strategy '{name}'")]
    UnknownStrategy {
        /// Requested strategy name
        name: String,
    },

    /// A strategy could not produce a string
    #[error("Strategy '{strategy}' failed: {message}")]
    StrategyExecution {
        /// Strategy name
        strategy: String,
        /// Error message
        message: String,
    },

    /// Attribute preference entry is malformed
    #[error("Invalid attribute preference '{entry}': {reason}")]
    InvalidPreference {
        /// The offending entry
        entry: String,
        /// Why it was rejected
        reason: String,
    },

    /// No node exists at the given tree path
    #[error("No element at path '{path}'")]
    NodeNotFound {
        /// Child-index path
        path: String,
    },

    /// Settings could not be loaded or stored
    #[error("Settings error: {message}")]
    Settings {
        /// Error message
        message: String,
    },

    /// Render channel failed to deliver a response
    #[error("Render channel error: {message}")]
    Channel {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl PinpointError {
    /// Create a strategy execution error
    #[must_use]
    pub fn strategy(strategy: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StrategyExecution {
            strategy: strategy.into(),
            message: message.into(),
        }
    }

    /// Create an invalid preference error
    #[must_use]
    pub fn invalid_preference(entry: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPreference {
            entry: entry.into(),
            reason: reason.into(),
        }
    }

    /// Create a settings error
    #[must_use]
    pub fn settings(message: impl Into<String>) -> Self {
        Self::Settings {
            message: message.into(),
        }
    }

    /// Create a render channel error
    #[must_use]
    pub fn channel(message: impl Into<String>) -> Self {
        Self::Channel {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_error_display() {
        let err = PinpointError::strategy("cypress", "bad options");
        assert_eq!(err.to_string(), "Strategy 'cypress' failed: bad options");
    }

    #[test]
    fn test_invalid_preference_display() {
        let err = PinpointError::invalid_preference("data-cy+", "empty composite part");
        assert!(err.to_string().contains("data-cy+"));
        assert!(err.to_string().contains("empty composite part"));
    }

    #[test]
    fn test_node_not_found_display() {
        let err = PinpointError::NodeNotFound {
            path: "0/3".to_string(),
        };
        assert_eq!(err.to_string(), "No element at path '0/3'");
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: PinpointError = io_err.into();
        assert!(err.to_string().contains("I/O"));
    }
}
