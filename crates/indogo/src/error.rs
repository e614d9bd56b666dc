//! Error types for indogo.
//!
//! This module defines all error types used throughout the indogo crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for indogo operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Catalog Errors ===
    /// No flight matched the given selector.
    #[error("no flight matches '{selector}'")]
    FlightNotFound {
        /// The selector as given by the user.
        selector: String,
    },

    /// A departure time could not be parsed.
    #[error("invalid departure time '{input}': {reason}")]
    InvalidTime {
        /// The offending input.
        input: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    // === Document Errors ===
    /// Assembling the PDF document failed.
    #[error("PDF error: {0}")]
    Pdf(String),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for indogo operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Self::Pdf(err.to_string())
    }
}

impl Error {
    /// Create a configuration validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Create a flight-not-found error.
    #[must_use]
    pub fn flight_not_found(selector: impl Into<String>) -> Self {
        Self::FlightNotFound {
            selector: selector.into(),
        }
    }

    /// Create an invalid departure time error.
    #[must_use]
    pub fn invalid_time(input: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidTime {
            input: input.into(),
            reason,
        }
    }

    /// Create a new PDF error.
    #[must_use]
    pub fn pdf(message: impl Into<String>) -> Self {
        Self::Pdf(message.into())
    }

    /// Check if this error means the requested flight does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FlightNotFound { .. })
    }

    /// Check if this error is a configuration issue.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigLoad(_) | Self::ConfigValidation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flight_not_found_display() {
        let err = Error::flight_not_found("Lufthansa");
        assert_eq!(err.to_string(), "no flight matches 'Lufthansa'");
        assert!(err.is_not_found());
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_invalid_time_display() {
        let err = Error::invalid_time("25:00", "hour out of range");
        let msg = err.to_string();
        assert!(msg.contains("25:00"));
        assert!(msg.contains("hour out of range"));
    }

    #[test]
    fn test_validation_error() {
        let err = Error::validation("passenger name must not be empty");
        assert!(err.is_config_error());
        assert_eq!(
            err.to_string(),
            "invalid configuration: passenger name must not be empty"
        );
    }

    #[test]
    fn test_pdf_error() {
        let err = Error::pdf("bad stream");
        assert_eq!(err.to_string(), "PDF error: bad stream");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
