//! Error handling for the NovaDE core layer.
//!
//! This module provides error types and utilities for error handling
//! throughout the NovaDE desktop environment. It defines a set of
//! error types using the `thiserror` crate for ergonomic error
//! definition and handling.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for the NovaDE desktop environment.
///
/// This enum represents all possible errors that can occur in the core layer.
/// It is designed to be used as a common error type throughout the application.
#[derive(Error, Debug)]
pub enum CoreError {
    /// An error occurred during I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An error occurred during configuration loading or parsing.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An error occurred during logging initialization or operation.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// An error occurred during a filesystem operation on a specific path.
    #[error("{message}")]
    Filesystem {
        /// Human-readable description of the failed operation.
        message: String,
        /// The path the operation was performed on.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A generic error with a custom message.
    #[error("{0}")]
    Generic(String),

    /// An error occurred with additional context.
    #[error("{context}: {source}")]
    WithContext {
        /// The error context description
        context: String,
        /// The source error
        source: Box<CoreError>,
    },
}

impl CoreError {
    /// Create a new generic error with the given message.
    pub fn generic<S: Into<String>>(msg: S) -> Self {
        CoreError::Generic(msg.into())
    }

    /// Add context to an error.
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        CoreError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Error type for configuration-related operations.
///
/// This enum represents errors that can occur during configuration
/// loading, parsing, or access.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file was not found.
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// The configuration file could not be read.
    #[error("Failed to read configuration file: {0}")]
    FileReadError(#[source] io::Error),

    /// The configuration file contains invalid TOML.
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A required configuration value is missing.
    #[error("Missing required configuration value: {0}")]
    MissingValue(String),

    /// A configuration value has an invalid type.
    #[error("Invalid configuration value type for {key}: expected {expected}")]
    InvalidValueType {
        /// The configuration key
        key: String,
        /// The expected type description
        expected: String,
    },

    /// A configuration value is out of the allowed range.
    #[error("Configuration value out of range for {key}: {message}")]
    ValueOutOfRange {
        /// The configuration key
        key: String,
        /// A message describing the valid range
        message: String,
    },

    /// A generic configuration error with a custom message.
    #[error("{0}")]
    Generic(String),

    /// The configuration failed post-parse validation.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    /// A standard directory (config, data, cache or state) could not be resolved.
    #[error("Could not determine {dir_type} directory")]
    DirectoryUnavailable {
        /// Which kind of directory failed to resolve, e.g. "App Config".
        dir_type: String,
    },
}

/// Error type for logging-related operations.
///
/// This enum represents errors that can occur during logging
/// initialization or operation.
#[derive(Error, Debug)]
pub enum LoggingError {
    /// Failed to initialize the logging system.
    #[error("Failed to initialize logging: {0}")]
    InitializationError(String),

    /// Failed to set the log filter.
    #[error("Failed to set log filter: {0}")]
    FilterError(String),

    /// An I/O error occurred during logging.
    #[error("Logging I/O error: {0}")]
    IoError(#[from] io::Error),
}
