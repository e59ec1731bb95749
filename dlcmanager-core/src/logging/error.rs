//! Error types for the logging subsystem

use std::fmt;

/// Errors raised while installing the global subscriber
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    /// A global subscriber was already installed, or installation failed
    InitializationFailed(String),
    /// The requested level or filter directive could not be understood
    InvalidLevel(String),
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggingError::InitializationFailed(msg) => {
                write!(f, "Failed to initialize logging: {}", msg)
            }
            LoggingError::InvalidLevel(level) => {
                write!(f, "Unknown log level '{}'", level)
            }
        }
    }
}

impl std::error::Error for LoggingError {}
