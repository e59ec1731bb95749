//! Faults raised by the host-side collaborators

use thiserror::Error;

/// Failures of permission lookup, record persistence, or client sync
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Permission lookup failed for {player}: {reason}")]
    PermissionLookup { player: String, reason: String },

    #[error("Failed to persist unlocks for {player}: {reason}")]
    Persistence { player: String, reason: String },

    #[error("Failed to notify client {player}: {reason}")]
    Notify { player: String, reason: String },

    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    #[error("World file I/O error: {0}")]
    Io(String),

    #[error("World file format error: {0}")]
    Format(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        GatewayError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Format(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_display() {
        let err = GatewayError::Persistence {
            player: "76561198000000001".to_string(),
            reason: "disk full".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to persist unlocks for 76561198000000001: disk full");
        assert_eq!(GatewayError::UnknownPlayer("42".into()).to_string(), "Unknown player: 42");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(GatewayError::from(io), GatewayError::Io(_)));
    }
}
