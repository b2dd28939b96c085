//! Error types for VisMove.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the whole VisMove workspace.
///
/// Library layers return this type; the application and CLI layers wrap it
/// in `anyhow` at their edges.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum VisMoveError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// JSON-RPC level error returned by a fullnode
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// Transport level error (connection, status code)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// A string that is not a valid Move address / object id
    #[error("Invalid address '{value}': {reason}")]
    InvalidAddress { value: String, reason: String },

    /// Any other malformed argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system, child processes)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Bytecode decompiler failed
    #[error("Decompile error: {0}")]
    Decompile(String),

    /// LLM explainer failed
    #[error("Explainer error: {0}")]
    Explainer(String),

    /// An action needs a connected wallet account
    #[error("Wallet not connected")]
    WalletNotConnected,

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl VisMoveError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an InvalidAddress error
    pub fn invalid_address(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAddress {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Creates an HTTP error
    pub fn http(message: impl Into<String>) -> Self {
        Self::Http(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Explainer error
    pub fn explainer(message: impl Into<String>) -> Self {
        Self::Explainer(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for VisMoveError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for VisMoveError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<bcs::Error> for VisMoveError {
    fn from(err: bcs::Error) -> Self {
        Self::Serialization {
            format: "BCS".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for VisMoveError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for VisMoveError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for VisMoveError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<String> for VisMoveError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, VisMoveError>`.
pub type Result<T> = std::result::Result<T, VisMoveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_conversion_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "revela");
        let err: VisMoveError = io.into();
        assert!(err.to_string().contains("NotFound"));
    }
}
