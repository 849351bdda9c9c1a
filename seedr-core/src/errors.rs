//! Error types for Seedr client operations.

use thiserror::Error;

use crate::types::ItemKind;

/// Errors that can occur while talking to the Seedr API.
#[derive(Debug, Error)]
pub enum SeedrError {
    /// Credentials, device code or refresh token were rejected.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// Reason reported by the token endpoint
        reason: String,
    },

    /// Access token expired or was revoked server-side.
    #[error("Access token expired or invalid")]
    TokenExpired,

    /// Item does not exist under the given kind.
    #[error("{kind} {id} not found")]
    NotFound {
        /// Variant namespace the id was looked up in
        kind: ItemKind,
        /// Identifier that was not found
        id: u64,
    },

    /// Magnet link failed local validation.
    #[error("Invalid magnet link: {reason}")]
    InvalidMagnet {
        /// The reason the magnet was rejected
        reason: String,
    },

    /// Serialized session token could not be decoded.
    #[error("Invalid session token: {reason}")]
    InvalidToken {
        /// The reason decoding failed
        reason: String,
    },

    /// Service answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or error description
        message: String,
    },

    /// Transport-level failure, never retried here.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body did not match the expected shape.
    #[error("Parse error: {reason}")]
    Parse {
        /// The reason for the parse error
        reason: String,
    },

    /// Polling gave up before the item showed up.
    #[error("Item did not appear after {attempts} polls")]
    PollTimeout {
        /// Number of listings performed
        attempts: u32,
    },

    /// Invalid configuration value.
    #[error("Configuration error: {reason}")]
    Configuration {
        /// The reason the configuration was rejected
        reason: String,
    },
}

impl SeedrError {
    /// Checks if the failure means the caller must log in again.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            SeedrError::AuthenticationFailed { .. } | SeedrError::TokenExpired
        )
    }

    /// Checks if this error is due to caller input validation.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            SeedrError::InvalidMagnet { .. }
                | SeedrError::InvalidToken { .. }
                | SeedrError::Configuration { .. }
        )
    }
}

impl From<serde_json::Error> for SeedrError {
    fn from(error: serde_json::Error) -> Self {
        SeedrError::Parse {
            reason: error.to_string(),
        }
    }
}
