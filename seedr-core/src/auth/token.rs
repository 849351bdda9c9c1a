//! Session token and its portable string form.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::errors::SeedrError;
use crate::types::AuthResponse;

/// Credential granting authenticated API access.
///
/// Expiry is tracked by the service only; a dead token surfaces as
/// `SeedrError::TokenExpired` on the next call.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_code: Option<String>,
}

impl Token {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            device_code: None,
        }
    }

    pub(crate) fn from_auth(response: AuthResponse, device_code: Option<String>) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            device_code,
        }
    }

    /// Opaque string form: base64 of the JSON object.
    pub fn encode(&self) -> String {
        // Serializing a struct of strings cannot fail
        let json = serde_json::to_vec(self).unwrap_or_default();
        STANDARD.encode(json)
    }

    /// Parses the string produced by [`Token::encode`].
    ///
    /// # Errors
    /// - `SeedrError::InvalidToken` - Not base64 or not a token object
    pub fn decode(encoded: &str) -> Result<Self, SeedrError> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| SeedrError::InvalidToken {
                reason: format!("not base64: {e}"),
            })?;

        let token: Token =
            serde_json::from_slice(&bytes).map_err(|e| SeedrError::InvalidToken {
                reason: format!("not a token object: {e}"),
            })?;

        if token.access_token.is_empty() {
            return Err(SeedrError::InvalidToken {
                reason: "empty access token".to_string(),
            });
        }
        Ok(token)
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("device_code", &self.device_code)
            .finish()
    }
}
