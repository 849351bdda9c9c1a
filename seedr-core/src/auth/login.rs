//! Credential exchange against the OAuth token and device endpoints.

use serde_json::Value;
use tracing::{debug, info, warn};

use super::token::Token;
use crate::config::{ApiConfig, Credentials, SeedrConfig};
use crate::errors::SeedrError;
use crate::http;
use crate::types::{AuthResponse, DeviceCode};

/// Establishes an authenticated session.
///
/// Owns its HTTP connection pool; the pool is released when the value is
/// dropped or passed to [`Login::close`], whichever comes first.
pub struct Login {
    http: reqwest::Client,
    api: ApiConfig,
    credentials: Option<Credentials>,
    device_code: Option<String>,
    token: Option<Token>,
}

impl Login {
    /// Creates a login for the password grant.
    ///
    /// # Errors
    /// - `SeedrError::Configuration` - Invalid base URL
    /// - `SeedrError::Network` - HTTP client could not be built
    pub fn new(config: &SeedrConfig, credentials: Credentials) -> Result<Self, SeedrError> {
        Ok(Self {
            http: http::build_client(&config.api)?,
            api: config.api.clone(),
            credentials: Some(credentials),
            device_code: None,
            token: None,
        })
    }

    /// Creates a login for the device code flow, without credentials.
    ///
    /// # Errors
    /// - `SeedrError::Configuration` - Invalid base URL
    /// - `SeedrError::Network` - HTTP client could not be built
    pub fn for_device(config: &SeedrConfig) -> Result<Self, SeedrError> {
        Ok(Self {
            http: http::build_client(&config.api)?,
            api: config.api.clone(),
            credentials: None,
            device_code: None,
            token: None,
        })
    }

    /// Token from the last successful authorization.
    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// Consumes the login, keeping only the token.
    pub fn into_token(self) -> Option<Token> {
        self.token
    }

    /// Exchanges email and password for an access token.
    ///
    /// # Errors
    /// - `SeedrError::AuthenticationFailed` - Credentials rejected or missing
    /// - `SeedrError::Network` - Transport failure
    pub async fn authorize(&mut self) -> Result<AuthResponse, SeedrError> {
        let credentials =
            self.credentials
                .as_ref()
                .ok_or_else(|| SeedrError::AuthenticationFailed {
                    reason: "no credentials configured for password login".to_string(),
                })?;

        debug!(email = %credentials.email, "Requesting password grant");
        let form = [
            ("grant_type", "password"),
            ("client_id", self.api.client_id),
            ("type", "login"),
            ("username", credentials.email.as_str()),
            ("password", credentials.password.as_str()),
        ];
        let request = self.http.post(self.api.token_url()).form(&form);

        let response = self.exchange(request).await?;
        info!(email = %credentials.email, "Login successful");

        self.token = Some(Token::from_auth(response.clone(), None));
        Ok(response)
    }

    /// Requests a device code for the user to approve in a browser.
    ///
    /// # Errors
    /// - `SeedrError::Api` - Service refused to issue a code
    /// - `SeedrError::Parse` - Unexpected response shape
    pub async fn get_device_code(&mut self) -> Result<DeviceCode, SeedrError> {
        let response = self
            .http
            .get(self.api.device_code_url())
            .query(&[("client_id", self.api.device_client_id)])
            .send()
            .await?;

        let code: DeviceCode = serde_json::from_value(http::read_json(response).await?)?;
        info!(
            user_code = %code.user_code,
            verification_url = %code.verification_url,
            "Device code issued"
        );

        self.device_code = Some(code.device_code.clone());
        Ok(code)
    }

    /// Exchanges an approved device code for an access token.
    ///
    /// # Errors
    /// - `SeedrError::AuthenticationFailed` - Code not approved yet or expired
    /// - `SeedrError::Network` - Transport failure
    pub async fn authorize_device(
        &mut self,
        device_code: &str,
    ) -> Result<AuthResponse, SeedrError> {
        let request = self.http.get(self.api.device_authorize_url()).query(&[
            ("device_code", device_code),
            ("client_id", self.api.device_client_id),
        ]);

        let response = self.exchange(request).await?;
        info!("Device authorization successful");

        self.token = Some(Token::from_auth(
            response.clone(),
            Some(device_code.to_string()),
        ));
        Ok(response)
    }

    /// Obtains a fresh access token using the token's refresh token.
    ///
    /// Never called implicitly; callers decide when to refresh.
    ///
    /// # Errors
    /// - `SeedrError::AuthenticationFailed` - No refresh token or refresh rejected
    /// - `SeedrError::Network` - Transport failure
    pub async fn refresh(&self, token: &Token) -> Result<Token, SeedrError> {
        let refresh_token =
            token
                .refresh_token
                .as_deref()
                .ok_or_else(|| SeedrError::AuthenticationFailed {
                    reason: "token has no refresh token".to_string(),
                })?;

        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.api.client_id),
        ];
        let request = self.http.post(self.api.token_url()).form(&form);

        let mut response = self.exchange(request).await?;
        if response.refresh_token.is_none() {
            response.refresh_token = token.refresh_token.clone();
        }
        debug!("Access token refreshed");

        Ok(Token::from_auth(response, token.device_code.clone()))
    }

    /// Releases the connection pool.
    pub fn close(self) {
        debug!(authorized = self.token.is_some(), "Login closed");
    }

    /// Sends a grant request and maps rejections to `AuthenticationFailed`.
    async fn exchange(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<AuthResponse, SeedrError> {
        let response = request.send().await?;

        let value = match http::read_json(response).await {
            Ok(value) => value,
            Err(SeedrError::Api { status, message }) if matches!(status, 400 | 401 | 403) => {
                warn!(status, "Authentication rejected");
                return Err(SeedrError::AuthenticationFailed { reason: message });
            }
            Err(e) => return Err(e),
        };

        if value.get("access_token").and_then(Value::as_str).is_none() {
            let reason = http::error_message(&value)
                .unwrap_or_else(|| "response carried no access token".to_string());
            warn!(reason = %reason, "Authentication rejected");
            return Err(SeedrError::AuthenticationFailed { reason });
        }

        Ok(serde_json::from_value(value)?)
    }
}

impl std::fmt::Debug for Login {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Login")
            .field("base_url", &self.api.base_url)
            .field("credentials", &self.credentials)
            .field("authorized", &self.token.is_some())
            .finish()
    }
}
