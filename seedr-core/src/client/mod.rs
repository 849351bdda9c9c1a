//! Content client: every call is one round trip to the resource endpoint.
//!
//! Requests carry `func=<name>` and the access token as query parameters;
//! mutating calls send their arguments as a form body.

mod account;
mod content;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::auth::Token;
use crate::config::{ApiConfig, SeedrConfig};
use crate::errors::SeedrError;
use crate::http;

/// Authenticated client for account and content operations.
///
/// Holds no state besides the token; the connection pool is released when
/// the value is dropped or passed to [`Seedr::close`].
pub struct Seedr {
    http: reqwest::Client,
    api: ApiConfig,
    token: Token,
}

impl Seedr {
    /// Creates a client bound to `token`.
    ///
    /// # Errors
    /// - `SeedrError::Configuration` - Invalid base URL
    /// - `SeedrError::Network` - HTTP client could not be built
    pub fn new(config: &SeedrConfig, token: Token) -> Result<Self, SeedrError> {
        Ok(Self {
            http: http::build_client(&config.api)?,
            api: config.api.clone(),
            token,
        })
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Swaps in a token obtained from [`crate::Login::refresh`].
    pub fn set_token(&mut self, token: Token) {
        self.token = token;
    }

    /// Releases the connection pool.
    pub fn close(self) {
        debug!("Seedr client closed");
    }

    async fn get<T: DeserializeOwned>(&self, func: &str) -> Result<T, SeedrError> {
        let request = self.http.get(self.api.resource_url());
        self.call(func, request).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        func: &str,
        form: &[(&str, String)],
    ) -> Result<T, SeedrError> {
        let request = self.http.post(self.api.resource_url()).form(form);
        self.call(func, request).await
    }

    async fn call<T: DeserializeOwned>(
        &self,
        func: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, SeedrError> {
        debug!(func, "Calling resource endpoint");
        let response = request
            .query(&[("access_token", self.token.access_token.as_str()), ("func", func)])
            .send()
            .await?;

        let value = match http::read_json(response).await {
            Ok(value) => value,
            Err(SeedrError::Api { status: 401, .. }) => {
                warn!(func, "Access token rejected");
                return Err(SeedrError::TokenExpired);
            }
            Err(e) => return Err(e),
        };

        if http::is_token_error(&value) {
            warn!(func, "Access token rejected");
            return Err(SeedrError::TokenExpired);
        }

        serde_json::from_value(http::normalize_envelope(value)).map_err(|e| SeedrError::Parse {
            reason: format!("{func}: {e}"),
        })
    }
}

impl std::fmt::Debug for Seedr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Seedr")
            .field("base_url", &self.api.base_url)
            .field("token", &self.token)
            .finish()
    }
}
