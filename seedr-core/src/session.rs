//! Scoped session: login, then a content client bound to the token.

use tracing::debug;

use crate::auth::{Login, Token};
use crate::client::Seedr;
use crate::config::{Credentials, SeedrConfig};
use crate::errors::SeedrError;

/// An authenticated content client plus the login that produced it.
///
/// Both connection pools are released together when the session is
/// dropped, including when `?` unwinds out of the scope that owns it.
#[derive(Debug)]
pub struct Session {
    login: Login,
    client: Seedr,
}

impl Session {
    /// Authorizes with `credentials` and builds a client for the token.
    ///
    /// # Errors
    /// - `SeedrError::AuthenticationFailed` - Credentials rejected
    /// - `SeedrError::Network` - Transport failure
    pub async fn open(config: &SeedrConfig, credentials: Credentials) -> Result<Self, SeedrError> {
        let mut login = Login::new(config, credentials)?;
        login.authorize().await?;

        let token = login
            .token()
            .cloned()
            .ok_or_else(|| SeedrError::AuthenticationFailed {
                reason: "authorization returned no token".to_string(),
            })?;

        let client = Seedr::new(config, token)?;
        debug!("Session opened");
        Ok(Self { login, client })
    }

    pub fn client(&self) -> &Seedr {
        &self.client
    }

    pub fn token(&self) -> &Token {
        self.client.token()
    }

    /// Refreshes the access token and rebinds the client to it.
    ///
    /// # Errors
    /// - `SeedrError::AuthenticationFailed` - No refresh token or refresh rejected
    pub async fn refresh(&mut self) -> Result<(), SeedrError> {
        let token = self.login.refresh(self.client.token()).await?;
        self.client.set_token(token);
        Ok(())
    }

    /// Closes the client, then the login.
    pub fn close(self) {
        self.client.close();
        self.login.close();
        debug!("Session closed");
    }
}
