//! Account metadata and profile operations.

use tracing::info;

use super::Seedr;
use crate::errors::SeedrError;
use crate::types::{ActionResult, DevicesResponse, MemoryBandwidth, Settings};

impl Seedr {
    /// Checks that the access token is accepted.
    ///
    /// # Errors
    /// - `SeedrError::TokenExpired` - Access token rejected
    pub async fn test_token(&self) -> Result<ActionResult, SeedrError> {
        self.get("test").await
    }

    /// # Errors
    /// - `SeedrError::TokenExpired` - Access token rejected
    pub async fn get_settings(&self) -> Result<Settings, SeedrError> {
        self.get("get_settings").await
    }

    /// # Errors
    /// - `SeedrError::TokenExpired` - Access token rejected
    pub async fn get_memory_bandwidth(&self) -> Result<MemoryBandwidth, SeedrError> {
        self.get("get_memory_bandwidth").await
    }

    /// Lists devices linked through the device code flow.
    ///
    /// # Errors
    /// - `SeedrError::TokenExpired` - Access token rejected
    pub async fn get_devices(&self) -> Result<DevicesResponse, SeedrError> {
        self.get("get_devices").await
    }

    /// Changes the account's display name; requires the current password.
    ///
    /// # Errors
    /// - `SeedrError::TokenExpired` - Access token rejected
    pub async fn change_name(
        &self,
        name: &str,
        password: &str,
    ) -> Result<ActionResult, SeedrError> {
        let result: ActionResult = self
            .post(
                "user_account_modify",
                &[
                    ("setting", "fullname".to_string()),
                    ("password", password.to_string()),
                    ("fullname", name.to_string()),
                ],
            )
            .await?;
        info!(changed = result.result, "Change account name");
        Ok(result)
    }

    /// Changes the account password.
    ///
    /// # Errors
    /// - `SeedrError::TokenExpired` - Access token rejected
    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<ActionResult, SeedrError> {
        let result: ActionResult = self
            .post(
                "user_account_modify",
                &[
                    ("setting", "password".to_string()),
                    ("password", old_password.to_string()),
                    ("new_password", new_password.to_string()),
                    ("new_password_repeat", new_password.to_string()),
                ],
            )
            .await?;
        info!(changed = result.result, "Change account password");
        Ok(result)
    }
}
