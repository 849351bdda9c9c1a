//! Account metadata calls.

use crate::require_session;

#[tokio::test]
async fn test_get_settings() {
    let session = require_session!();

    let settings = session.client().get_settings().await.unwrap();
    assert!(settings.result);

    session.close();
}

#[tokio::test]
async fn test_get_memory_bandwidth() {
    let session = require_session!();

    let quota = session.client().get_memory_bandwidth().await.unwrap();
    assert!(quota.space_max > 0);
    assert!(quota.space_used <= quota.space_max);

    session.close();
}

#[tokio::test]
async fn test_get_devices() {
    let session = require_session!();

    let devices = session.client().get_devices().await.unwrap();
    assert!(devices.result);

    session.close();
}

#[tokio::test]
async fn test_token_is_accepted() {
    let session = require_session!();

    session.client().test_token().await.unwrap();
    assert!(!session.token().access_token.is_empty());

    session.close();
}
