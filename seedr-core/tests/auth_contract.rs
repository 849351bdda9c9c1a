//! Login and token exchange against a mock token endpoint.

use seedr_core::{Credentials, Login, SeedrConfig, SeedrError, Session, Token};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials() -> Credentials {
    Credentials::new("user@example.com", "correct-horse")
}

#[tokio::test]
async fn test_authorize_exposes_token() {
    let mock_server = MockServer::start().await;
    let config = SeedrConfig::with_base_url(mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/oauth_test/token.php"))
        .and(body_string_contains("grant_type=password"))
        .and(body_string_contains("client_id=seedr_chrome"))
        .and(body_string_contains("username=user%40example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-1",
            "refresh_token": "refresh-1",
            "expires_in": 3600,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut login = Login::new(&config, credentials()).unwrap();
    assert!(login.token().is_none());

    let response = login.authorize().await.unwrap();
    assert_eq!(response.access_token, "access-1");

    let token = login.token().unwrap();
    assert_eq!(token.access_token, "access-1");
    assert_eq!(token.refresh_token.as_deref(), Some("refresh-1"));
    login.close();
}

#[tokio::test]
async fn test_rejected_credentials_fail_authentication() {
    let mock_server = MockServer::start().await;
    let config = SeedrConfig::with_base_url(mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/oauth_test/token.php"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid username and password combination"
        })))
        .mount(&mock_server)
        .await;

    let mut login = Login::new(&config, credentials()).unwrap();
    let result = login.authorize().await;

    match result {
        Err(SeedrError::AuthenticationFailed { reason }) => {
            assert!(reason.contains("Invalid username"));
        }
        other => panic!("Expected AuthenticationFailed, got {other:?}"),
    }
    assert!(login.token().is_none());
}

#[tokio::test]
async fn test_success_status_without_token_fails_authentication() {
    let mock_server = MockServer::start().await;
    let config = SeedrConfig::with_base_url(mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/oauth_test/token.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "access_denied"})))
        .mount(&mock_server)
        .await;

    let mut login = Login::new(&config, credentials()).unwrap();
    assert!(matches!(
        login.authorize().await,
        Err(SeedrError::AuthenticationFailed { .. })
    ));
}

#[tokio::test]
async fn test_device_code_flow() {
    let mock_server = MockServer::start().await;
    let config = SeedrConfig::with_base_url(mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/device/code"))
        .and(query_param("client_id", "seedr_xbmc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "device_code": "dev-123",
            "user_code": "ABCD-EFGH",
            "verification_url": "https://www.seedr.cc/devices",
            "expires_in": 3600,
            "interval": 5
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/device/authorize"))
        .and(query_param("device_code", "dev-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "device-access"
        })))
        .mount(&mock_server)
        .await;

    let mut login = Login::for_device(&config).unwrap();
    let code = login.get_device_code().await.unwrap();
    assert_eq!(code.user_code, "ABCD-EFGH");
    assert_eq!(code.interval, 5);

    login.authorize_device(&code.device_code).await.unwrap();
    let token = login.into_token().unwrap();
    assert_eq!(token.access_token, "device-access");
    assert_eq!(token.device_code.as_deref(), Some("dev-123"));
}

#[tokio::test]
async fn test_password_login_without_credentials_is_refused() {
    let config = SeedrConfig::with_base_url("http://127.0.0.1:9");
    let mut login = Login::for_device(&config).unwrap();

    assert!(matches!(
        login.authorize().await,
        Err(SeedrError::AuthenticationFailed { .. })
    ));
}

#[tokio::test]
async fn test_refresh_keeps_refresh_token_when_not_rotated() {
    let mock_server = MockServer::start().await;
    let config = SeedrConfig::with_base_url(mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/oauth_test/token.php"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=refresh-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-2"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let login = Login::new(&config, credentials()).unwrap();
    let mut old = Token::new("access-1");
    old.refresh_token = Some("refresh-1".to_string());

    let refreshed = login.refresh(&old).await.unwrap();
    assert_eq!(refreshed.access_token, "access-2");
    assert_eq!(refreshed.refresh_token.as_deref(), Some("refresh-1"));

    let without_refresh = Token::new("access-1");
    assert!(matches!(
        login.refresh(&without_refresh).await,
        Err(SeedrError::AuthenticationFailed { .. })
    ));
}

#[tokio::test]
async fn test_session_open_aborts_on_bad_credentials() {
    let mock_server = MockServer::start().await;
    let config = SeedrConfig::with_base_url(mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/oauth_test/token.php"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid_client"
        })))
        .mount(&mock_server)
        .await;

    let result = Session::open(&config, credentials()).await;
    assert!(matches!(
        result,
        Err(SeedrError::AuthenticationFailed { .. })
    ));
}

#[test]
fn test_invalid_base_url_rejected_at_construction() {
    let config = SeedrConfig::with_base_url("ftp://seedr.cc");
    assert!(matches!(
        Login::new(&config, credentials()),
        Err(SeedrError::Configuration { .. })
    ));
}
