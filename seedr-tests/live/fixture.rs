//! Authenticated session fixture shared by the live tests.

use std::sync::Once;

use seedr_core::{Credentials, SeedrConfig, Session};

static TRACING: Once = Once::new();

/// Opens a session, or returns `None` when credentials are not configured.
///
/// Authentication failures panic immediately: a wrong password is a broken
/// setup, not a skipped test.
pub async fn session() -> Option<Session> {
    dotenvy::dotenv().ok();

    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });

    let Some(credentials) = Credentials::from_env() else {
        eprintln!("SKIPPED: Seedr credentials not found in environment variables");
        return None;
    };

    let config = SeedrConfig::from_env();
    match Session::open(&config, credentials).await {
        Ok(session) => Some(session),
        Err(e) => panic!("Failed to authenticate with Seedr: {e}"),
    }
}

/// Binds an open session or returns from the test as skipped.
#[macro_export]
macro_rules! require_session {
    () => {
        match $crate::fixture::session().await {
            Some(session) => session,
            None => return,
        }
    };
}
