//! Tracing setup for the Seedr client tools.

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::errors::SeedrError;

/// Initialize console tracing at `console_level`.
///
/// `RUST_LOG` takes precedence over the given level when set.
///
/// # Errors
/// - `SeedrError::Configuration` - A global subscriber is already installed
pub fn init_tracing(console_level: Level) -> Result<(), SeedrError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(console_level.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .map_err(|e| SeedrError::Configuration {
            reason: format!("tracing already initialized: {e}"),
        })?;

    tracing::debug!("Tracing initialized: console={console_level}");
    Ok(())
}

/// Console verbosity selectable with `--log-level`.
///
/// `RUST_LOG`, when set, overrides this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliLogLevel {
    /// Failures only
    Error,
    /// Rejected calls and failures (default)
    Warn,
    /// Logins and submitted torrents
    Info,
    /// Every request and poll attempt
    Debug,
    Trace,
}

impl CliLogLevel {
    /// ```
    /// use seedr_core::tracing_setup::CliLogLevel;
    ///
    /// assert_eq!(CliLogLevel::Warn.as_tracing_level(), tracing::Level::WARN);
    /// ```
    pub fn as_tracing_level(self) -> Level {
        match self {
            Self::Error => Level::ERROR,
            Self::Warn => Level::WARN,
            Self::Info => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }
}

impl std::fmt::Display for CliLogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_tracing_level().as_str().to_lowercase())
    }
}
