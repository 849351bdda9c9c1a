//! Seedr Core - Async client for the Seedr cloud torrent storage API
//!
//! Two thin adapters over one remote API: [`Login`] exchanges credentials
//! for a [`Token`], and [`Seedr`] uses that token for account and content
//! calls. Every operation is a single awaited round trip; nothing is
//! retried and tokens are only refreshed on request.
//!
//! # Example
//!
//! ```ignore
//! use seedr_core::{Credentials, SeedrConfig, Session};
//!
//! let config = SeedrConfig::from_env();
//! let credentials = Credentials::from_env().expect("SEEDR_EMAIL and SEEDR_PASSWORD");
//! let session = Session::open(&config, credentials).await?;
//! let contents = session.client().list_contents().await?;
//! println!("{} folders", contents.folders.len());
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
mod http;
pub mod magnet;
pub mod poll;
pub mod session;
pub mod tracing_setup;
pub mod types;

// Re-export main types for convenient access
pub use auth::{Login, Token};
pub use client::Seedr;
pub use config::{ApiConfig, Credentials, PollConfig, SeedrConfig};
pub use errors::SeedrError;
pub use magnet::{InfoHash, MagnetLink};
pub use poll::{ContentSource, PolledItem, TorrentTarget, wait_for_torrent};
pub use session::Session;
pub use types::{
    AccountInfo, ActionResult, AddTorrentResponse, ArchiveResponse, AuthResponse, ContentItem,
    Device, DeviceCode, DevicesResponse, FetchedFile, File, Folder, FolderContents, ItemKind,
    MemoryBandwidth, ScanPageResponse, Settings, Torrent,
};

/// Convenience type alias for Results with SeedrError.
pub type Result<T> = std::result::Result<T, SeedrError>;
