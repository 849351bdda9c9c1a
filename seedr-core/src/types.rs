//! Wire types for Seedr API responses.
//!
//! The service is loose with JSON types: flags arrive as `true`, `1` or
//! `"1"`, and numbers sometimes as strings. Fields are therefore decoded
//! through the lenient helpers below and default when absent.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Variant tag for content items. Ids are only unique within one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Folder,
    File,
    Torrent,
}

impl ItemKind {
    /// Wire name used by the API.
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Folder => "folder",
            ItemKind::File => "file",
            ItemKind::Torrent => "torrent",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "folder" => Ok(ItemKind::Folder),
            "file" => Ok(ItemKind::File),
            "torrent" => Ok(ItemKind::Torrent),
            _ => Err(format!("Invalid item kind: {s}")),
        }
    }
}

/// Generic acknowledgement returned by mutating calls.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionResult {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub result: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Account configuration snapshot from `get_settings`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub result: bool,
    /// Preference map, passed through untouched
    #[serde(default)]
    pub settings: serde_json::Value,
    #[serde(default)]
    pub account: AccountInfo,
    #[serde(default)]
    pub country: Option<String>,
}

/// Account block nested in [`Settings`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountInfo {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub user_id: u64,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub premium: bool,
    #[serde(default)]
    pub package_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub space_used: u64,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub space_max: u64,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub bandwidth_used: u64,
}

/// Storage and bandwidth quota snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemoryBandwidth {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub bandwidth_used: u64,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub bandwidth_max: u64,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub space_used: u64,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub space_max: u64,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_premium: bool,
}

impl MemoryBandwidth {
    /// Bytes still available in the account.
    pub fn space_free(&self) -> u64 {
        self.space_max.saturating_sub(self.space_used)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Folder {
    #[serde(deserialize_with = "lenient::integer")]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub size: u64,
    #[serde(default)]
    pub last_update: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct File {
    #[serde(rename = "folder_file_id", deserialize_with = "lenient::integer")]
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub folder_id: u64,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub size: u64,
    #[serde(default)]
    pub hash: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub play_video: bool,
    #[serde(default)]
    pub last_update: Option<String>,
}

/// Torrent still being fetched by the service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Torrent {
    #[serde(deserialize_with = "lenient::integer")]
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub size: u64,
    #[serde(default)]
    pub hash: String,
    /// Percent complete, 0 to 100
    #[serde(default, deserialize_with = "lenient::float")]
    pub progress: f64,
    #[serde(default)]
    pub last_update: Option<String>,
}

impl Torrent {
    pub fn is_complete(&self) -> bool {
        self.progress >= 100.0
    }
}

/// A folder, file or torrent tracked by the account.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentItem {
    Folder(Folder),
    File(File),
    Torrent(Torrent),
}

impl ContentItem {
    pub fn id(&self) -> u64 {
        match self {
            ContentItem::Folder(folder) => folder.id,
            ContentItem::File(file) => file.id,
            ContentItem::Torrent(torrent) => torrent.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ContentItem::Folder(folder) => &folder.name,
            ContentItem::File(file) => &file.name,
            ContentItem::Torrent(torrent) => &torrent.name,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            ContentItem::Folder(_) => ItemKind::Folder,
            ContentItem::File(_) => ItemKind::File,
            ContentItem::Torrent(_) => ItemKind::Torrent,
        }
    }
}

/// Listing of one folder: subfolders, files and active torrents.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FolderContents {
    #[serde(default = "default_true", deserialize_with = "lenient::flag")]
    pub result: bool,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub folder_id: u64,
    #[serde(default)]
    pub fullname: Option<String>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub space_used: u64,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub space_max: u64,
    #[serde(default)]
    pub folders: Vec<Folder>,
    #[serde(default)]
    pub files: Vec<File>,
    #[serde(default)]
    pub torrents: Vec<Torrent>,
}

impl FolderContents {
    /// All entries as tagged content items.
    pub fn items(&self) -> Vec<ContentItem> {
        self.folders
            .iter()
            .cloned()
            .map(ContentItem::Folder)
            .chain(self.files.iter().cloned().map(ContentItem::File))
            .chain(self.torrents.iter().cloned().map(ContentItem::Torrent))
            .collect()
    }

    /// Identity of every entry, for comparing two listings.
    pub fn item_keys(&self) -> BTreeSet<(ItemKind, u64)> {
        self.items()
            .iter()
            .map(|item| (item.kind(), item.id()))
            .collect()
    }

    pub fn folder_named(&self, name: &str) -> Option<&Folder> {
        self.folders.iter().find(|folder| folder.name == name)
    }

    pub fn contains_folder_id(&self, id: u64) -> bool {
        self.folders.iter().any(|folder| folder.id == id)
    }
}

/// Response to `add_torrent`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddTorrentResponse {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub result: bool,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub torrent_hash: String,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub user_torrent_id: u64,
    #[serde(default)]
    pub error: Option<String>,
}

/// Device linked to the account through the device code flow.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Device {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub device_code: String,
    #[serde(default)]
    pub tk: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DevicesResponse {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub result: bool,
    #[serde(default)]
    pub devices: Vec<Device>,
}

/// Download link for a stored file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FetchedFile {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub result: bool,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArchiveResponse {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub result: bool,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub archive_id: u64,
    #[serde(default)]
    pub archive_url: String,
}

/// Torrents discovered on a scanned web page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScanPageResponse {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub result: bool,
    /// Entries are passed through as returned by the service
    #[serde(default)]
    pub torrents: Vec<serde_json::Value>,
}

/// Token endpoint response for password, refresh and device grants.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Pending device authorization the user approves in a browser.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceCode {
    pub device_code: String,
    pub user_code: String,
    #[serde(default)]
    pub verification_url: String,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub expires_in: u64,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub interval: u64,
}

fn default_true() -> bool {
    true
}

mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Bool(b) => b,
            Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
            Value::String(s) => matches!(s.as_str(), "1" | "true"),
            _ => false,
        })
    }

    pub fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => Ok(n
                .as_u64()
                .or_else(|| n.as_f64().map(|f| f.max(0.0) as u64))
                .unwrap_or(0)),
            Value::String(s) if s.is_empty() => Ok(0),
            Value::String(s) => s.parse().map_err(serde::de::Error::custom),
            Value::Null => Ok(0),
            other => Err(serde::de::Error::custom(format!(
                "expected integer, got {other}"
            ))),
        }
    }

    pub fn float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => Ok(n.as_f64().unwrap_or(0.0)),
            Value::String(s) if s.is_empty() => Ok(0.0),
            Value::String(s) => s.parse().map_err(serde::de::Error::custom),
            Value::Null => Ok(0.0),
            other => Err(serde::de::Error::custom(format!(
                "expected number, got {other}"
            ))),
        }
    }
}
