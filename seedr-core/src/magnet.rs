//! Magnet link validation before submission to the service.

use std::fmt;

use crate::errors::SeedrError;

/// SHA-1 hash identifying a unique torrent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InfoHash([u8; 20]);

impl InfoHash {
    /// Creates InfoHash from 20-byte SHA-1 hash.
    pub fn new(hash: [u8; 20]) -> Self {
        Self(hash)
    }

    /// Returns reference to underlying 20-byte hash.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Parses a 40 character hex or 32 character base32 btih value.
    ///
    /// # Errors
    /// - `SeedrError::InvalidMagnet` - Wrong length or invalid characters
    pub fn parse(value: &str) -> Result<Self, SeedrError> {
        let bytes = match value.len() {
            40 => hex::decode(value).map_err(|e| SeedrError::InvalidMagnet {
                reason: format!("invalid hex info hash '{value}': {e}"),
            })?,
            32 => data_encoding::BASE32_NOPAD
                .decode(value.to_uppercase().as_bytes())
                .map_err(|e| SeedrError::InvalidMagnet {
                    reason: format!("invalid base32 info hash '{value}': {e}"),
                })?,
            len => {
                return Err(SeedrError::InvalidMagnet {
                    reason: format!("invalid info hash length: {len} (expected 40 or 32)"),
                });
            }
        };

        let hash: [u8; 20] = bytes.try_into().map_err(|_| SeedrError::InvalidMagnet {
            reason: format!("info hash '{value}' does not decode to 20 bytes"),
        })?;
        Ok(Self(hash))
    }
}

impl fmt::Display for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Parsed magnet link.
#[derive(Debug, Clone)]
pub struct MagnetLink {
    pub info_hash: InfoHash,
    pub display_name: Option<String>,
    pub trackers: Vec<String>,
}

impl MagnetLink {
    /// Parses and validates a magnet URI.
    ///
    /// # Errors
    /// - `SeedrError::InvalidMagnet` - Not a magnet URI or missing btih topic
    pub fn parse(uri: &str) -> Result<Self, SeedrError> {
        let magnet = magnet_url::Magnet::new(uri).map_err(|e| SeedrError::InvalidMagnet {
            reason: format!("{e}"),
        })?;

        let info_hash = Self::extract_info_hash(uri)?;

        Ok(MagnetLink {
            info_hash,
            display_name: magnet.display_name().map(|s| s.to_string()),
            trackers: magnet.trackers().to_vec(),
        })
    }

    /// Finds the `xt=urn:btih:` topic in the query string.
    fn extract_info_hash(uri: &str) -> Result<InfoHash, SeedrError> {
        let query = uri
            .strip_prefix("magnet:?")
            .ok_or_else(|| SeedrError::InvalidMagnet {
                reason: "missing 'magnet:?' prefix".to_string(),
            })?;

        query
            .split('&')
            .find_map(|param| {
                let (key, value) = param.split_once('=')?;
                let key = key.split('.').next().unwrap_or(key);
                if key != "xt" {
                    return None;
                }
                value
                    .strip_prefix("urn:btih:")
                    .or_else(|| value.strip_prefix("urn%3Abtih%3A"))
            })
            .ok_or_else(|| SeedrError::InvalidMagnet {
                reason: "missing 'xt=urn:btih:' topic".to_string(),
            })
            .and_then(InfoHash::parse)
    }
}
