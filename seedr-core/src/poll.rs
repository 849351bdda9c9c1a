//! Bounded poll-with-backoff for torrents the service processes asynchronously.

use std::collections::BTreeSet;

use async_trait::async_trait;
use tracing::debug;

use crate::client::Seedr;
use crate::config::PollConfig;
use crate::errors::SeedrError;
use crate::types::{AddTorrentResponse, Folder, FolderContents, Torrent};

/// Source of folder listings to poll.
///
/// Implemented by [`Seedr`]; tests substitute scripted listings.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Returns the current root listing.
    async fn list_contents(&self) -> Result<FolderContents, SeedrError>;
}

#[async_trait]
impl ContentSource for Seedr {
    async fn list_contents(&self) -> Result<FolderContents, SeedrError> {
        Seedr::list_contents(self).await
    }
}

/// Where a submitted torrent was found.
#[derive(Debug, Clone, PartialEq)]
pub enum PolledItem {
    /// Still downloading on the service side
    Torrent(Torrent),
    /// Finished and materialized as a folder
    Folder(Folder),
}

/// What a poll is looking for.
///
/// Active torrents match on info hash when both sides carry one, otherwise on
/// name. Completed folders match on name and must not be in `known_folders`,
/// so a folder that existed before the torrent was added is never reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TorrentTarget {
    pub hash: String,
    pub title: String,
    pub known_folders: BTreeSet<u64>,
}

impl TorrentTarget {
    /// Targets the torrent described by an `add_torrent` response.
    pub fn from_added(added: &AddTorrentResponse) -> Self {
        Self {
            hash: added.torrent_hash.clone(),
            title: added.title.clone(),
            known_folders: BTreeSet::new(),
        }
    }

    /// Excludes folders listed before the torrent was added.
    pub fn ignoring_folders(mut self, contents: &FolderContents) -> Self {
        self.known_folders
            .extend(contents.folders.iter().map(|folder| folder.id));
        self
    }

    fn validate(&self) -> Result<(), SeedrError> {
        if self.hash.trim().is_empty() && self.title.trim().is_empty() {
            return Err(SeedrError::Configuration {
                reason: "torrent poll needs an info hash or a title".to_string(),
            });
        }
        Ok(())
    }

    fn matches_torrent(&self, torrent: &Torrent) -> bool {
        if !self.hash.is_empty() && !torrent.hash.is_empty() {
            return torrent.hash.eq_ignore_ascii_case(&self.hash);
        }
        !self.title.trim().is_empty() && torrent.name.contains(&self.title)
    }

    fn matches_folder(&self, folder: &Folder) -> bool {
        !self.title.trim().is_empty()
            && !self.known_folders.contains(&folder.id)
            && folder.name.contains(&self.title)
    }
}

/// Lists contents until the targeted torrent shows up.
///
/// Active torrents are checked before folders. Between listings the delay
/// grows per [`PollConfig::delay_after`].
///
/// # Errors
/// - `SeedrError::Configuration` - Target has neither hash nor title
/// - `SeedrError::PollTimeout` - Not found within `max_attempts` listings
/// - Any error from the listing itself, returned immediately
pub async fn wait_for_torrent<S>(
    source: &S,
    target: &TorrentTarget,
    config: &PollConfig,
) -> Result<PolledItem, SeedrError>
where
    S: ContentSource + ?Sized,
{
    target.validate()?;
    let attempts = config.max_attempts.max(1);

    for attempt in 0..attempts {
        let contents = source.list_contents().await?;

        if let Some(found) = find_item(&contents, target) {
            debug!(title = %target.title, attempt, "Torrent located");
            return Ok(found);
        }

        if attempt + 1 < attempts {
            let delay = config.delay_after(attempt);
            debug!(
                title = %target.title,
                attempt,
                delay_ms = delay.as_millis() as u64,
                "Torrent not listed yet"
            );
            tokio::time::sleep(delay).await;
        }
    }

    Err(SeedrError::PollTimeout { attempts })
}

fn find_item(contents: &FolderContents, target: &TorrentTarget) -> Option<PolledItem> {
    contents
        .torrents
        .iter()
        .find(|torrent| target.matches_torrent(torrent))
        .cloned()
        .map(PolledItem::Torrent)
        .or_else(|| {
            contents
                .folders
                .iter()
                .find(|folder| target.matches_folder(folder))
                .cloned()
                .map(PolledItem::Folder)
        })
}
