//! Folder, file and torrent operations.

use serde_json::json;
use tracing::{debug, info};

use super::Seedr;
use crate::errors::SeedrError;
use crate::magnet::MagnetLink;
use crate::types::{
    ActionResult, AddTorrentResponse, ArchiveResponse, FetchedFile, FolderContents, ItemKind,
    ScanPageResponse,
};

/// Folder id the service uses for "the account root" when adding torrents.
const ROOT_FOLDER: &str = "-1";

impl Seedr {
    /// Lists the root folder.
    ///
    /// # Errors
    /// - `SeedrError::TokenExpired` - Access token rejected
    /// - `SeedrError::Parse` - Unexpected response shape
    pub async fn list_contents(&self) -> Result<FolderContents, SeedrError> {
        self.list_folder(0).await
    }

    /// Lists one folder by id; `0` is the root.
    ///
    /// # Errors
    /// - `SeedrError::TokenExpired` - Access token rejected
    /// - `SeedrError::Parse` - Unexpected response shape
    pub async fn list_folder(&self, folder_id: u64) -> Result<FolderContents, SeedrError> {
        let contents: FolderContents = self
            .post(
                "list_contents",
                &[
                    ("content_type", "folder".to_string()),
                    ("content_id", folder_id.to_string()),
                ],
            )
            .await?;

        debug!(
            folder_id,
            folders = contents.folders.len(),
            files = contents.files.len(),
            torrents = contents.torrents.len(),
            "Listed folder"
        );
        Ok(contents)
    }

    /// Creates a folder in the root.
    ///
    /// # Errors
    /// - `SeedrError::TokenExpired` - Access token rejected
    pub async fn add_folder(&self, name: &str) -> Result<ActionResult, SeedrError> {
        let result: ActionResult = self
            .post("add_folder", &[("name", name.to_string())])
            .await?;
        info!(name, created = result.result, "Add folder");
        Ok(result)
    }

    /// Deletes a folder, file or torrent.
    ///
    /// # Errors
    /// - `SeedrError::NotFound` - No item with this id under `kind`
    /// - `SeedrError::TokenExpired` - Access token rejected
    pub async fn delete_item(&self, id: u64, kind: ItemKind) -> Result<ActionResult, SeedrError> {
        let delete_arr = json!([{ "type": kind.as_str(), "id": id }]).to_string();

        let result: ActionResult = match self.post("delete", &[("delete_arr", delete_arr)]).await
        {
            Ok(result) => result,
            Err(SeedrError::Api { status: 404, .. }) => {
                return Err(SeedrError::NotFound { kind, id });
            }
            Err(e) => return Err(e),
        };

        if !result.result {
            debug!(%kind, id, error = ?result.error, "Delete refused");
            return Err(SeedrError::NotFound { kind, id });
        }

        info!(%kind, id, "Deleted item");
        Ok(result)
    }

    /// Submits a magnet link to the root folder.
    ///
    /// The service fetches the torrent asynchronously; poll
    /// [`Seedr::list_contents`] (see [`crate::poll::wait_for_torrent`]) to
    /// see it appear.
    ///
    /// # Errors
    /// - `SeedrError::InvalidMagnet` - Magnet failed local validation
    /// - `SeedrError::TokenExpired` - Access token rejected
    pub async fn add_torrent(&self, magnet: &str) -> Result<AddTorrentResponse, SeedrError> {
        self.add_torrent_to(magnet, None).await
    }

    /// Submits a magnet link into a specific folder.
    ///
    /// # Errors
    /// - `SeedrError::InvalidMagnet` - Magnet failed local validation
    /// - `SeedrError::TokenExpired` - Access token rejected
    pub async fn add_torrent_to(
        &self,
        magnet: &str,
        folder_id: Option<u64>,
    ) -> Result<AddTorrentResponse, SeedrError> {
        let parsed = MagnetLink::parse(magnet)?;
        let folder_id = folder_id.map_or_else(|| ROOT_FOLDER.to_string(), |id| id.to_string());

        let response: AddTorrentResponse = self
            .post(
                "add_torrent",
                &[
                    ("torrent_magnet", magnet.to_string()),
                    ("folder_id", folder_id),
                ],
            )
            .await?;

        info!(
            info_hash = %parsed.info_hash,
            title = %response.title,
            accepted = response.result,
            "Add torrent"
        );
        Ok(response)
    }

    /// Renames a file.
    ///
    /// # Errors
    /// - `SeedrError::TokenExpired` - Access token rejected
    pub async fn rename_file(&self, id: u64, new_name: &str) -> Result<ActionResult, SeedrError> {
        self.post(
            "rename",
            &[
                ("rename_to", new_name.to_string()),
                ("file_id", id.to_string()),
            ],
        )
        .await
    }

    /// Renames a folder.
    ///
    /// # Errors
    /// - `SeedrError::TokenExpired` - Access token rejected
    pub async fn rename_folder(
        &self,
        id: u64,
        new_name: &str,
    ) -> Result<ActionResult, SeedrError> {
        self.post(
            "rename",
            &[
                ("rename_to", new_name.to_string()),
                ("folder_id", id.to_string()),
            ],
        )
        .await
    }

    /// Gets a download URL for a stored file.
    ///
    /// # Errors
    /// - `SeedrError::TokenExpired` - Access token rejected
    pub async fn fetch_file(&self, file_id: u64) -> Result<FetchedFile, SeedrError> {
        self.post("fetch_file", &[("folder_file_id", file_id.to_string())])
            .await
    }

    /// Starts building a zip archive of a folder.
    ///
    /// # Errors
    /// - `SeedrError::TokenExpired` - Access token rejected
    pub async fn create_archive(&self, folder_id: u64) -> Result<ArchiveResponse, SeedrError> {
        let archive_arr = json!([{ "type": "folder", "id": folder_id }]).to_string();
        self.post("create_empty_archive", &[("archive_arr", archive_arr)])
            .await
    }

    /// Searches stored files and folders by name.
    ///
    /// # Errors
    /// - `SeedrError::TokenExpired` - Access token rejected
    pub async fn search_files(&self, query: &str) -> Result<FolderContents, SeedrError> {
        self.post("search_files", &[("search_query", query.to_string())])
            .await
    }

    /// Asks the service to scan a web page for magnet links.
    ///
    /// # Errors
    /// - `SeedrError::TokenExpired` - Access token rejected
    pub async fn scan_page(&self, url: &str) -> Result<ScanPageResponse, SeedrError> {
        self.post("scan_page", &[("url", url.to_string())]).await
    }

    /// Removes a wishlist entry.
    ///
    /// # Errors
    /// - `SeedrError::TokenExpired` - Access token rejected
    pub async fn delete_wishlist(&self, id: u64) -> Result<ActionResult, SeedrError> {
        self.post("remove_wishlist", &[("id", id.to_string())])
            .await
    }
}
