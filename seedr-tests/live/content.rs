//! Content listing and folder/torrent lifecycle.

use seedr_core::{ItemKind, PollConfig, PolledItem, SeedrError, TorrentTarget, wait_for_torrent};

use crate::require_session;

const BIG_BUCK_BUNNY_MAGNET: &str = "magnet:?xt=urn:btih:dd8255ecdc7ca55fb0bbf81323d87062db1f6d1c&dn=Big+Buck+Bunny&tr=udp%3A%2F%2Fexplodie.org%3A6969&tr=udp%3A%2F%2Ftracker.coppersurfer.tk%3A6969&tr=udp%3A%2F%2Ftracker.empire-js.us%3A1337&tr=udp%3A%2F%2Ftracker.leechers-paradise.org%3A6969&tr=udp%3A%2F%2Ftracker.opentrackr.org%3A1337&tr=wss%3A%2F%2Ftracker.btorrent.xyz&tr=wss%3A%2F%2Ftracker.fastcast.nz&tr=wss%3A%2F%2Ftracker.openwebtorrent.com&ws=https%3A%2F%2Fwebtorrent.io%2Ftorrents%2F&xs=https%3A%2F%2Fwebtorrent.io%2Ftorrents%2Fbig-buck-bunny.torrent";
const BIG_BUCK_BUNNY_HASH: &str = "dd8255ecdc7ca55fb0bbf81323d87062db1f6d1c";

#[tokio::test]
async fn test_list_contents() {
    let session = require_session!();

    let contents = session.client().list_contents().await.unwrap();
    assert!(contents.result);

    session.close();
}

#[tokio::test]
async fn test_add_and_delete_folder() {
    let session = require_session!();
    let seedr = session.client();
    let folder_name = "Test Folder";

    let added = seedr.add_folder(folder_name).await.unwrap();
    assert!(added.result);

    let listing = seedr.list_contents().await.unwrap();
    let folder_id = listing
        .folder_named(folder_name)
        .map(|folder| folder.id)
        .expect("new folder should be listed");

    let deleted = seedr.delete_item(folder_id, ItemKind::Folder).await.unwrap();
    assert!(deleted.result);

    let listing = seedr.list_contents().await.unwrap();
    assert!(!listing.contains_folder_id(folder_id));

    let again = seedr.delete_item(folder_id, ItemKind::Folder).await;
    assert!(matches!(again, Err(SeedrError::NotFound { .. })));

    session.close();
}

#[tokio::test]
async fn test_add_and_delete_torrent() {
    let session = require_session!();
    let seedr = session.client();
    let before = seedr.list_contents().await.unwrap();

    let added = seedr.add_torrent(BIG_BUCK_BUNNY_MAGNET).await.unwrap();
    assert!(added.result);
    assert_eq!(added.title, "Big Buck Bunny");
    assert_eq!(added.torrent_hash, BIG_BUCK_BUNNY_HASH);

    let target = TorrentTarget::from_added(&added).ignoring_folders(&before);
    let located = wait_for_torrent(seedr, &target, &PollConfig::default())
        .await
        .unwrap();

    let (id, kind) = match located {
        PolledItem::Torrent(torrent) => (torrent.id, ItemKind::Torrent),
        PolledItem::Folder(folder) => (folder.id, ItemKind::Folder),
    };

    let deleted = seedr.delete_item(id, kind).await.unwrap();
    assert!(deleted.result);

    session.close();
}
