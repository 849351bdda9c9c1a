//! Content client calls against a mock resource endpoint.

use seedr_core::{
    ItemKind, PollConfig, PolledItem, Seedr, SeedrConfig, SeedrError, Token, TorrentTarget,
    wait_for_torrent,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RESOURCE: &str = "/oauth_test/resource.php";
const BIG_BUCK_BUNNY_HASH: &str = "dd8255ecdc7ca55fb0bbf81323d87062db1f6d1c";
const BIG_BUCK_BUNNY: &str = "magnet:?xt=urn:btih:dd8255ecdc7ca55fb0bbf81323d87062db1f6d1c&dn=Big+Buck+Bunny&tr=udp%3A%2F%2Fexplodie.org%3A6969&tr=udp%3A%2F%2Ftracker.opentrackr.org%3A1337";

async fn client_for(mock_server: &MockServer) -> Seedr {
    let config = SeedrConfig::with_base_url(mock_server.uri());
    Seedr::new(&config, Token::new("tok")).unwrap()
}

fn resource_call(http_method: &str, func: &str) -> wiremock::MockBuilder {
    Mock::given(method(http_method))
        .and(path(RESOURCE))
        .and(query_param("func", func))
        .and(query_param("access_token", "tok"))
}

#[tokio::test]
async fn test_get_settings() {
    let mock_server = MockServer::start().await;
    resource_call("GET", "get_settings")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": true,
            "code": 200,
            "settings": {"allow_remote_access": false},
            "account": {
                "username": "tester",
                "user_id": 1234,
                "premium": 0,
                "space_used": 100,
                "space_max": 2147483648u64,
                "bandwidth_used": 0,
                "email": "user@example.com"
            },
            "country": "NL"
        })))
        .mount(&mock_server)
        .await;

    let seedr = client_for(&mock_server).await;
    let settings = seedr.get_settings().await.unwrap();

    assert!(settings.result);
    assert_eq!(settings.account.username, "tester");
    assert_eq!(settings.account.user_id, 1234);
    assert!(!settings.account.premium);
    assert_eq!(settings.country.as_deref(), Some("NL"));
}

#[tokio::test]
async fn test_get_memory_bandwidth() {
    let mock_server = MockServer::start().await;
    resource_call("GET", "get_memory_bandwidth")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bandwidth_used": 12,
            "bandwidth_max": 0,
            "space_used": 100,
            "space_max": 2147483648u64,
            "is_premium": 0
        })))
        .mount(&mock_server)
        .await;

    let seedr = client_for(&mock_server).await;
    let quota = seedr.get_memory_bandwidth().await.unwrap();

    assert_eq!(quota.bandwidth_used, 12);
    assert_eq!(quota.space_max, 2_147_483_648);
}

#[tokio::test]
async fn test_add_and_delete_folder_round_trip() {
    let mock_server = MockServer::start().await;

    resource_call("POST", "add_folder")
        .and(body_string_contains("name=Test+Folder"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    resource_call("POST", "list_contents")
        .and(body_string_contains("content_id=0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": true,
            "folders": [{"id": 11, "name": "Test Folder", "size": 0}],
            "files": [],
            "torrents": []
        })))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    resource_call("POST", "delete")
        .and(body_string_contains("%22folder%22"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    resource_call("POST", "list_contents")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": true,
            "folders": [],
            "files": [],
            "torrents": []
        })))
        .mount(&mock_server)
        .await;

    let seedr = client_for(&mock_server).await;

    let added = seedr.add_folder("Test Folder").await.unwrap();
    assert!(added.result);

    let listing = seedr.list_contents().await.unwrap();
    let folder_id = listing.folder_named("Test Folder").unwrap().id;

    let deleted = seedr.delete_item(folder_id, ItemKind::Folder).await.unwrap();
    assert!(deleted.result);

    let listing = seedr.list_contents().await.unwrap();
    assert!(!listing.contains_folder_id(folder_id));
}

#[tokio::test]
async fn test_listing_twice_without_mutation_is_equivalent() {
    let mock_server = MockServer::start().await;
    resource_call("POST", "list_contents")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": true,
            "folders": [{"id": 1, "name": "Movies"}],
            "files": [{"folder_file_id": 9, "name": "notes.txt", "folder_id": 0}],
            "torrents": [{"id": 1, "name": "Movies", "progress": 10}]
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let seedr = client_for(&mock_server).await;
    let first = seedr.list_contents().await.unwrap();
    let second = seedr.list_contents().await.unwrap();

    assert_eq!(first.item_keys(), second.item_keys());
    assert_eq!(first.item_keys().len(), 3);
}

#[tokio::test]
async fn test_delete_missing_item_is_not_found() {
    let mock_server = MockServer::start().await;
    resource_call("POST", "delete")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": false,
            "error": "item_not_found"
        })))
        .mount(&mock_server)
        .await;

    let seedr = client_for(&mock_server).await;
    let result = seedr.delete_item(404, ItemKind::Torrent).await;

    assert!(matches!(
        result,
        Err(SeedrError::NotFound {
            kind: ItemKind::Torrent,
            id: 404
        })
    ));
}

#[tokio::test]
async fn test_delete_http_404_is_not_found() {
    let mock_server = MockServer::start().await;
    resource_call("POST", "delete")
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&mock_server)
        .await;

    let seedr = client_for(&mock_server).await;
    assert!(matches!(
        seedr.delete_item(5, ItemKind::File).await,
        Err(SeedrError::NotFound {
            kind: ItemKind::File,
            id: 5
        })
    ));
}

#[tokio::test]
async fn test_add_torrent_returns_title_and_hash() {
    let mock_server = MockServer::start().await;
    resource_call("POST", "add_torrent")
        .and(body_string_contains("torrent_magnet=magnet%3A%3Fxt%3Durn%3Abtih%3Add8255ec"))
        .and(body_string_contains("folder_id=-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": true,
            "user_torrent_id": 55,
            "title": "Big Buck Bunny",
            "torrent_hash": BIG_BUCK_BUNNY_HASH
        })))
        .mount(&mock_server)
        .await;

    let seedr = client_for(&mock_server).await;
    let response = seedr.add_torrent(BIG_BUCK_BUNNY).await.unwrap();

    assert!(response.result);
    assert_eq!(response.title, "Big Buck Bunny");
    assert_eq!(response.torrent_hash, BIG_BUCK_BUNNY_HASH);
}

#[tokio::test]
async fn test_add_torrent_string_result_is_unsuccessful() {
    let mock_server = MockServer::start().await;
    resource_call("POST", "add_torrent")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "not_enough_space_added_to_wishlist"
        })))
        .mount(&mock_server)
        .await;

    let seedr = client_for(&mock_server).await;
    let response = seedr.add_torrent(BIG_BUCK_BUNNY).await.unwrap();

    assert!(!response.result);
    assert_eq!(
        response.error.as_deref(),
        Some("not_enough_space_added_to_wishlist")
    );
}

#[tokio::test]
async fn test_invalid_magnet_never_reaches_the_service() {
    let mock_server = MockServer::start().await;
    resource_call("POST", "add_torrent")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": true})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let seedr = client_for(&mock_server).await;
    let result = seedr.add_torrent("https://example.com/movie.torrent").await;

    assert!(matches!(result, Err(SeedrError::InvalidMagnet { .. })));
}

#[tokio::test]
async fn test_get_devices() {
    let mock_server = MockServer::start().await;
    resource_call("GET", "get_devices")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": true,
            "devices": [
                {"client_id": "seedr_xbmc", "client_name": "Kodi", "device_code": "d1", "tk": "t1"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let seedr = client_for(&mock_server).await;
    let devices = seedr.get_devices().await.unwrap();

    assert!(devices.result);
    assert_eq!(devices.devices.len(), 1);
    assert_eq!(devices.devices[0].client_name, "Kodi");
}

#[tokio::test]
async fn test_expired_token_is_reported() {
    let mock_server = MockServer::start().await;
    resource_call("GET", "get_settings")
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "expired_token",
            "error_description": "The access token provided has expired"
        })))
        .mount(&mock_server)
        .await;
    resource_call("GET", "test")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "invalid_token"
        })))
        .mount(&mock_server)
        .await;

    let seedr = client_for(&mock_server).await;
    assert!(matches!(
        seedr.get_settings().await,
        Err(SeedrError::TokenExpired)
    ));
    assert!(matches!(seedr.test_token().await, Err(SeedrError::TokenExpired)));
}

#[tokio::test]
async fn test_server_error_surfaces_status() {
    let mock_server = MockServer::start().await;
    resource_call("GET", "get_memory_bandwidth")
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let seedr = client_for(&mock_server).await;
    match seedr.get_memory_bandwidth().await {
        Err(SeedrError::Api { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rename_fetch_and_search() {
    let mock_server = MockServer::start().await;
    resource_call("POST", "rename")
        .and(body_string_contains("rename_to=Renamed"))
        .and(body_string_contains("folder_id=11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": true})))
        .mount(&mock_server)
        .await;
    resource_call("POST", "fetch_file")
        .and(body_string_contains("folder_file_id=77"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": true,
            "name": "movie.mp4",
            "url": "https://cdn.example.com/movie.mp4"
        })))
        .mount(&mock_server)
        .await;
    resource_call("POST", "search_files")
        .and(body_string_contains("search_query=bunny"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": true,
            "folders": [{"id": 3, "name": "Big Buck Bunny"}]
        })))
        .mount(&mock_server)
        .await;

    let seedr = client_for(&mock_server).await;

    assert!(seedr.rename_folder(11, "Renamed").await.unwrap().result);

    let fetched = seedr.fetch_file(77).await.unwrap();
    assert_eq!(fetched.url, "https://cdn.example.com/movie.mp4");

    let found = seedr.search_files("bunny").await.unwrap();
    assert_eq!(found.folders[0].name, "Big Buck Bunny");
}

#[tokio::test]
async fn test_wait_for_torrent_polls_until_listed() {
    let mock_server = MockServer::start().await;
    resource_call("POST", "list_contents")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": true})))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;
    resource_call("POST", "list_contents")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": true,
            "torrents": [{
                "id": 8,
                "name": "Big Buck Bunny",
                "hash": BIG_BUCK_BUNNY_HASH,
                "progress": "0"
            }]
        })))
        .mount(&mock_server)
        .await;

    let seedr = client_for(&mock_server).await;
    let poll = PollConfig {
        initial_delay: Duration::from_millis(5),
        max_delay: Duration::from_millis(20),
        backoff_factor: 2,
        max_attempts: 5,
    };

    let target = TorrentTarget {
        hash: BIG_BUCK_BUNNY_HASH.to_string(),
        title: "Big Buck Bunny".to_string(),
        ..Default::default()
    };

    let found = wait_for_torrent(&seedr, &target, &poll).await.unwrap();
    match found {
        PolledItem::Torrent(torrent) => assert_eq!(torrent.hash, BIG_BUCK_BUNNY_HASH),
        other => panic!("Expected torrent, got {other:?}"),
    }
}
