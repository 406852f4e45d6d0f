//! Intent handling tests: controller + model against a mock backend

use melody_rs::audio::PreviewPlayer;
use melody_rs::controller::AppController;
use melody_rs::model::{
    AppModel, BackendClient, CollectionSynchronizer, InputMode, SearchClient, SessionStore, Tab,
    Track, User,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn track(id: &str, preview: bool) -> Track {
    Track {
        id: id.to_string(),
        name: format!("Song {}", id),
        artist: "Artist".to_string(),
        album_image: String::new(),
        preview_url: preview.then(|| format!("https://p/{}.mp3", id)),
        release_date: None,
    }
}

async fn controller(server: &MockServer) -> AppController {
    let backend = BackendClient::new(format!("{}/api", server.uri()));
    backend.set_token(Some("secret".to_string())).await;
    let session = SessionStore::with_user(User {
        id: "u1".to_string(),
        name: "Ada Lovelace".to_string(),
        ..Default::default()
    });
    let sync = CollectionSynchronizer::new(backend, session);
    let search = SearchClient::new(format!("{}/search", server.uri()), "trending 2024");
    let (player, _events) = PreviewPlayer::new();
    AppController::new(AppModel::new(search, sync), player, 10)
}

async fn toast(controller: &AppController) -> Option<String> {
    controller.model().get_ui_state().await.toast.map(|t| t.message)
}

#[tokio::test]
async fn add_to_playlist_without_playlists_opens_form() {
    let server = MockServer::start().await;
    let controller = controller(&server).await;

    controller.add_to_playlist(track("t1", true)).await;

    assert_eq!(toast(&controller).await.as_deref(), Some("Create a playlist first!"));
    assert_eq!(controller.model().input_mode().await, InputMode::NewPlaylist);
    assert_eq!(controller.model().active_tab().await, Tab::Playlists);
}

#[tokio::test]
async fn favorite_toggle_adds_then_removes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/user/favorites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "favorites": [{ "trackId": "t1", "trackName": "Song t1", "artistName": "Artist", "albumImage": "", "previewUrl": "" }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/user/favorites/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "favorites": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller(&server).await;

    controller.toggle_favorite(track("t1", true)).await;
    assert_eq!(toast(&controller).await.as_deref(), Some("Added to favorites! ❤"));
    assert!(controller.model().user().await.unwrap().is_favorite("t1"));

    controller.toggle_favorite(track("t1", true)).await;
    assert_eq!(toast(&controller).await.as_deref(), Some("Removed from favorites"));
    assert!(controller.model().user().await.unwrap().favorites.is_empty());
}

#[tokio::test]
async fn blank_playlist_name_keeps_form_open() {
    let server = MockServer::start().await;
    let controller = controller(&server).await;

    controller.model().open_create_playlist().await;
    controller.model().append_input(' ').await;
    controller.create_playlist().await;

    assert_eq!(toast(&controller).await.as_deref(), Some("Please enter a playlist name"));
    assert_eq!(controller.model().input_mode().await, InputMode::NewPlaylist);
}

#[tokio::test]
async fn track_without_preview_is_not_played() {
    let server = MockServer::start().await;
    let controller = controller(&server).await;

    controller.toggle_preview(track("t1", false)).await;

    assert!(controller.model().currently_playing().await.is_none());
    assert_eq!(toast(&controller).await.as_deref(), Some("No preview available for this track"));
}

#[tokio::test]
async fn failed_trending_shows_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "trending 2024"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let controller = controller(&server).await;
    controller.load_trending().await;

    let content = controller.model().get_content_state().await;
    assert!(content.trending.is_empty());
    assert!(!content.trending_loading);
    assert_eq!(toast(&controller).await.as_deref(), Some("Failed to load trending songs"));
}

#[tokio::test]
async fn search_results_land_in_search_tab() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "queen"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": { "items": [{ "id": "t1", "name": "Bohemian Rhapsody", "artists": [{ "name": "Queen" }] }] }
        })))
        .mount(&server)
        .await;

    let controller = controller(&server).await;
    controller.model().set_input_mode(InputMode::Search).await;
    for c in " queen ".chars() {
        controller.model().append_input(c).await;
    }
    controller.perform_search().await;

    let ui_state = controller.model().get_ui_state().await;
    assert_eq!(ui_state.active_tab, Tab::Search);
    assert_eq!(ui_state.searched_keyword, "queen");
    let content = controller.model().get_content_state().await;
    assert_eq!(content.search_results[0].artist, "Queen");
}
