//! Collection synchronizer tests against a mock backend

use melody_rs::model::{
    BackendClient, CollectionSynchronizer, Playlist, SessionStore, SyncError, Track, User,
};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn track(id: &str) -> Track {
    Track {
        id: id.to_string(),
        name: format!("Song {}", id),
        artist: "Artist".to_string(),
        album_image: String::new(),
        preview_url: Some(format!("https://p/{}.mp3", id)),
        release_date: None,
    }
}

fn stored(id: &str) -> serde_json::Value {
    json!({
        "trackId": id,
        "trackName": format!("Song {}", id),
        "artistName": "Artist",
        "albumImage": "",
        "previewUrl": format!("https://p/{}.mp3", id)
    })
}

fn user(favorites: Vec<Track>, playlists: Vec<Playlist>) -> User {
    User {
        id: "u1".to_string(),
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        favorites,
        playlists,
    }
}

fn playlist(id: &str, name: &str, tracks: Vec<Track>) -> Playlist {
    Playlist {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        tracks,
    }
}

async fn synchronizer(server: &MockServer, user: User) -> CollectionSynchronizer {
    let backend = BackendClient::new(format!("{}/api", server.uri()));
    backend.set_token(Some("secret".to_string())).await;
    CollectionSynchronizer::new(backend, SessionStore::with_user(user))
}

// =============================================================================
// Favorites
// =============================================================================

mod favorites {
    use super::*;

    #[tokio::test]
    async fn add_replaces_favorites_with_server_list() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/user/favorites"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "favorites": [stored("t1")] })))
            .expect(1)
            .mount(&server)
            .await;

        let sync = synchronizer(&server, user(vec![], vec![])).await;
        let favorites = sync.add_favorite(&track("t1")).await.unwrap();

        assert_eq!(favorites.len(), 1);
        let current = sync.session().current().await.unwrap();
        assert!(current.is_favorite("t1"));
    }

    #[tokio::test]
    async fn duplicate_is_rejected_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/user/favorites"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let sync = synchronizer(&server, user(vec![track("t1")], vec![])).await;
        let result = sync.add_favorite(&track("t1")).await;

        assert!(matches!(result, Err(SyncError::AlreadyExists(ref m)) if m == "Already in favorites!"));
        assert_eq!(sync.session().current().await.unwrap().favorites.len(), 1);
    }

    #[tokio::test]
    async fn add_then_duplicate_add_then_remove() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/user/favorites"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "favorites": [stored("t1")] })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/user/favorites/t1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "favorites": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let sync = synchronizer(&server, user(vec![], vec![])).await;
        sync.add_favorite(&track("t1")).await.unwrap();
        assert!(matches!(sync.add_favorite(&track("t1")).await, Err(SyncError::AlreadyExists(_))));
        sync.remove_favorite("t1").await.unwrap();

        assert!(sync.session().current().await.unwrap().favorites.is_empty());
    }

    #[tokio::test]
    async fn removing_missing_favorite_is_noop() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/user/favorites/gone"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Track not in favorites" })))
            .mount(&server)
            .await;

        let sync = synchronizer(&server, user(vec![track("t1")], vec![])).await;
        let favorites = sync.remove_favorite("gone").await.unwrap();

        assert_eq!(favorites, vec![track("t1")]);
    }

    #[tokio::test]
    async fn server_missing_favorite_still_held_locally_resyncs() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/user/favorites/t1"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Track not in favorites" })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": {
                    "_id": "u1",
                    "name": "Ada Lovelace",
                    "email": "ada@example.com",
                    "favorites": [stored("t2")],
                    "playlists": []
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let sync = synchronizer(&server, user(vec![track("t1"), track("t2")], vec![])).await;
        let favorites = sync.remove_favorite("t1").await.unwrap();

        assert_eq!(favorites, vec![track("t2")]);
        let session = sync.session().current().await.unwrap();
        assert!(!session.is_favorite("t1"));
        assert_eq!(session.favorites, vec![track("t2")]);
    }

    #[tokio::test]
    async fn failure_leaves_session_untouched() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/user/favorites"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "database down" })))
            .mount(&server)
            .await;

        let sync = synchronizer(&server, user(vec![track("t0")], vec![])).await;
        let revision = sync.session().revision();
        let result = sync.add_favorite(&track("t1")).await;

        assert!(matches!(result, Err(SyncError::Network(_))));
        assert_eq!(sync.session().revision(), revision);
        assert_eq!(sync.session().current().await.unwrap().favorites, vec![track("t0")]);
    }

    #[tokio::test]
    async fn server_duplicate_message_maps_to_already_exists() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/user/favorites"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "message": "Track already in favorites" })))
            .mount(&server)
            .await;

        let sync = synchronizer(&server, user(vec![], vec![])).await;
        let result = sync.add_favorite(&track("t1")).await;

        assert!(matches!(result, Err(SyncError::AlreadyExists(ref m)) if m == "Track already in favorites"));
    }

    #[tokio::test]
    async fn rejected_token_is_unauthenticated() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/user/favorites/t1"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid token" })))
            .mount(&server)
            .await;

        let sync = synchronizer(&server, user(vec![track("t1")], vec![])).await;
        assert!(matches!(sync.remove_favorite("t1").await, Err(SyncError::Unauthenticated)));
    }
}

// =============================================================================
// Playlists
// =============================================================================

mod playlists {
    use super::*;

    #[tokio::test]
    async fn create_sends_trimmed_name() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/user/playlists"))
            .and(wiremock::matchers::body_json(json!({ "name": "Road trip", "description": "" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "playlists": [{ "_id": "p1", "name": "Road trip", "description": "", "tracks": [] }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let sync = synchronizer(&server, user(vec![], vec![])).await;
        let playlists = sync.create_playlist("  Road trip  ").await.unwrap();

        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].id, "p1");
        assert_eq!(sync.session().current().await.unwrap().playlists[0].name, "Road trip");
    }

    #[tokio::test]
    async fn blank_name_is_rejected_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/user/playlists"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let sync = synchronizer(&server, user(vec![], vec![])).await;
        let result = sync.create_playlist("   ").await;

        assert!(matches!(result, Err(SyncError::Validation(ref m)) if m == "Please enter a playlist name"));
        assert!(sync.session().current().await.unwrap().playlists.is_empty());
    }

    #[tokio::test]
    async fn add_track_grows_only_that_playlist() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/user/playlists/p2/tracks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "playlist": { "_id": "p2", "name": "Chill", "tracks": [stored("t1"), stored("t9")] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let sync = synchronizer(
            &server,
            user(
                vec![],
                vec![
                    playlist("p1", "Gym", vec![track("t5")]),
                    playlist("p2", "Chill", vec![track("t1")]),
                ],
            ),
        )
        .await;

        let updated = sync.add_track_to_playlist("p2", &track("t9")).await.unwrap();
        assert_eq!(updated.tracks.len(), 2);

        let current = sync.session().current().await.unwrap();
        assert_eq!(current.playlists[0].tracks, vec![track("t5")]);
        assert_eq!(current.playlists[1].tracks.len(), 2);
        assert!(current.playlists[1].contains("t9"));
    }

    #[tokio::test]
    async fn duplicate_track_is_rejected_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/user/playlists/p1/tracks"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let sync = synchronizer(&server, user(vec![], vec![playlist("p1", "Gym", vec![track("t1")])])).await;
        let result = sync.add_track_to_playlist("p1", &track("t1")).await;

        assert!(matches!(result, Err(SyncError::AlreadyExists(ref m)) if m == "Already in this playlist!"));
    }

    #[tokio::test]
    async fn unknown_playlist_is_not_found() {
        let server = MockServer::start().await;
        let sync = synchronizer(&server, user(vec![], vec![])).await;

        let result = sync.add_track_to_playlist("nope", &track("t1")).await;
        assert!(matches!(result, Err(SyncError::NotFound(_))));
    }

    fn playlist_ids(playlists: &[Playlist]) -> Vec<&str> {
        playlists.iter().map(|p| p.id.as_str()).collect()
    }

    #[tokio::test]
    async fn deleting_twice_is_noop_the_second_time() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/user/playlists/p2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "playlists": [
                    { "_id": "p1", "name": "Gym", "tracks": [] },
                    { "_id": "p3", "name": "Focus", "tracks": [] }
                ]
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/user/playlists/p2"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Playlist not found" })))
            .mount(&server)
            .await;

        let playlists = vec![
            playlist("p1", "Gym", vec![]),
            playlist("p2", "Chill", vec![]),
            playlist("p3", "Focus", vec![]),
        ];
        let sync = synchronizer(&server, user(vec![], playlists)).await;

        let first = sync.delete_playlist("p2").await.unwrap();
        assert_eq!(playlist_ids(&first), vec!["p1", "p3"]);
        assert_eq!(playlist_ids(&sync.session().current().await.unwrap().playlists), vec!["p1", "p3"]);

        let second = sync.delete_playlist("p2").await.unwrap();
        assert_eq!(playlist_ids(&second), vec!["p1", "p3"]);
        assert_eq!(playlist_ids(&sync.session().current().await.unwrap().playlists), vec!["p1", "p3"]);
    }

    #[tokio::test]
    async fn server_missing_playlist_still_held_locally_resyncs() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/user/playlists/p2"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Playlist not found" })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": {
                    "_id": "u1",
                    "name": "Ada Lovelace",
                    "email": "ada@example.com",
                    "favorites": [],
                    "playlists": [{ "_id": "p1", "name": "Gym", "tracks": [] }]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let playlists = vec![playlist("p1", "Gym", vec![]), playlist("p2", "Chill", vec![])];
        let sync = synchronizer(&server, user(vec![], playlists)).await;
        let remaining = sync.delete_playlist("p2").await.unwrap();

        assert_eq!(playlist_ids(&remaining), vec!["p1"]);
        assert!(sync.session().current().await.unwrap().playlist("p2").is_none());
    }

    #[tokio::test]
    async fn removing_missing_track_is_noop() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/user/playlists/p1/tracks/t7"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Track not in playlist" })))
            .mount(&server)
            .await;

        let sync = synchronizer(&server, user(vec![], vec![playlist("p1", "Gym", vec![track("t1")])])).await;
        let playlist = sync.remove_track_from_playlist("p1", "t7").await.unwrap();

        assert_eq!(playlist.tracks, vec![track("t1")]);
    }

    #[tokio::test]
    async fn remove_track_replaces_playlist() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/user/playlists/p1/tracks/t1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "playlist": { "_id": "p1", "name": "Gym", "tracks": [] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let sync = synchronizer(&server, user(vec![], vec![playlist("p1", "Gym", vec![track("t1")])])).await;
        sync.remove_track_from_playlist("p1", "t1").await.unwrap();

        assert!(sync.session().current().await.unwrap().playlists[0].tracks.is_empty());
    }
}

// =============================================================================
// Session refresh
// =============================================================================

#[tokio::test]
async fn refresh_replaces_whole_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {
                "_id": "u1",
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "favorites": [stored("t1"), stored("t2")],
                "playlists": [{ "_id": "p1", "name": "Gym", "tracks": [stored("t3")] }]
            }
        })))
        .mount(&server)
        .await;

    let sync = synchronizer(&server, user(vec![], vec![])).await;
    let refreshed = sync.refresh().await.unwrap();

    assert_eq!(refreshed.favorites.len(), 2);
    assert_eq!(refreshed.playlists[0].tracks[0].id, "t3");
    assert_eq!(refreshed.first_name(), "Ada");
}
