//! HTTP client for the favorites/playlists backend and its auth routes

use std::sync::Arc;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tokio::sync::RwLock;

use super::collection::{Playlist, User, WirePlaylist, WireUser};
use super::error::{SyncError, SyncResult};
use super::track::{StoredTrack, Track};

#[derive(Debug, Deserialize)]
struct FavoritesResponse {
    #[serde(default)]
    favorites: Vec<StoredTrack>,
}

#[derive(Debug, Deserialize)]
struct PlaylistsResponse {
    #[serde(default)]
    playlists: Vec<WirePlaylist>,
}

#[derive(Debug, Deserialize)]
struct PlaylistResponse {
    playlist: WirePlaylist,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: String,
    user: WireUser,
}

#[derive(Debug, Deserialize)]
struct MeResponse {
    user: WireUser,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Token-authenticated client for the user-scoped collection API.
///
/// Every mutation returns the whole updated collection as the server sees it.
#[derive(Clone, Debug)]
pub struct BackendClient {
    http: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(Client::new(), base_url)
    }

    pub fn with_http(http: Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    // ========================================================================
    // Auth
    // ========================================================================

    pub async fn login(&self, email: &str, password: &str) -> SyncResult<(String, User)> {
        tracing::debug!(email, "API: login");
        let request = self
            .http
            .post(self.endpoint(&["auth", "login"])?)
            .json(&json!({ "email": email, "password": password }));
        let body: AuthResponse = Self::read(request.send().await?).await?;
        Ok((body.token, body.user.into()))
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> SyncResult<(String, User)> {
        tracing::debug!(email, "API: register");
        let request = self
            .http
            .post(self.endpoint(&["auth", "register"])?)
            .json(&json!({ "name": name, "email": email, "password": password }));
        let body: AuthResponse = Self::read(request.send().await?).await?;
        Ok((body.token, body.user.into()))
    }

    pub async fn me(&self) -> SyncResult<User> {
        tracing::debug!("API: me");
        let request = self.authorized(self.http.get(self.endpoint(&["auth", "me"])?)).await?;
        let body: MeResponse = Self::read(request.send().await?).await?;
        Ok(body.user.into())
    }

    // ========================================================================
    // Favorites
    // ========================================================================

    pub async fn add_favorite(&self, track: &Track) -> SyncResult<Vec<Track>> {
        tracing::debug!(track_id = %track.id, "API: add_favorite");
        let request = self
            .authorized(self.http.post(self.endpoint(&["user", "favorites"])?))
            .await?
            .json(&track.to_stored());
        let body: FavoritesResponse = Self::read(request.send().await?).await?;
        Ok(body.favorites.into_iter().map(Track::from).collect())
    }

    pub async fn remove_favorite(&self, track_id: &str) -> SyncResult<Vec<Track>> {
        tracing::debug!(track_id, "API: remove_favorite");
        let request = self
            .authorized(self.http.delete(self.endpoint(&["user", "favorites", track_id])?))
            .await?;
        let body: FavoritesResponse = Self::read(request.send().await?).await?;
        Ok(body.favorites.into_iter().map(Track::from).collect())
    }

    // ========================================================================
    // Playlists
    // ========================================================================

    pub async fn create_playlist(&self, name: &str, description: &str) -> SyncResult<Vec<Playlist>> {
        tracing::debug!(name, "API: create_playlist");
        let request = self
            .authorized(self.http.post(self.endpoint(&["user", "playlists"])?))
            .await?
            .json(&json!({ "name": name, "description": description }));
        let body: PlaylistsResponse = Self::read(request.send().await?).await?;
        Ok(body.playlists.into_iter().map(Playlist::from).collect())
    }

    pub async fn delete_playlist(&self, playlist_id: &str) -> SyncResult<Vec<Playlist>> {
        tracing::debug!(playlist_id, "API: delete_playlist");
        let request = self
            .authorized(self.http.delete(self.endpoint(&["user", "playlists", playlist_id])?))
            .await?;
        let body: PlaylistsResponse = Self::read(request.send().await?).await?;
        Ok(body.playlists.into_iter().map(Playlist::from).collect())
    }

    pub async fn add_track_to_playlist(&self, playlist_id: &str, track: &Track) -> SyncResult<Playlist> {
        tracing::debug!(playlist_id, track_id = %track.id, "API: add_track_to_playlist");
        let request = self
            .authorized(self.http.post(self.endpoint(&["user", "playlists", playlist_id, "tracks"])?))
            .await?
            .json(&track.to_stored());
        let body: PlaylistResponse = Self::read(request.send().await?).await?;
        Ok(body.playlist.into())
    }

    pub async fn remove_track_from_playlist(&self, playlist_id: &str, track_id: &str) -> SyncResult<Playlist> {
        tracing::debug!(playlist_id, track_id, "API: remove_track_from_playlist");
        let url = self.endpoint(&["user", "playlists", playlist_id, "tracks", track_id])?;
        let request = self.authorized(self.http.delete(url)).await?;
        let body: PlaylistResponse = Self::read(request.send().await?).await?;
        Ok(body.playlist.into())
    }

    // ========================================================================
    // Plumbing
    // ========================================================================

    fn endpoint(&self, segments: &[&str]) -> SyncResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| SyncError::Network(format!("Invalid API url '{}': {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| SyncError::Network(format!("API url '{}' cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn authorized(&self, request: RequestBuilder) -> SyncResult<RequestBuilder> {
        match self.token().await {
            Some(token) => Ok(request.bearer_auth(token)),
            None => Err(SyncError::Unauthenticated),
        }
    }

    async fn read<T: DeserializeOwned>(response: Response) -> SyncResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or(text);
        tracing::warn!(status = %status, message = %message, "Backend returned an error");

        Err(match status {
            StatusCode::UNAUTHORIZED => SyncError::Unauthenticated,
            StatusCode::NOT_FOUND => SyncError::NotFound(message),
            _ if message.to_lowercase().contains("already") => SyncError::AlreadyExists(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => SyncError::Validation(message),
            _ => SyncError::Network(format!("Server error ({}): {}", status.as_u16(), message)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_segments_to_base_path() {
        let client = BackendClient::new("http://localhost:5001/api/");
        let url = client.endpoint(&["user", "playlists", "p 1", "tracks"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5001/api/user/playlists/p%201/tracks");
    }

    #[tokio::test]
    async fn requests_without_token_are_rejected_locally() {
        let client = BackendClient::new("http://localhost:5001/api");
        let result = client.remove_favorite("t1").await;
        assert!(matches!(result, Err(SyncError::Unauthenticated)));
    }
}
