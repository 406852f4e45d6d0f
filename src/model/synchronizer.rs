//! Collection synchronizer: favorites and playlist mutations
//!
//! Every operation talks to the backend first and only then swaps the
//! returned collection into the session store. Nothing is merged locally, so a
//! failed request leaves the snapshot exactly as it was. Concurrent mutations
//! of the same collection are not serialized: the last response to arrive
//! wins.

use std::sync::Arc;

use super::backend_client::BackendClient;
use super::collection::{Playlist, User};
use super::error::{SyncError, SyncResult};
use super::session::SessionStore;
use super::track::Track;

#[derive(Clone)]
pub struct CollectionSynchronizer {
    backend: BackendClient,
    session: SessionStore,
}

impl CollectionSynchronizer {
    pub fn new(backend: BackendClient, session: SessionStore) -> Self {
        Self { backend, session }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Reload the whole user from the backend
    pub async fn refresh(&self) -> SyncResult<Arc<User>> {
        let user = self.backend.me().await?;
        tracing::info!(
            user_id = %user.id,
            favorites = user.favorites.len(),
            playlists = user.playlists.len(),
            "Session refreshed"
        );
        self.session.replace(user).await;
        self.snapshot().await
    }

    // ========================================================================
    // Favorites
    // ========================================================================

    pub async fn add_favorite(&self, track: &Track) -> SyncResult<Vec<Track>> {
        let user = self.snapshot().await?;
        if user.is_favorite(&track.id) {
            tracing::debug!(track_id = %track.id, "Track already in favorites");
            return Err(SyncError::AlreadyExists("Already in favorites!".to_string()));
        }

        let favorites = self.backend.add_favorite(track).await?;
        tracing::info!(track_id = %track.id, count = favorites.len(), "Added to favorites");
        self.commit(|user| user.with_favorites(favorites.clone())).await;
        Ok(favorites)
    }

    pub async fn remove_favorite(&self, track_id: &str) -> SyncResult<Vec<Track>> {
        match self.backend.remove_favorite(track_id).await {
            Ok(favorites) => {
                tracing::info!(track_id, count = favorites.len(), "Removed from favorites");
                self.commit(|user| user.with_favorites(favorites.clone())).await;
                Ok(favorites)
            }
            Err(SyncError::NotFound(message)) => {
                let user = self.snapshot().await?;
                if !user.is_favorite(track_id) {
                    tracing::debug!(track_id, "Favorite already gone");
                    return Ok(user.favorites.clone());
                }
                // Local copy disagrees with the server, take the server's word
                tracing::warn!(track_id, message = %message, "Favorite missing on server, refreshing");
                Ok(self.refresh().await?.favorites.clone())
            }
            Err(e) => Err(e),
        }
    }

    // ========================================================================
    // Playlists
    // ========================================================================

    pub async fn create_playlist(&self, name: &str) -> SyncResult<Vec<Playlist>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SyncError::Validation("Please enter a playlist name".to_string()));
        }
        self.snapshot().await?;

        let playlists = self.backend.create_playlist(name, "").await?;
        tracing::info!(name, count = playlists.len(), "Playlist created");
        self.commit(|user| user.with_playlists(playlists.clone())).await;
        Ok(playlists)
    }

    pub async fn delete_playlist(&self, playlist_id: &str) -> SyncResult<Vec<Playlist>> {
        match self.backend.delete_playlist(playlist_id).await {
            Ok(playlists) => {
                tracing::info!(playlist_id, count = playlists.len(), "Playlist deleted");
                self.commit(|user| user.with_playlists(playlists.clone())).await;
                Ok(playlists)
            }
            Err(SyncError::NotFound(message)) => {
                let user = self.snapshot().await?;
                if user.playlist(playlist_id).is_none() {
                    tracing::debug!(playlist_id, "Playlist already gone");
                    return Ok(user.playlists.clone());
                }
                tracing::warn!(playlist_id, message = %message, "Playlist missing on server, refreshing");
                Ok(self.refresh().await?.playlists.clone())
            }
            Err(e) => Err(e),
        }
    }

    pub async fn add_track_to_playlist(&self, playlist_id: &str, track: &Track) -> SyncResult<Playlist> {
        let user = self.snapshot().await?;
        let playlist = user
            .playlist(playlist_id)
            .ok_or_else(|| SyncError::NotFound(format!("playlist {}", playlist_id)))?;
        if playlist.contains(&track.id) {
            tracing::debug!(playlist_id, track_id = %track.id, "Track already in playlist");
            return Err(SyncError::AlreadyExists("Already in this playlist!".to_string()));
        }

        let playlist = self.backend.add_track_to_playlist(playlist_id, track).await?;
        tracing::info!(playlist_id, track_id = %track.id, tracks = playlist.tracks.len(), "Added to playlist");
        self.commit(|user| user.with_playlist(playlist.clone())).await;
        Ok(playlist)
    }

    pub async fn remove_track_from_playlist(&self, playlist_id: &str, track_id: &str) -> SyncResult<Playlist> {
        match self.backend.remove_track_from_playlist(playlist_id, track_id).await {
            Ok(playlist) => {
                tracing::info!(playlist_id, track_id, tracks = playlist.tracks.len(), "Removed from playlist");
                self.commit(|user| user.with_playlist(playlist.clone())).await;
                Ok(playlist)
            }
            Err(SyncError::NotFound(message)) => {
                // Missing track is a no-op, missing playlist is not
                let user = self.snapshot().await?;
                match user.playlist(playlist_id) {
                    Some(playlist) if !playlist.contains(track_id) => Ok(playlist.clone()),
                    _ => Err(SyncError::NotFound(message)),
                }
            }
            Err(e) => Err(e),
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn snapshot(&self) -> SyncResult<Arc<User>> {
        self.session.current().await.ok_or(SyncError::Unauthenticated)
    }

    /// Replace the session with one slice swapped out. Applied to the latest
    /// snapshot so a response for one collection never rolls back another.
    async fn commit(&self, update: impl FnOnce(&User) -> User) {
        self.session.update(update).await;
    }
}
