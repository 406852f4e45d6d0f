//! Favorites and playlist intents
//!
//! Each intent calls the synchronizer and reports the outcome as a toast.
//! The synchronizer already swapped the new collection into the session, so
//! there is nothing else to update here.

use crate::model::{InputMode, SyncError, Track};
use super::AppController;

impl AppController {
    pub async fn toggle_favorite(&self, track: Track) {
        let is_favorite = self
            .model
            .user()
            .await
            .is_some_and(|user| user.is_favorite(&track.id));

        if is_favorite {
            self.remove_from_favorites(&track.id).await;
        } else {
            self.add_to_favorites(track).await;
        }
    }

    pub async fn add_to_favorites(&self, track: Track) {
        match self.model.synchronizer().add_favorite(&track).await {
            Ok(_) => self.model.show_toast("Added to favorites! ❤").await,
            Err(e) => {
                tracing::warn!(track_id = %track.id, error = %e, "Add to favorites failed");
                let message = Self::format_error(&e, "Failed to add to favorites");
                self.model.show_toast(message).await;
            }
        }
    }

    pub async fn remove_from_favorites(&self, track_id: &str) {
        match self.model.synchronizer().remove_favorite(track_id).await {
            Ok(_) => self.model.show_toast("Removed from favorites").await,
            Err(e) => {
                tracing::warn!(track_id, error = %e, "Remove from favorites failed");
                let message = Self::format_error(&e, "Failed to remove");
                self.model.show_toast(message).await;
            }
        }
    }

    /// Create a playlist named after the text in the form
    pub async fn create_playlist(&self) {
        let name = self.model.new_playlist_name().await;

        match self.model.synchronizer().create_playlist(&name).await {
            Ok(_) => {
                self.model.close_create_playlist().await;
                self.model.show_toast("Playlist created!").await;
            }
            Err(e @ SyncError::Validation(_)) => {
                // Leave the form open so the user can type a name
                self.model.show_toast(Self::format_error(&e, "")).await;
            }
            Err(e) => {
                tracing::warn!(name = %name, error = %e, "Create playlist failed");
                let message = Self::format_error(&e, "Failed to create playlist");
                self.model.show_toast(message).await;
            }
        }
    }

    /// Ask for confirmation before deleting the highlighted playlist
    pub async fn request_delete_playlist(&self) {
        if let Some(playlist) = self.model.selected_playlist().await {
            self.model
                .set_input_mode(InputMode::ConfirmDelete {
                    playlist_id: playlist.id,
                    name: playlist.name,
                })
                .await;
        }
    }

    pub async fn delete_playlist(&self, playlist_id: &str) {
        match self.model.synchronizer().delete_playlist(playlist_id).await {
            Ok(_) => self.model.show_toast("Playlist deleted").await,
            Err(e) => {
                tracing::warn!(playlist_id, error = %e, "Delete playlist failed");
                let message = Self::format_error(&e, "Failed to delete playlist");
                self.model.show_toast(message).await;
            }
        }
    }

    /// Add a track to the target playlist, or open the create form if the
    /// user has no playlist yet
    pub async fn add_to_playlist(&self, track: Track) {
        let Some(playlist) = self.model.target_playlist().await else {
            self.model.show_toast("Create a playlist first!").await;
            self.model.open_create_playlist().await;
            return;
        };

        match self.model.synchronizer().add_track_to_playlist(&playlist.id, &track).await {
            Ok(_) => {
                self.model.show_toast(format!("Added to \"{}\"!", playlist.name)).await;
            }
            Err(e) => {
                tracing::warn!(playlist_id = %playlist.id, track_id = %track.id, error = %e, "Add to playlist failed");
                let message = Self::format_error(&e, "Failed to add to playlist");
                self.model.show_toast(message).await;
            }
        }
    }

    pub async fn remove_from_playlist(&self, playlist_id: &str, track_id: &str) {
        match self.model.synchronizer().remove_track_from_playlist(playlist_id, track_id).await {
            Ok(_) => self.model.show_toast("Removed from playlist").await,
            Err(e) => {
                tracing::warn!(playlist_id, track_id, error = %e, "Remove from playlist failed");
                let message = Self::format_error(&e, "Failed to remove");
                self.model.show_toast(message).await;
            }
        }
    }
}
