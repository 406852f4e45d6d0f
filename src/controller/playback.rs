//! Preview playback control

use crate::model::Track;
use super::AppController;

impl AppController {
    /// Play the track's preview, or stop it if it is the one playing.
    /// Only one preview plays at a time.
    pub async fn toggle_preview(&self, track: Track) {
        let Some(url) = track.preview_url.clone() else {
            self.model.show_toast("No preview available for this track").await;
            return;
        };

        self.player.stop();
        let Some(track_id) = self.model.toggle_playing(&track.id).await else {
            tracing::debug!(track_id = %track.id, "Preview toggled off");
            return;
        };

        match self.player.fetch(&url).await {
            Ok(bytes) => {
                // The user may have picked another track while this one downloaded
                if self.model.currently_playing().await.as_deref() == Some(track_id.as_str()) {
                    self.player.start(&track_id, bytes);
                } else {
                    tracing::debug!(track_id = %track_id, "Discarding stale preview download");
                }
            }
            Err(e) => {
                tracing::warn!(track_id = %track_id, error = %e, "Preview download failed");
                self.model.finish_playing(&track_id).await;
                self.model.show_toast("Could not load preview").await;
            }
        }
    }

    pub async fn stop_preview(&self) {
        self.player.stop();
        self.model.stop_playing().await;
    }
}
