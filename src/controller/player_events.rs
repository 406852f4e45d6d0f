//! Preview player event listener

use tokio::sync::mpsc::UnboundedReceiver;

use crate::audio::PreviewEvent;
use super::AppController;

impl AppController {
    /// Feed player events back into the playback slot until the player goes away
    pub fn start_player_event_listener(&self, mut events: UnboundedReceiver<PreviewEvent>) {
        let controller = self.clone();
        tokio::spawn(async move {
            tracing::debug!("Preview event listener started");
            while let Some(event) = events.recv().await {
                controller.handle_player_event(event).await;
            }
            tracing::debug!("Preview event listener stopped");
        });
    }

    pub(crate) async fn handle_player_event(&self, event: PreviewEvent) {
        match event {
            PreviewEvent::Finished(track_id) => {
                self.model.finish_playing(&track_id).await;
            }
            PreviewEvent::Failed { track_id, message } => {
                tracing::warn!(track_id = %track_id, message = %message, "Preview playback failed");
                self.model.finish_playing(&track_id).await;
                self.model.show_toast("Could not play preview").await;
            }
            PreviewEvent::Unavailable(track_id) => {
                self.model.finish_playing(&track_id).await;
                self.model.show_toast("Audio output is not available").await;
            }
        }
    }
}
