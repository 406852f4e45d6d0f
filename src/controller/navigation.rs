//! Trending and keyword search

use crate::model::InputMode;
use super::AppController;

impl AppController {
    pub async fn load_trending(&self) {
        tracing::debug!("Loading trending tracks");
        self.model.set_trending_loading(true).await;

        match self.model.search_client().trending(self.search_limit).await {
            Ok(tracks) => {
                tracing::info!(count = tracks.len(), "Trending loaded");
                self.model.set_trending(tracks).await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load trending songs");
                self.model.set_trending(Vec::new()).await;
                self.model.show_toast("Failed to load trending songs").await;
            }
        }
    }

    /// Search for the keyword in the search bar. A blank keyword does nothing.
    pub async fn perform_search(&self) {
        let keyword = self.model.keyword().await;
        let keyword = keyword.trim();
        if keyword.is_empty() {
            self.model.set_input_mode(InputMode::Normal).await;
            return;
        }

        tracing::debug!(keyword, "Performing search");
        self.model.begin_search(keyword).await;

        match self.model.search_client().search(keyword, self.search_limit).await {
            Ok(tracks) => {
                tracing::info!(keyword, count = tracks.len(), "Search completed successfully");
                self.model.set_search_results(tracks).await;
            }
            Err(e) => {
                tracing::error!(keyword, error = %e, "Search failed");
                self.model.set_search_results(Vec::new()).await;
                self.model.show_toast("Search failed").await;
            }
        }
    }

    /// Reload favorites and playlists from the backend
    pub async fn refresh_session(&self) {
        match self.model.synchronizer().refresh().await {
            Ok(_) => self.model.show_toast("Library refreshed").await,
            Err(e) => {
                tracing::error!(error = %e, "Session refresh failed");
                let message = Self::format_error(&e, "Failed to refresh library");
                self.model.show_toast(message).await;
            }
        }
    }

    /// Reload trending and the library side by side
    pub async fn reload_all(&self) {
        futures::join!(self.load_trending(), self.refresh_session());
    }
}
