//! Main application model with state management

use std::sync::Arc;
use tokio::sync::Mutex;

use super::collection::{Playlist, User};
use super::content::ContentState;
use super::search_client::SearchClient;
use super::session::SessionStore;
use super::synchronizer::CollectionSynchronizer;
use super::track::Track;
use super::types::{InputMode, PlaylistPane, Tab, Toast, UiState};

/// Track under the cursor, with the playlist it was picked from (if any)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedTrack {
    pub track: Track,
    pub playlist_id: Option<String>,
}

/// Clamp a cursor to a list of `len` items
pub fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

/// Main application model containing all state.
///
/// Cloning is cheap and every clone observes the same state, so intents can
/// run on spawned tasks without holding up the render loop.
#[derive(Clone)]
pub struct AppModel {
    search: SearchClient,
    sync: CollectionSynchronizer,
    ui_state: Arc<Mutex<UiState>>,
    content_state: Arc<Mutex<ContentState>>,
    should_quit: Arc<Mutex<bool>>,
    logout_requested: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new(search: SearchClient, sync: CollectionSynchronizer) -> Self {
        Self {
            search,
            sync,
            ui_state: Arc::new(Mutex::new(UiState::default())),
            content_state: Arc::new(Mutex::new(ContentState::default())),
            should_quit: Arc::new(Mutex::new(false)),
            logout_requested: Arc::new(Mutex::new(false)),
        }
    }

    pub fn search_client(&self) -> &SearchClient {
        &self.search
    }

    pub fn synchronizer(&self) -> &CollectionSynchronizer {
        &self.sync
    }

    pub fn session(&self) -> &SessionStore {
        self.sync.session()
    }

    pub async fn user(&self) -> Option<Arc<User>> {
        self.sync.session().current().await
    }

    /// The signed-in user, re-read only when the session moved past `seen`.
    /// Returns the new revision alongside the snapshot.
    pub async fn user_if_changed(&self, seen: u64) -> Option<(u64, Option<Arc<User>>)> {
        let revision = self.session().revision();
        if revision == seen {
            return None;
        }
        Some((revision, self.user().await))
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    pub async fn request_logout(&self) {
        *self.logout_requested.lock().await = true;
        self.set_should_quit(true).await;
    }

    pub async fn logout_requested(&self) -> bool {
        *self.logout_requested.lock().await
    }

    // ========================================================================
    // Tabs & input
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn active_tab(&self) -> Tab {
        self.ui_state.lock().await.active_tab
    }

    pub async fn set_active_tab(&self, tab: Tab) {
        let mut state = self.ui_state.lock().await;
        state.active_tab = tab;
    }

    pub async fn cycle_tab_forward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_tab = state.active_tab.next();
    }

    pub async fn cycle_tab_backward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_tab = state.active_tab.prev();
    }

    pub async fn input_mode(&self) -> InputMode {
        self.ui_state.lock().await.input_mode.clone()
    }

    pub async fn set_input_mode(&self, mode: InputMode) {
        let mut state = self.ui_state.lock().await;
        state.input_mode = mode;
    }

    /// Open the new-playlist form on the playlists tab
    pub async fn open_create_playlist(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_tab = Tab::Playlists;
        state.new_playlist_name.clear();
        state.input_mode = InputMode::NewPlaylist;
    }

    pub async fn close_create_playlist(&self) {
        let mut state = self.ui_state.lock().await;
        state.new_playlist_name.clear();
        state.input_mode = InputMode::Normal;
    }

    /// Type a character into whichever text field is active
    pub async fn append_input(&self, c: char) {
        let mut state = self.ui_state.lock().await;
        match state.input_mode {
            InputMode::Search => state.keyword.push(c),
            InputMode::NewPlaylist => state.new_playlist_name.push(c),
            _ => {}
        }
    }

    pub async fn backspace_input(&self) {
        let mut state = self.ui_state.lock().await;
        match state.input_mode {
            InputMode::Search => {
                state.keyword.pop();
            }
            InputMode::NewPlaylist => {
                state.new_playlist_name.pop();
            }
            _ => {}
        }
    }

    pub async fn keyword(&self) -> String {
        self.ui_state.lock().await.keyword.clone()
    }

    pub async fn new_playlist_name(&self) -> String {
        self.ui_state.lock().await.new_playlist_name.clone()
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    // ========================================================================
    // Toasts
    // ========================================================================

    pub async fn show_toast(&self, message: impl Into<String>) {
        let mut state = self.ui_state.lock().await;
        state.toast = Some(Toast::new(message));
    }

    pub async fn auto_clear_toast(&self) {
        let mut state = self.ui_state.lock().await;
        if state.toast.as_ref().is_some_and(|t| t.is_expired()) {
            state.toast = None;
        }
    }

    // ========================================================================
    // Playback slot
    // ========================================================================

    pub async fn currently_playing(&self) -> Option<String> {
        self.ui_state.lock().await.currently_playing.clone()
    }

    /// Select a track for playback. Selecting the playing track again stops it,
    /// selecting another one takes over the slot. Returns the new slot value.
    pub async fn toggle_playing(&self, track_id: &str) -> Option<String> {
        let mut state = self.ui_state.lock().await;
        state.currently_playing = match state.currently_playing.as_deref() {
            Some(current) if current == track_id => None,
            _ => Some(track_id.to_string()),
        };
        state.currently_playing.clone()
    }

    /// Clear the slot, but only if it still holds `track_id`
    pub async fn finish_playing(&self, track_id: &str) {
        let mut state = self.ui_state.lock().await;
        if state.currently_playing.as_deref() == Some(track_id) {
            state.currently_playing = None;
        }
    }

    pub async fn stop_playing(&self) {
        self.ui_state.lock().await.currently_playing = None;
    }

    // ========================================================================
    // Search provider content
    // ========================================================================

    pub async fn get_content_state(&self) -> ContentState {
        self.content_state.lock().await.clone()
    }

    pub async fn set_trending_loading(&self, loading: bool) {
        self.content_state.lock().await.trending_loading = loading;
    }

    pub async fn set_trending(&self, tracks: Vec<Track>) {
        {
            let mut content = self.content_state.lock().await;
            content.trending = tracks;
            content.trending_loading = false;
        }
        self.ui_state.lock().await.trending_selected = 0;
    }

    /// Mark a search as in flight and switch to the search tab
    pub async fn begin_search(&self, keyword: &str) {
        {
            let mut state = self.ui_state.lock().await;
            state.active_tab = Tab::Search;
            state.searched_keyword = keyword.to_string();
            state.input_mode = InputMode::Normal;
        }
        self.content_state.lock().await.search_loading = true;
    }

    pub async fn set_search_results(&self, tracks: Vec<Track>) {
        {
            let mut content = self.content_state.lock().await;
            content.search_results = tracks;
            content.search_loading = false;
        }
        self.ui_state.lock().await.search_selected = 0;
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub async fn move_selection_up(&self) {
        let mut state = self.ui_state.lock().await;
        let cursor = Self::active_cursor(&mut state);
        *cursor = cursor.saturating_sub(1);
    }

    pub async fn move_selection_down(&self) {
        let len = self.active_list_len().await;
        let mut state = self.ui_state.lock().await;
        let cursor = Self::active_cursor(&mut state);
        *cursor = clamp_index(cursor.saturating_add(1), len);
    }

    pub async fn focus_playlist_tracks(&self, focus: bool) {
        let mut state = self.ui_state.lock().await;
        if state.active_tab == Tab::Playlists {
            state.playlist_pane = if focus { PlaylistPane::Tracks } else { PlaylistPane::Playlists };
            if !focus {
                state.playlist_track_selected = 0;
            }
        }
    }

    fn active_cursor(state: &mut UiState) -> &mut usize {
        match state.active_tab {
            Tab::Trending => &mut state.trending_selected,
            Tab::Search => &mut state.search_selected,
            Tab::Favorites => &mut state.favorites_selected,
            Tab::Playlists => match state.playlist_pane {
                PlaylistPane::Playlists => &mut state.playlist_selected,
                PlaylistPane::Tracks => &mut state.playlist_track_selected,
            },
        }
    }

    async fn active_list_len(&self) -> usize {
        let state = self.get_ui_state().await;
        match state.active_tab {
            Tab::Trending => self.content_state.lock().await.trending.len(),
            Tab::Search => self.content_state.lock().await.search_results.len(),
            Tab::Favorites => self.user().await.map_or(0, |u| u.favorites.len()),
            Tab::Playlists => {
                let Some(user) = self.user().await else { return 0 };
                match state.playlist_pane {
                    PlaylistPane::Playlists => user.playlists.len(),
                    PlaylistPane::Tracks => {
                        let index = clamp_index(state.playlist_selected, user.playlists.len());
                        user.playlists.get(index).map_or(0, |p| p.tracks.len())
                    }
                }
            }
        }
    }

    /// Playlist highlighted in the playlists tab
    pub async fn selected_playlist(&self) -> Option<Playlist> {
        let user = self.user().await?;
        let index = clamp_index(self.ui_state.lock().await.playlist_selected, user.playlists.len());
        user.playlists.get(index).cloned()
    }

    /// Playlist that `add to playlist` targets: the highlighted one, which is
    /// the first playlist until the user moves the cursor.
    pub async fn target_playlist(&self) -> Option<Playlist> {
        self.selected_playlist().await
    }

    pub async fn selected_track(&self) -> Option<SelectedTrack> {
        let state = self.get_ui_state().await;
        match state.active_tab {
            Tab::Trending => {
                let content = self.content_state.lock().await;
                let index = clamp_index(state.trending_selected, content.trending.len());
                content.trending.get(index).cloned().map(|track| SelectedTrack { track, playlist_id: None })
            }
            Tab::Search => {
                let content = self.content_state.lock().await;
                let index = clamp_index(state.search_selected, content.search_results.len());
                content.search_results.get(index).cloned().map(|track| SelectedTrack { track, playlist_id: None })
            }
            Tab::Favorites => {
                let user = self.user().await?;
                let index = clamp_index(state.favorites_selected, user.favorites.len());
                user.favorites.get(index).cloned().map(|track| SelectedTrack { track, playlist_id: None })
            }
            Tab::Playlists => {
                if state.playlist_pane != PlaylistPane::Tracks {
                    return None;
                }
                let playlist = self.selected_playlist().await?;
                let index = clamp_index(state.playlist_track_selected, playlist.tracks.len());
                playlist.tracks.get(index).cloned().map(|track| SelectedTrack {
                    track,
                    playlist_id: Some(playlist.id.clone()),
                })
            }
        }
    }
}
