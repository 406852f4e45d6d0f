//! Core type definitions for the UI state

use std::time::{Duration, Instant};

/// How long a toast stays on screen
pub const TOAST_DURATION: Duration = Duration::from_millis(2500);

/// Top-level tabs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Trending,
    Search,
    Favorites,
    Playlists,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Trending, Tab::Search, Tab::Favorites, Tab::Playlists];

    pub fn next(self) -> Self {
        match self {
            Tab::Trending => Tab::Search,
            Tab::Search => Tab::Favorites,
            Tab::Favorites => Tab::Playlists,
            Tab::Playlists => Tab::Trending,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Tab::Trending => Tab::Playlists,
            Tab::Search => Tab::Trending,
            Tab::Favorites => Tab::Search,
            Tab::Playlists => Tab::Favorites,
        }
    }

    /// Tab for the `1`..`4` shortcut keys
    pub fn from_digit(c: char) -> Option<Self> {
        match c {
            '1' => Some(Tab::Trending),
            '2' => Some(Tab::Search),
            '3' => Some(Tab::Favorites),
            '4' => Some(Tab::Playlists),
            _ => None,
        }
    }
}

/// Which pane of the playlists tab has focus
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlaylistPane {
    #[default]
    Playlists,
    Tracks,
}

/// What keystrokes are currently routed to
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing in the search bar
    Search,
    /// Typing a new playlist name
    NewPlaylist,
    /// Waiting for y/n before deleting a playlist
    ConfirmDelete { playlist_id: String, name: String },
}

/// Short-lived notification
#[derive(Clone, Debug)]
pub struct Toast {
    pub message: String,
    pub shown_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= TOAST_DURATION
    }
}

/// Transient UI state owned by the view
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub active_tab: Tab,
    pub input_mode: InputMode,
    pub keyword: String,
    /// Keyword of the last search that was actually sent
    pub searched_keyword: String,
    pub new_playlist_name: String,
    pub trending_selected: usize,
    pub search_selected: usize,
    pub favorites_selected: usize,
    pub playlist_selected: usize,
    pub playlist_track_selected: usize,
    pub playlist_pane: PlaylistPane,
    /// Single playback slot: id of the track whose preview is playing
    pub currently_playing: Option<String>,
    pub toast: Option<Toast>,
    pub show_help_popup: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_cycle_both_ways() {
        for tab in Tab::ALL {
            assert_eq!(tab.next().prev(), tab);
        }
        assert_eq!(Tab::Playlists.next(), Tab::Trending);
        assert_eq!(Tab::Trending.prev(), Tab::Playlists);
    }

    #[test]
    fn digit_shortcuts() {
        assert_eq!(Tab::from_digit('3'), Some(Tab::Favorites));
        assert_eq!(Tab::from_digit('9'), None);
    }

    #[test]
    fn toast_expires_after_duration() {
        let fresh = Toast::new("hello");
        assert!(!fresh.is_expired());

        let old = Toast {
            message: "old".to_string(),
            shown_at: Instant::now() - TOAST_DURATION - Duration::from_millis(1),
        };
        assert!(old.is_expired());
    }
}
