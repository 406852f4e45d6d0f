//! Search provider results shown in the trending and search tabs

use super::track::Track;

/// Tracks fetched from the search provider. Favorites and playlists are not
/// kept here; they are read from the session snapshot on every frame.
#[derive(Clone, Debug, Default)]
pub struct ContentState {
    pub trending: Vec<Track>,
    pub search_results: Vec<Track>,
    pub trending_loading: bool,
    pub search_loading: bool,
}

impl ContentState {
    /// Look up a track by id in either result list
    pub fn find_track(&self, track_id: &str) -> Option<&Track> {
        self.trending
            .iter()
            .chain(self.search_results.iter())
            .find(|t| t.id == track_id)
    }
}
