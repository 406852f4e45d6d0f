//! User aggregate with its favorites and playlists

use serde::Deserialize;

use super::track::{StoredTrack, Track};

/// A user-named ordered collection of tracks
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tracks: Vec<Track>,
}

impl Playlist {
    pub fn contains(&self, track_id: &str) -> bool {
        self.tracks.iter().any(|t| t.id == track_id)
    }
}

/// The signed-in user. Favorites and playlists have no life outside of it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub favorites: Vec<Track>,
    pub playlists: Vec<Playlist>,
}

impl User {
    pub fn is_favorite(&self, track_id: &str) -> bool {
        self.favorites.iter().any(|t| t.id == track_id)
    }

    pub fn playlist(&self, playlist_id: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id == playlist_id)
    }

    /// First word of the display name, for the greeting
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }

    pub fn with_favorites(&self, favorites: Vec<Track>) -> Self {
        Self {
            favorites,
            ..self.clone()
        }
    }

    pub fn with_playlists(&self, playlists: Vec<Playlist>) -> Self {
        Self {
            playlists,
            ..self.clone()
        }
    }

    /// Swap in a single playlist returned by the server, keeping every other
    /// playlist at its position. Unknown ids are appended.
    pub fn with_playlist(&self, playlist: Playlist) -> Self {
        let mut playlists = self.playlists.clone();
        match playlists.iter_mut().find(|p| p.id == playlist.id) {
            Some(slot) => *slot = playlist,
            None => playlists.push(playlist),
        }
        self.with_playlists(playlists)
    }
}

// ============================================================================
// Backend wire shapes
// ============================================================================

#[derive(Clone, Debug, Deserialize)]
pub struct WirePlaylist {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tracks: Vec<StoredTrack>,
}

impl From<WirePlaylist> for Playlist {
    fn from(wire: WirePlaylist) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            description: wire.description,
            tracks: wire.tracks.into_iter().map(Track::from).collect(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct WireUser {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub favorites: Vec<StoredTrack>,
    #[serde(default)]
    pub playlists: Vec<WirePlaylist>,
}

impl From<WireUser> for User {
    fn from(wire: WireUser) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            email: wire.email,
            favorites: wire.favorites.into_iter().map(Track::from).collect(),
            playlists: wire.playlists.into_iter().map(Playlist::from).collect(),
        }
    }
}
