//! Track record and normalization of the two incoming wire shapes
//!
//! The search provider returns Spotify-style track objects while the backend
//! stores a flat camelCase record. Both are converted into [`Track`] at the
//! boundary so nothing past the clients ever inspects a raw shape.

use serde::{Deserialize, Serialize};

const UNKNOWN_ARTIST: &str = "Unknown";

/// A single playable song with optional preview audio
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub album_image: String,
    pub preview_url: Option<String>,
    /// Only known for tracks that came from the search provider
    pub release_date: Option<String>,
}

impl Track {
    pub fn has_preview(&self) -> bool {
        self.preview_url.is_some()
    }

    /// Convert into the flat record the backend stores
    pub fn to_stored(&self) -> StoredTrack {
        StoredTrack {
            track_id: self.id.clone(),
            track_name: self.name.clone(),
            artist_name: self.artist.clone(),
            album_image: self.album_image.clone(),
            preview_url: self.preview_url.clone().unwrap_or_default(),
        }
    }
}

// ============================================================================
// Search provider shape
// ============================================================================

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApiArtist {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApiImage {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApiAlbum {
    #[serde(default)]
    pub images: Vec<ApiImage>,
    #[serde(default)]
    pub artists: Vec<ApiArtist>,
    #[serde(default)]
    pub release_date: Option<String>,
}

/// Track object as returned by the search endpoint
#[derive(Clone, Debug, Deserialize)]
pub struct ApiTrack {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ApiArtist>,
    #[serde(default)]
    pub album: Option<ApiAlbum>,
    #[serde(default)]
    pub preview_url: Option<String>,
}

impl From<ApiTrack> for Track {
    fn from(raw: ApiTrack) -> Self {
        let album = raw.album.unwrap_or_default();

        let artist = raw
            .artists
            .iter()
            .chain(album.artists.iter())
            .find_map(|a| a.name.clone().filter(|n| !n.is_empty()))
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

        let album_image = album
            .images
            .into_iter()
            .next()
            .and_then(|img| img.url)
            .unwrap_or_default();

        Self {
            id: raw.id,
            name: raw.name,
            artist,
            album_image,
            preview_url: raw.preview_url.filter(|url| !url.is_empty()),
            release_date: album.release_date,
        }
    }
}

// ============================================================================
// Backend shape
// ============================================================================

/// Track record as stored by the backend in favorites and playlists
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoredTrack {
    pub track_id: String,
    #[serde(default)]
    pub track_name: String,
    #[serde(default)]
    pub artist_name: String,
    #[serde(default)]
    pub album_image: String,
    #[serde(default)]
    pub preview_url: String,
}

impl From<StoredTrack> for Track {
    fn from(stored: StoredTrack) -> Self {
        let artist = if stored.artist_name.is_empty() {
            UNKNOWN_ARTIST.to_string()
        } else {
            stored.artist_name
        };

        Self {
            id: stored.track_id,
            name: stored.track_name,
            artist,
            album_image: stored.album_image,
            preview_url: Some(stored.preview_url).filter(|url| !url.is_empty()),
            release_date: None,
        }
    }
}
