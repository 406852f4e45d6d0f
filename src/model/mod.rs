//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: UI state definitions (tabs, input modes, toasts)
//! - `track`: Track record and normalization of the two wire shapes
//! - `collection`: User aggregate with favorites and playlists
//! - `content`: Trending and search results
//! - `session`: Session store holding the current user snapshot
//! - `error`: Search/synchronization error taxonomy
//! - `search_client`: Search provider client
//! - `backend_client`: Favorites/playlists backend client
//! - `synchronizer`: Collection synchronizer
//! - `app_model`: Main application model with state management methods

mod types;
mod track;
mod collection;
mod content;
mod session;
mod error;
mod search_client;
mod backend_client;
mod synchronizer;
mod app_model;

pub use types::{InputMode, PlaylistPane, Tab, Toast, UiState, TOAST_DURATION};

pub use track::{ApiTrack, StoredTrack, Track};

pub use collection::{Playlist, User};

pub use content::ContentState;

pub use session::SessionStore;

pub use error::{SyncError, SyncResult};

pub use search_client::{SearchClient, DEFAULT_SEARCH_LIMIT};

pub use backend_client::BackendClient;

pub use synchronizer::CollectionSynchronizer;

pub use app_model::{clamp_index, AppModel, SelectedTrack};
