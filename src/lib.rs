//! Terminal music discovery client
//!
//! Browse trending songs, search the catalog, play previews and keep
//! favorites and playlists in sync with the Melody backend.

pub mod audio;
pub mod auth;
pub mod config;
pub mod controller;
pub mod logging;
pub mod model;
pub mod view;
