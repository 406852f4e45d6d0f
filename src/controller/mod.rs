//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! dispatches intents to the model's clients, and turns their results into
//! state changes and toasts. It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `navigation`: Trending and keyword search
//! - `collection`: Favorites and playlist intents
//! - `playback`: Preview playback
//! - `player_events`: Preview player event listener

mod input;
mod navigation;
mod collection;
mod playback;
mod player_events;

use std::future::Future;

use crate::audio::PreviewPlayer;
use crate::model::{AppModel, SyncError};

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: AppModel,
    pub(crate) player: PreviewPlayer,
    search_limit: usize,
}

impl AppController {
    pub fn new(model: AppModel, player: PreviewPlayer, search_limit: usize) -> Self {
        Self {
            model,
            player,
            search_limit,
        }
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    /// Run an intent on its own task so the render loop keeps drawing
    pub(crate) fn spawn_intent<F, Fut>(&self, intent: F)
    where
        F: FnOnce(AppController) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        tokio::spawn(intent(self.clone()));
    }

    /// Toast text for a failed intent. `fallback` describes the failed action.
    pub(crate) fn format_error(error: &SyncError, fallback: &str) -> String {
        match error {
            SyncError::AlreadyExists(message) | SyncError::Validation(message) => message.clone(),
            SyncError::Unauthenticated => "Session expired. Press O to sign in again.".to_string(),
            SyncError::NotFound(_) => format!("{}: it no longer exists", fallback),
            SyncError::Network(_) => fallback.to_string(),
        }
    }
}
