//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists)
//! - `layout`: Top bar and tabs bar
//! - `content`: Main content area rendering
//! - `now_playing`: Now-playing bar
//! - `overlays`: Toast, forms and the help popup

mod utils;
mod layout;
mod content;
mod now_playing;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{ContentState, InputMode, UiState, User};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, ui_state: &UiState, content_state: &ContentState, user: Option<&User>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar + greeting
                Constraint::Length(3), // Tabs
                Constraint::Min(0),    // Main content
                Constraint::Length(3), // Now playing
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], ui_state, user);
        layout::render_tabs(frame, chunks[1], ui_state, content_state, user);
        content::render_main_content(frame, chunks[2], ui_state, content_state, user);
        now_playing::render_now_playing(frame, chunks[3], ui_state, content_state, user);

        match ui_state.input_mode {
            InputMode::NewPlaylist => overlays::render_new_playlist_form(frame, ui_state),
            InputMode::ConfirmDelete { .. } => overlays::render_confirm_delete(frame, ui_state),
            _ => {}
        }

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }

        overlays::render_toast(frame, ui_state);
    }
}
