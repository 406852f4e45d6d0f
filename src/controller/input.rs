//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{InputMode, PlaylistPane, SelectedTrack, Tab};
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        // Quit works even while typing
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            self.model.set_should_quit(true).await;
            return Ok(());
        }

        // Handle help popup
        if self.model.is_help_popup_open().await {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Char('H')
            ) {
                self.model.hide_help_popup().await;
            }
            return Ok(());
        }

        match self.model.input_mode().await {
            InputMode::Search => self.handle_search_input(key).await,
            InputMode::NewPlaylist => self.handle_new_playlist_input(key).await,
            InputMode::ConfirmDelete { playlist_id, .. } => {
                self.handle_confirm_delete(key, playlist_id).await
            }
            InputMode::Normal => self.handle_normal_mode(key).await,
        }

        Ok(())
    }

    async fn handle_search_input(&self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.spawn_intent(|controller| async move { controller.perform_search().await });
            }
            KeyCode::Esc => self.model.set_input_mode(InputMode::Normal).await,
            KeyCode::Backspace => self.model.backspace_input().await,
            KeyCode::Char(c) => self.model.append_input(c).await,
            _ => {}
        }
    }

    async fn handle_new_playlist_input(&self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.spawn_intent(|controller| async move { controller.create_playlist().await });
            }
            KeyCode::Esc => self.model.close_create_playlist().await,
            KeyCode::Backspace => self.model.backspace_input().await,
            KeyCode::Char(c) => self.model.append_input(c).await,
            _ => {}
        }
    }

    async fn handle_confirm_delete(&self, key: KeyEvent, playlist_id: String) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.model.set_input_mode(InputMode::Normal).await;
                self.spawn_intent(|controller| async move {
                    controller.delete_playlist(&playlist_id).await
                });
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.model.set_input_mode(InputMode::Normal).await;
            }
            _ => {}
        }
    }

    async fn handle_normal_mode(&self, key: KeyEvent) {
        let ui_state = self.model.get_ui_state().await;

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.model.set_should_quit(true).await;
            }
            KeyCode::Char('o') | KeyCode::Char('O') => {
                self.stop_preview().await;
                self.model.request_logout().await;
            }
            KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Char('H') => {
                self.model.show_help_popup().await;
            }
            KeyCode::Char('/') => {
                self.model.set_input_mode(InputMode::Search).await;
            }
            KeyCode::Tab => self.model.cycle_tab_forward().await,
            KeyCode::BackTab => self.model.cycle_tab_backward().await,
            KeyCode::Char(c @ '1'..='4') => {
                if let Some(tab) = Tab::from_digit(c) {
                    self.model.set_active_tab(tab).await;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.model.move_selection_up().await,
            KeyCode::Down | KeyCode::Char('j') => self.model.move_selection_down().await,
            KeyCode::Right | KeyCode::Char('l') => self.model.focus_playlist_tracks(true).await,
            KeyCode::Left | KeyCode::Esc => self.model.focus_playlist_tracks(false).await,
            KeyCode::Char('R') => {
                self.spawn_intent(|controller| async move { controller.reload_all().await });
            }
            KeyCode::Char('r') => {
                if ui_state.active_tab == Tab::Trending {
                    self.spawn_intent(|controller| async move { controller.load_trending().await });
                } else {
                    self.spawn_intent(|controller| async move { controller.refresh_session().await });
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if ui_state.active_tab == Tab::Playlists
                    && ui_state.playlist_pane == PlaylistPane::Playlists
                {
                    self.model.focus_playlist_tracks(true).await;
                } else if let Some(selected) = self.model.selected_track().await {
                    self.spawn_intent(|controller| async move {
                        controller.toggle_preview(selected.track).await
                    });
                }
            }
            KeyCode::Char('f') | KeyCode::Char('F') => {
                if let Some(selected) = self.model.selected_track().await {
                    self.spawn_intent(|controller| async move {
                        controller.toggle_favorite(selected.track).await
                    });
                }
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                if let Some(selected) = self.model.selected_track().await {
                    // Adding targets a playlist, so the source must be outside one
                    if selected.playlist_id.is_some() {
                        self.model.show_toast("Select a track outside a playlist to add it").await;
                    } else {
                        self.spawn_intent(|controller| async move {
                            controller.add_to_playlist(selected.track).await
                        });
                    }
                }
            }
            KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => {
                let Some(SelectedTrack { track, playlist_id }) = self.model.selected_track().await else {
                    return;
                };
                match (ui_state.active_tab, playlist_id) {
                    (Tab::Playlists, Some(playlist_id)) => {
                        self.spawn_intent(|controller| async move {
                            controller.remove_from_playlist(&playlist_id, &track.id).await
                        });
                    }
                    (Tab::Favorites, _) => {
                        self.spawn_intent(|controller| async move {
                            controller.remove_from_favorites(&track.id).await
                        });
                    }
                    _ => {}
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.model.open_create_playlist().await;
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                if ui_state.active_tab == Tab::Playlists {
                    self.request_delete_playlist().await;
                }
            }
            _ => {}
        }
    }
}
