//! Main content area rendering (track lists and the playlists tab)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, ListItem, Padding, Paragraph},
    Frame,
};

use crate::model::{clamp_index, ContentState, InputMode, PlaylistPane, Tab, Track, UiState, User};
use super::utils::{border_style, render_scrollable_list, render_track_items, truncate_string};

pub fn render_main_content(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    content_state: &ContentState,
    user: Option<&User>,
) {
    let is_focused = ui_state.input_mode == InputMode::Normal;
    let playing = ui_state.currently_playing.as_deref();

    match ui_state.active_tab {
        Tab::Trending => {
            if content_state.trending_loading {
                render_message(frame, area, " Trending ", "Loading trending songs...", Color::Yellow);
            } else if content_state.trending.is_empty() {
                render_message(frame, area, " Trending ", "No trending songs. Press r to retry.", Color::DarkGray);
            } else {
                render_track_list(
                    frame,
                    area,
                    " Trending Now ",
                    &content_state.trending,
                    ui_state.trending_selected,
                    is_focused,
                    playing,
                    user,
                );
            }
        }
        Tab::Search => {
            let title = if ui_state.searched_keyword.is_empty() {
                " Search ".to_string()
            } else {
                format!(" Results for \"{}\" ", ui_state.searched_keyword)
            };
            if content_state.search_loading {
                render_message(frame, area, &title, "Searching...", Color::Yellow);
            } else if ui_state.searched_keyword.is_empty() {
                render_message(frame, area, &title, "Press / and type a song or artist, then Enter", Color::DarkGray);
            } else if content_state.search_results.is_empty() {
                render_message(frame, area, &title, "No songs found", Color::DarkGray);
            } else {
                render_track_list(
                    frame,
                    area,
                    &title,
                    &content_state.search_results,
                    ui_state.search_selected,
                    is_focused,
                    playing,
                    user,
                );
            }
        }
        Tab::Favorites => match user {
            Some(user) if !user.favorites.is_empty() => {
                render_track_list(
                    frame,
                    area,
                    " Favorites ",
                    &user.favorites,
                    ui_state.favorites_selected,
                    is_focused,
                    playing,
                    Some(user),
                );
            }
            _ => render_message(frame, area, " Favorites ", "No favorites yet. Press f on a song to add it.", Color::DarkGray),
        },
        Tab::Playlists => render_playlists_tab(frame, area, ui_state, user, is_focused),
    }
}

fn render_message(frame: &mut Frame, area: Rect, title: &str, message: &str, color: Color) {
    let paragraph = Paragraph::new(message.to_string())
        .style(Style::default().fg(color))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(paragraph, area);
}

#[allow(clippy::too_many_arguments)]
fn render_track_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    tracks: &[Track],
    selected_index: usize,
    is_focused: bool,
    currently_playing: Option<&str>,
    user: Option<&User>,
) {
    let content_width = area.width.saturating_sub(4) as usize;
    let items = render_track_items(tracks, selected_index, is_focused, currently_playing, user, content_width);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .padding(Padding::horizontal(1))
        .border_style(border_style(is_focused));

    // +1 for header
    render_scrollable_list(frame, area, items, clamp_index(selected_index, tracks.len()) + 1, block);
}

fn render_playlists_tab(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    user: Option<&User>,
    is_focused: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    let playlists = user.map(|u| u.playlists.as_slice()).unwrap_or_default();
    if playlists.is_empty() {
        render_message(frame, chunks[0], " Playlists ", "No playlists. Press n to create one.", Color::DarkGray);
        render_message(frame, chunks[1], " Tracks ", "", Color::DarkGray);
        return;
    }

    let list_focused = is_focused && ui_state.playlist_pane == PlaylistPane::Playlists;
    let tracks_focused = is_focused && ui_state.playlist_pane == PlaylistPane::Tracks;
    let selected = clamp_index(ui_state.playlist_selected, playlists.len());
    let name_width = (chunks[0].width.saturating_sub(12)) as usize;

    let items: Vec<ListItem> = playlists
        .iter()
        .enumerate()
        .map(|(i, playlist)| {
            let style = if i == selected && list_focused {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if i == selected {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let count = playlist.tracks.len();
            let label = format!(
                "{} {:>3} {}",
                truncate_string(&playlist.name, name_width),
                count,
                if count == 1 { "song " } else { "songs" }
            );
            ListItem::new(label).style(style)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Playlists ")
        .padding(Padding::horizontal(1))
        .border_style(border_style(list_focused));
    render_scrollable_list(frame, chunks[0], items, selected, block);

    let playlist = &playlists[selected];
    let title = format!(" {} ", playlist.name);
    if playlist.tracks.is_empty() {
        render_message(frame, chunks[1], &title, "This playlist is empty. Press a on a song to add it.", Color::DarkGray);
    } else {
        render_track_list(
            frame,
            chunks[1],
            &title,
            &playlist.tracks,
            ui_state.playlist_track_selected,
            tracks_focused,
            ui_state.currently_playing.as_deref(),
            user,
        );
    }
}
