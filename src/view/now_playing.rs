//! Now-playing bar

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::{ContentState, Track, UiState, User};

fn lookup<'a>(track_id: &str, content_state: &'a ContentState, user: Option<&'a User>) -> Option<&'a Track> {
    content_state.find_track(track_id).or_else(|| {
        let user = user?;
        user.favorites
            .iter()
            .chain(user.playlists.iter().flat_map(|p| p.tracks.iter()))
            .find(|t| t.id == track_id)
    })
}

pub fn render_now_playing(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    content_state: &ContentState,
    user: Option<&User>,
) {
    let playing = ui_state
        .currently_playing
        .as_deref()
        .and_then(|id| lookup(id, content_state, user));

    let (status_text, style) = match playing {
        Some(track) => {
            let year = track
                .release_date
                .as_deref()
                .and_then(|date| date.get(..4))
                .map(|year| format!(" ({})", year))
                .unwrap_or_default();
            (
                format!(" ▶ {} | {}{}", track.name, track.artist, year),
                Style::default().fg(Color::Green),
            )
        }
        None => (" No preview playing".to_string(), Style::default().fg(Color::DarkGray)),
    };

    let controls_info = " Enter play/stop | f favorite | a add to playlist | ? help ";

    let bar = Paragraph::new(status_text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Now Playing ")
            .title_bottom(Line::from(controls_info).right_aligned()),
    );

    frame.render_widget(bar, area);
}
