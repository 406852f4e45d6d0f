//! Overlay rendering (toast, new-playlist form, delete confirmation, help popup)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::{InputMode, UiState};

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

/// Toast in the bottom-right corner, above the now-playing bar
pub fn render_toast(frame: &mut Frame, ui_state: &UiState) {
    let Some(toast) = &ui_state.toast else { return };
    let area = frame.area();

    let width = (toast.message.chars().count() as u16 + 4).clamp(20, 50).min(area.width);
    let inner_width = width.saturating_sub(2).max(1);
    let lines = (toast.message.chars().count() as u16).div_ceil(inner_width).max(1);
    let height = (lines + 2).min(area.height);

    let toast_area = Rect {
        x: area.width.saturating_sub(width + 1),
        y: area.height.saturating_sub(height + 3),
        width,
        height,
    };

    frame.render_widget(Clear, toast_area);
    let widget = Paragraph::new(toast.message.clone())
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(widget, toast_area);
}

pub fn render_new_playlist_form(frame: &mut Frame, ui_state: &UiState) {
    let popup_area = centered(frame.area(), 50, 5);
    frame.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from(Span::styled(
            format!("{}▏", ui_state.new_playlist_name),
            Style::default().fg(Color::Green),
        )),
        Line::from(Span::styled(
            "Enter to create, Esc to cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" New Playlist ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(form, popup_area);
}

pub fn render_confirm_delete(frame: &mut Frame, ui_state: &UiState) {
    let InputMode::ConfirmDelete { name, .. } = &ui_state.input_mode else { return };
    let popup_area = centered(frame.area(), 50, 5);
    frame.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from(format!("Delete \"{}\"?", name)),
        Line::from(Span::styled("y to delete, n to keep", Style::default().fg(Color::DarkGray))),
    ];

    let dialog = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Delete Playlist ")
                .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(dialog, popup_area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let keybindings = [
        ("", "── Navigation ──"),
        ("Tab / Shift+Tab", "Cycle tabs"),
        ("1 - 4", "Jump to tab"),
        ("↑ / ↓  k / j", "Move selection"),
        ("← / →", "Switch playlist pane"),
        ("/", "Search songs"),
        ("r", "Reload trending / library"),
        ("Shift+R", "Reload everything"),
        ("", ""),
        ("", "── Songs ──"),
        ("Enter / Space", "Play / stop preview"),
        ("F", "Favorite / unfavorite"),
        ("A", "Add to selected playlist"),
        ("X / Delete", "Remove from playlist"),
        ("", ""),
        ("", "── Playlists ──"),
        ("N", "New playlist"),
        ("D", "Delete playlist"),
        ("", ""),
        ("", "── General ──"),
        ("?", "Toggle this help"),
        ("O", "Sign out"),
        ("Q", "Quit"),
    ];

    let popup_area = centered(frame.area(), 62, keybindings.len() as u16 + 2);
    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (? or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}
