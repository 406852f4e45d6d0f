//! Layout rendering (top bar, tabs bar)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Padding, Paragraph, Tabs},
    Frame,
};

use crate::model::{ContentState, InputMode, Tab, UiState, User};

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState, user: Option<&User>) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Search input
            Constraint::Length(25), // Greeting
        ])
        .split(area);

    let is_typing = ui_state.input_mode == InputMode::Search;
    let search_style = if is_typing {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };

    let search_text = if ui_state.keyword.is_empty() && !is_typing {
        "Press / to search songs...".to_string()
    } else if is_typing {
        format!("{}▏", ui_state.keyword)
    } else {
        ui_state.keyword.clone()
    };

    let search = Paragraph::new(search_text)
        .style(search_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .padding(Padding::horizontal(1))
                .border_style(super::utils::border_style(is_typing)),
        );
    frame.render_widget(search, chunks[0]);

    let greeting = match user {
        Some(user) if !user.first_name().is_empty() => format!("👋 Hi, {}", user.first_name()),
        Some(_) => "👋 Hi there".to_string(),
        None => "Not signed in".to_string(),
    };
    let greeting = Paragraph::new(greeting)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL).title(" Melody "));
    frame.render_widget(greeting, chunks[1]);
}

pub fn render_tabs(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    content_state: &ContentState,
    user: Option<&User>,
) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let label = match tab {
                Tab::Trending => format!("{} Trending", i + 1),
                Tab::Search => format!("{} Search ({})", i + 1, content_state.search_results.len()),
                Tab::Favorites => {
                    format!("{} Favorites ({})", i + 1, user.map_or(0, |u| u.favorites.len()))
                }
                Tab::Playlists => {
                    format!("{} Playlists ({})", i + 1, user.map_or(0, |u| u.playlists.len()))
                }
            };
            Line::from(label)
        })
        .collect();

    let selected = Tab::ALL
        .iter()
        .position(|tab| *tab == ui_state.active_tab)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .divider("│");

    frame.render_widget(tabs, area);
}
