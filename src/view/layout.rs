//! Layout rendering (top bar, status line)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::model::{ActiveSection, ViewSnapshot};
use super::utils::{truncate_string, Palette};

pub fn render_top_bar(frame: &mut Frame, area: Rect, snapshot: &ViewSnapshot, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Search input
            Constraint::Length(24), // Genre filter
            Constraint::Length(22), // Language filter
            Constraint::Length(11), // Theme
        ])
        .split(area);

    let ui_state = &snapshot.ui_state;
    let section = ui_state.active_section;

    let search_focused = section == ActiveSection::Search;
    let search = if ui_state.search_input.is_empty() && !search_focused {
        Paragraph::new("Search for a movie...").style(palette.muted())
    } else if search_focused {
        Paragraph::new(format!("{}_", ui_state.search_input)).style(palette.text())
    } else {
        Paragraph::new(ui_state.search_input.as_str()).style(palette.text())
    };
    frame.render_widget(
        search.block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .padding(Padding::horizontal(1))
                .border_style(palette.border(search_focused)),
        ),
        chunks[0],
    );

    let filters = &snapshot.filters;
    render_selector(
        frame,
        chunks[1],
        " Genre ",
        &filters.genre_label(),
        filters.genres.is_enabled(),
        section == ActiveSection::Genres,
        palette,
    );
    render_selector(
        frame,
        chunks[2],
        " Language ",
        &filters.language_label(),
        filters.languages.is_enabled(),
        section == ActiveSection::Languages,
        palette,
    );

    let theme = Paragraph::new(snapshot.theme.as_str())
        .style(palette.text())
        .block(Block::default().borders(Borders::ALL).title(" Theme "));
    frame.render_widget(theme, chunks[3]);
}

fn render_selector(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    label: &str,
    enabled: bool,
    focused: bool,
    palette: &Palette,
) {
    let width = area.width.saturating_sub(6) as usize;
    let text = if enabled && focused {
        format!("◀ {} ▶", truncate_string(label, width.saturating_sub(4)))
    } else {
        truncate_string(label, width)
    };
    let style = if enabled { palette.text() } else { palette.muted() };

    let selector = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title.to_string())
            .padding(Padding::horizontal(1))
            .border_style(palette.border(focused)),
    );
    frame.render_widget(selector, area);
}

/// Current location on the left, key hints on the right
pub fn render_status_line(frame: &mut Frame, area: Rect, snapshot: &ViewSnapshot, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(44)])
        .split(area);

    let location = Line::from(vec![
        Span::styled(" ", palette.muted()),
        Span::styled(snapshot.location.clone(), palette.text()),
    ]);
    frame.render_widget(Paragraph::new(location), chunks[0]);

    let hints = Paragraph::new("Tab sections · [ ] history · t theme · h help ")
        .style(palette.muted())
        .alignment(ratatui::layout::Alignment::Right);
    frame.render_widget(hints, chunks[1]);
}
