//! Result list rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::{ActiveSection, Endpoint, ListStatus, ViewSnapshot};
use super::utils::{render_scrollable_list, truncate_string, Palette};

const NO_RESULTS: &str = "No movies found.";

pub fn render_results(frame: &mut Frame, area: Rect, snapshot: &ViewSnapshot, palette: &Palette) {
    let results = &snapshot.results;
    let is_focused = snapshot.ui_state.active_section == ActiveSection::Results;

    let title = match results.query.endpoint() {
        Endpoint::Trending => " Trending This Week ".to_string(),
        Endpoint::Search => format!(" Results for \"{}\" ", results.query.search_text.trim()),
        Endpoint::Discover => " Discover ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding::horizontal(1))
        .border_style(palette.border(is_focused));

    let message = match &results.status {
        ListStatus::NotLoaded => Some(("Loading...", palette.muted())),
        ListStatus::Failed(message) => Some((message.as_str(), Style::default().fg(palette.error))),
        ListStatus::Empty => Some((NO_RESULTS, palette.muted())),
        ListStatus::Ready => None,
    };
    if let Some((message, style)) = message {
        let paragraph = Paragraph::new(message)
            .style(style)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let list_width = chunks[0].width.saturating_sub(10) as usize;
    let mut items: Vec<ListItem> = results
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == results.selected && is_focused {
                palette.selected()
            } else if i == results.selected {
                palette.text().add_modifier(Modifier::BOLD)
            } else {
                palette.text()
            };
            ListItem::new(format!("{:>3}  {}", i + 1, truncate_string(&item.label(), list_width)))
                .style(style)
        })
        .collect();

    if results.pagination.in_flight {
        items.push(ListItem::new("     Loading more...").style(palette.muted()));
    } else if !results.pagination.has_more_pages {
        items.push(ListItem::new("     End of results").style(palette.muted()));
    }

    render_scrollable_list(frame, chunks[0], items, results.selected, block);

    if let Some(item) = results.selected_item() {
        let lines = vec![
            Line::from(Span::styled(item.title.clone(), palette.heading())),
            Line::from(Span::styled(
                if item.release_year.is_empty() { "N/A".to_string() } else { item.release_year.clone() },
                palette.text(),
            )),
            Line::from(""),
            Line::from(Span::styled("Poster", palette.muted())),
            Line::from(Span::styled(snapshot.images.poster(Some(item.poster_path.as_str())), palette.text())),
            Line::from(""),
            Line::from(Span::styled("Enter to open details", palette.muted())),
        ];
        let preview = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Selected ")
                    .padding(Padding::horizontal(1)),
            );
        frame.render_widget(preview, chunks[1]);
    }
}
