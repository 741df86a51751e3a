//! Overlay rendering (detail, trailer, loader, error notification, help popup)

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::{
    trailer_embed_url, DetailFocus, DetailOverlay, DetailView, OverlayContent, TrailerTrigger,
    UiState, WatchProviders, NO_CAST, NO_CREW, NO_OVERVIEW, NO_RECOMMENDATIONS, NO_REVIEWS,
    NO_TRAILER,
};
use super::utils::{centered_fixed, centered_rect, Palette};

pub fn render_detail_overlay(frame: &mut Frame, overlay: &DetailOverlay, palette: &Palette) {
    let area = centered_rect(90, 90, frame.area());
    frame.render_widget(Clear, area);

    let close_style = if overlay.focus == DetailFocus::Close {
        palette.selected()
    } else {
        palette.muted()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .title(" Movie Details ")
        .title(Line::from(Span::styled(" [x] Close ", close_style)).right_aligned())
        .padding(Padding::horizontal(2))
        .style(Style::default().bg(palette.background));

    let lines = match &overlay.content {
        OverlayContent::Empty => vec![Line::from(Span::styled("Loading...", palette.muted()))],
        OverlayContent::Failed(message) => vec![Line::from(Span::styled(
            message.clone(),
            Style::default().fg(palette.error),
        ))],
        OverlayContent::Loaded(view) => detail_lines(view, overlay.focus, palette),
    };

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((overlay.scroll, 0))
        .block(block);
    frame.render_widget(paragraph, area);
}

fn section(title: &str, palette: &Palette) -> [Line<'static>; 2] {
    [
        Line::from(""),
        Line::from(Span::styled(title.to_string(), palette.heading())),
    ]
}

fn detail_lines(view: &DetailView, focus: DetailFocus, palette: &Palette) -> Vec<Line<'static>> {
    let header = &view.header;
    let mut lines = vec![
        Line::from(Span::styled(
            header.title.clone(),
            palette.heading().add_modifier(Modifier::UNDERLINED),
        )),
        Line::from(vec![
            Span::styled(header.release_year.clone(), palette.text()),
            Span::styled("  •  ", palette.muted()),
            Span::styled(header.runtime.clone(), palette.text()),
            Span::styled("  •  ", palette.muted()),
            Span::styled(header.genres.clone(), palette.text()),
            Span::styled("  •  User Score ", palette.muted()),
            Span::styled(header.score_label(), palette.text()),
        ]),
    ];
    if let Some(tagline) = &header.tagline {
        lines.push(Line::from(Span::styled(
            tagline.clone(),
            palette.muted().add_modifier(Modifier::ITALIC),
        )));
    }
    lines.push(Line::from(""));
    let overview = if header.overview.is_empty() { NO_OVERVIEW.to_string() } else { header.overview.clone() };
    lines.push(Line::from(Span::styled(overview, palette.text())));
    lines.push(Line::from(vec![
        Span::styled("Poster: ", palette.muted()),
        Span::styled(header.poster_url.clone(), palette.text()),
    ]));
    if let Some(backdrop) = &header.backdrop_url {
        lines.push(Line::from(vec![
            Span::styled("Backdrop: ", palette.muted()),
            Span::styled(backdrop.clone(), palette.text()),
        ]));
    }

    lines.push(Line::from(""));
    match &view.trailer {
        TrailerTrigger::Available { .. } => {
            let style = if focus == DetailFocus::Trailer { palette.selected() } else { palette.text() };
            lines.push(Line::from(Span::styled("[ ▶ Play Trailer ]", style)));
        }
        TrailerTrigger::Unavailable => {
            lines.push(Line::from(Span::styled(NO_TRAILER, palette.muted())));
        }
    }

    lines.extend(section("Crew", palette));
    if view.crew.is_empty() {
        lines.push(Line::from(Span::styled(NO_CREW, palette.muted())));
    }
    if let Some(director) = &view.crew.director {
        lines.push(Line::from(vec![
            Span::styled("Director: ", palette.muted()),
            Span::styled(director.clone(), palette.text()),
        ]));
    }
    if let Some(writers) = view.crew.writers_line() {
        lines.push(Line::from(vec![
            Span::styled("Writers: ", palette.muted()),
            Span::styled(writers, palette.text()),
        ]));
    }

    lines.extend(section("Top Billed Cast", palette));
    if view.cast.is_empty() {
        lines.push(Line::from(Span::styled(NO_CAST, palette.muted())));
    }
    for member in &view.cast {
        lines.push(Line::from(vec![
            Span::styled(member.name.clone(), palette.text()),
            Span::styled(format!(" as {}", member.character), palette.muted()),
        ]));
    }

    lines.extend(section("Where to Watch", palette));
    match &view.providers {
        WatchProviders::Groups { link, groups } if !groups.is_empty() => {
            for group in groups {
                let names: Vec<&str> = group.providers.iter().map(|p| p.name.as_str()).collect();
                lines.push(Line::from(vec![
                    Span::styled(format!("{}: ", group.title), palette.muted()),
                    Span::styled(names.join(", "), palette.text()),
                ]));
            }
            if let Some(link) = link {
                lines.push(Line::from(Span::styled(link.clone(), palette.muted())));
            }
        }
        providers => {
            if let Some(message) = providers.empty_message() {
                lines.push(Line::from(Span::styled(message, palette.muted())));
            }
        }
    }

    lines.extend(section("More Like This", palette));
    if view.recommendations.is_empty() {
        lines.push(Line::from(Span::styled(NO_RECOMMENDATIONS, palette.muted())));
    }
    for (i, recommendation) in view.recommendations.iter().enumerate() {
        let style = if focus == DetailFocus::Recommendation(i) { palette.selected() } else { palette.text() };
        lines.push(Line::from(Span::styled(format!("› {}", recommendation.title), style)));
    }

    lines.extend(section("User Reviews", palette));
    if view.reviews.is_empty() {
        lines.push(Line::from(Span::styled(NO_REVIEWS, palette.muted())));
    }
    for review in &view.reviews {
        let mut byline = vec![Span::styled(
            review.author.clone(),
            palette.text().add_modifier(Modifier::BOLD),
        )];
        if let Some(date) = &review.date {
            byline.push(Span::styled(format!("  {}", date), palette.muted()));
        }
        lines.push(Line::from(byline));
        lines.push(Line::from(Span::styled(review.content.clone(), palette.text())));
        lines.push(Line::from(""));
    }

    lines
}

pub fn render_trailer_overlay(frame: &mut Frame, overlay: &DetailOverlay, palette: &Palette) {
    let Some(trailer) = &overlay.trailer else {
        return;
    };
    let area = centered_fixed(72, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(trailer.name.clone(), palette.heading())),
        Line::from(""),
        Line::from(Span::styled(trailer_embed_url(&trailer.video_key), palette.text())),
    ];
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent))
                .title(" Trailer ")
                .title(Line::from(Span::styled(" [x] Close ", palette.muted())).right_aligned())
                .padding(Padding::horizontal(1))
                .style(Style::default().bg(palette.background)),
        );
    frame.render_widget(widget, area);
}

pub fn render_loader(frame: &mut Frame, palette: &Palette) {
    let area = frame.area();
    let loader_area = Rect {
        x: area.width.saturating_sub(14),
        y: area.height.saturating_sub(1),
        width: 14.min(area.width),
        height: 1.min(area.height),
    };
    frame.render_widget(Clear, loader_area);
    frame.render_widget(
        Paragraph::new(" ⟳ Loading... ").style(Style::default().fg(palette.heading)),
        loader_area,
    );
}

pub fn render_error_notification(frame: &mut Frame, ui_state: &UiState, palette: &Palette) {
    if let Some(ref error_msg) = ui_state.error_message {
        let area = frame.area();

        // Fixed width popup (responsive to screen size)
        let popup_width = 52.min(area.width.saturating_sub(4));
        let inner_width = popup_width.saturating_sub(4).max(1) as usize; // account for borders

        // Calculate how many lines the error message will take when wrapped
        let error_line_count = error_msg.chars().count().div_ceil(inner_width) as u16;

        // Height: top border (1) + error lines + bottom border (1)
        let popup_height = 2 + error_line_count.max(1);
        let popup_area = centered_fixed(popup_width, popup_height, area);

        // Clear the area behind the popup first
        frame.render_widget(Clear, popup_area);

        let error_widget = Paragraph::new(error_msg.to_string())
            .style(Style::default().fg(palette.error))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.error))
                    .title(" Error (Esc to dismiss) ")
                    .title_style(Style::default().fg(palette.error).add_modifier(Modifier::BOLD))
                    .style(Style::default().bg(palette.background)),
            );

        frame.render_widget(error_widget, popup_area);
    }
}

pub fn render_help_popup(frame: &mut Frame, palette: &Palette) {
    let area = frame.area();

    // Define keybindings organized by category
    let keybindings = vec![
        ("", "── Browsing ──"),
        ("Tab / Shift+Tab", "Cycle sections"),
        ("↑ / ↓ / PgUp / PgDn", "Move selection"),
        ("Enter", "Open details"),
        ("/", "Focus search"),
        ("← / →", "Change genre or language"),
        ("Home / Ctrl+H", "Reset to trending"),
        ("", ""),
        ("", "── Details ──"),
        ("Tab / Shift+Tab", "Move between controls"),
        ("Enter", "Activate control"),
        ("↑ / ↓", "Scroll"),
        ("Esc / X", "Close"),
        ("", ""),
        ("", "── General ──"),
        ("[ / Alt+←", "Back"),
        ("] / Alt+→", "Forward"),
        ("T", "Toggle theme"),
        ("H", "Toggle this help"),
        ("Q", "Quit"),
    ];

    let popup_width = 62;
    let popup_height = keybindings.len() as u16 + 2;
    let popup_area = centered_fixed(popup_width, popup_height, area);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    // Create help text lines
    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(format!("{:^58}", desc), palette.heading()))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>22}", key),
                        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), palette.text()),
                ])
            }
        })
        .collect();

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent))
            .title(" Keybindings ")
            .style(Style::default().bg(palette.background)),
    );

    frame.render_widget(help, popup_area);
}
