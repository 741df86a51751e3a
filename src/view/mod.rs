//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared helpers (palette, centred rects, scrollable lists)
//! - `layout`: Top bar and status line
//! - `content`: Result list
//! - `overlays`: Detail and trailer overlays, loader, error, help

mod utils;
mod layout;
mod content;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Frame,
};

use crate::model::ViewSnapshot;
use utils::Palette;

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, snapshot: &ViewSnapshot) {
        let palette = Palette::for_theme(snapshot.theme);
        frame.render_widget(
            Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
            frame.area(),
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search + filters + theme
                Constraint::Min(0),    // Result list
                Constraint::Length(1), // Location and hints
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], snapshot, &palette);
        content::render_results(frame, chunks[1], snapshot, &palette);
        layout::render_status_line(frame, chunks[2], snapshot, &palette);

        // Detail overlay, with the trailer stacked above it
        if snapshot.overlay.is_active() {
            overlays::render_detail_overlay(frame, &snapshot.overlay, &palette);
            if snapshot.overlay.trailer_open() {
                overlays::render_trailer_overlay(frame, &snapshot.overlay, &palette);
            }
        }

        if snapshot.is_busy() {
            overlays::render_loader(frame, &palette);
        }

        // Error notification overlay (if there's an error)
        if snapshot.ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, &snapshot.ui_state, &palette);
        }

        // Help popup overlay (if open)
        if snapshot.ui_state.show_help_popup {
            overlays::render_help_popup(frame, &palette);
        }
    }
}
