//! Key event handling

use std::future::Future;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{ActiveSection, DetailFocus, FocusTarget};
use super::AppController;

/// Rows moved by PageUp/PageDown in the result list
const PAGE_ROWS: usize = 10;

impl AppController {
    /// Runs a controller operation in the background so the UI loop keeps drawing
    fn spawn<F, Fut>(&self, operation: F)
    where
        F: FnOnce(AppController) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        tokio::spawn(operation(self.clone()));
    }

    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = &self.model;
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        // Handle error message first (blocks all other interactions)
        if model.has_error().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                model.clear_error().await;
            }
            return Ok(());
        }

        // Handle help popup
        if model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('?')) {
                model.hide_help_popup().await;
            }
            return Ok(());
        }

        // Trailer overlay sits above everything else
        if model.overlay.lock().await.trailer_open() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('x') | KeyCode::Char('q')) {
                self.close_trailer().await;
            }
            return Ok(());
        }

        let ui_state = model.get_ui_state().await;
        let overlay_active = model.overlay.lock().await.is_active();
        let typing = ui_state.active_section == ActiveSection::Search && !overlay_active;

        // Location history
        match key.code {
            KeyCode::Left if alt => {
                self.spawn(|c| async move { c.navigate_back().await });
                return Ok(());
            }
            KeyCode::Right if alt => {
                self.spawn(|c| async move { c.navigate_forward().await });
                return Ok(());
            }
            KeyCode::Char('[') if !typing => {
                self.spawn(|c| async move { c.navigate_back().await });
                return Ok(());
            }
            KeyCode::Char(']') if !typing => {
                self.spawn(|c| async move { c.navigate_forward().await });
                return Ok(());
            }
            _ => {}
        }

        // Detail overlay
        if overlay_active {
            match key.code {
                KeyCode::Esc | KeyCode::Char('x') => {
                    self.spawn(|c| async move { c.close_detail().await });
                }
                KeyCode::Tab => model.overlay.lock().await.focus_next(),
                KeyCode::BackTab => model.overlay.lock().await.focus_prev(),
                KeyCode::Up => model.overlay.lock().await.scroll_up(),
                KeyCode::Down => model.overlay.lock().await.scroll_down(),
                KeyCode::Enter => {
                    let focus = model.overlay.lock().await.focus;
                    match focus {
                        DetailFocus::Close => {
                            self.spawn(|c| async move { c.close_detail().await });
                        }
                        DetailFocus::Trailer => self.open_trailer().await,
                        DetailFocus::Recommendation(_) => {
                            self.spawn(|c| async move { c.open_focused_recommendation().await });
                        }
                    }
                }
                KeyCode::Char('q') => model.set_should_quit(true).await,
                _ => {}
            }
            return Ok(());
        }

        // Handle search input when in search section
        if ui_state.active_section == ActiveSection::Search {
            match key.code {
                KeyCode::Char('q') if ctrl => {
                    model.set_should_quit(true).await;
                    return Ok(());
                }
                KeyCode::Char('h') if ctrl => {
                    self.spawn(|c| async move { c.go_home().await });
                    return Ok(());
                }
                KeyCode::Char(c) if !ctrl => {
                    model.append_to_search(c).await;
                    self.schedule_search().await;
                    return Ok(());
                }
                KeyCode::Backspace => {
                    model.backspace_search().await;
                    self.schedule_search().await;
                    return Ok(());
                }
                KeyCode::Esc => {
                    model.clear_search_input().await;
                    self.schedule_search().await;
                    return Ok(());
                }
                KeyCode::Enter => {
                    self.spawn(|c| async move { c.submit_search().await });
                    model.set_active_section(ActiveSection::Results).await;
                    return Ok(());
                }
                _ => {}
            }
        }

        // Filter selectors
        if matches!(ui_state.active_section, ActiveSection::Genres | ActiveSection::Languages) {
            let forward = match key.code {
                KeyCode::Right | KeyCode::Down | KeyCode::Enter => Some(true),
                KeyCode::Left | KeyCode::Up => Some(false),
                _ => None,
            };
            if let Some(forward) = forward {
                if ui_state.active_section == ActiveSection::Genres {
                    self.spawn(move |c| async move { c.cycle_genre(forward).await });
                } else {
                    self.spawn(move |c| async move { c.cycle_language(forward).await });
                }
                return Ok(());
            }
        }

        // Result list navigation
        if ui_state.active_section == ActiveSection::Results {
            match key.code {
                KeyCode::Up => {
                    model.results_move_up(1).await;
                    return Ok(());
                }
                KeyCode::PageUp => {
                    model.results_move_up(PAGE_ROWS).await;
                    return Ok(());
                }
                KeyCode::Down | KeyCode::PageDown => {
                    let rows = if key.code == KeyCode::Down { 1 } else { PAGE_ROWS };
                    if model.results_move_down(rows).await {
                        self.spawn(|c| async move { c.load_more().await });
                    }
                    return Ok(());
                }
                KeyCode::Enter => {
                    if let Some((id, index)) = model.selected_result_id().await {
                        self.spawn(move |c| async move {
                            c.open_detail(id, Some(FocusTarget::ResultCard(index))).await
                        });
                    }
                    return Ok(());
                }
                _ => {}
            }
        }

        // Global keybindings
        match key.code {
            KeyCode::Char('q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Tab => {
                model.cycle_section_forward().await;
            }
            KeyCode::BackTab => {
                model.cycle_section_backward().await;
            }
            KeyCode::Char('/') => {
                model.set_active_section(ActiveSection::Search).await;
            }
            KeyCode::Home => {
                self.spawn(|c| async move { c.go_home().await });
            }
            KeyCode::Char('h') if ctrl => {
                self.spawn(|c| async move { c.go_home().await });
            }
            KeyCode::Char('h') | KeyCode::Char('?') => {
                model.show_help_popup().await;
            }
            KeyCode::Char('t') => match model.toggle_theme().await {
                Ok(theme) => tracing::info!(theme = theme.as_str(), "Theme toggled"),
                Err(e) => {
                    tracing::error!(error = %e, "Could not save theme preference");
                    model.set_error(format!("Could not save theme preference: {}", e)).await;
                }
            },
            _ => {}
        }

        Ok(())
    }
}
