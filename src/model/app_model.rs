//! Main application model with state management

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use super::history::History;
use super::images::ImageUrls;
use super::overlay::DetailOverlay;
use super::results::ResultSet;
use super::theme::{ThemePreference, ThemeStore};
use super::types::{ActiveSection, Filters, UiState};

/// Seconds a transient error notification stays on screen
const ERROR_DISPLAY_SECS: u64 = 5;

/// Everything the view needs for one frame
#[derive(Clone, Debug)]
pub struct ViewSnapshot {
    pub ui_state: UiState,
    pub results: ResultSet,
    pub overlay: DetailOverlay,
    pub filters: Filters,
    pub location: String,
    pub theme: ThemePreference,
    pub images: ImageUrls,
}

impl ViewSnapshot {
    /// The loader shows while either a list or a detail fetch is running
    pub fn is_busy(&self) -> bool {
        self.results.pagination.in_flight || self.overlay.is_loading()
    }
}

/// Main application model containing all state
pub struct AppModel {
    pub ui_state: Arc<Mutex<UiState>>,
    pub results: Arc<Mutex<ResultSet>>,
    pub overlay: Arc<Mutex<DetailOverlay>>,
    pub filters: Arc<Mutex<Filters>>,
    history: Arc<Mutex<History>>,
    theme: Arc<Mutex<ThemePreference>>,
    pub should_quit: Arc<Mutex<bool>>,
    pub images: ImageUrls,
    pub region: String,
    theme_store: ThemeStore,
}

impl AppModel {
    pub fn new(images: ImageUrls, region: String, theme_store: ThemeStore, start_path: String) -> Self {
        let theme = theme_store.preferred();
        tracing::debug!(theme = theme.as_str(), path = %start_path, "Model created");
        Self {
            ui_state: Arc::new(Mutex::new(UiState::default())),
            results: Arc::new(Mutex::new(ResultSet::new())),
            overlay: Arc::new(Mutex::new(DetailOverlay::new())),
            filters: Arc::new(Mutex::new(Filters::default())),
            history: Arc::new(Mutex::new(History::new(start_path))),
            theme: Arc::new(Mutex::new(theme)),
            should_quit: Arc::new(Mutex::new(false)),
            images,
            region,
            theme_store,
        }
    }

    pub async fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            ui_state: self.ui_state.lock().await.clone(),
            results: self.results.lock().await.clone(),
            overlay: self.overlay.lock().await.clone(),
            filters: self.filters.lock().await.clone(),
            location: self.current_location().await,
            theme: *self.theme.lock().await,
            images: self.images.clone(),
        }
    }

    /// Finalises elapsed overlay transitions; called once per frame
    pub async fn tick(&self, now: Instant) {
        if self.overlay.lock().await.tick(now) {
            tracing::trace!("Overlay transition finished");
        }
    }

    // ========================================================================
    // Location history
    // ========================================================================

    /// Records a new location without synchronising any state to it.
    /// Pushing the current location again is ignored.
    pub async fn push_location(&self, path: impl Into<String>) {
        let path = path.into();
        let mut history = self.history.lock().await;
        if history.current() == path {
            return;
        }
        tracing::debug!(path = %path, "Location pushed");
        history.push(path);
    }

    pub async fn current_location(&self) -> String {
        self.history.lock().await.current().to_string()
    }

    pub async fn history_back(&self) -> bool {
        self.history.lock().await.back()
    }

    pub async fn history_forward(&self) -> bool {
        self.history.lock().await.forward()
    }

    // ========================================================================
    // Theme
    // ========================================================================

    pub async fn theme(&self) -> ThemePreference {
        *self.theme.lock().await
    }

    /// Flips the theme and persists it; the in-memory theme changes even if
    /// the write fails
    pub async fn toggle_theme(&self) -> anyhow::Result<ThemePreference> {
        let theme = {
            let mut current = self.theme.lock().await;
            *current = current.toggled();
            *current
        };
        self.theme_store.save(theme)?;
        Ok(theme)
    }

    // ========================================================================
    // UI state
    // ========================================================================

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn cycle_section_forward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.next();
    }

    pub async fn cycle_section_backward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.prev();
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        let mut state = self.ui_state.lock().await;
        state.active_section = section;
    }

    pub async fn append_to_search(&self, c: char) {
        let mut state = self.ui_state.lock().await;
        state.search_input.push(c);
    }

    pub async fn backspace_search(&self) {
        let mut state = self.ui_state.lock().await;
        state.search_input.pop();
    }

    pub async fn clear_search_input(&self) {
        let mut state = self.ui_state.lock().await;
        state.search_input.clear();
    }

    pub async fn search_input(&self) -> String {
        self.ui_state.lock().await.search_input.trim().to_string()
    }

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
        state.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
        state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn auto_clear_old_errors(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(timestamp) = state.error_timestamp {
            if timestamp.elapsed().as_secs() > ERROR_DISPLAY_SECS {
                state.error_message = None;
                state.error_timestamp = None;
            }
        }
    }

    pub async fn show_help_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    // ========================================================================
    // Result list navigation
    // ========================================================================

    /// Returns true when the new selection is near enough to the end to
    /// want the next page
    pub async fn results_move_down(&self, rows: usize) -> bool {
        let mut results = self.results.lock().await;
        for _ in 0..rows {
            results.move_down();
        }
        results.near_end()
    }

    pub async fn results_move_up(&self, rows: usize) {
        let mut results = self.results.lock().await;
        for _ in 0..rows {
            results.move_up();
        }
    }

    pub async fn selected_result_id(&self) -> Option<(u64, usize)> {
        let results = self.results.lock().await;
        results.selected_item().map(|item| (item.id, results.selected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::history::BASE_PATH;

    fn model(dir: &std::path::Path) -> AppModel {
        AppModel::new(ImageUrls::default(), "US".into(), ThemeStore::new(dir), BASE_PATH.into())
    }

    #[tokio::test]
    async fn duplicate_push_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let model = model(dir.path());
        model.push_location("/").await;
        model.push_location("/heat-949").await;
        model.push_location("/heat-949").await;
        assert!(model.history_back().await);
        assert_eq!(model.current_location().await, "/");
        assert!(!model.history_back().await);
    }

    #[tokio::test]
    async fn snapshot_shares_loaded_items() {
        let dir = tempfile::tempdir().unwrap();
        let model = model(dir.path());
        let first = model.snapshot().await;
        let second = model.snapshot().await;
        assert!(Arc::ptr_eq(&first.results.items, &second.results.items));
        assert!(Arc::ptr_eq(&first.results.items, &model.results.lock().await.items));
    }

    #[tokio::test]
    async fn toggle_theme_persists() {
        let dir = tempfile::tempdir().unwrap();
        let model = model(dir.path());
        let before = model.theme().await;
        let after = model.toggle_theme().await.unwrap();
        assert_eq!(after, before.toggled());
        assert_eq!(ThemeStore::new(dir.path()).load().unwrap(), Some(after));
    }

    #[tokio::test]
    async fn errors_can_be_cleared() {
        let dir = tempfile::tempdir().unwrap();
        let model = model(dir.path());
        model.set_error("boom".into()).await;
        assert!(model.has_error().await);
        model.auto_clear_old_errors().await;
        assert!(model.has_error().await, "fresh errors stay visible");
        model.clear_error().await;
        assert!(!model.has_error().await);
    }
}
