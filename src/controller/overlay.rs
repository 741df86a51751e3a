//! Detail and trailer overlay operations

use std::time::Instant;

use crate::model::{ActiveSection, FocusTarget, OpenOutcome, BASE_PATH};
use super::AppController;

impl AppController {
    /// Opens (or retargets) the detail overlay and records the new location
    pub async fn open_detail(&self, id: u64, trigger: Option<FocusTarget>) {
        if let Some(path) = self.fetch_detail(id, trigger).await {
            self.model.push_location(path).await;
        }
    }

    /// Shared by user-driven and location-driven opens; returns the location
    /// of a successfully loaded title
    pub(crate) async fn fetch_detail(&self, id: u64, trigger: Option<FocusTarget>) -> Option<String> {
        let request = self.model.overlay.lock().await.begin_open(id, trigger)?;
        tracing::debug!(id, "Loading title detail");

        let result = self.api.title_detail(id).await;

        let outcome = self.model.overlay.lock().await.complete_open(
            request,
            result,
            &self.model.images,
            &self.model.region,
        );

        match outcome {
            OpenOutcome::Loaded { path } => {
                tracing::info!(id, path = %path, "Detail overlay opened");
                Some(path)
            }
            OpenOutcome::Failed => {
                tracing::warn!(id, "Detail overlay opened without content");
                None
            }
            OpenOutcome::Discarded => None,
        }
    }

    /// Opens the recommendation under focus in place of the current title
    pub async fn open_focused_recommendation(&self) {
        let id = self.model.overlay.lock().await.focused_recommendation();
        if let Some(id) = id {
            self.open_detail(id, None).await;
        }
    }

    /// Closes the overlay, restores focus and records the list location
    pub async fn close_detail(&self) {
        if self.dismiss_detail().await {
            self.model.push_location(BASE_PATH).await;
            self.load_list_if_pristine().await;
        }
    }

    /// Starts the closing transition and hands focus back to the trigger
    pub(crate) async fn dismiss_detail(&self) -> bool {
        let focus_return = self.model.overlay.lock().await.close(Instant::now());
        let Some(focus_return) = focus_return else {
            return false;
        };

        if let Some(FocusTarget::ResultCard(index)) = focus_return {
            self.model.results.lock().await.select(index);
        }
        self.model.set_active_section(ActiveSection::Results).await;
        tracing::debug!(?focus_return, "Detail overlay closing");
        true
    }

    /// The app may start on a detail location, leaving the list unloaded
    pub(crate) async fn load_list_if_pristine(&self) {
        let pristine = self.model.results.lock().await.is_pristine();
        if pristine {
            self.reset_and_load(true).await;
        }
    }

    pub async fn open_trailer(&self) {
        let opened = self.model.overlay.lock().await.open_trailer();
        if opened {
            tracing::debug!("Trailer overlay opened");
        }
    }

    pub async fn close_trailer(&self) {
        let closed = self.model.overlay.lock().await.close_trailer(Instant::now());
        if closed {
            tracing::debug!("Trailer overlay closing");
        }
    }
}
