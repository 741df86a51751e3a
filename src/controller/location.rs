//! Bringing state in line with the current location
//!
//! Only startup and back/forward navigation come through here. Controller
//! operations record locations with `AppModel::push_location` and never
//! re-enter this synchronisation.

use crate::model::parse_detail_id;
use super::AppController;

impl AppController {
    pub async fn sync_with_location(&self) {
        let path = self.model.current_location().await;
        tracing::debug!(path = %path, "Synchronising with location");

        match parse_detail_id(&path) {
            Some(id) => {
                if self.model.overlay.lock().await.is_showing(id) {
                    return;
                }
                self.fetch_detail(id, None).await;
            }
            None => {
                if !self.dismiss_detail().await {
                    self.reset_and_load(true).await;
                } else {
                    self.load_list_if_pristine().await;
                }
            }
        }
    }

    pub async fn navigate_back(&self) {
        if self.model.history_back().await {
            self.sync_with_location().await;
        }
    }

    pub async fn navigate_forward(&self) {
        if self.model.history_forward().await {
            self.sync_with_location().await;
        }
    }
}
