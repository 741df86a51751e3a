//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input and
//! coordinates between the model and the metadata service.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `results`: Result list loading, pagination and search
//! - `overlay`: Detail and trailer overlay operations
//! - `location`: Synchronising state to the current location
//! - `filters`: Genre and language filter options
//! - `debounce`: Quiet-period trigger for search-as-you-type

mod debounce;
mod filters;
mod input;
mod location;
mod overlay;
mod results;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use crate::model::{AppModel, MetadataService};

pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use filters::POPULAR_LANGUAGES;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<AppModel>,
    pub(crate) api: Arc<dyn MetadataService>,
    search_debounce: Debouncer,
}

impl AppController {
    pub fn new(model: Arc<AppModel>, api: Arc<dyn MetadataService>) -> Self {
        Self {
            model,
            api,
            search_debounce: Debouncer::default(),
        }
    }

    /// Loads both filter lists, then brings state in line with the start location
    pub async fn initialize(&self) {
        self.load_filters().await;
        self.sync_with_location().await;
        tracing::info!("Initial load finished");
    }
}
