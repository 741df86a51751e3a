//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (sections, filters, UI state)
//! - `content`: Wire payloads of the metadata service and list items
//! - `query`: Query state and list endpoint selection
//! - `results`: Paginated result list state machine
//! - `detail`: Display fragments derived from a detail payload
//! - `overlay`: Detail and trailer overlay lifecycle
//! - `history`: Location paths and navigable history
//! - `images`: Image and trailer URL construction
//! - `theme`: Persisted theme preference
//! - `error`: API error taxonomy
//! - `tmdb_client`: TMDB API client and the service trait
//! - `app_model`: Main application model with state management methods

mod types;
mod content;
mod query;
mod results;
mod detail;
mod overlay;
mod history;
mod images;
mod theme;
mod error;
mod tmdb_client;
mod app_model;

// Re-export all public types for convenient access
pub use types::{ActiveSection, FilterOptions, FocusTarget, UiState};

pub use content::{DetailRecord, Genre, LanguageInfo, LanguageOption, ListedTitle, PagedResponse};

pub use query::{Endpoint, ListQuery, QueryState};

pub use results::{FetchOutcome, ListRequest, ListStatus, ResultSet};

pub use detail::{
    DetailView, TrailerTrigger, WatchProviders, NO_CAST, NO_CREW, NO_OVERVIEW,
    NO_RECOMMENDATIONS, NO_REVIEWS, NO_TRAILER,
};

pub use overlay::{DetailFocus, DetailOverlay, OpenOutcome, OverlayContent};

pub use history::{parse_detail_id, BASE_PATH};

pub use images::{trailer_embed_url, ImageUrls};

pub use theme::{ThemePreference, ThemeStore};

pub use error::{ApiError, ApiResult};

pub use tmdb_client::{MetadataService, TmdbClient};

pub use app_model::{AppModel, ViewSnapshot};
