//! Paginated result list state machine
//!
//! `ResultSet` owns the query, the pagination flags and the loaded items. The
//! controller drives it in two synchronous steps around the network call:
//! `begin_*` decides whether a fetch may start and returns a tagged request,
//! `complete` applies (or discards) the response for that request.

use std::sync::Arc;

use super::content::{PagedResponse, ResultItem};
use super::error::ApiResult;
use super::query::{ListQuery, QueryState};

pub const LIST_ERROR_MESSAGE: &str = "Error loading movies. Please try again later.";

/// Distance from the end of the list at which the next page is requested
pub const LOAD_MORE_THRESHOLD: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationState {
    pub current_page: u32,
    pub has_more_pages: bool,
    pub in_flight: bool,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            has_more_pages: true,
            in_flight: false,
        }
    }
}

/// Identifies which reset a request belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestTag {
    pub generation: u64,
    pub page: u32,
    pub append: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListRequest {
    pub tag: RequestTag,
    pub query: ListQuery,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ListStatus {
    #[default]
    NotLoaded,
    Ready,
    Empty,
    Failed(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    Replaced { count: usize },
    Appended { count: usize },
    Failed { append: bool },
    /// Response belonged to an earlier generation and was dropped
    Stale,
}

#[derive(Clone, Debug, Default)]
pub struct ResultSet {
    pub query: QueryState,
    pub pagination: PaginationState,
    /// Shared with view snapshots; copied only when a page lands while one is alive
    pub items: Arc<Vec<ResultItem>>,
    pub status: ListStatus,
    pub selected: usize,
    generation: u64,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_pristine(&self) -> bool {
        self.status == ListStatus::NotLoaded && !self.pagination.in_flight
    }

    /// Back to page one; a fetch still in flight becomes stale
    pub fn reset(&mut self, clear_filters: bool) {
        self.pagination.current_page = 1;
        self.pagination.has_more_pages = true;
        self.generation += 1;
        if clear_filters {
            self.query.clear();
        }
    }

    pub fn begin_fetch(&mut self, append: bool) -> Option<ListRequest> {
        if self.pagination.in_flight {
            tracing::debug!(append, "List fetch rejected: another fetch is in flight");
            return None;
        }
        if append && !self.pagination.has_more_pages {
            return None;
        }

        self.pagination.in_flight = true;
        let page = self.pagination.current_page;
        Some(ListRequest {
            tag: RequestTag {
                generation: self.generation,
                page,
                append,
            },
            query: self.query.to_list_query(page),
        })
    }

    pub fn begin_load_more(&mut self) -> Option<ListRequest> {
        if self.pagination.in_flight || !self.pagination.has_more_pages {
            return None;
        }
        self.pagination.current_page += 1;
        self.begin_fetch(true)
    }

    pub fn complete(&mut self, request: &ListRequest, result: ApiResult<PagedResponse>) -> FetchOutcome {
        self.pagination.in_flight = false;

        if request.tag.generation != self.generation {
            tracing::debug!(
                request_generation = request.tag.generation,
                current_generation = self.generation,
                "Discarding stale list response"
            );
            return FetchOutcome::Stale;
        }

        let append = request.tag.append;
        match result {
            Ok(page) => {
                let items: Vec<ResultItem> =
                    page.results.iter().filter_map(ResultItem::from_listed).collect();
                let count = items.len();
                self.pagination.has_more_pages = request.tag.page < page.total_pages();

                if append {
                    Arc::make_mut(&mut self.items).extend(items);
                    if !self.items.is_empty() {
                        self.status = ListStatus::Ready;
                    }
                    FetchOutcome::Appended { count }
                } else {
                    self.items = Arc::new(items);
                    self.selected = 0;
                    self.status = if count == 0 { ListStatus::Empty } else { ListStatus::Ready };
                    FetchOutcome::Replaced { count }
                }
            }
            Err(_) if append => {
                self.pagination.current_page = self.pagination.current_page.saturating_sub(1).max(1);
                FetchOutcome::Failed { append }
            }
            Err(_) => {
                self.items = Arc::default();
                self.selected = 0;
                self.status = ListStatus::Failed(LIST_ERROR_MESSAGE.to_string());
                self.pagination.has_more_pages = false;
                FetchOutcome::Failed { append }
            }
        }
    }

    pub fn selected_item(&self) -> Option<&ResultItem> {
        self.items.get(self.selected)
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected < self.items.len().saturating_sub(1) {
            self.selected += 1;
        }
    }

    pub fn select(&mut self, index: usize) {
        self.selected = index.min(self.items.len().saturating_sub(1));
    }

    /// True when the selection is close enough to the end to want the next page
    pub fn near_end(&self) -> bool {
        !self.items.is_empty() && self.selected + LOAD_MORE_THRESHOLD >= self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::content::ListedTitle;
    use crate::model::error::ApiError;
    use assert_matches::assert_matches;

    fn page(ids: &[u64], total_pages: u32) -> PagedResponse {
        PagedResponse {
            page: 1,
            total_pages,
            results: ids
                .iter()
                .map(|id| ListedTitle {
                    id: *id,
                    title: Some(format!("Movie {}", id)),
                    release_date: Some("2020-01-01".into()),
                    poster_path: Some(format!("/{}.jpg", id)),
                    ..Default::default()
                })
                .collect(),
        }
    }

    fn http_error() -> ApiError {
        ApiError::Status {
            status: 500,
            body: "boom".into(),
        }
    }

    #[test]
    fn second_fetch_is_rejected_while_in_flight() {
        let mut set = ResultSet::new();
        assert!(set.begin_fetch(false).is_some());
        assert!(set.begin_fetch(false).is_none());
        assert!(set.begin_load_more().is_none());
        assert_eq!(set.pagination.current_page, 1);
    }

    #[test]
    fn rapid_load_more_starts_one_fetch() {
        let mut set = ResultSet::new();
        let first = set.begin_fetch(false).unwrap();
        set.complete(&first, Ok(page(&[1, 2], 5)));

        let started = (0..10).filter_map(|_| set.begin_load_more()).count();
        assert_eq!(started, 1);
        assert_eq!(set.pagination.current_page, 2);
    }

    #[test]
    fn load_more_is_noop_without_more_pages() {
        let mut set = ResultSet::new();
        let first = set.begin_fetch(false).unwrap();
        set.complete(&first, Ok(page(&[1], 1)));
        assert!(!set.pagination.has_more_pages);
        assert!(set.begin_load_more().is_none());
        assert_eq!(set.pagination.current_page, 1);
    }

    #[test]
    fn append_extends_and_recomputes_has_more() {
        let mut set = ResultSet::new();
        let first = set.begin_fetch(false).unwrap();
        set.complete(&first, Ok(page(&[1, 2], 2)));
        let more = set.begin_load_more().unwrap();
        assert_eq!(more.query.param("page"), Some("2"));
        assert_matches!(set.complete(&more, Ok(page(&[3], 2))), FetchOutcome::Appended { count: 1 });
        assert_eq!(set.items.len(), 3);
        assert!(!set.pagination.has_more_pages);
        assert!(!set.pagination.in_flight);
    }

    #[test]
    fn clones_share_items_until_the_next_page_lands() {
        let mut set = ResultSet::new();
        let first = set.begin_fetch(false).unwrap();
        set.complete(&first, Ok(page(&[1, 2], 2)));

        let frame = set.clone();
        assert!(Arc::ptr_eq(&frame.items, &set.items));

        let more = set.begin_load_more().unwrap();
        set.complete(&more, Ok(page(&[3], 2)));
        assert_eq!(frame.items.len(), 2);
        assert_eq!(set.items.len(), 3);
    }

    #[test]
    fn failed_append_keeps_items_and_reverts_page() {
        let mut set = ResultSet::new();
        let first = set.begin_fetch(false).unwrap();
        set.complete(&first, Ok(page(&[1, 2], 4)));
        let more = set.begin_load_more().unwrap();
        assert_matches!(set.complete(&more, Err(http_error())), FetchOutcome::Failed { append: true });
        assert_eq!(set.items.len(), 2);
        assert_eq!(set.pagination.current_page, 1);
        assert!(set.pagination.has_more_pages);
        assert_eq!(set.status, ListStatus::Ready);
    }

    #[test]
    fn failed_fresh_fetch_shows_error_and_halts_pagination() {
        let mut set = ResultSet::new();
        let first = set.begin_fetch(false).unwrap();
        set.complete(&first, Err(http_error()));
        assert_eq!(set.status, ListStatus::Failed(LIST_ERROR_MESSAGE.to_string()));
        assert!(set.items.is_empty());
        assert!(set.begin_load_more().is_none());
    }

    #[test]
    fn empty_fresh_result_is_not_an_error() {
        let mut set = ResultSet::new();
        let first = set.begin_fetch(false).unwrap();
        set.complete(&first, Ok(page(&[], 1)));
        assert_eq!(set.status, ListStatus::Empty);
    }

    #[test]
    fn response_from_before_reset_is_stale() {
        let mut set = ResultSet::new();
        set.query.search_text = "alien".into();
        let old = set.begin_fetch(false).unwrap();

        set.query.search_text = "aliens".into();
        set.reset(false);
        assert!(set.begin_fetch(false).is_none(), "old request still in flight");

        assert_eq!(set.complete(&old, Ok(page(&[1], 1))), FetchOutcome::Stale);
        assert!(set.items.is_empty());
        assert!(!set.pagination.in_flight);

        let fresh = set.begin_fetch(false).unwrap();
        assert_eq!(fresh.query.param("query"), Some("aliens"));
        assert_eq!(fresh.tag.generation, set.generation());
    }

    #[test]
    fn reset_with_clear_filters_zeroes_query() {
        let mut set = ResultSet::new();
        set.query.genre_id = Some(28);
        set.query.search_text = "x".into();
        set.pagination.current_page = 4;
        set.pagination.has_more_pages = false;
        set.reset(true);
        assert_eq!(set.query, QueryState::default());
        assert_eq!(set.pagination.current_page, 1);
        assert!(set.pagination.has_more_pages);
    }

    #[test]
    fn near_end_tracks_selection() {
        let mut set = ResultSet::new();
        let first = set.begin_fetch(false).unwrap();
        set.complete(&first, Ok(page(&(1..=10).collect::<Vec<_>>(), 3)));
        assert!(!set.near_end());
        set.select(6);
        assert!(set.near_end());
    }
}
