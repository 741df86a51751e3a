use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use assert_matches::assert_matches;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tempfile::TempDir;
use tokio::sync::Semaphore;

use crate::model::{
    ActiveSection, ApiError, ApiResult, AppModel, DetailRecord, Endpoint, FilterOptions, Genre,
    ImageUrls, LanguageInfo, ListQuery, ListStatus, ListedTitle, MetadataService, PagedResponse,
    ThemeStore,
};
use super::AppController;

const ITEMS_PER_PAGE: u64 = 5;

#[derive(Default)]
struct FakeService {
    list_calls: AtomicUsize,
    detail_calls: AtomicUsize,
    queries: StdMutex<Vec<ListQuery>>,
    /// List calls wait for a permit when set
    list_gate: Option<Arc<Semaphore>>,
    /// Detail calls for this id wait for a permit
    detail_gate: Option<(u64, Arc<Semaphore>)>,
    total_pages: u32,
    fail_genres: bool,
}

impl FakeService {
    fn new() -> Self {
        Self {
            total_pages: 3,
            ..Default::default()
        }
    }

    fn gated(gate: Arc<Semaphore>) -> Self {
        Self {
            list_gate: Some(gate),
            ..Self::new()
        }
    }

    fn with_slow_detail(id: u64, gate: Arc<Semaphore>) -> Self {
        Self {
            detail_gate: Some((id, gate)),
            ..Self::new()
        }
    }

    fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    fn last_query(&self) -> ListQuery {
        self.queries.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl MetadataService for FakeService {
    async fn list_titles(&self, query: &ListQuery) -> ApiResult<PagedResponse> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());
        if let Some(gate) = &self.list_gate {
            gate.acquire().await.unwrap().forget();
        }

        let first = query.page as u64 * 100;
        Ok(PagedResponse {
            page: query.page,
            total_pages: self.total_pages,
            results: (first..first + ITEMS_PER_PAGE)
                .map(|id| ListedTitle {
                    id,
                    title: Some(format!("Movie {}", id)),
                    poster_path: Some(format!("/{}.jpg", id)),
                    ..Default::default()
                })
                .collect(),
        })
    }

    async fn title_detail(&self, id: u64) -> ApiResult<DetailRecord> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if let Some((gated_id, gate)) = &self.detail_gate {
            if *gated_id == id {
                gate.acquire().await.unwrap().forget();
            }
        }
        Ok(serde_json::from_value(serde_json::json!({"id": id, "title": "Heat"}))?)
    }

    async fn genres(&self) -> ApiResult<Vec<Genre>> {
        if self.fail_genres {
            return Err(ApiError::Status {
                status: 500,
                body: "down".into(),
            });
        }
        Ok(vec![Genre { id: 28, name: "Action".into() }])
    }

    async fn languages(&self) -> ApiResult<Vec<LanguageInfo>> {
        Ok(vec![LanguageInfo {
            iso_639_1: "en".into(),
            english_name: Some("English".into()),
        }])
    }
}

struct Harness {
    controller: AppController,
    service: Arc<FakeService>,
    _dir: TempDir,
}

impl Harness {
    fn new(service: FakeService, start_path: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let model = AppModel::new(
            ImageUrls::default(),
            "US".into(),
            ThemeStore::new(dir.path()),
            start_path.into(),
        );
        let service = Arc::new(service);
        let controller = AppController::new(Arc::new(model), service.clone());
        Self {
            controller,
            service,
            _dir: dir,
        }
    }

    async fn location(&self) -> String {
        self.controller.model.current_location().await
    }

    async fn wait_for_list_calls(&self, expected: usize) {
        while self.service.list_calls() < expected {
            tokio::task::yield_now().await;
        }
    }

    async fn wait_for_detail_calls(&self, expected: usize) {
        while self.service.detail_calls() < expected {
            tokio::task::yield_now().await;
        }
    }
}

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[tokio::test]
async fn startup_on_list_path_loads_trending() {
    let h = Harness::new(FakeService::new(), "/");
    h.controller.initialize().await;

    assert_eq!(h.service.list_calls(), 1);
    assert_eq!(h.service.last_query().endpoint, Endpoint::Trending);
    let results = h.controller.model.results.lock().await;
    assert_eq!(results.status, ListStatus::Ready);
    assert_eq!(results.items.len(), ITEMS_PER_PAGE as usize);
    assert!(results.pagination.has_more_pages);
}

#[tokio::test]
async fn open_close_reopen_fetches_detail_twice() {
    let h = Harness::new(FakeService::new(), "/");
    h.controller.initialize().await;

    h.controller.open_detail(949, None).await;
    assert_eq!(h.location().await, "/heat-949");
    h.controller.close_detail().await;
    assert_eq!(h.location().await, "/");
    h.controller.open_detail(949, None).await;

    assert_eq!(h.service.detail_calls(), 2);
    assert!(h.controller.model.overlay.lock().await.is_showing(949));
}

#[tokio::test]
async fn back_navigation_closes_overlay_without_refetching() {
    let h = Harness::new(FakeService::new(), "/");
    h.controller.initialize().await;
    h.controller.open_detail(949, None).await;

    h.controller.sync_with_location().await;
    assert_eq!(h.service.detail_calls(), 1, "already open for this id");

    h.controller.navigate_back().await;
    assert_eq!(h.location().await, "/");
    assert!(!h.controller.model.overlay.lock().await.is_active());
    assert_eq!(h.service.detail_calls(), 1);
    assert_eq!(h.service.list_calls(), 1, "list was already loaded");

    h.controller.navigate_forward().await;
    assert_eq!(h.location().await, "/heat-949");
    assert!(h.controller.model.overlay.lock().await.is_showing(949));
}

#[tokio::test]
async fn closing_during_detail_fetch_does_not_block_history_open() {
    let gate = Arc::new(Semaphore::new(0));
    let h = Harness::new(FakeService::with_slow_detail(7, gate.clone()), "/");
    h.controller.initialize().await;
    h.controller.open_detail(1, None).await;
    h.controller.close_detail().await;

    let slow = h.controller.clone();
    let slow_open = tokio::spawn(async move { slow.open_detail(7, None).await });
    h.wait_for_detail_calls(2).await;
    h.controller.close_detail().await;
    assert!(!h.controller.model.snapshot().await.is_busy());

    h.controller.navigate_back().await;
    assert_eq!(h.location().await, "/heat-1");
    assert!(h.controller.model.overlay.lock().await.is_showing(1));

    gate.add_permits(1);
    slow_open.await.unwrap();
    let overlay = h.controller.model.overlay.lock().await;
    assert!(overlay.is_showing(1), "late response for the closed title is dropped");
    assert!(!overlay.is_loading());
    drop(overlay);
    assert_eq!(h.location().await, "/heat-1");
}

#[tokio::test]
async fn closing_restores_focus_to_trigger_card() {
    let h = Harness::new(FakeService::new(), "/");
    h.controller.initialize().await;

    h.controller
        .open_detail(103, Some(crate::model::FocusTarget::ResultCard(3)))
        .await;
    h.controller.model.results.lock().await.select(0);
    h.controller.close_detail().await;

    assert_eq!(h.controller.model.results.lock().await.selected, 3);
    assert_eq!(
        h.controller.model.get_ui_state().await.active_section,
        ActiveSection::Results
    );
}

#[tokio::test]
async fn startup_on_detail_path_loads_list_after_close() {
    let h = Harness::new(FakeService::new(), "/anything-at-all-42");
    h.controller.initialize().await;

    assert_eq!(h.service.detail_calls(), 1);
    assert_eq!(h.service.list_calls(), 0);
    assert!(h.controller.model.overlay.lock().await.is_showing(42));
    assert_eq!(h.location().await, "/anything-at-all-42", "location-driven opens are not pushed");

    h.controller.close_detail().await;
    assert_eq!(h.service.list_calls(), 1);
    assert_eq!(h.location().await, "/");
}

#[tokio::test]
async fn rapid_load_more_starts_one_fetch() {
    let gate = Arc::new(Semaphore::new(1));
    let h = Harness::new(FakeService::gated(gate.clone()), "/");
    h.controller.initialize().await;

    let first = tokio::spawn({
        let controller = h.controller.clone();
        async move { controller.load_more().await }
    });
    h.wait_for_list_calls(2).await;

    for _ in 0..10 {
        h.controller.load_more().await;
    }
    assert_eq!(h.service.list_calls(), 2);

    gate.add_permits(1);
    first.await.unwrap();

    let results = h.controller.model.results.lock().await;
    assert_eq!(results.pagination.current_page, 2);
    assert_eq!(results.items.len(), 2 * ITEMS_PER_PAGE as usize);
    assert_eq!(h.service.last_query().param("page"), Some("2"));
}

#[tokio::test]
async fn stale_response_is_dropped_and_current_query_refetched() {
    let gate = Arc::new(Semaphore::new(1));
    let h = Harness::new(FakeService::gated(gate.clone()), "/");
    h.controller.initialize().await;

    h.controller.model.results.lock().await.query.search_text = "alien".into();
    let slow = tokio::spawn({
        let controller = h.controller.clone();
        async move { controller.reset_and_load(false).await }
    });
    h.wait_for_list_calls(2).await;

    h.controller.model.results.lock().await.query.search_text = "aliens".into();
    h.controller.reset_and_load(false).await;
    assert_eq!(h.service.list_calls(), 2, "no second fetch while one is in flight");

    gate.add_permits(2);
    slow.await.unwrap();

    assert_eq!(h.service.list_calls(), 3);
    assert_eq!(h.service.last_query().param("query"), Some("aliens"));
    let results = h.controller.model.results.lock().await;
    assert!(!results.pagination.in_flight);
    assert_eq!(results.status, ListStatus::Ready);
}

#[tokio::test]
async fn filter_change_clears_search_and_uses_discover() {
    let h = Harness::new(FakeService::new(), "/");
    h.controller.initialize().await;
    for c in "heat".chars() {
        h.controller.model.append_to_search(c).await;
    }

    h.controller.cycle_genre(true).await;

    let query = h.service.last_query();
    assert_eq!(query.endpoint, Endpoint::Discover);
    assert_eq!(query.param("with_genres"), Some("28"));
    assert_eq!(query.param("query"), None);
    assert_eq!(h.controller.model.search_input().await, "");
    assert_eq!(h.location().await, "/");
}

#[tokio::test]
async fn submit_search_clears_filters() {
    let h = Harness::new(FakeService::new(), "/");
    h.controller.initialize().await;
    h.controller.cycle_language(true).await;
    for c in "batman".chars() {
        h.controller.model.append_to_search(c).await;
    }

    h.controller.submit_search().await;

    let query = h.service.last_query();
    assert_eq!(query.endpoint, Endpoint::Search);
    assert_eq!(query.param("query"), Some("batman"));
    assert_eq!(query.param("with_original_language"), None);
    assert_eq!(h.controller.model.filters.lock().await.language_selected, 0);
}

#[tokio::test]
async fn home_resets_everything() {
    let h = Harness::new(FakeService::new(), "/");
    h.controller.initialize().await;
    h.controller.cycle_genre(true).await;
    h.controller.load_more().await;

    h.controller.go_home().await;

    let query = h.service.last_query();
    assert_eq!(query.endpoint, Endpoint::Trending);
    assert_eq!(query.param("page"), Some("1"));
    assert_eq!(h.controller.model.filters.lock().await.genre_selected, 0);
}

#[tokio::test(start_paused = true)]
async fn typing_burst_triggers_one_search() {
    let h = Harness::new(FakeService::new(), "/");
    h.controller.initialize().await;

    for c in "dune".chars() {
        h.controller.model.append_to_search(c).await;
        h.controller.schedule_search().await;
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert_eq!(h.service.list_calls(), 1);

    tokio::time::sleep(Duration::from_millis(600)).await;
    h.wait_for_list_calls(2).await;
    tokio::task::yield_now().await;

    assert_eq!(h.service.list_calls(), 2);
    assert_eq!(h.service.last_query().param("query"), Some("dune"));
}

#[tokio::test]
async fn failed_genre_load_disables_only_that_control() {
    let service = FakeService {
        fail_genres: true,
        ..FakeService::new()
    };
    let h = Harness::new(service, "/");
    h.controller.initialize().await;

    let filters = h.controller.model.filters.lock().await.clone();
    assert_eq!(filters.genres, FilterOptions::Unavailable);
    assert_matches!(filters.languages, FilterOptions::Ready(ref langs) if langs.len() == 1);
    assert_eq!(h.service.list_calls(), 1, "the app still loads");
}

#[tokio::test]
async fn keys_toggle_theme_and_quit() {
    let h = Harness::new(FakeService::new(), "/");
    let before = h.controller.model.theme().await;

    h.controller.handle_key_event(press(KeyCode::Char('t'))).await.unwrap();
    assert_eq!(h.controller.model.theme().await, before.toggled());

    h.controller.handle_key_event(press(KeyCode::Tab)).await.unwrap();
    assert_eq!(h.controller.model.get_ui_state().await.active_section, ActiveSection::Search);
    h.controller.handle_key_event(press(KeyCode::Char('q'))).await.unwrap();
    assert!(!h.controller.model.should_quit().await, "q is typed into the search box");

    h.controller.handle_key_event(press(KeyCode::BackTab)).await.unwrap();
    h.controller.handle_key_event(press(KeyCode::Char('q'))).await.unwrap();
    assert!(h.controller.model.should_quit().await);
}
