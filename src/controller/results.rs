//! Result list loading, pagination and search

use crate::model::{FetchOutcome, ListRequest, QueryState, BASE_PATH};
use super::AppController;

impl AppController {
    /// Back to page one and fetch. With `clear_filters` the search text and
    /// both filter selections are cleared as well.
    pub async fn reset_and_load(&self, clear_filters: bool) {
        if clear_filters {
            self.model.clear_search_input().await;
            self.model.filters.lock().await.clear_selection();
        }

        let request = {
            let mut results = self.model.results.lock().await;
            results.reset(clear_filters);
            results.begin_fetch(false)
        };

        match request {
            Some(request) => self.run_list_fetch(request).await,
            None => tracing::debug!("List reset while a fetch is in flight; refetching once it returns"),
        }
    }

    /// Next page, unless a fetch is running or the last page was reached
    pub async fn load_more(&self) {
        let request = self.model.results.lock().await.begin_load_more();
        if let Some(request) = request {
            tracing::debug!(page = request.tag.page, "Loading more results");
            self.run_list_fetch(request).await;
        }
    }

    /// Issues `request`; a response made stale by a reset is dropped and the
    /// current query fetched from page one in its place
    async fn run_list_fetch(&self, request: ListRequest) {
        let mut next = Some(request);

        while let Some(request) = next.take() {
            let result = self.api.list_titles(&request.query).await;

            let mut results = self.model.results.lock().await;
            match results.complete(&request, result) {
                FetchOutcome::Stale => {
                    next = results.begin_fetch(false);
                }
                FetchOutcome::Replaced { count } => {
                    tracing::info!(
                        endpoint = request.query.endpoint.path(),
                        count,
                        has_more = results.pagination.has_more_pages,
                        "Result list loaded"
                    );
                }
                FetchOutcome::Appended { count } => {
                    tracing::info!(
                        page = request.tag.page,
                        count,
                        has_more = results.pagination.has_more_pages,
                        "Result page appended"
                    );
                }
                FetchOutcome::Failed { append } => {
                    tracing::warn!(page = request.tag.page, append, "Result list fetch failed");
                }
            }
        }
    }

    /// Search text applied after the typing quiet period; filters are kept
    pub async fn apply_search_text(&self) {
        let text = self.model.search_input().await;
        tracing::debug!(query = %text, "Applying search text");
        self.model.results.lock().await.query.search_text = text;
        self.reset_and_load(false).await;
    }

    pub(crate) async fn schedule_search(&self) {
        let controller = self.clone();
        self.search_debounce
            .schedule(async move {
                controller.apply_search_text().await;
            })
            .await;
    }

    /// Explicit submit: filters are cleared and only the search text remains
    pub async fn submit_search(&self) {
        self.search_debounce.cancel().await;
        let text = self.model.search_input().await;
        tracing::debug!(query = %text, "Search submitted");

        self.model.filters.lock().await.clear_selection();
        self.model.results.lock().await.query = QueryState {
            search_text: text,
            ..Default::default()
        };
        self.model.push_location(BASE_PATH).await;
        self.reset_and_load(false).await;
    }

    pub async fn go_home(&self) {
        self.search_debounce.cancel().await;
        self.model.push_location(BASE_PATH).await;
        self.reset_and_load(true).await;
    }
}
