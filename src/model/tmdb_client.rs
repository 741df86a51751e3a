//! TMDB API client and the service trait the controllers depend on

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::content::{DetailRecord, Genre, GenreList, LanguageInfo, PagedResponse};
use super::error::{ApiError, ApiResult};
use super::query::ListQuery;
use crate::config::REQUEST_TIMEOUT;
use crate::{log_api_request, log_api_result};

pub const DETAIL_APPENDS: &str = "videos,reviews,watch/providers,credits,recommendations";

/// Operations the UI needs from the metadata service
#[async_trait]
pub trait MetadataService: Send + Sync {
    async fn list_titles(&self, query: &ListQuery) -> ApiResult<PagedResponse>;

    /// Base fields plus every attached resource in one call
    async fn title_detail(&self, id: u64) -> ApiResult<DetailRecord>;

    async fn genres(&self) -> ApiResult<Vec<Genre>>;

    async fn languages(&self) -> ApiResult<Vec<LanguageInfo>>;
}

#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(client, base_url, api_key))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// GET `endpoint` with `params` plus the credential. No retries.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut query: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        query.push(("api_key", self.api_key.as_str()));

        log_api_request!(endpoint, params = ?params);

        let response = self.client.get(&url).query(&query).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl MetadataService for TmdbClient {
    async fn list_titles(&self, query: &ListQuery) -> ApiResult<PagedResponse> {
        let result = self.fetch_json(query.endpoint.path(), &query.params).await;
        log_api_result!(query.endpoint.path(), result);
        result
    }

    async fn title_detail(&self, id: u64) -> ApiResult<DetailRecord> {
        let endpoint = format!("/movie/{}", id);
        let result = self
            .fetch_json(&endpoint, &[("append_to_response", DETAIL_APPENDS.to_string())])
            .await;
        log_api_result!("title_detail", result);
        result
    }

    async fn genres(&self) -> ApiResult<Vec<Genre>> {
        let result: ApiResult<GenreList> = self
            .fetch_json("/genre/movie/list", &[("language", "en".to_string())])
            .await;
        log_api_result!("genres", result);
        result.map(|list| list.genres)
    }

    async fn languages(&self) -> ApiResult<Vec<LanguageInfo>> {
        let result = self.fetch_json("/configuration/languages", &[]).await;
        log_api_result!("languages", result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::query::QueryState;
    use assert_matches::assert_matches;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn list_titles_sends_query_and_credential() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/movie"))
            .and(query_param("api_key", "secret"))
            .and(query_param("query", "batman"))
            .and(query_param("page", "1"))
            .and(query_param("sort_by", "popularity.desc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 1,
                "total_pages": 2,
                "results": [{"id": 268, "title": "Batman", "poster_path": "/b.jpg"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = TmdbClient::new(server.uri(), "secret").unwrap();
        let query = QueryState {
            search_text: "batman".into(),
            ..Default::default()
        };
        let page = client.list_titles(&query.to_list_query(1)).await.unwrap();
        assert_eq!(page.total_pages(), 2);
        assert_eq!(page.results[0].id, 268);
    }

    #[tokio::test]
    async fn detail_requests_all_attachments() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/550"))
            .and(query_param("append_to_response", DETAIL_APPENDS))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 550, "title": "Fight Club"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = TmdbClient::new(server.uri(), "k").unwrap();
        let record = client.title_detail(550).await.unwrap();
        assert_eq!(record.title.as_deref(), Some("Fight Club"));
    }

    #[tokio::test]
    async fn non_success_status_carries_code_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/genre/movie/list"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
            .expect(1)
            .mount(&server)
            .await;

        let client = TmdbClient::new(server.uri(), "bad").unwrap();
        let err = client.genres().await.unwrap_err();
        assert_matches!(&err, ApiError::Status { status: 401, body } if body == "Invalid API key");
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/configuration/languages"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = TmdbClient::new(server.uri(), "k").unwrap();
        assert_matches!(client.languages().await, Err(ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_service_is_a_network_error() {
        let client = TmdbClient::new("http://127.0.0.1:1", "k").unwrap();
        assert_matches!(client.genres().await, Err(ApiError::Network(_)));
    }
}
