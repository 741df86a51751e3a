//! Query state and list endpoint selection

/// User-controlled inputs that decide which titles are listed
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryState {
    pub search_text: String,
    pub genre_id: Option<u64>,
    pub language_code: Option<String>,
}

impl QueryState {
    pub fn has_filters(&self) -> bool {
        self.genre_id.is_some() || self.language_code.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Search text wins over filters, filters win over trending
    pub fn endpoint(&self) -> Endpoint {
        if !self.search_text.trim().is_empty() {
            Endpoint::Search
        } else if self.has_filters() {
            Endpoint::Discover
        } else {
            Endpoint::Trending
        }
    }

    pub fn to_list_query(&self, page: u32) -> ListQuery {
        let endpoint = self.endpoint();
        let mut params = vec![("page", page.to_string())];

        if endpoint == Endpoint::Search {
            params.push(("query", self.search_text.trim().to_string()));
        }
        if let Some(genre_id) = self.genre_id {
            params.push(("with_genres", genre_id.to_string()));
        }
        if let Some(language) = &self.language_code {
            params.push(("with_original_language", language.clone()));
        }
        params.push(("sort_by", "popularity.desc".to_string()));

        ListQuery { endpoint, page, params }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Trending,
    Search,
    Discover,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Trending => "/trending/movie/week",
            Endpoint::Search => "/search/movie",
            Endpoint::Discover => "/discover/movie",
        }
    }
}

/// A fully resolved list request: endpoint plus query parameters (credential excluded)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    pub endpoint: Endpoint,
    pub page: u32,
    pub params: Vec<(&'static str, String)>,
}

impl ListQuery {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(search: &str, genre: Option<u64>, lang: Option<&str>) -> QueryState {
        QueryState {
            search_text: search.to_string(),
            genre_id: genre,
            language_code: lang.map(str::to_string),
        }
    }

    #[test]
    fn endpoint_priority_is_search_then_filters_then_trending() {
        let cases = [
            (query("", None, None), Endpoint::Trending),
            (query("", Some(28), None), Endpoint::Discover),
            (query("", None, Some("ko")), Endpoint::Discover),
            (query("", Some(28), Some("ko")), Endpoint::Discover),
            (query("dune", None, None), Endpoint::Search),
            (query("dune", Some(28), None), Endpoint::Search),
            (query("dune", Some(28), Some("ko")), Endpoint::Search),
            (query("   ", None, Some("ko")), Endpoint::Discover),
        ];
        for (state, expected) in cases {
            assert_eq!(state.endpoint(), expected, "{:?}", state);
        }
    }

    #[test]
    fn batman_search_uses_search_endpoint() {
        let list = query("batman", None, None).to_list_query(1);
        assert_eq!(list.endpoint.path(), "/search/movie");
        assert_eq!(list.param("query"), Some("batman"));
        assert_eq!(list.param("page"), Some("1"));
        assert_eq!(list.param("with_genres"), None);
        assert_eq!(list.param("with_original_language"), None);
    }

    #[test]
    fn genre_and_language_use_discover() {
        let list = query("", Some(28), Some("en")).to_list_query(1);
        assert_eq!(list.endpoint, Endpoint::Discover);
        assert_eq!(list.param("with_genres"), Some("28"));
        assert_eq!(list.param("with_original_language"), Some("en"));
        assert_eq!(list.param("sort_by"), Some("popularity.desc"));
        assert_eq!(list.param("page"), Some("1"));
        assert_eq!(list.param("query"), None);
    }

    #[test]
    fn filters_still_apply_to_search() {
        let list = query("alien", Some(27), None).to_list_query(3);
        assert_eq!(list.endpoint, Endpoint::Search);
        assert_eq!(list.param("with_genres"), Some("27"));
        assert_eq!(list.param("page"), Some("3"));
    }

    #[test]
    fn every_endpoint_sorts_by_popularity() {
        for state in [query("", None, None), query("x", None, None), query("", Some(1), None)] {
            assert_eq!(state.to_list_query(2).param("sort_by"), Some("popularity.desc"));
        }
    }
}
