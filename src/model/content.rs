//! Payload types returned by the metadata service and the list items built from them

use std::collections::HashMap;

use serde::Deserialize;

/// One page of titles (trending, search, discover, recommendations)
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PagedResponse {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<ListedTitle>,
    #[serde(default)]
    pub total_pages: u32,
}

impl PagedResponse {
    /// A missing or zero page count is treated as a single page
    pub fn total_pages(&self) -> u32 {
        self.total_pages.max(1)
    }
}

/// A title as it appears in list endpoints
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListedTitle {
    pub id: u64,
    pub title: Option<String>,
    pub name: Option<String>,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
}

impl ListedTitle {
    pub fn display_title(&self) -> String {
        display_title(self.title.as_deref(), self.name.as_deref())
    }

    pub fn has_poster(&self) -> bool {
        self.poster_path.as_deref().is_some_and(|p| !p.is_empty())
    }
}

/// A title card in the result list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultItem {
    pub id: u64,
    pub title: String,
    pub release_year: String,
    pub poster_path: String,
}

impl ResultItem {
    /// Titles without a poster never make it into the list
    pub fn from_listed(title: &ListedTitle) -> Option<Self> {
        let poster_path = title.poster_path.as_deref().filter(|p| !p.is_empty())?;
        Some(Self {
            id: title.id,
            title: title.display_title(),
            release_year: release_year(title.release_date.as_deref()).unwrap_or_default(),
            poster_path: poster_path.to_string(),
        })
    }

    pub fn label(&self) -> String {
        if self.release_year.is_empty() {
            self.title.clone()
        } else {
            format!("{} ({})", self.title, self.release_year)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// Entry of `/configuration/languages`
#[derive(Clone, Debug, Deserialize)]
pub struct LanguageInfo {
    pub iso_639_1: String,
    #[serde(default)]
    pub english_name: Option<String>,
}

/// A language offered in the language filter
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageOption {
    pub code: String,
    pub name: String,
}

/// Aggregated detail payload (`append_to_response` with every attached resource)
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DetailRecord {
    pub id: u64,
    pub title: Option<String>,
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub vote_average: Option<f64>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub videos: Option<VideoList>,
    pub credits: Option<Credits>,
    #[serde(rename = "watch/providers")]
    pub watch_providers: Option<WatchProviderResponse>,
    pub recommendations: Option<PagedResponse>,
    pub reviews: Option<ReviewList>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Video {
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub key: Option<String>,
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastCredit>,
    #[serde(default)]
    pub crew: Vec<CrewCredit>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct CastCredit {
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct CrewCredit {
    pub name: String,
    pub job: Option<String>,
    pub department: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WatchProviderResponse {
    #[serde(default)]
    pub results: HashMap<String, RegionProviders>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RegionProviders {
    pub link: Option<String>,
    #[serde(default)]
    pub flatrate: Vec<Provider>,
    #[serde(default)]
    pub rent: Vec<Provider>,
    #[serde(default)]
    pub buy: Vec<Provider>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Provider {
    pub provider_name: String,
    pub logo_path: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ReviewList {
    #[serde(default)]
    pub results: Vec<Review>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Review {
    pub author: String,
    #[serde(default)]
    pub content: String,
    pub created_at: Option<String>,
}

pub(crate) fn display_title(title: Option<&str>, name: Option<&str>) -> String {
    title
        .filter(|t| !t.is_empty())
        .or(name.filter(|n| !n.is_empty()))
        .unwrap_or("Untitled")
        .to_string()
}

/// Year part of a `YYYY-MM-DD` date
pub(crate) fn release_year(date: Option<&str>) -> Option<String> {
    date.and_then(|d| d.split('-').next())
        .filter(|y| !y.is_empty())
        .map(str::to_string)
}
