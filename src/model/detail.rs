//! Display fragments derived from one aggregated detail payload
//!
//! Each fragment is computed independently from the `DetailRecord`, so a
//! missing attached resource only affects its own section.

use chrono::DateTime;

use super::content::{display_title, release_year, DetailRecord, Provider, RegionProviders};
use super::images::ImageUrls;

pub const MAX_CAST: usize = 10;
pub const MAX_RECOMMENDATIONS: usize = 8;
pub const MAX_REVIEWS: usize = 3;
pub const REVIEW_PREVIEW_CHARS: usize = 300;

pub const NO_TRAILER: &str = "No trailer available.";
pub const NO_CAST: &str = "No cast information.";
pub const NO_CREW: &str = "No crew information.";
pub const NO_PROVIDERS: &str = "No providers found.";
pub const NO_RECOMMENDATIONS: &str = "No recommendations available.";
pub const NO_REVIEWS: &str = "No user reviews.";
pub const NO_OVERVIEW: &str = "No description available.";
pub const DETAIL_ERROR_MESSAGE: &str = "Failed to load movie details. Please try again.";

#[derive(Clone, Debug, PartialEq)]
pub struct DetailHeader {
    pub title: String,
    pub release_year: String,
    pub runtime: String,
    pub genres: String,
    pub user_score: Option<u32>,
    pub tagline: Option<String>,
    pub overview: String,
    pub poster_url: String,
    pub backdrop_url: Option<String>,
}

impl DetailHeader {
    pub fn score_label(&self) -> String {
        match self.user_score {
            Some(score) => format!("{}%", score),
            None => "N/A".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrailerTrigger {
    Available { key: String, name: String },
    Unavailable,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastMember {
    pub name: String,
    pub character: String,
    pub profile_url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CrewSummary {
    pub director: Option<String>,
    pub writers: Vec<String>,
}

impl CrewSummary {
    pub fn is_empty(&self) -> bool {
        self.director.is_none() && self.writers.is_empty()
    }

    pub fn writers_line(&self) -> Option<String> {
        (!self.writers.is_empty()).then(|| self.writers.join(", "))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderEntry {
    pub name: String,
    pub logo_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderGroup {
    pub title: &'static str,
    pub providers: Vec<ProviderEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WatchProviders {
    /// No entry at all for the configured region
    NoRegion { region: String },
    /// Only non-empty groups are kept; an empty list means nothing to show
    Groups {
        link: Option<String>,
        groups: Vec<ProviderGroup>,
    },
}

impl WatchProviders {
    pub fn empty_message(&self) -> Option<String> {
        match self {
            WatchProviders::NoRegion { region } => {
                Some(format!("No streaming information for {}.", region))
            }
            WatchProviders::Groups { groups, .. } if groups.is_empty() => Some(NO_PROVIDERS.to_string()),
            WatchProviders::Groups { .. } => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recommendation {
    pub id: u64,
    pub title: String,
    pub poster_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewSnippet {
    pub author: String,
    pub content: String,
    pub date: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DetailView {
    pub id: u64,
    pub header: DetailHeader,
    pub trailer: TrailerTrigger,
    pub cast: Vec<CastMember>,
    pub crew: CrewSummary,
    pub providers: WatchProviders,
    pub recommendations: Vec<Recommendation>,
    pub reviews: Vec<ReviewSnippet>,
}

impl DetailView {
    pub fn from_record(record: &DetailRecord, images: &ImageUrls, region: &str) -> Self {
        Self {
            id: record.id,
            header: header(record, images),
            trailer: trailer(record),
            cast: cast(record, images),
            crew: crew(record),
            providers: providers(record, images, region),
            recommendations: recommendations(record, images),
            reviews: reviews(record),
        }
    }

    pub fn slug_title(&self) -> &str {
        &self.header.title
    }
}

fn header(record: &DetailRecord, images: &ImageUrls) -> DetailHeader {
    let date = record
        .release_date
        .as_deref()
        .filter(|d| !d.is_empty())
        .or(record.first_air_date.as_deref());

    DetailHeader {
        title: display_title(record.title.as_deref(), record.name.as_deref()),
        release_year: release_year(date).unwrap_or_else(|| "N/A".to_string()),
        runtime: match record.runtime {
            Some(minutes) if minutes > 0 => format!("{} min", minutes),
            _ => "N/A".to_string(),
        },
        genres: if record.genres.is_empty() {
            "N/A".to_string()
        } else {
            record.genres.iter().map(|g| g.name.as_str()).collect::<Vec<_>>().join(", ")
        },
        user_score: record
            .vote_average
            .filter(|v| *v > 0.0)
            .map(|v| (v * 10.0).round() as u32),
        tagline: record.tagline.clone().filter(|t| !t.is_empty()),
        overview: record
            .overview
            .clone()
            .filter(|o| !o.is_empty())
            .unwrap_or_else(|| NO_OVERVIEW.to_string()),
        poster_url: images.poster(record.poster_path.as_deref()),
        backdrop_url: images.backdrop(record.backdrop_path.as_deref()),
    }
}

fn trailer(record: &DetailRecord) -> TrailerTrigger {
    record
        .videos
        .iter()
        .flat_map(|videos| videos.results.iter())
        .find_map(|video| {
            let key = video.key.as_deref().filter(|k| !k.is_empty())?;
            (video.site == "YouTube" && video.kind == "Trailer").then(|| TrailerTrigger::Available {
                key: key.to_string(),
                name: video.name.clone(),
            })
        })
        .unwrap_or(TrailerTrigger::Unavailable)
}

fn cast(record: &DetailRecord, images: &ImageUrls) -> Vec<CastMember> {
    record
        .credits
        .iter()
        .flat_map(|credits| credits.cast.iter())
        .filter(|member| member.profile_path.as_deref().is_some_and(|p| !p.is_empty()))
        .take(MAX_CAST)
        .map(|member| CastMember {
            name: member.name.clone(),
            character: member
                .character
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "N/A".to_string()),
            profile_url: images.profile(member.profile_path.as_deref()),
        })
        .collect()
}

fn crew(record: &DetailRecord) -> CrewSummary {
    let Some(credits) = &record.credits else {
        return CrewSummary::default();
    };

    CrewSummary {
        director: credits
            .crew
            .iter()
            .find(|c| c.job.as_deref() == Some("Director"))
            .map(|c| c.name.clone()),
        writers: credits
            .crew
            .iter()
            .filter(|c| c.department.as_deref() == Some("Writing"))
            .map(|c| c.name.clone())
            .collect(),
    }
}

fn providers(record: &DetailRecord, images: &ImageUrls, region: &str) -> WatchProviders {
    let Some(entry) = record
        .watch_providers
        .as_ref()
        .and_then(|wp| wp.results.get(region))
    else {
        return WatchProviders::NoRegion {
            region: region.to_string(),
        };
    };

    WatchProviders::Groups {
        link: entry.link.clone(),
        groups: provider_groups(entry, images),
    }
}

fn provider_groups(entry: &RegionProviders, images: &ImageUrls) -> Vec<ProviderGroup> {
    let to_entries = |providers: &[Provider]| -> Vec<ProviderEntry> {
        providers
            .iter()
            .map(|p| ProviderEntry {
                name: p.provider_name.clone(),
                logo_url: images.logo(p.logo_path.as_deref()),
            })
            .collect()
    };

    [("Stream", &entry.flatrate), ("Rent", &entry.rent), ("Buy", &entry.buy)]
        .into_iter()
        .filter(|(_, providers)| !providers.is_empty())
        .map(|(title, providers)| ProviderGroup {
            title,
            providers: to_entries(providers.as_slice()),
        })
        .collect()
}

fn recommendations(record: &DetailRecord, images: &ImageUrls) -> Vec<Recommendation> {
    record
        .recommendations
        .iter()
        .flat_map(|page| page.results.iter())
        .filter(|title| title.has_poster())
        .take(MAX_RECOMMENDATIONS)
        .map(|title| Recommendation {
            id: title.id,
            title: title.display_title(),
            poster_url: images.poster(title.poster_path.as_deref()),
        })
        .collect()
}

fn reviews(record: &DetailRecord) -> Vec<ReviewSnippet> {
    record
        .reviews
        .iter()
        .flat_map(|reviews| reviews.results.iter())
        .take(MAX_REVIEWS)
        .map(|review| ReviewSnippet {
            author: review.author.clone(),
            content: truncate_review(&review.content),
            date: review
                .created_at
                .as_deref()
                .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
                .map(|dt| dt.format("%b %-d, %Y").to_string()),
        })
        .collect()
}

pub fn truncate_review(content: &str) -> String {
    if content.chars().count() > REVIEW_PREVIEW_CHARS {
        let preview: String = content.chars().take(REVIEW_PREVIEW_CHARS).collect();
        format!("{}...", preview)
    } else {
        content.to_string()
    }
}
