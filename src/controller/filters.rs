//! Genre and language filter options

use crate::model::{FilterOptions, LanguageInfo, LanguageOption, QueryState, BASE_PATH};
use super::AppController;

/// Languages offered in the language filter, in display order
pub const POPULAR_LANGUAGES: [(&str, &str); 9] = [
    ("en", "English"),
    ("hi", "Hindi"),
    ("te", "Telugu"),
    ("ta", "Tamil"),
    ("fr", "French"),
    ("ko", "Korean"),
    ("ja", "Japanese"),
    ("es", "Spanish"),
    ("de", "German"),
];

/// Popular languages the service reports as supported
pub fn popular_languages(supported: &[LanguageInfo]) -> Vec<LanguageOption> {
    POPULAR_LANGUAGES
        .iter()
        .filter(|(code, _)| supported.iter().any(|l| l.iso_639_1 == *code))
        .map(|(code, name)| LanguageOption {
            code: code.to_string(),
            name: name.to_string(),
        })
        .collect()
}

impl AppController {
    /// Both lists are requested together; a failure only disables its control
    pub async fn load_filters(&self) {
        let (genres, languages) = futures::join!(self.api.genres(), self.api.languages());

        let mut filters = self.model.filters.lock().await;
        filters.genres = match genres {
            Ok(genres) => {
                tracing::debug!(count = genres.len(), "Genres loaded");
                FilterOptions::Ready(genres)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error loading genres");
                FilterOptions::Unavailable
            }
        };
        filters.languages = match languages {
            Ok(supported) => FilterOptions::Ready(popular_languages(&supported)),
            Err(e) => {
                tracing::error!(error = %e, "Error loading languages");
                FilterOptions::Unavailable
            }
        };
    }

    pub async fn cycle_genre(&self, forward: bool) {
        let changed = self.model.filters.lock().await.cycle_genre(forward);
        if changed {
            self.apply_filters().await;
        }
    }

    pub async fn cycle_language(&self, forward: bool) {
        let changed = self.model.filters.lock().await.cycle_language(forward);
        if changed {
            self.apply_filters().await;
        }
    }

    /// A filter change clears the search text and reloads with both filters
    async fn apply_filters(&self) {
        self.search_debounce.cancel().await;
        let (genre_id, language_code) = {
            let filters = self.model.filters.lock().await;
            (filters.selected_genre_id(), filters.selected_language())
        };
        tracing::debug!(?genre_id, ?language_code, "Filters changed");

        self.model.clear_search_input().await;
        self.model.results.lock().await.query = QueryState {
            search_text: String::new(),
            genre_id,
            language_code,
        };
        self.model.push_location(BASE_PATH).await;
        self.reset_and_load(false).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_supported_popular_languages_are_offered() {
        let supported = vec![
            LanguageInfo { iso_639_1: "de".into(), english_name: Some("German".into()) },
            LanguageInfo { iso_639_1: "xx".into(), english_name: None },
            LanguageInfo { iso_639_1: "en".into(), english_name: Some("English".into()) },
        ];
        let offered = popular_languages(&supported);
        let codes: Vec<_> = offered.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, vec!["en", "de"]);
        assert_eq!(offered[0].name, "English");
    }
}
