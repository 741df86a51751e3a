//! Core type definitions for the application

use std::time::Instant;

use super::content::{Genre, LanguageOption};

/// Which section of the UI is currently active/focused
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActiveSection {
    Search,
    Genres,
    Languages,
    #[default]
    Results,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Genres,
            ActiveSection::Genres => ActiveSection::Languages,
            ActiveSection::Languages => ActiveSection::Results,
            ActiveSection::Results => ActiveSection::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Results,
            ActiveSection::Genres => ActiveSection::Search,
            ActiveSection::Languages => ActiveSection::Genres,
            ActiveSection::Results => ActiveSection::Languages,
        }
    }
}

/// Element that had focus before an overlay opened
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusTarget {
    ResultCard(usize),
}

/// Options of a filter control; a failed load disables the control
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FilterOptions<T> {
    #[default]
    Loading,
    Ready(Vec<T>),
    Unavailable,
}

impl<T> FilterOptions<T> {
    pub fn options(&self) -> &[T] {
        match self {
            FilterOptions::Ready(options) => options,
            _ => &[],
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, FilterOptions::Ready(_))
    }
}

/// Genre and language choices; index 0 of each selector means "any"
#[derive(Clone, Debug, Default)]
pub struct Filters {
    pub genres: FilterOptions<Genre>,
    pub languages: FilterOptions<LanguageOption>,
    pub genre_selected: usize,
    pub language_selected: usize,
}

impl Filters {
    pub fn genre_label(&self) -> String {
        match &self.genres {
            FilterOptions::Loading => "Loading...".to_string(),
            FilterOptions::Unavailable => "Genres unavailable".to_string(),
            FilterOptions::Ready(genres) => self
                .genre_selected
                .checked_sub(1)
                .and_then(|i| genres.get(i))
                .map(|g| g.name.clone())
                .unwrap_or_else(|| "All Genres".to_string()),
        }
    }

    pub fn language_label(&self) -> String {
        match &self.languages {
            FilterOptions::Loading => "Loading...".to_string(),
            FilterOptions::Unavailable => "Languages unavailable".to_string(),
            FilterOptions::Ready(languages) => self
                .language_selected
                .checked_sub(1)
                .and_then(|i| languages.get(i))
                .map(|l| l.name.clone())
                .unwrap_or_else(|| "Any Language".to_string()),
        }
    }

    pub fn selected_genre_id(&self) -> Option<u64> {
        self.genre_selected
            .checked_sub(1)
            .and_then(|i| self.genres.options().get(i))
            .map(|g| g.id)
    }

    pub fn selected_language(&self) -> Option<String> {
        self.language_selected
            .checked_sub(1)
            .and_then(|i| self.languages.options().get(i))
            .map(|l| l.code.clone())
    }

    /// Cycles the genre selector; returns false when the control is disabled
    pub fn cycle_genre(&mut self, forward: bool) -> bool {
        if !self.genres.is_enabled() {
            return false;
        }
        self.genre_selected = cycle(self.genre_selected, self.genres.options().len() + 1, forward);
        true
    }

    pub fn cycle_language(&mut self, forward: bool) -> bool {
        if !self.languages.is_enabled() {
            return false;
        }
        self.language_selected = cycle(self.language_selected, self.languages.options().len() + 1, forward);
        true
    }

    pub fn clear_selection(&mut self) {
        self.genre_selected = 0;
        self.language_selected = 0;
    }
}

fn cycle(current: usize, len: usize, forward: bool) -> usize {
    if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    }
}

/// UI state for the application
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub search_input: String,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub show_help_popup: bool,
}
