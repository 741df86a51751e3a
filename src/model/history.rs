//! Address paths and the navigable history of them
//!
//! `/` is the list view and `/{slug}-{id}` a detail view. Only the trailing
//! numeric id of a detail path is authoritative; the slug is cosmetic.

use once_cell::sync::Lazy;
use regex::Regex;

pub const BASE_PATH: &str = "/";

static NON_ALNUM_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("slug regex should compile"));
static TRAILING_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-(\d+)$").expect("detail path regex should compile"));

pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    NON_ALNUM_RUN
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

pub fn detail_path(title: &str, id: u64) -> String {
    format!("/{}-{}", slugify(title), id)
}

pub fn parse_detail_id(path: &str) -> Option<u64> {
    TRAILING_ID
        .captures(path)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Browser-style session history: pushing drops the forward entries
#[derive(Clone, Debug)]
pub struct History {
    entries: Vec<String>,
    cursor: usize,
}

impl History {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    pub fn push(&mut self, path: impl Into<String>) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(path.into());
        self.cursor = self.entries.len() - 1;
    }

    /// Returns false when already at the oldest entry
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(BASE_PATH)
    }
}
