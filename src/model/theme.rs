//! Persisted light/dark theme preference

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;

pub const THEME_KEY: &str = "flixorbit-theme";
const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ThemePreference {
    #[default]
    Dark,
    Light,
}

impl ThemePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Dark => "dark",
            ThemePreference::Light => "light",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(ThemePreference::Dark),
            "light" => Some(ThemePreference::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Dark => ThemePreference::Light,
            ThemePreference::Light => ThemePreference::Dark,
        }
    }

    /// Terminal colour scheme from `COLORFGBG` ("fg;bg"); light when the
    /// background is one of the bright ANSI colours
    pub fn from_colorfgbg(value: Option<&str>) -> Self {
        let background = value
            .and_then(|v| v.rsplit(';').next())
            .and_then(|bg| bg.trim().parse::<u8>().ok());
        match background {
            Some(7) | Some(9..=15) => ThemePreference::Light,
            _ => ThemePreference::Dark,
        }
    }

    pub fn system_default() -> Self {
        Self::from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
    }
}

/// Key-value preferences file; only the theme key is used
#[derive(Clone, Debug)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(cache_dir: &Path) -> Self {
        Self {
            path: cache_dir.join(PREFERENCES_FILE),
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn load(&self) -> Result<Option<ThemePreference>> {
        Ok(self
            .read_all()?
            .get(THEME_KEY)
            .and_then(|v| ThemePreference::parse(v)))
    }

    /// Stored preference, else the system default
    pub fn preferred(&self) -> ThemePreference {
        match self.load() {
            Ok(Some(theme)) => theme,
            Ok(None) => ThemePreference::system_default(),
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "Could not read preferences");
                ThemePreference::system_default()
            }
        }
    }

    pub fn save(&self, theme: ThemePreference) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let mut values = self.read_all().unwrap_or_default();
        values.insert(THEME_KEY.to_string(), theme.as_str().to_string());
        fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        tracing::debug!(theme = theme.as_str(), "Theme preference saved");
        Ok(())
    }
}
