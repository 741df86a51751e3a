//! Runtime configuration from command line flags and environment

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

pub const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Terminal movie browser backed by the TMDB API
#[derive(Parser, Debug, Clone)]
#[command(name = "flixorbit", version, about)]
pub struct Config {
    /// TMDB v3 API key
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Base URL of the metadata service
    #[arg(long, env = "TMDB_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// Base URL of the image CDN (size class and path are appended)
    #[arg(long, env = "TMDB_IMAGE_BASE_URL", default_value = DEFAULT_IMAGE_BASE_URL)]
    pub image_base_url: String,

    /// Region used for watch provider lookups
    #[arg(long, env = "FLIXORBIT_REGION", default_value = "US")]
    pub region: String,

    /// Directory holding the persisted preferences
    #[arg(long, env = "FLIXORBIT_CACHE_DIR", default_value = ".cache")]
    pub cache_dir: PathBuf,

    /// Directory for the rolling log files
    #[arg(long, env = "FLIXORBIT_LOG_DIR", default_value = ".logs")]
    pub log_dir: PathBuf,

    /// Location to open at startup, e.g. `/` or `/spider-man-no-way-home-634649`
    #[arg(default_value = "/")]
    pub path: String,
}

impl Config {
    pub fn from_args() -> Self {
        Self::parse()
    }

    pub fn start_path(&self) -> String {
        let trimmed = self.path.trim();
        if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{}", trimmed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_only_key_is_given() {
        let config = Config::try_parse_from(["flixorbit", "--api-key", "k"]).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.region, "US");
        assert_eq!(config.start_path(), "/");
    }

    #[test]
    fn start_path_gets_leading_slash() {
        let config =
            Config::try_parse_from(["flixorbit", "--api-key", "k", "dune-438631"]).unwrap();
        assert_eq!(config.start_path(), "/dune-438631");
    }
}
