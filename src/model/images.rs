//! Image and embed URL construction

pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/360x540?text=No+Poster";
pub const PLACEHOLDER_PROFILE: &str = "https://placehold.co/185x278/cccccc/333333?text=No+Photo";
pub const PLACEHOLDER_LOGO: &str = "https://placehold.co/45x45/cccccc/333333?text=N/A";
pub const YOUTUBE_EMBED_URL: &str = "https://www.youtube.com/embed/";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageSize {
    Poster,
    Backdrop,
    Profile,
    Original,
}

impl ImageSize {
    fn segment(self) -> &'static str {
        match self {
            ImageSize::Poster => "w500",
            ImageSize::Backdrop => "w1280",
            ImageSize::Profile => "w185",
            ImageSize::Original => "original",
        }
    }

    fn placeholder(self) -> Option<&'static str> {
        match self {
            ImageSize::Poster => Some(PLACEHOLDER_POSTER),
            ImageSize::Profile => Some(PLACEHOLDER_PROFILE),
            ImageSize::Original => Some(PLACEHOLDER_LOGO),
            ImageSize::Backdrop => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ImageUrls {
    base_url: String,
}

impl ImageUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// `None` only for size classes without a placeholder (backdrops)
    pub fn url(&self, size: ImageSize, path: Option<&str>) -> Option<String> {
        match path.filter(|p| !p.is_empty()) {
            Some(path) => Some(format!("{}/{}{}", self.base_url, size.segment(), path)),
            None => size.placeholder().map(str::to_string),
        }
    }

    pub fn poster(&self, path: Option<&str>) -> String {
        self.url(ImageSize::Poster, path).unwrap_or_else(|| PLACEHOLDER_POSTER.to_string())
    }

    pub fn profile(&self, path: Option<&str>) -> String {
        self.url(ImageSize::Profile, path).unwrap_or_else(|| PLACEHOLDER_PROFILE.to_string())
    }

    pub fn logo(&self, path: Option<&str>) -> String {
        self.url(ImageSize::Original, path).unwrap_or_else(|| PLACEHOLDER_LOGO.to_string())
    }

    pub fn backdrop(&self, path: Option<&str>) -> Option<String> {
        self.url(ImageSize::Backdrop, path)
    }
}

impl Default for ImageUrls {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_IMAGE_BASE_URL)
    }
}

pub fn trailer_embed_url(key: &str) -> String {
    format!("{}{}?autoplay=1", YOUTUBE_EMBED_URL, key)
}
