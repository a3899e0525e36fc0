//! API response type definitions.

use serde::Deserialize;

/// One page of the saved-items feed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SavedFeedPage {
    #[serde(default)]
    pub items: Vec<FeedItem>,
    /// Opaque pagination cursor; absent on the last page.
    pub next_max_id: Option<String>,
    #[serde(default)]
    pub more_available: bool,
}

/// An entry in the saved feed, wrapping the media record.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedItem {
    pub media: Media,
}

/// A media record from the feed.
#[derive(Debug, Clone, Deserialize)]
pub struct Media {
    pub id: String,
    /// Discriminant: 1 = single image, 8 = carousel.
    pub media_type: i64,
    pub image_versions2: Option<ImageVersions>,
    #[serde(default)]
    pub carousel_media: Vec<CarouselEntry>,
}

/// One entry of a carousel post.
#[derive(Debug, Clone, Deserialize)]
pub struct CarouselEntry {
    pub id: Option<String>,
    pub image_versions2: Option<ImageVersions>,
}

/// Image renditions for a media record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageVersions {
    /// Candidate URLs, best resolution first.
    #[serde(default)]
    pub candidates: Vec<ImageCandidate>,
}

/// A single image rendition.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageCandidate {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Login endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub status: String,
    pub logged_in_user: Option<LoggedInUser>,
}

/// Authenticated user record returned by the login endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggedInUser {
    pub pk: i64,
    pub username: Option<String>,
}

/// Minimal envelope for endpoints where only the status matters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: String,
    pub message: Option<String>,
    pub error_type: Option<String>,
}
