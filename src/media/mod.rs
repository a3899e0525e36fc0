//! Media-type dispatch.

use crate::api::types::Media;

/// `media_type` discriminant for a single image.
pub const MEDIA_TYPE_PHOTO: i64 = 1;

/// `media_type` discriminant for a carousel post.
pub const MEDIA_TYPE_CAROUSEL: i64 = 8;

/// Kind of media content, derived from the wire discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Carousel,
    /// Videos and anything else; skipped without error.
    Other,
}

impl MediaKind {
    pub fn from_code(code: i64) -> Self {
        match code {
            MEDIA_TYPE_PHOTO => MediaKind::Photo,
            MEDIA_TYPE_CAROUSEL => MediaKind::Carousel,
            _ => MediaKind::Other,
        }
    }
}

/// Image URLs to download for one media record.
///
/// Photos yield their first candidate URL, carousels the first candidate of
/// every entry. Other media types (videos etc.) yield nothing and are
/// skipped without error.
pub fn image_urls(media: &Media) -> Vec<String> {
    match MediaKind::from_code(media.media_type) {
        MediaKind::Photo => media
            .image_versions2
            .as_ref()
            .and_then(|versions| versions.candidates.first())
            .map(|candidate| vec![candidate.url.clone()])
            .unwrap_or_default(),
        MediaKind::Carousel => media
            .carousel_media
            .iter()
            .filter_map(|entry| {
                entry
                    .image_versions2
                    .as_ref()
                    .and_then(|versions| versions.candidates.first())
                    .map(|candidate| candidate.url.clone())
            })
            .collect(),
        MediaKind::Other => Vec::new(),
    }
}
