//! Scriptable API mock for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::types::*;
use crate::api::SavedMediaApi;
use crate::error::{Error, Result};
use crate::session::store::keys;
use crate::session::{SessionState, SessionValue};

/// In-memory API double that serves scripted feed pages and records calls.
#[derive(Default)]
pub struct MockApi {
    pages: Mutex<VecDeque<SavedFeedPage>>,
    resume_error: Mutex<Option<Error>>,
    pub feed_calls: AtomicUsize,
    pub resume_calls: AtomicUsize,
    /// Device IDs passed to each login call.
    pub login_calls: Mutex<Vec<Option<String>>>,
    pub unsaved: Mutex<Vec<String>>,
    pub fetched: Mutex<Vec<String>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pages(pages: Vec<SavedFeedPage>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            ..Self::default()
        }
    }

    /// Make the next resume call fail with the given error.
    pub fn fail_resume_with(self, err: Error) -> Self {
        *self.resume_error.lock().unwrap() = Some(err);
        self
    }
}

#[async_trait]
impl SavedMediaApi for MockApi {
    async fn login(
        &self,
        _username: &str,
        _password: &str,
        device_id: Option<&str>,
    ) -> Result<SessionState> {
        self.login_calls
            .lock()
            .unwrap()
            .push(device_id.map(str::to_owned));

        let mut state = SessionState::new();
        state.insert(
            keys::DEVICE_ID,
            SessionValue::Text(device_id.unwrap_or("android-mock").to_string()),
        );
        state.insert(
            keys::COOKIE,
            SessionValue::Bytes(b"sessionid=mock".to_vec()),
        );
        Ok(state)
    }

    async fn resume(&self, cached: SessionState) -> Result<SessionState> {
        self.resume_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.resume_error.lock().unwrap().take() {
            return Err(err);
        }
        Ok(cached)
    }

    async fn saved_feed(&self, _max_id: Option<&str>) -> Result<SavedFeedPage> {
        self.feed_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }

    async fn unsave(&self, media_id: &str) -> Result<()> {
        self.unsaved.lock().unwrap().push(media_id.to_string());
        Ok(())
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.fetched.lock().unwrap().push(url.to_string());
        Ok(b"imagebytes".to_vec())
    }
}

fn candidates(urls: &[&str]) -> ImageVersions {
    ImageVersions {
        candidates: urls
            .iter()
            .map(|url| ImageCandidate {
                url: url.to_string(),
                width: Some(1080),
                height: Some(1080),
            })
            .collect(),
    }
}

/// A feed item holding a single image.
pub fn photo_item(id: &str, url: &str) -> FeedItem {
    FeedItem {
        media: Media {
            id: id.to_string(),
            media_type: 1,
            image_versions2: Some(candidates(&[url])),
            carousel_media: Vec::new(),
        },
    }
}

/// A feed item holding a carousel with one image per entry.
pub fn carousel_item(id: &str, urls: &[&str]) -> FeedItem {
    FeedItem {
        media: Media {
            id: id.to_string(),
            media_type: 8,
            image_versions2: None,
            carousel_media: urls
                .iter()
                .enumerate()
                .map(|(i, url)| CarouselEntry {
                    id: Some(format!("{}_{}", id, i)),
                    image_versions2: Some(candidates(&[url])),
                })
                .collect(),
        },
    }
}

/// A feed item of some other media type (video etc).
pub fn other_item(id: &str, media_type: i64) -> FeedItem {
    FeedItem {
        media: Media {
            id: id.to_string(),
            media_type,
            image_versions2: None,
            carousel_media: Vec::new(),
        },
    }
}

/// A feed page of photo items, with an optional next cursor.
pub fn page(ids: &[&str], next_max_id: Option<&str>) -> SavedFeedPage {
    SavedFeedPage {
        items: ids
            .iter()
            .map(|id| photo_item(id, &format!("https://cdn.example.com/{}.jpg", id)))
            .collect(),
        next_max_id: next_max_id.map(str::to_owned),
        more_available: next_max_id.is_some(),
    }
}
