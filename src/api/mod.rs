//! Private API module.
//!
//! This module provides:
//! - The `SavedMediaApi` trait the rest of the tool is written against
//! - A reqwest-backed client for the private REST API
//! - API response types

pub mod client;
pub mod types;

#[cfg(test)]
pub mod mock;

use async_trait::async_trait;

use crate::error::Result;
use crate::session::SessionState;

pub use client::InstaClient;
pub use types::*;

/// Operations the batch job needs from the private API.
///
/// The concrete protocol (endpoints, signing, cookies) lives behind this
/// seam so the auth flow, pagination and item processing can be exercised
/// against a mock.
#[async_trait]
pub trait SavedMediaApi: Send + Sync {
    /// Perform a fresh credential login, reusing `device_id` when one is
    /// carried over from an expired session.
    async fn login(
        &self,
        username: &str,
        password: &str,
        device_id: Option<&str>,
    ) -> Result<SessionState>;

    /// Resume a cached session, verifying it is still accepted.
    async fn resume(&self, cached: SessionState) -> Result<SessionState>;

    /// Fetch one page of the saved-items feed.
    async fn saved_feed(&self, max_id: Option<&str>) -> Result<SavedFeedPage>;

    /// Remove an item from the saved collection.
    async fn unsave(&self, media_id: &str) -> Result<()>;

    /// Fetch a URL and return the raw body bytes.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
