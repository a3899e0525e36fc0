//! IG Saved Collection Downloader
//!
//! This library implements a linear batch job against the Instagram private
//! API: establish (or reuse) a session, paginate the authenticated user's
//! saved collection, download the images and unsave each item.
//!
//! # Features
//!
//! - Session caching to a JSON settings file, with tagged base64 encoding
//!   for binary fields
//! - Retry-once re-login when a cached session has expired
//! - Cursor pagination of the saved feed
//! - Carousel-aware image downloads named by the SHA-1 of the URL basename
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use ig_saved_downloader::{
//!     api::InstaClient,
//!     auth::{authenticate, Credentials},
//!     download::process_saved_items,
//!     feed::collect_saved,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = InstaClient::new()?;
//!     let creds = Credentials {
//!         username: "someuser".into(),
//!         password: "secret".into(),
//!     };
//!
//!     authenticate(&api, &creds, Path::new("settings.json")).await?;
//!     let items = collect_saved(&api).await?;
//!     process_saved_items(&api, &items, Path::new("downloads")).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod cli;
pub mod download;
pub mod error;
pub mod feed;
pub mod fs;
pub mod media;
pub mod output;
pub mod session;

// Re-exports for convenience
pub use api::{InstaClient, SavedMediaApi};
pub use auth::{authenticate, Credentials};
pub use download::{process_saved_items, RunStats};
pub use error::{Error, Result};
pub use feed::collect_saved;
pub use session::{SessionState, SessionValue};
