//! Per-item unsave and image download driver.

use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::api::types::FeedItem;
use crate::api::SavedMediaApi;
use crate::error::Result;
use crate::fs::hashed_filename;
use crate::media::image_urls;

/// Counters for one run.
#[derive(Debug, Default)]
pub struct RunStats {
    pub items: u64,
    pub unsaved: u64,
    pub images_downloaded: u64,
    pub items_skipped: u64,
}

/// Process every accumulated saved item in order.
///
/// Each item is unsaved first and its images downloaded afterwards. Any
/// failure below this point is fatal; there is no per-item recovery or
/// checkpointing.
pub async fn process_saved_items<A: SavedMediaApi + ?Sized>(
    api: &A,
    items: &[FeedItem],
    target_dir: &Path,
) -> Result<RunStats> {
    let mut stats = RunStats::default();

    tokio::fs::create_dir_all(target_dir).await?;

    for item in items {
        stats.items += 1;

        // Unsave response value is unused; transport errors abort the run
        api.unsave(&item.media.id).await?;
        stats.unsaved += 1;

        let urls = image_urls(&item.media);
        if urls.is_empty() {
            tracing::debug!(
                "skipping media {} (media_type {})",
                item.media.id,
                item.media.media_type
            );
            stats.items_skipped += 1;
            continue;
        }

        for url in &urls {
            let path = save_image(api, url, target_dir).await?;
            tracing::info!("Downloaded: {}", path.display());
            stats.images_downloaded += 1;
        }
    }

    Ok(stats)
}

/// Fetch one image URL and write the raw body to its hash-named file.
async fn save_image<A: SavedMediaApi + ?Sized>(
    api: &A,
    url: &str,
    target_dir: &Path,
) -> Result<PathBuf> {
    let output_path = target_dir.join(hashed_filename(url));

    let body = api.fetch(url).await?;

    let mut file = File::create(&output_path).await?;
    file.write_all(&body).await?;
    file.flush().await?;

    Ok(output_path)
}
