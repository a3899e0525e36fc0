//! Saved-feed pagination.

use crate::api::types::FeedItem;
use crate::api::SavedMediaApi;
use crate::error::Result;

/// Fetch every page of the saved feed and accumulate the items in order.
///
/// Pagination follows the server cursor (`next_max_id`) until it is omitted;
/// there is no loop guard and no bound on the accumulated size.
pub async fn collect_saved<A: SavedMediaApi + ?Sized>(api: &A) -> Result<Vec<FeedItem>> {
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = api.saved_feed(cursor.as_deref()).await?;
        tracing::debug!(
            "saved feed page: {} items, next cursor: {:?}",
            page.items.len(),
            page.next_max_id
        );

        items.extend(page.items);

        match page.next_max_id {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    Ok(items)
}
