use crate::traits::FeedSource;
use crate::types::{FeedItem, Result};
use std::sync::Arc;
use tracing::debug;

/// Tracks which items were already announced through the seen bit the
/// feed source keeps on each record.
///
/// Checking and marking are separate calls. A crash between announcing and
/// marking re-announces the item on the next poll.
pub struct SeenTracker {
    source: Arc<dyn FeedSource>,
}

impl SeenTracker {
    pub fn new(source: Arc<dyn FeedSource>) -> Self {
        Self { source }
    }

    pub fn is_seen(&self, item: &FeedItem) -> bool {
        item.seen
    }

    /// Write the seen bit upstream, then mirror it on the local copy.
    pub async fn mark_seen(&self, item: &mut FeedItem) -> Result<()> {
        if item.seen {
            return Ok(());
        }
        self.source.mark_seen(item).await?;
        item.seen = true;
        debug!("Marked item {} as seen", item.id);
        Ok(())
    }
}
