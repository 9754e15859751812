use crate::types::{Embed, FeedItem, LiveSourceSpec, MessageId, Result};
use async_trait::async_trait;

/// Upstream system that items are polled from.
///
/// The source also owns the seen bit: it lives on the upstream record and
/// is only written through `mark_seen`.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// The feed this source reads from
    fn source(&self) -> &LiveSourceSpec;

    /// Fetch at most `limit` of the most recent items, newest first
    async fn fetch_recent(&self, limit: usize) -> Result<Vec<FeedItem>>;

    /// Persist the seen bit on the upstream record
    async fn mark_seen(&self, item: &FeedItem) -> Result<()>;
}

/// Destination channel that announcements are written to.
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn create_message(&self, embed: &Embed) -> Result<MessageId>;

    /// Highlight a created message for followers. Not every channel supports it.
    async fn publish_message(&self, id: MessageId) -> Result<()>;

    async fn fetch_message(&self, id: MessageId) -> Result<Embed>;

    async fn edit_message(&self, id: MessageId, embed: &Embed) -> Result<()>;
}
