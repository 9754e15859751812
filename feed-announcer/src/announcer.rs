use crate::processing::Transformed;
use crate::traits::MessageSink;
use crate::types::{Embed, FeedItem, MessageId, Result};
use crate::utils::text::truncate_field;
use std::sync::Arc;
use tracing::{debug, info};

pub const MAX_TITLE_LENGTH: usize = 256;
pub const MAX_DESCRIPTION_LENGTH: usize = 4096;

/// Discord blurple
pub const DEFAULT_COLOUR: u32 = 0x5865F2;

/// Compose the destination title and body for a transformed item
pub fn compose(marker: &str, item: &FeedItem, transformed: &Transformed) -> (String, String) {
    let title = format!("{}  |  **{}**", marker, transformed.title);
    let body = match &item.url {
        Some(url) => format!("{}\n\n{}", url, transformed.body),
        None => transformed.body.clone(),
    };
    (title, body)
}

/// Build a message, truncating fields to the destination's limits
pub fn build_embed(title: &str, description: &str, url: Option<&str>) -> Embed {
    Embed {
        title: truncate_field(title, MAX_TITLE_LENGTH),
        description: truncate_field(description, MAX_DESCRIPTION_LENGTH),
        url: url.map(str::to_string),
        colour: DEFAULT_COLOUR,
    }
}

/// Writes announcements into the fixed destination channel.
pub struct Announcer {
    sink: Arc<dyn MessageSink>,
}

impl Announcer {
    pub fn new(sink: Arc<dyn MessageSink>) -> Self {
        Self { sink }
    }

    /// Create a new message, then try to publish it
    pub async fn announce(&self, title: &str, body: &str, url: Option<&str>) -> Result<MessageId> {
        let embed = build_embed(title, body, url);
        let id = self.sink.create_message(&embed).await?;

        // Only announcement channels support publishing
        if let Err(e) = self.sink.publish_message(id).await {
            debug!("Could not publish message {}: {}", id, e);
        }

        info!("Sent announcement {}", id);
        Ok(id)
    }

    /// Replace the content of a message created earlier
    pub async fn update(&self, id: MessageId, title: &str, body: &str, url: Option<&str>) -> Result<()> {
        let previous = self.sink.fetch_message(id).await?;
        debug!("Replacing announcement {} titled {:?}", id, previous.title);

        let embed = build_embed(title, body, url);
        self.sink.edit_message(id, &embed).await?;

        info!("Edited announcement {}", id);
        Ok(())
    }
}
