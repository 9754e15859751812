use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The named upstream feed that items are pulled from (e.g. a subreddit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveSourceSpec {
    pub uri: String,
}

impl LiveSourceSpec {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

impl fmt::Display for LiveSourceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

/// One unit of content fetched from the feed source.
///
/// `seen` belongs to the upstream record. It is read when the item is
/// fetched and written back through the source, never stored locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: String,
    pub title: String,
    pub author: Option<String>,
    /// Seconds since the unix epoch, as reported by the source.
    pub created_at: i64,
    pub body: String,
    pub url: Option<String>,
    pub seen: bool,
}

/// Identifier of a message created in the destination channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MessageId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(MessageId)
    }
}

/// Structured message posted to the destination channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub url: Option<String>,
    pub colour: u32,
}

/// Pairs a feed item with the destination message it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementRecord {
    pub item_id: String,
    pub message_id: MessageId,
}
