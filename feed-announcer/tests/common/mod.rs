#![allow(dead_code)]

use async_trait::async_trait;
use feed_announcer::{
    AnnouncerError, Embed, FeedItem, FeedSource, LiveSourceSpec, MessageId, MessageSink, Result,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, Once};

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub fn item(id: &str, title: &str, body: &str) -> FeedItem {
    FeedItem {
        id: id.to_string(),
        title: title.to_string(),
        author: Some("puzzlemaster".to_string()),
        created_at: 1_700_000_000,
        body: body.to_string(),
        url: Some(format!("https://redd.it/{}", id)),
        seen: false,
    }
}

/// Feed source holding items in memory, newest first
pub struct MemorySource {
    spec: LiveSourceSpec,
    items: Mutex<Vec<FeedItem>>,
    fetch_failures: Mutex<VecDeque<AnnouncerError>>,
    pub fetch_calls: AtomicUsize,
    pub marked: Mutex<Vec<String>>,
}

impl MemorySource {
    pub fn new(items: Vec<FeedItem>) -> Self {
        Self {
            spec: LiveSourceSpec::new("Arithmancy"),
            items: Mutex::new(items),
            fetch_failures: Mutex::new(VecDeque::new()),
            fetch_calls: AtomicUsize::new(0),
            marked: Mutex::new(Vec::new()),
        }
    }

    /// Queue errors returned by the next fetches, in order
    pub fn fail_next_fetches(&self, errors: Vec<AnnouncerError>) {
        self.fetch_failures.lock().unwrap().extend(errors);
    }

    pub fn marked(&self) -> Vec<String> {
        self.marked.lock().unwrap().clone()
    }

    pub fn is_seen(&self, id: &str) -> bool {
        self.items.lock().unwrap().iter().any(|i| i.id == id && i.seen)
    }
}

#[async_trait]
impl FeedSource for MemorySource {
    fn source(&self) -> &LiveSourceSpec {
        &self.spec
    }

    async fn fetch_recent(&self, limit: usize) -> Result<Vec<FeedItem>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.fetch_failures.lock().unwrap().pop_front() {
            return Err(error);
        }
        Ok(self.items.lock().unwrap().iter().take(limit).cloned().collect())
    }

    async fn mark_seen(&self, item: &FeedItem) -> Result<()> {
        let mut items = self.items.lock().unwrap();
        if let Some(stored) = items.iter_mut().find(|i| i.id == item.id) {
            stored.seen = true;
        }
        self.marked.lock().unwrap().push(item.id.clone());
        Ok(())
    }
}

/// Destination channel that records every call
pub struct MemorySink {
    next_id: AtomicU64,
    pub fail_create: AtomicBool,
    pub created: Mutex<Vec<(MessageId, Embed)>>,
    pub edited: Mutex<Vec<(MessageId, Embed)>>,
    pub publish_calls: AtomicUsize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1000),
            fail_create: AtomicBool::new(false),
            created: Mutex::new(Vec::new()),
            edited: Mutex::new(Vec::new()),
            publish_calls: AtomicUsize::new(0),
        }
    }

    pub fn created(&self) -> Vec<(MessageId, Embed)> {
        self.created.lock().unwrap().clone()
    }

    pub fn edited(&self) -> Vec<(MessageId, Embed)> {
        self.edited.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSink for MemorySink {
    async fn create_message(&self, embed: &Embed) -> Result<MessageId> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(AnnouncerError::Sink("channel unavailable".to_string()));
        }
        let id = MessageId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.created.lock().unwrap().push((id, embed.clone()));
        Ok(id)
    }

    async fn publish_message(&self, _id: MessageId) -> Result<()> {
        self.publish_calls.fetch_add(1, Ordering::SeqCst);
        Err(AnnouncerError::Sink("not an announcement channel".to_string()))
    }

    async fn fetch_message(&self, id: MessageId) -> Result<Embed> {
        self.created
            .lock()
            .unwrap()
            .iter()
            .find(|(created, _)| *created == id)
            .map(|(_, embed)| embed.clone())
            .ok_or_else(|| AnnouncerError::Sink(format!("unknown message {}", id)))
    }

    async fn edit_message(&self, id: MessageId, embed: &Embed) -> Result<()> {
        self.edited.lock().unwrap().push((id, embed.clone()));
        Ok(())
    }
}
