use crate::announcer::{compose, Announcer};
use crate::classifier::{classify, marker};
use crate::dedup::SeenTracker;
use crate::processing::TextPipeline;
use crate::traits::{FeedSource, MessageSink};
use crate::types::{AnnouncementRecord, AnnouncerError, FeedItem, MessageId, PollConfig, Result};
use crate::utils::time;
use backoff::backoff::{Backoff, Constant};
use std::sync::Arc;
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// Sent to whoever triggered a manual resend, before the pipeline runs.
pub const RESEND_ACK: &str = "Resending last announcement!";

/// Outcome of one successful poll cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub fetched: usize,
    pub announced: usize,
    pub skipped: usize,
}

/// Polls the feed source on a fixed interval and announces unseen items.
///
/// Cycles never overlap: the next tick waits for the previous cycle,
/// including any cooldown after a failure.
pub struct Poller {
    source: Arc<dyn FeedSource>,
    tracker: SeenTracker,
    pipeline: TextPipeline,
    announcer: Announcer,
    config: PollConfig,
    cooldown: Constant,
}

impl Poller {
    pub fn new(
        source: Arc<dyn FeedSource>,
        sink: Arc<dyn MessageSink>,
        pipeline: TextPipeline,
        config: PollConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            tracker: SeenTracker::new(source.clone()),
            source,
            pipeline,
            announcer: Announcer::new(sink),
            cooldown: Constant::new(config.cooldown()),
            config,
        })
    }

    pub fn log_readiness(&self) {
        let (now, offset) = time::local_now();
        info!("Logged in: {}", now);
        info!("Timezone: UTC{}", offset);
        info!("Feed source: {}", self.source.source());
        info!(
            "Checking {} posts every {} seconds",
            self.config.batch_size, self.config.interval_seconds
        );
    }

    /// Poll forever. Only process termination stops the loop.
    pub async fn run(&mut self) {
        self.log_readiness();

        // Delay keeps a slow cycle from being followed by a burst of ticks
        let mut ticker = interval(self.config.interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.tick().await;
        }
    }

    /// Run one cycle; on failure log it and wait out the cooldown
    pub async fn tick(&mut self) -> Option<CycleReport> {
        match self.poll_once().await {
            Ok(report) => {
                self.cooldown.reset();
                if report.announced > 0 {
                    info!(
                        "Announced {} of {} fetched items",
                        report.announced, report.fetched
                    );
                }
                Some(report)
            }
            Err(e) => {
                if e.is_transient() {
                    warn!("Poll cycle failed: {}", e);
                } else {
                    error!("Poll cycle failed: {}", e);
                }
                // Constant backoff always yields the configured cooldown
                let delay = self.cooldown.next_backoff().unwrap_or_else(|| self.config.cooldown());
                debug!("Cooling down for {:?}", delay);
                sleep(delay).await;
                None
            }
        }
    }

    /// Fetch the latest batch and announce every unseen item, newest first.
    ///
    /// The first failure ends the cycle; items after it wait for the next one.
    pub async fn poll_once(&self) -> Result<CycleReport> {
        let items = self.source.fetch_recent(self.config.batch_size).await?;
        let mut report = CycleReport {
            fetched: items.len(),
            ..Default::default()
        };

        for mut item in items {
            if self.tracker.is_seen(&item) {
                report.skipped += 1;
                continue;
            }
            // Mark only after the announcement went out
            self.process_item(&item, None).await?;
            self.tracker.mark_seen(&mut item).await?;
            report.announced += 1;
        }

        Ok(report)
    }

    /// Announce the most recent item again, ignoring the seen bit.
    ///
    /// With `message_id` the earlier announcement is edited in place.
    pub async fn resend(&self, message_id: Option<MessageId>) -> Result<AnnouncementRecord> {
        info!("Received resend command");
        let item = self
            .source
            .fetch_recent(1)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AnnouncerError::Source(format!("no items in {}", self.source.source())))?;

        let message_id = self.process_item(&item, message_id).await?;
        Ok(AnnouncementRecord {
            item_id: item.id,
            message_id,
        })
    }

    async fn process_item(&self, item: &FeedItem, message_id: Option<MessageId>) -> Result<MessageId> {
        info!(
            "Received item {} by {} at {}",
            item.id,
            item.author.as_deref().unwrap_or("[deleted]"),
            time::format_timestamp(item.created_at)
        );

        // Classify, reformat, then build the destination title and body
        let category = classify(&item.title);
        let transformed = self.pipeline.transform(item, category);
        let (title, body) = compose(marker(&item.title), item, &transformed);

        match message_id {
            None => self.announcer.announce(&title, &body, item.url.as_deref()).await,
            Some(id) => {
                self.announcer.update(id, &title, &body, item.url.as_deref()).await?;
                Ok(id)
            }
        }
    }
}
