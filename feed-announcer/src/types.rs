use std::time::Duration;

// Use the interfaces crate for core types
pub use interfaces::defs::{AnnouncementRecord, Embed, FeedItem, LiveSourceSpec, MessageId};

pub const DEFAULT_SUBREDDIT: &str = "Arithmancy";

#[derive(Debug, Clone)]
pub struct PollConfig {
    pub source: LiveSourceSpec,
    pub interval_seconds: u64,
    pub batch_size: usize,
    pub cooldown_seconds: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            source: LiveSourceSpec::new(DEFAULT_SUBREDDIT),
            interval_seconds: 5,
            batch_size: 5,
            cooldown_seconds: 10,
        }
    }
}

impl PollConfig {
    pub fn validate(&self) -> Result<()> {
        if self.interval_seconds == 0 {
            return Err(AnnouncerError::Config("polling interval must be at least one second".to_string()));
        }
        if self.batch_size == 0 {
            return Err(AnnouncerError::Config("batch size must be at least one item".to_string()));
        }
        if self.source.uri.trim().is_empty() {
            return Err(AnnouncerError::Config("feed source identifier is empty".to_string()));
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_seconds)
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Character limit applied to bodies before the ellipsis is appended.
    pub trim_limit: usize,
    /// Upper bound on table runs replaced in a single body.
    pub max_table_runs: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            trim_limit: 600,
            max_table_runs: 32,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RedditConfig {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
    pub user_agent: String,
    pub token_url: String,
    pub api_base: String,
    pub timeout_seconds: u64,
}

impl RedditConfig {
    pub const TOKEN_URL: &'static str = "https://www.reddit.com/api/v1/access_token";
    pub const API_BASE: &'static str = "https://oauth.reddit.com";
}

#[derive(Debug, Clone)]
pub struct DiscordConfig {
    pub token: String,
    pub channel_id: u64,
    pub api_base: String,
    pub timeout_seconds: u64,
}

impl DiscordConfig {
    pub const API_BASE: &'static str = "https://discord.com/api/v10";
}

#[derive(Debug, thiserror::Error)]
pub enum AnnouncerError {
    #[error("Transient source error: {0}")]
    TransientSource(String),

    #[error("Source error: {0}")]
    Source(String),

    #[error("Transform error: {0}")]
    Transform(String),

    #[error("Sink error: {0}")]
    Sink(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AnnouncerError {
    pub fn is_transient(&self) -> bool {
        matches!(self, AnnouncerError::TransientSource(_))
    }
}

pub type Result<T> = std::result::Result<T, AnnouncerError>;
