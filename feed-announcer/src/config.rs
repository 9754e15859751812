use crate::types::{DiscordConfig, LiveSourceSpec, MessageId, PollConfig, RedditConfig, DEFAULT_SUBREDDIT};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "feed-announcer",
    version,
    about = "Republish new subreddit posts into a Discord announcements channel"
)]
pub struct Cli {
    #[command(flatten)]
    pub reddit: RedditArgs,

    #[command(flatten)]
    pub discord: DiscordArgs,

    #[command(flatten)]
    pub poll: PollArgs,

    /// Timeout for every HTTP request, in seconds
    #[arg(long, env = "HTTP_TIMEOUT", default_value_t = 30)]
    pub http_timeout: u64,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Poll the feed and announce new items (default)
    Run,
    /// Announce the most recent item again
    Resend {
        /// Edit this earlier announcement instead of sending a new one
        #[arg(long)]
        message_id: Option<MessageId>,
    },
}

#[derive(Debug, Args)]
pub struct RedditArgs {
    #[arg(long, env = "REDDIT_CLIENT_ID")]
    pub reddit_client_id: String,

    #[arg(long, env = "REDDIT_CLIENT_SECRET", hide_env_values = true)]
    pub reddit_client_secret: String,

    #[arg(long, env = "REDDIT_USERNAME")]
    pub reddit_username: String,

    #[arg(long, env = "REDDIT_PASSWORD", hide_env_values = true)]
    pub reddit_password: String,

    /// Subreddit to watch
    #[arg(long, env = "REDDIT_SUB", default_value = DEFAULT_SUBREDDIT)]
    pub reddit_sub: String,

    /// Defaults to "<username> Bot"
    #[arg(long, env = "REDDIT_USER_AGENT")]
    pub reddit_user_agent: Option<String>,
}

#[derive(Debug, Args)]
pub struct DiscordArgs {
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
    pub discord_token: String,

    /// Channel that receives the announcements
    #[arg(long, env = "DISCORD_ANNOUNCEMENTS_CHANNEL")]
    pub discord_channel: u64,
}

#[derive(Debug, Args)]
pub struct PollArgs {
    /// Seconds between feed checks
    #[arg(long, env = "CHECK_INTERVAL", default_value_t = 5)]
    pub check_interval: u64,

    /// Number of recent posts checked per cycle
    #[arg(long, env = "SUBMISSION_LIMIT", default_value_t = 5)]
    pub submission_limit: usize,

    /// Seconds to wait after a failed cycle
    #[arg(long, env = "FAILURE_COOLDOWN", default_value_t = 10)]
    pub failure_cooldown: u64,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }

    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            source: LiveSourceSpec::new(self.reddit.reddit_sub.clone()),
            interval_seconds: self.poll.check_interval,
            batch_size: self.poll.submission_limit,
            cooldown_seconds: self.poll.failure_cooldown,
        }
    }

    pub fn reddit_config(&self) -> RedditConfig {
        let reddit = &self.reddit;
        RedditConfig {
            client_id: reddit.reddit_client_id.clone(),
            client_secret: reddit.reddit_client_secret.clone(),
            username: reddit.reddit_username.clone(),
            password: reddit.reddit_password.clone(),
            user_agent: reddit
                .reddit_user_agent
                .clone()
                .unwrap_or_else(|| format!("{} Bot", reddit.reddit_username)),
            token_url: RedditConfig::TOKEN_URL.to_string(),
            api_base: RedditConfig::API_BASE.to_string(),
            timeout_seconds: self.http_timeout,
        }
    }

    pub fn discord_config(&self) -> DiscordConfig {
        DiscordConfig {
            token: self.discord.discord_token.clone(),
            channel_id: self.discord.discord_channel,
            api_base: DiscordConfig::API_BASE.to_string(),
            timeout_seconds: self.http_timeout,
        }
    }
}
