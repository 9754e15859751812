pub mod announcer;
pub mod classifier;
pub mod config;
pub mod dedup;
pub mod processing;
pub mod scheduler;
pub mod sinks;
pub mod sources;
pub mod table;
pub mod traits;
pub mod types;
pub mod utils;

pub use types::*;
pub use announcer::Announcer;
pub use classifier::{classify, marker, Category};
pub use config::{Cli, Command};
pub use dedup::SeenTracker;
pub use processing::{TextPipeline, Transformed};
pub use scheduler::{CycleReport, Poller, RESEND_ACK};
pub use sinks::DiscordSink;
pub use sources::RedditSource;
pub use table::{Alignment, Table};
pub use traits::{FeedSource, MessageSink};
