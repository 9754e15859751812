pub mod discord;

pub use discord::DiscordSink;
