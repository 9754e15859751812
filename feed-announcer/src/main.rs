use clap::Parser;
use feed_announcer::{Cli, Command, DiscordSink, Poller, RedditSource, TextPipeline, RESEND_ACK};
use feed_announcer::PipelineConfig;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let poll_config = cli.poll_config();

    info!("Starting feed announcer for r/{}", poll_config.source);

    let source = Arc::new(RedditSource::new(poll_config.source.clone(), cli.reddit_config())?);
    let sink = Arc::new(DiscordSink::new(cli.discord_config())?);
    let mut poller = Poller::new(source, sink, TextPipeline::new(PipelineConfig::default()), poll_config)?;

    match cli.command() {
        Command::Run => poller.run().await,
        Command::Resend { message_id } => {
            println!("{}", RESEND_ACK);
            let record = poller.resend(message_id).await?;
            info!("Resent item {} as message {}", record.item_id, record.message_id);
        }
    }

    Ok(())
}
