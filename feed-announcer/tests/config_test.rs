use clap::Parser;
use feed_announcer::{Cli, Command, MessageId};

const REQUIRED: [&str; 13] = [
    "feed-announcer",
    "--reddit-client-id",
    "client",
    "--reddit-client-secret",
    "secret",
    "--reddit-username",
    "ArithmancyBot",
    "--reddit-password",
    "hunter2",
    "--discord-token",
    "token",
    "--discord-channel",
    "42",
];

#[test]
fn test_defaults_follow_the_polling_contract() {
    let cli = Cli::try_parse_from(REQUIRED).expect("required arguments parse");

    assert_eq!(cli.command(), Command::Run);

    let poll = cli.poll_config();
    assert_eq!(poll.interval_seconds, 5);
    assert_eq!(poll.batch_size, 5);
    assert_eq!(poll.cooldown_seconds, 10);
    assert!(poll.validate().is_ok());

    let reddit = cli.reddit_config();
    assert_eq!(reddit.user_agent, "ArithmancyBot Bot");
    assert_eq!(reddit.timeout_seconds, 30);

    let discord = cli.discord_config();
    assert_eq!(discord.channel_id, 42);
}

#[test]
fn test_resend_subcommand_takes_optional_message_id() {
    let args = REQUIRED.iter().copied().chain(["resend", "--message-id", "1234567890"]);
    let cli = Cli::try_parse_from(args).expect("resend parses");
    assert_eq!(
        cli.command(),
        Command::Resend {
            message_id: Some(MessageId(1234567890))
        }
    );

    let args = REQUIRED.iter().copied().chain(["resend"]);
    let cli = Cli::try_parse_from(args).expect("resend parses");
    assert_eq!(cli.command(), Command::Resend { message_id: None });
}

#[test]
fn test_overrides_reach_the_poll_config() {
    let args = REQUIRED.iter().copied().chain([
        "--reddit-sub",
        "PuzzleHunts",
        "--check-interval",
        "30",
        "--submission-limit",
        "3",
    ]);
    let cli = Cli::try_parse_from(args).expect("overrides parse");
    let poll = cli.poll_config();

    assert_eq!(poll.source.uri, "PuzzleHunts");
    assert_eq!(poll.interval_seconds, 30);
    assert_eq!(poll.batch_size, 3);
}
