use crate::announcer::DEFAULT_COLOUR;
use crate::traits::MessageSink;
use crate::types::{AnnouncerError, DiscordConfig, Embed, MessageId, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct MessageResponse {
    id: String,
    #[serde(default)]
    embeds: Vec<EmbedResponse>,
}

#[derive(Debug, Default, Deserialize)]
struct EmbedResponse {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    color: Option<u32>,
}

impl From<EmbedResponse> for Embed {
    fn from(embed: EmbedResponse) -> Self {
        Self {
            title: embed.title.unwrap_or_default(),
            description: embed.description.unwrap_or_default(),
            url: embed.url,
            colour: embed.color.unwrap_or(DEFAULT_COLOUR),
        }
    }
}

/// Announcements channel reached through the Discord REST API.
pub struct DiscordSink {
    config: DiscordConfig,
    client: Client,
}

impl DiscordSink {
    pub fn new(config: DiscordConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AnnouncerError::Config(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/channels/{}/messages",
            self.config.api_base.trim_end_matches('/'),
            self.config.channel_id
        )
    }

    fn message_url(&self, id: MessageId) -> String {
        format!("{}/{}", self.messages_url(), id)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .header("Authorization", format!("Bot {}", self.config.token))
            .send()
            .await
            .map_err(|e| AnnouncerError::Sink(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AnnouncerError::Sink(format!("HTTP {}: {}", status.as_u16(), detail)));
        }
        Ok(response)
    }

    async fn read_message(response: Response) -> Result<MessageResponse> {
        response
            .json()
            .await
            .map_err(|e| AnnouncerError::Sink(format!("unexpected message payload: {}", e)))
    }
}

/// Message body with a single embed; empty descriptions are omitted
pub fn embed_payload(embed: &Embed) -> serde_json::Value {
    let mut payload = json!({
        "title": embed.title,
        "color": embed.colour,
    });
    if !embed.description.is_empty() {
        payload["description"] = json!(embed.description);
    }
    if let Some(url) = &embed.url {
        payload["url"] = json!(url);
    }
    json!({ "embeds": [payload] })
}

fn parse_id(raw: &str) -> Result<MessageId> {
    raw.parse()
        .map_err(|_| AnnouncerError::Sink(format!("invalid message id: {}", raw)))
}

#[async_trait]
impl MessageSink for DiscordSink {
    async fn create_message(&self, embed: &Embed) -> Result<MessageId> {
        let request = self.client.post(self.messages_url()).json(&embed_payload(embed));
        let message = Self::read_message(self.send(request).await?).await?;
        debug!("Created message {} in channel {}", message.id, self.config.channel_id);
        parse_id(&message.id)
    }

    async fn publish_message(&self, id: MessageId) -> Result<()> {
        // Crossposting is how announcement channels publish to followers
        let request = self.client.post(format!("{}/crosspost", self.message_url(id)));
        self.send(request).await?;
        Ok(())
    }

    async fn fetch_message(&self, id: MessageId) -> Result<Embed> {
        let request = self.client.get(self.message_url(id));
        let message = Self::read_message(self.send(request).await?).await?;
        // A message without embeds reads as an empty one
        Ok(message.embeds.into_iter().next().unwrap_or_default().into())
    }

    async fn edit_message(&self, id: MessageId, embed: &Embed) -> Result<()> {
        let request = self.client.patch(self.message_url(id)).json(&embed_payload(embed));
        self.send(request).await?;
        Ok(())
    }
}
