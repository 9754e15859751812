use crate::traits::FeedSource;
use crate::types::{AnnouncerError, FeedItem, LiveSourceSpec, RedditConfig, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;

/// Refresh the access token this long before reddit expires it
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

struct AccessToken {
    value: String,
    expires_at: Instant,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Thing>,
}

#[derive(Debug, Deserialize)]
struct Thing {
    data: Submission,
}

#[derive(Debug, Deserialize)]
struct Submission {
    id: String,
    title: String,
    #[serde(default)]
    author: Option<String>,
    created_utc: f64,
    #[serde(default)]
    selftext: String,
    #[serde(default)]
    saved: bool,
}

impl From<Submission> for FeedItem {
    fn from(submission: Submission) -> Self {
        // Deleted accounts still report an author string
        let author = submission.author.filter(|a| a != "[deleted]");
        Self {
            url: Some(format!("https://redd.it/{}", submission.id)),
            id: submission.id,
            title: submission.title,
            author,
            created_at: submission.created_utc as i64,
            body: submission.selftext,
            seen: submission.saved,
        }
    }
}

/// Subreddit feed read through the reddit OAuth API.
///
/// The account's "saved" flag on each submission doubles as the seen bit.
pub struct RedditSource {
    spec: LiveSourceSpec,
    config: RedditConfig,
    client: Client,
    token: Arc<RwLock<Option<AccessToken>>>,
}

impl RedditSource {
    pub fn new(spec: LiveSourceSpec, config: RedditConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()
            .map_err(|e| AnnouncerError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            spec,
            config,
            client,
            token: Arc::new(RwLock::new(None)),
        })
    }

    async fn access_token(&self) -> Result<String> {
        // Fast path: cached token still valid
        {
            let token = self.token.read().await;
            if let Some(token) = token.as_ref().filter(|t| t.expires_at > Instant::now()) {
                return Ok(token.value.clone());
            }
        }

        let fresh = self.authorize().await?;
        let value = fresh.value.clone();
        *self.token.write().await = Some(fresh);
        Ok(value)
    }

    async fn authorize(&self) -> Result<AccessToken> {
        debug!("Requesting reddit access token for {}", self.config.username);

        let response = self
            .client
            .post(&self.config.token_url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[
                ("grant_type", "password"),
                ("username", self.config.username.as_str()),
                ("password", self.config.password.as_str()),
            ])
            .send()
            .await
            .map_err(classify_request_error)?;
        let response = self.check_status(response).await?;

        let token: TokenResponse = response.json().await.map_err(classify_request_error)?;
        // Treat the token as expired one margin early
        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        info!("Authorized reddit user {}", self.config.username);

        Ok(AccessToken {
            value: token.access_token,
            expires_at: Instant::now() + lifetime,
        })
    }

    async fn check_status(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            // Force a new password grant on the next request
            self.token.write().await.take();
        }
        Err(classify_status(status))
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&self.config.api_base)?.join(path)?)
    }
}

#[async_trait]
impl FeedSource for RedditSource {
    fn source(&self) -> &LiveSourceSpec {
        &self.spec
    }

    async fn fetch_recent(&self, limit: usize) -> Result<Vec<FeedItem>> {
        let mut url = self.endpoint(&format!("r/{}/new", self.spec.uri))?;
        // raw_json keeps `&`, `<` and `>` unescaped in selftext
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("raw_json", "1");

        let token = self.access_token().await?;
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(classify_request_error)?;
        let response = self.check_status(response).await?;

        // Decode failures surface as serialization errors
        let payload = response.text().await.map_err(classify_request_error)?;
        let items = parse_listing(&payload, limit)?;

        debug!("Fetched {} items from r/{}", items.len(), self.spec.uri);
        Ok(items)
    }

    async fn mark_seen(&self, item: &FeedItem) -> Result<()> {
        let token = self.access_token().await?;
        // Saving takes the fullname, t3_ being the link prefix
        let fullname = format!("t3_{}", item.id);
        let response = self
            .client
            .post(self.endpoint("api/save")?)
            .bearer_auth(token)
            .form(&[("id", fullname.as_str())])
            .send()
            .await
            .map_err(classify_request_error)?;
        self.check_status(response).await?;
        Ok(())
    }
}

/// Decode a `/new` listing into at most `limit` items, newest first
pub fn parse_listing(payload: &str, limit: usize) -> Result<Vec<FeedItem>> {
    let listing: Listing = serde_json::from_str(payload)?;
    Ok(listing
        .data
        .children
        .into_iter()
        .take(limit)
        .map(|thing| thing.data.into())
        .collect())
}

fn classify_request_error(e: reqwest::Error) -> AnnouncerError {
    if e.is_timeout() || e.is_connect() || e.is_request() {
        AnnouncerError::TransientSource(e.to_string())
    } else if let Some(status) = e.status() {
        classify_status(status)
    } else {
        AnnouncerError::Source(e.to_string())
    }
}

/// Map a failed feed response to a transient or permanent source error
pub fn classify_status(status: StatusCode) -> AnnouncerError {
    let message = format!("HTTP {}: {}", status.as_u16(), status.canonical_reason().unwrap_or("Unknown"));
    match status {
        StatusCode::UNAUTHORIZED
        | StatusCode::FORBIDDEN
        | StatusCode::REQUEST_TIMEOUT
        | StatusCode::TOO_MANY_REQUESTS => AnnouncerError::TransientSource(message),
        s if s.is_server_error() => AnnouncerError::TransientSource(message),
        _ => AnnouncerError::Source(message),
    }
}
