use crate::data::geojson::EarthquakeFeed;
use crate::{MapError, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;

/// Shared async HTTP client for the feed and the tile loader.
///
/// No request timeout: a fetch either resolves or fails on its own.
pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("quakemap/", env!("CARGO_PKG_VERSION")))
        .tcp_keepalive(std::time::Duration::from_secs(30))
        .pool_idle_timeout(std::time::Duration::from_secs(90))
        .build()
        .unwrap_or_else(|e| {
            log::warn!("falling back to default HTTP client: {}", e);
            reqwest::Client::new()
        })
});

/// Anything that can produce the earthquake feed
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Reads and decodes the feed once
    async fn fetch(&self) -> Result<EarthquakeFeed>;

    /// Human-readable origin, used in logs
    fn describe(&self) -> String;
}

/// Fetches the feed with a single HTTP GET; no retry
#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    url: String,
}

impl HttpFeedSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self) -> Result<EarthquakeFeed> {
        log::debug!("GET {}", self.url);

        let response = HTTP_CLIENT.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MapError::HttpStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        log::debug!("received {} bytes from {}", body.len(), self.url);

        EarthquakeFeed::from_slice(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Serves a feed document held in memory
#[derive(Debug, Clone)]
pub struct StaticFeedSource {
    body: String,
}

impl StaticFeedSource {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// A source serving an already decoded feed
    pub fn from_feed(feed: &EarthquakeFeed) -> Result<Self> {
        Ok(Self::new(serde_json::to_string(feed)?))
    }
}

#[async_trait]
impl FeedSource for StaticFeedSource {
    async fn fetch(&self) -> Result<EarthquakeFeed> {
        EarthquakeFeed::from_str(&self.body)
    }

    fn describe(&self) -> String {
        format!("in-memory feed ({} bytes)", self.body.len())
    }
}

/// Awaits one fetch from `source`, logging the outcome
pub async fn fetch_feed(source: &dyn FeedSource) -> Result<EarthquakeFeed> {
    match source.fetch().await {
        Ok(feed) => {
            log::info!("loaded {} earthquakes from {}", feed.len(), source.describe());
            Ok(feed)
        }
        Err(e) => {
            log::warn!("failed to load feed from {}: {}", source.describe(), e);
            Err(e)
        }
    }
}
