use crate::domain::model::Advisory;
use crate::utils::error::FetchError;
use feed_rs::parser;
use reqwest::Client;
use std::time::Duration;
use tracing::warn;

/// Arch Linux security advisory feed.
pub const DEFAULT_FEED_URL: &str = "https://security.archlinux.org/advisory/feed.atom";

const CONNECT_TIMEOUT_SECS: u64 = 10;
const TOTAL_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("advisory-watch/", env!("CARGO_PKG_VERSION"));

/// Retrieves the advisory feed over HTTP and parses it into advisories.
///
/// No retry on failure; the polling loop simply waits for the next tick.
pub struct AdvisoryFetcher {
    client: Client,
    feed_url: String,
}

impl AdvisoryFetcher {
    pub fn new(feed_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(TOTAL_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            feed_url: feed_url.into(),
        })
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    /// Fetch and parse the feed, returning advisories in document order.
    pub async fn fetch(&self) -> Result<Vec<Advisory>, FetchError> {
        let response = self
            .client
            .get(&self.feed_url)
            .send()
            .await?
            .error_for_status()?;

        let bytes = response.bytes().await?;
        parse_advisories(&bytes)
    }
}

fn parse_advisories(bytes: &[u8]) -> Result<Vec<Advisory>, FetchError> {
    let feed = parser::parse(bytes).map_err(|e| FetchError::Parse(e.to_string()))?;

    let mut advisories = Vec::with_capacity(feed.entries.len());
    for entry in feed.entries {
        let title = entry
            .title
            .map(|t| t.content)
            .unwrap_or_else(|| "Untitled".to_string());
        let link = entry
            .links
            .first()
            .map(|l| l.href.clone())
            .unwrap_or_default();

        // An entry with no timestamp can never pass the watermark; drop it
        // here instead of failing the whole document.
        match entry.published.or(entry.updated) {
            Some(published) => advisories.push(Advisory {
                title,
                link,
                published,
            }),
            None => warn!(title = %title, "skipping advisory without publication timestamp"),
        }
    }

    Ok(advisories)
}
