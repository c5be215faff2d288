use std::fmt;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use url::Url;
use rv_core::{ChannelQuery, Error, Result, SearchBackend, Video};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    thumbnails: Thumbnails,
    channel_title: String,
    published_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    medium: Option<Thumbnail>,
    high: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

impl SearchItem {
    fn into_video(self) -> Option<Video> {
        let video_id = self.id.video_id?;
        let thumbnails = self.snippet.thumbnails;
        let thumbnail_url = thumbnails
            .medium
            .or(thumbnails.high)
            .or(thumbnails.default)
            .map(|t| t.url)
            .unwrap_or_default();

        Some(Video {
            url: Video::watch_url(&video_id),
            video_id,
            title: self.snippet.title,
            description: self.snippet.description,
            thumbnail_url,
            channel_title: self.snippet.channel_title,
            published_at: self.snippet.published_at,
        })
    }
}

/// Maps a raw `search.list` response body onto videos, skipping non-video hits.
fn parse_search_response(body: &str) -> Result<Vec<Video>> {
    let response: SearchListResponse = serde_json::from_str(body)
        .map_err(|e| Error::contract(format!("unexpected YouTube search response: {}", e)))?;
    Ok(response
        .items
        .into_iter()
        .filter_map(SearchItem::into_video)
        .collect())
}

/// YouTube Data API v3 `search.list` client.
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl fmt::Debug for YouTubeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YouTubeClient")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl YouTubeClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_client(api_key, Client::new())
    }

    pub fn with_client(api_key: impl Into<String>, client: Client) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::Config("YouTube API key is required".to_string()));
        }
        let base_url = Url::parse(DEFAULT_BASE_URL)
            .map_err(|e| Error::Config(format!("invalid YouTube base URL: {}", e)))?;
        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        self.base_url = Url::parse(&base)
            .map_err(|e| Error::Config(format!("invalid YouTube base URL '{}': {}", base_url, e)))?;
        Ok(self)
    }

    fn search_url(&self, query: &ChannelQuery) -> Result<Url> {
        let mut url = self
            .base_url
            .join("search")
            .map_err(|e| Error::Config(format!("invalid YouTube search URL: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("part", "snippet")
            .append_pair("channelId", &query.channel_id)
            .append_pair("q", &query.keyword)
            .append_pair("maxResults", &query.max_results.to_string())
            .append_pair("order", "relevance")
            .append_pair("type", "video");
        Ok(url)
    }
}

#[async_trait]
impl SearchBackend for YouTubeClient {
    async fn search_channel(&self, query: &ChannelQuery) -> Result<Vec<Video>> {
        let url = self.search_url(query)?;
        tracing::debug!("Searching channel {} for '{}'", query.channel_id, query.keyword);

        let response = self
            .client
            .get(url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Upstream {
                service: "youtube".to_string(),
                status: status.as_u16(),
                body,
            });
        }

        parse_search_response(&body)
    }
}
