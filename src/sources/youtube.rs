use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::config::YouTubeConfig;
use crate::errors::{GatewayError, GatewayResult};
use crate::sources::traits::{YouTubeApi, YouTubeSearchResult};

/// YouTube Data API v3 client, authenticated with an API key.
pub struct YouTubeClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(config: &YouTubeConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn search_url(&self, params: &[(&str, &str)]) -> GatewayResult<Url> {
        let mut url = Url::parse(&format!("{}/search", self.api_url))?;
        url.query_pairs_mut()
            .append_pair("part", "snippet")
            .extend_pairs(params)
            .append_pair("key", &self.api_key);
        Ok(url)
    }

    async fn search(&self, params: &[(&str, &str)]) -> GatewayResult<Vec<YouTubeSearchResult>> {
        let url = self.search_url(params)?;
        tracing::debug!(params = ?params, "YouTube search");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::UpstreamStatus {
                service: "youtube",
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        let parsed: SearchListResponse = serde_json::from_slice(&bytes)?;

        Ok(parsed.items.into_iter().map(SearchItem::into_result).collect())
    }
}

#[async_trait]
impl YouTubeApi for YouTubeClient {
    async fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> GatewayResult<Vec<YouTubeSearchResult>> {
        let max_results = max_results.to_string();
        self.search(&[
            ("type", "channel"),
            ("q", query),
            ("maxResults", max_results.as_str()),
        ])
        .await
    }

    async fn latest_videos(
        &self,
        channel_id: &str,
        max_results: u32,
    ) -> GatewayResult<Vec<YouTubeSearchResult>> {
        let max_results = max_results.to_string();
        self.search(&[
            ("type", "video"),
            ("channelId", channel_id),
            ("maxResults", max_results.as_str()),
            ("order", "date"),
        ])
        .await
    }
}

// --- Wire format ---

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ResourceId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    #[serde(default)]
    channel_id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    live_broadcast_content: String,
    published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    high: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

impl SearchItem {
    fn into_result(self) -> YouTubeSearchResult {
        let snippet = self.snippet;
        YouTubeSearchResult {
            video_id: self.id.video_id,
            channel_id: snippet.channel_id,
            title: snippet.title,
            description: snippet.description,
            live_broadcast_content: snippet.live_broadcast_content,
            thumbnail_url: snippet.thumbnails.high.map(|thumb| thumb.url),
            published_at: snippet.published_at,
        }
    }
}
