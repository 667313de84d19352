use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Cursor, TwitterUser};
use crate::errors::GatewayResult;

#[cfg(test)]
use mockall::automock;

#[derive(Debug, Clone, PartialEq)]
pub struct InstagramProfile {
    pub id: String,
    pub is_private: bool,
}

/// One entry of a profile's timeline, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct InstagramMedia {
    pub id: String,
    pub shortcode: String,
    pub display_url: String,
    pub like_count: i64,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstagramStoryItem {
    /// Composite `"<story pk>_<owner id>"`.
    pub id: String,
    /// Videos first, then images, best candidate first.
    pub media_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YouTubeSearchResult {
    pub video_id: Option<String>,
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub live_broadcast_content: String,
    pub thumbnail_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait InstagramApi: Send + Sync {
    /// Resolve a profile by username
    async fn user_info(&self, username: &str) -> GatewayResult<InstagramProfile>;

    /// Timeline media of a profile, newest first.
    ///
    /// Pages are followed until one reaches `cursor` or the timeline ends.
    async fn post_media(&self, username: &str, cursor: Cursor)
        -> GatewayResult<Vec<InstagramMedia>>;

    /// Current story reel of a user id
    async fn user_stories(&self, user_id: &str) -> GatewayResult<Vec<InstagramStoryItem>>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait YouTubeApi: Send + Sync {
    /// Channel search by free-text query
    async fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> GatewayResult<Vec<YouTubeSearchResult>>;

    /// Latest videos of a channel, ordered by date
    async fn latest_videos(
        &self,
        channel_id: &str,
        max_results: u32,
    ) -> GatewayResult<Vec<YouTubeSearchResult>>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait TwitterApi: Send + Sync {
    /// Profile and latest tweets of a screen name
    async fn user_timeline(&self, screen_name: &str) -> GatewayResult<TwitterUser>;
}
