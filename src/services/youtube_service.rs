use std::sync::Arc;

use crate::domain::Video;
use crate::errors::{GatewayError, GatewayResult};
use crate::sources::{YouTubeApi, YouTubeSearchResult};

const VIDEO_LIMIT: u32 = 5;

pub struct YouTubeService {
    api: Arc<dyn YouTubeApi>,
}

impl YouTubeService {
    pub fn new(api: Arc<dyn YouTubeApi>) -> Self {
        Self { api }
    }

    /// Resolve a channel name to its id via channel search
    pub async fn channel_id(&self, channel_name: &str) -> GatewayResult<String> {
        let channels = self.api.search_channels(channel_name, 1).await?;

        channels
            .into_iter()
            .next()
            .map(|channel| channel.channel_id)
            .ok_or_else(|| GatewayError::ChannelNotFound(channel_name.to_string()))
    }

    /// Latest videos of a channel, newest first
    pub async fn last_videos(&self, channel_name: &str) -> GatewayResult<Vec<Video>> {
        let channel_id = self.channel_id(channel_name).await?;
        let results = self.api.latest_videos(&channel_id, VIDEO_LIMIT).await?;

        let videos: Vec<Video> = results.into_iter().filter_map(to_video).collect();
        tracing::debug!(channel_name, channel_id = %channel_id, count = videos.len(), "Fetched videos");

        Ok(videos)
    }
}

fn to_video(result: YouTubeSearchResult) -> Option<Video> {
    let id = result.video_id?;

    Some(
        Video::new(id, result.title)
            .with_description(result.description)
            .with_broadcast_content(&result.live_broadcast_content)
            .with_thumbnail_url(result.thumbnail_url)
            .with_published_at(result.published_at),
    )
}
