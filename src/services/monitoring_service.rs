use std::sync::Arc;

use crate::config::HealthAccounts;
use crate::domain::{Cursor, HealthStatus};
use crate::errors::GatewayResult;
use crate::services::{InstagramService, TwitterService, YouTubeService};

/// Checks every upstream integration with known-good test accounts.
pub struct MonitoringService {
    instagram: Arc<InstagramService>,
    youtube: Arc<YouTubeService>,
    twitter: Arc<TwitterService>,
    accounts: HealthAccounts,
}

impl MonitoringService {
    pub fn new(
        instagram: Arc<InstagramService>,
        youtube: Arc<YouTubeService>,
        twitter: Arc<TwitterService>,
        accounts: HealthAccounts,
    ) -> Self {
        Self {
            instagram,
            youtube,
            twitter,
            accounts,
        }
    }

    /// Run the checks in order and report the first one that fails
    pub async fn check(&self) -> HealthStatus {
        match self.first_failure().await {
            Ok(None) => HealthStatus::up(),
            Ok(Some(reason)) => {
                tracing::warn!(reason, "Health check degraded");
                HealthStatus::warning(reason)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Health check failed");
                HealthStatus::warning(format!("Error when working service: {}", e))
            }
        }
    }

    async fn first_failure(&self) -> GatewayResult<Option<&'static str>> {
        let accounts = &self.accounts;

        let public = self.instagram.posts(&accounts.public_instagram, Cursor::NONE).await?;
        if public.posts.is_empty() {
            return Ok(Some("Cannot obtain posts of public instagram channel"));
        }

        let private = self.instagram.posts(&accounts.private_instagram, Cursor::NONE).await?;
        if private.posts.is_empty() {
            return Ok(Some("Cannot obtain posts of private instagram channel"));
        }

        let videos = self.youtube.last_videos(&accounts.youtube_channel).await?;
        if videos.is_empty() {
            return Ok(Some("Cannot obtain videos youtube channel"));
        }

        let timeline = self.twitter.last_tweets(&accounts.twitter_user, Cursor::NONE).await?;
        if timeline.tweets.is_empty() {
            return Ok(Some("Cannot obtain tweets"));
        }

        Ok(None)
    }
}
