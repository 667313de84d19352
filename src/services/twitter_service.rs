use std::sync::Arc;

use crate::domain::{retain_newer, Cursor, CutoffMode, TwitterUser};
use crate::errors::GatewayResult;
use crate::sources::TwitterApi;

pub struct TwitterService {
    api: Arc<dyn TwitterApi>,
}

impl TwitterService {
    pub fn new(api: Arc<dyn TwitterApi>) -> Self {
        Self { api }
    }

    /// Latest tweets newer than `cursor`. Tweet ids grow over time, so the
    /// newest-first timeline stops at the first already-seen tweet.
    pub async fn last_tweets(&self, screen_name: &str, cursor: Cursor) -> GatewayResult<TwitterUser> {
        let mut user = self.api.user_timeline(screen_name).await?;
        user.tweets = retain_newer(user.tweets, cursor, CutoffMode::StopAtFirstOld);

        tracing::debug!(screen_name, %cursor, count = user.tweets.len(), "Fetched tweets");
        Ok(user)
    }
}
