use std::sync::Arc;

use crate::domain::{retain_newer, Cursor, CutoffMode, InstaPost, InstaStory, InstaUser};
use crate::errors::GatewayResult;
use crate::sources::{InstagramApi, InstagramMedia, InstagramStoryItem};

pub struct InstagramService {
    public_api: Arc<dyn InstagramApi>,
    private_api: Arc<dyn InstagramApi>,
}

impl InstagramService {
    pub fn new(public_api: Arc<dyn InstagramApi>, private_api: Arc<dyn InstagramApi>) -> Self {
        Self {
            public_api,
            private_api,
        }
    }

    /// Posts newer than `cursor`, newest first.
    ///
    /// Private profiles are read with the authenticated client.
    pub async fn posts(&self, username: &str, cursor: Cursor) -> GatewayResult<InstaUser> {
        let profile = self.public_api.user_info(username).await?;
        let api = if profile.is_private {
            &self.private_api
        } else {
            &self.public_api
        };

        let media = api.post_media(username, cursor).await?;
        let posts = media.into_iter().map(to_post);
        let posts = retain_newer(posts, cursor, CutoffMode::StopAtFirstOld);

        tracing::debug!(username, %cursor, count = posts.len(), private = profile.is_private, "Fetched posts");
        Ok(InstaUser::from_posts(username.to_string(), posts))
    }

    /// Stories newer than `cursor`.
    ///
    /// Story ids are composite, so old entries are skipped rather than
    /// ending the scan.
    pub async fn stories(&self, username: &str, cursor: Cursor) -> GatewayResult<InstaUser> {
        let profile = self.public_api.user_info(username).await?;
        let items = self.private_api.user_stories(&profile.id).await?;

        let stories = items.into_iter().map(|item| to_story(item, username));
        let stories = retain_newer(stories, cursor, CutoffMode::SkipOld);

        tracing::debug!(username, %cursor, count = stories.len(), "Fetched stories");
        Ok(InstaUser::from_stories(username.to_string(), stories))
    }
}

fn to_post(media: InstagramMedia) -> InstaPost {
    InstaPost::new(media.id, &media.shortcode)
        .with_photo_url(media.display_url)
        .with_likes(media.like_count)
        .with_description(media.caption)
}

fn to_story(item: InstagramStoryItem, username: &str) -> InstaStory {
    let media_url = item.media_urls.into_iter().next();
    if media_url.is_none() {
        tracing::warn!(story = %item.id, "Story has no media");
    }

    InstaStory::new(item.id, username).with_media_url(media_url)
}
