use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub link: String,
    pub description: String,
    pub title: String,
    pub live: bool,
    pub thumbnail_url: String,
    pub published_at: Option<DateTime<Utc>>,
}

impl Video {
    pub fn new(id: String, title: String) -> Self {
        Self {
            link: format!("{}{}", WATCH_URL, id),
            id,
            title,
            description: String::new(),
            live: false,
            thumbnail_url: String::new(),
            published_at: None,
        }
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = description;
        self
    }

    /// `liveBroadcastContent` is `"live"`, `"upcoming"` or `"none"`.
    pub fn with_broadcast_content(mut self, content: &str) -> Self {
        self.live = content == "live";
        self
    }

    pub fn with_thumbnail_url(mut self, thumbnail_url: Option<String>) -> Self {
        self.thumbnail_url = thumbnail_url.unwrap_or_default();
        self
    }

    pub fn with_published_at(mut self, published_at: Option<DateTime<Utc>>) -> Self {
        self.published_at = published_at;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_built_from_id() {
        let video = Video::new("dQw4w9WgXcQ".to_string(), "Title".to_string());
        assert_eq!(video.link, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }

    #[test]
    fn test_live_flag() {
        let video = Video::new("x".to_string(), "t".to_string());
        assert!(video.clone().with_broadcast_content("live").live);
        assert!(!video.clone().with_broadcast_content("upcoming").live);
        assert!(!video.with_broadcast_content("none").live);
    }
}
