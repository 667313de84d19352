use serde::{Deserialize, Serialize};

use crate::domain::cutoff::{parse_rank, Ranked};

const INSTAGRAM_URL: &str = "https://www.instagram.com";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstaPost {
    pub description: String,
    pub photo_url: String,
    pub likes: i64,
    pub id: String,
    pub post_url: String,
}

impl InstaPost {
    pub fn new(id: String, shortcode: &str) -> Self {
        Self {
            description: String::new(),
            photo_url: String::new(),
            likes: 0,
            post_url: post_url(shortcode),
            id,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.unwrap_or_default();
        self
    }

    pub fn with_photo_url(mut self, photo_url: String) -> Self {
        self.photo_url = photo_url;
        self
    }

    pub fn with_likes(mut self, likes: i64) -> Self {
        self.likes = likes;
        self
    }
}

impl Ranked for InstaPost {
    fn identifier(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstaStory {
    pub story_url: String,
    pub original_id: String,
    pub id: String,
    pub media_url: String,
}

impl InstaStory {
    /// Build a story from its composite upstream id (`"<story pk>_<owner id>"`).
    pub fn new(original_id: String, username: &str) -> Self {
        let id = parse_rank(&original_id).to_string();
        Self {
            story_url: story_url(username, &id),
            media_url: String::new(),
            original_id,
            id,
        }
    }

    pub fn with_media_url(mut self, media_url: Option<String>) -> Self {
        self.media_url = media_url.unwrap_or_default();
        self
    }
}

impl Ranked for InstaStory {
    fn identifier(&self) -> &str {
        &self.original_id
    }
}

/// Response body of the posts and stories endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstaUser {
    pub user_name: String,
    pub posts: Vec<InstaPost>,
    pub stories: Vec<InstaStory>,
}

impl InstaUser {
    pub fn from_posts(user_name: String, posts: Vec<InstaPost>) -> Self {
        Self {
            user_name,
            posts,
            stories: Vec::new(),
        }
    }

    pub fn from_stories(user_name: String, stories: Vec<InstaStory>) -> Self {
        Self {
            user_name,
            posts: Vec::new(),
            stories,
        }
    }
}

fn post_url(shortcode: &str) -> String {
    format!("{}/p/{}/", INSTAGRAM_URL, shortcode)
}

fn story_url(username: &str, story_id: &str) -> String {
    format!("{}/stories/{}/{}/", INSTAGRAM_URL, username, story_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_url_from_shortcode() {
        let post = InstaPost::new("2431".to_string(), "B9xYz");
        assert_eq!(post.post_url, "https://www.instagram.com/p/B9xYz/");
        assert_eq!(post.description, "");
    }

    #[test]
    fn test_story_splits_composite_id() {
        let story = InstaStory::new("2250_8812".to_string(), "nc_ficus");

        assert_eq!(story.id, "2250");
        assert_eq!(story.original_id, "2250_8812");
        assert_eq!(story.story_url, "https://www.instagram.com/stories/nc_ficus/2250/");
        assert_eq!(story.rank(), 2250);
    }

    #[test]
    fn test_serialized_field_names() {
        let user = InstaUser::from_posts(
            "nc_ficus".to_string(),
            vec![InstaPost::new("1".to_string(), "abc").with_likes(3)],
        );
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["user_name"], "nc_ficus");
        assert_eq!(json["posts"][0]["likes"], 3);
        assert_eq!(json["posts"][0]["post_url"], "https://www.instagram.com/p/abc/");
        assert_eq!(json["stories"], serde_json::json!([]));
    }
}
