use std::collections::HashMap;
use std::future::Future;

use async_trait::async_trait;
use reqwest::header::{COOKIE, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::config::InstagramConfig;
use crate::domain::{parse_rank, Cursor};
use crate::errors::{GatewayError, GatewayResult};
use crate::sources::traits::{InstagramApi, InstagramMedia, InstagramProfile, InstagramStoryItem};

const APP_ID: &str = "936619743392459";
const BROWSER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
const TIMELINE_QUERY_HASH: &str = "e769aa130647d2354c40ea6a439bfc08";
const TIMELINE_PAGE_SIZE: u32 = 12;

/// Session cookies of a logged-in account, needed for private profiles
/// and for stories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCredentials {
    pub ds_user_id: String,
    pub session_id: String,
    pub csrf_token: String,
}

impl SessionCredentials {
    fn cookie_header(&self) -> String {
        format!(
            "ds_user_id={}; sessionid={}; csrftoken={}",
            self.ds_user_id, self.session_id, self.csrf_token
        )
    }
}

pub struct InstagramClient {
    client: Client,
    web_url: String,
    api_url: String,
    credentials: Option<SessionCredentials>,
    max_pages: usize,
}

impl InstagramClient {
    /// Anonymous client, only sees public profiles
    pub fn public(config: &InstagramConfig) -> Self {
        Self::with_credentials(config, None)
    }

    /// Client authenticated with the configured session cookies
    pub fn private(config: &InstagramConfig) -> Self {
        Self::with_credentials(config, config.credentials.clone())
    }

    fn with_credentials(config: &InstagramConfig, credentials: Option<SessionCredentials>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            web_url: config.web_url.clone(),
            api_url: config.api_url.clone(),
            credentials,
            max_pages: config.max_pages.max(1),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> GatewayResult<T> {
        tracing::debug!(url = %url, authenticated = self.credentials.is_some(), "Instagram request");

        let mut request = self
            .client
            .get(url)
            .header(USER_AGENT, BROWSER_AGENT)
            .header("x-ig-app-id", APP_ID);
        if let Some(credentials) = &self.credentials {
            request = request
                .header(COOKIE, credentials.cookie_header())
                .header("x-csrftoken", credentials.csrf_token.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::UpstreamStatus {
                service: "instagram",
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn fetch_profile(&self, username: &str) -> GatewayResult<RawUser> {
        let url = Url::parse_with_params(
            &format!("{}/api/v1/users/web_profile_info/", self.web_url),
            &[("username", username)],
        )?;
        let response: ProfileResponse = self.get_json(url).await?;

        response
            .data
            .user
            .ok_or_else(|| GatewayError::UserNotFound(username.to_string()))
    }

    async fn fetch_timeline_page(&self, user_id: &str, after: &str) -> GatewayResult<RawTimeline> {
        let variables = serde_json::json!({
            "id": user_id,
            "first": TIMELINE_PAGE_SIZE,
            "after": after,
        });
        let url = Url::parse_with_params(
            &format!("{}/graphql/query/", self.web_url),
            &[
                ("query_hash", TIMELINE_QUERY_HASH.to_string()),
                ("variables", variables.to_string()),
            ],
        )?;
        let response: TimelineResponse = self.get_json(url).await?;

        Ok(response.data.user.edge_owner_to_timeline_media)
    }
}

#[async_trait]
impl InstagramApi for InstagramClient {
    async fn user_info(&self, username: &str) -> GatewayResult<InstagramProfile> {
        let user = self.fetch_profile(username).await?;
        Ok(user.profile())
    }

    async fn post_media(
        &self,
        username: &str,
        cursor: Cursor,
    ) -> GatewayResult<Vec<InstagramMedia>> {
        let user = self.fetch_profile(username).await?;
        let first_page = match user.edge_owner_to_timeline_media {
            Some(timeline) => timeline,
            None => return Ok(Vec::new()),
        };

        let user_id = user.id.as_str();
        collect_timeline(first_page, cursor, self.max_pages, move |after| async move {
            self.fetch_timeline_page(user_id, &after).await
        })
        .await
    }

    async fn user_stories(&self, user_id: &str) -> GatewayResult<Vec<InstagramStoryItem>> {
        let url = Url::parse_with_params(
            &format!("{}/api/v1/feed/reels_media/", self.api_url),
            &[("reel_ids", user_id)],
        )?;
        let mut response: ReelsResponse = self.get_json(url).await?;

        let items = response
            .reels
            .remove(user_id)
            .map(|reel| reel.items)
            .unwrap_or_default();

        Ok(items.into_iter().map(RawStoryItem::into_story_item).collect())
    }
}

/// Walk timeline pages until one reaches the cursor, the timeline ends, or
/// `max_pages` have been read.
async fn collect_timeline<F, Fut>(
    first_page: RawTimeline,
    cursor: Cursor,
    max_pages: usize,
    mut fetch_next: F,
) -> GatewayResult<Vec<InstagramMedia>>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = GatewayResult<RawTimeline>>,
{
    let mut media: Vec<InstagramMedia> = Vec::new();
    let mut timeline = first_page;
    let mut pages = 1;
    loop {
        let next_cursor = timeline.next_cursor();
        let page: Vec<InstagramMedia> = timeline
            .edges
            .into_iter()
            .map(|edge| edge.node.into_media())
            .collect();
        let reached_cursor = !cursor.is_unbounded()
            && page.iter().any(|item| parse_rank(&item.id) <= cursor.value());
        media.extend(page);

        match next_cursor {
            Some(after) if !reached_cursor && pages < max_pages => {
                timeline = fetch_next(after).await?;
                pages += 1;
            }
            Some(_) if !reached_cursor => {
                tracing::warn!(pages, "Timeline page limit reached");
                break;
            }
            _ => break,
        }
    }

    Ok(media)
}

// --- Wire format ---

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    data: ProfileData,
}

#[derive(Debug, Deserialize)]
struct ProfileData {
    user: Option<RawUser>,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    id: String,
    #[serde(default)]
    is_private: bool,
    edge_owner_to_timeline_media: Option<RawTimeline>,
}

impl RawUser {
    fn profile(&self) -> InstagramProfile {
        InstagramProfile {
            id: self.id.clone(),
            is_private: self.is_private,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TimelineResponse {
    data: TimelineData,
}

#[derive(Debug, Deserialize)]
struct TimelineData {
    user: TimelineUser,
}

#[derive(Debug, Deserialize)]
struct TimelineUser {
    edge_owner_to_timeline_media: RawTimeline,
}

#[derive(Debug, Deserialize)]
struct RawTimeline {
    #[serde(default)]
    edges: Vec<RawEdge<RawMedia>>,
    page_info: Option<PageInfo>,
}

impl RawTimeline {
    fn next_cursor(&self) -> Option<String> {
        self.page_info
            .as_ref()
            .filter(|info| info.has_next_page)
            .and_then(|info| info.end_cursor.clone())
    }
}

#[derive(Debug, Deserialize)]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawEdge<T> {
    node: T,
}

#[derive(Debug, Deserialize)]
struct RawCount {
    count: i64,
}

#[derive(Debug, Deserialize)]
struct RawCaptions {
    #[serde(default)]
    edges: Vec<RawEdge<RawCaption>>,
}

#[derive(Debug, Deserialize)]
struct RawCaption {
    text: String,
}

#[derive(Debug, Deserialize)]
struct RawMedia {
    id: String,
    shortcode: String,
    #[serde(default)]
    display_url: String,
    edge_media_preview_like: Option<RawCount>,
    edge_media_to_caption: Option<RawCaptions>,
}

impl RawMedia {
    fn into_media(self) -> InstagramMedia {
        let caption = self
            .edge_media_to_caption
            .and_then(|captions| captions.edges.into_iter().next())
            .map(|edge| edge.node.text);

        InstagramMedia {
            id: self.id,
            shortcode: self.shortcode,
            display_url: self.display_url,
            like_count: self.edge_media_preview_like.map_or(0, |likes| likes.count),
            caption,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ReelsResponse {
    #[serde(default)]
    reels: HashMap<String, RawReel>,
}

#[derive(Debug, Deserialize)]
struct RawReel {
    #[serde(default)]
    items: Vec<RawStoryItem>,
}

#[derive(Debug, Deserialize)]
struct RawMediaUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct RawImageVersions {
    #[serde(default)]
    candidates: Vec<RawMediaUrl>,
}

#[derive(Debug, Deserialize)]
struct RawStoryItem {
    id: String,
    image_versions2: Option<RawImageVersions>,
    video_versions: Option<Vec<RawMediaUrl>>,
}

impl RawStoryItem {
    fn into_story_item(self) -> InstagramStoryItem {
        let videos = self.video_versions.unwrap_or_default();
        let images = self
            .image_versions2
            .map(|versions| versions.candidates)
            .unwrap_or_default();

        InstagramStoryItem {
            id: self.id,
            media_urls: videos.into_iter().chain(images).map(|media| media.url).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    fn page(ids: &[&str], end_cursor: Option<&str>) -> RawTimeline {
        let edges: Vec<serde_json::Value> = ids
            .iter()
            .map(|id| {
                serde_json::json!({
                    "node": {
                        "id": id,
                        "shortcode": format!("sc{}", id),
                        "display_url": format!("https://cdn.example/{}.jpg", id),
                    }
                })
            })
            .collect();
        serde_json::from_value(serde_json::json!({
            "page_info": { "has_next_page": end_cursor.is_some(), "end_cursor": end_cursor },
            "edges": edges,
        }))
        .unwrap()
    }

    async fn collect(
        first: RawTimeline,
        rest: Vec<RawTimeline>,
        cursor: Cursor,
        max_pages: usize,
    ) -> (Vec<String>, Vec<String>) {
        let mut rest = VecDeque::from(rest);
        let mut requested = Vec::new();
        let media = collect_timeline(first, cursor, max_pages, |after| {
            requested.push(after);
            let next = rest.pop_front().expect("unexpected page request");
            async move { Ok(next) }
        })
        .await
        .unwrap();

        (media.into_iter().map(|m| m.id).collect(), requested)
    }

    const PROFILE_JSON: &str = r#"{
        "data": {
            "user": {
                "id": "8812",
                "username": "nc_ficus",
                "is_private": false,
                "edge_owner_to_timeline_media": {
                    "page_info": { "has_next_page": true, "end_cursor": "QVFE" },
                    "edges": [
                        {
                            "node": {
                                "id": "2431",
                                "shortcode": "B9xYz",
                                "display_url": "https://cdn.example/2431.jpg",
                                "edge_media_preview_like": { "count": 17 },
                                "edge_media_to_caption": {
                                    "edges": [{ "node": { "text": "Ficus in spring" } }]
                                }
                            }
                        },
                        {
                            "node": {
                                "id": "2400",
                                "shortcode": "B8aaa",
                                "display_url": "https://cdn.example/2400.jpg",
                                "edge_media_preview_like": { "count": 2 },
                                "edge_media_to_caption": { "edges": [] }
                            }
                        }
                    ]
                }
            }
        },
        "status": "ok"
    }"#;

    #[test]
    fn test_profile_parsing() {
        let response: ProfileResponse = serde_json::from_str(PROFILE_JSON).unwrap();
        let user = response.data.user.unwrap();

        assert_eq!(
            user.profile(),
            InstagramProfile {
                id: "8812".to_string(),
                is_private: false,
            }
        );

        let timeline = user.edge_owner_to_timeline_media.unwrap();
        assert_eq!(timeline.next_cursor().as_deref(), Some("QVFE"));
    }

    #[test]
    fn test_media_conversion() {
        let response: ProfileResponse = serde_json::from_str(PROFILE_JSON).unwrap();
        let timeline = response.data.user.unwrap().edge_owner_to_timeline_media.unwrap();
        let media: Vec<InstagramMedia> = timeline
            .edges
            .into_iter()
            .map(|edge| edge.node.into_media())
            .collect();

        assert_eq!(media.len(), 2);
        assert_eq!(media[0].id, "2431");
        assert_eq!(media[0].like_count, 17);
        assert_eq!(media[0].caption.as_deref(), Some("Ficus in spring"));
        assert_eq!(media[1].caption, None);
    }

    #[test]
    fn test_last_page_has_no_cursor() {
        let timeline: RawTimeline = serde_json::from_str(
            r#"{ "page_info": { "has_next_page": false, "end_cursor": "QVFE" }, "edges": [] }"#,
        )
        .unwrap();
        assert_eq!(timeline.next_cursor(), None);
    }

    #[tokio::test]
    async fn test_timeline_follows_pages_until_cursor() {
        let (ids, requested) = collect(
            page(&["90", "80"], Some("p2")),
            vec![
                page(&["70", "60"], Some("p3")),
                page(&["50", "40"], Some("p4")),
                page(&["30"], None),
            ],
            Cursor::new(45),
            50,
        )
        .await;

        assert_eq!(ids, vec!["90", "80", "70", "60", "50", "40"]);
        assert_eq!(requested, vec!["p2", "p3"]);
    }

    #[tokio::test]
    async fn test_timeline_stops_on_first_page_at_cursor() {
        let (ids, requested) = collect(
            page(&["90", "80"], Some("p2")),
            Vec::new(),
            Cursor::new(80),
            50,
        )
        .await;

        assert_eq!(ids, vec!["90", "80"]);
        assert!(requested.is_empty());
    }

    #[tokio::test]
    async fn test_unbounded_cursor_reads_to_timeline_end() {
        let (ids, requested) = collect(
            page(&["90"], Some("p2")),
            vec![page(&["80"], Some("p3")), page(&["70"], None)],
            Cursor::NONE,
            50,
        )
        .await;

        assert_eq!(ids, vec!["90", "80", "70"]);
        assert_eq!(requested, vec!["p2", "p3"]);
    }

    #[tokio::test]
    async fn test_timeline_page_limit() {
        let (ids, requested) = collect(
            page(&["90"], Some("p2")),
            vec![page(&["80"], Some("p3"))],
            Cursor::new(10),
            2,
        )
        .await;

        assert_eq!(ids, vec!["90", "80"]);
        assert_eq!(requested, vec!["p2"]);
    }

    #[tokio::test]
    async fn test_timeline_page_error_propagates() {
        let result = collect_timeline(page(&["90"], Some("p2")), Cursor::NONE, 50, |_| async {
            Err(GatewayError::UpstreamStatus {
                service: "instagram",
                status: 429,
            })
        })
        .await;

        assert!(matches!(
            result,
            Err(GatewayError::UpstreamStatus { status: 429, .. })
        ));
    }

    #[test]
    fn test_missing_user_is_none() {
        let response: ProfileResponse =
            serde_json::from_str(r#"{ "data": { "user": null } }"#).unwrap();
        assert!(response.data.user.is_none());
    }

    #[test]
    fn test_story_media_prefers_video() {
        let reels: ReelsResponse = serde_json::from_str(
            r#"{
                "reels": {
                    "8812": {
                        "items": [
                            {
                                "id": "3100_8812",
                                "image_versions2": { "candidates": [{ "url": "https://cdn.example/s.jpg" }] },
                                "video_versions": [{ "url": "https://cdn.example/s.mp4" }]
                            },
                            {
                                "id": "3099_8812",
                                "image_versions2": { "candidates": [{ "url": "https://cdn.example/t.jpg" }] }
                            }
                        ]
                    }
                }
            }"#,
        )
        .unwrap();

        let items: Vec<InstagramStoryItem> = reels
            .reels
            .into_values()
            .flat_map(|reel| reel.items)
            .map(RawStoryItem::into_story_item)
            .collect();

        assert_eq!(items[0].media_urls[0], "https://cdn.example/s.mp4");
        assert_eq!(items[0].media_urls.len(), 2);
        assert_eq!(items[1].media_urls, vec!["https://cdn.example/t.jpg".to_string()]);
    }

    #[test]
    fn test_cookie_header() {
        let credentials = SessionCredentials {
            ds_user_id: "1".to_string(),
            session_id: "abc".to_string(),
            csrf_token: "tok".to_string(),
        };
        assert_eq!(
            credentials.cookie_header(),
            "ds_user_id=1; sessionid=abc; csrftoken=tok"
        );
    }
}
