use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::TwitterConfig;
use crate::domain::TwitterUser;
use crate::errors::{GatewayError, GatewayResult};
use crate::sources::traits::TwitterApi;

const TWEET_LIMIT: u32 = 5;

/// Reads timelines through a GraphQL hub exposing the Twitter schema.
pub struct TwitterClient {
    client: Client,
    graphql_url: String,
}

impl TwitterClient {
    pub fn new(config: &TwitterConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            graphql_url: config.graphql_url.clone(),
        }
    }

    fn build_query(screen_name: &str) -> String {
        format!(
            r#"{{
  twitter {{
    user(identifier: name, identity: {}) {{
      id
      screen_name
      name
      tweets(limit: {}) {{
        text
        id
      }}
    }}
  }}
}}"#,
            // JSON string literals are valid GraphQL string literals
            serde_json::Value::String(screen_name.to_string()),
            TWEET_LIMIT
        )
    }
}

#[async_trait]
impl TwitterApi for TwitterClient {
    async fn user_timeline(&self, screen_name: &str) -> GatewayResult<TwitterUser> {
        tracing::debug!(screen_name, "Twitter timeline request");

        let request = GraphQlRequest {
            query: Self::build_query(screen_name),
        };
        let response = self
            .client
            .post(&self.graphql_url)
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::UpstreamStatus {
                service: "twitter",
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        let parsed: GraphQlResponse = serde_json::from_slice(&bytes)?;

        parsed
            .data
            .and_then(|data| data.twitter)
            .and_then(|twitter| twitter.user)
            .ok_or_else(|| GatewayError::UserNotFound(screen_name.to_string()))
    }
}

// --- Wire format ---

#[derive(Debug, Serialize)]
struct GraphQlRequest {
    query: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<GraphQlData>,
}

#[derive(Debug, Deserialize)]
struct GraphQlData {
    twitter: Option<TwitterData>,
}

#[derive(Debug, Deserialize)]
struct TwitterData {
    user: Option<TwitterUser>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_quotes_screen_name() {
        let query = TwitterClient::build_query("wylsacom");
        assert!(query.contains(r#"user(identifier: name, identity: "wylsacom")"#));
        assert!(query.contains("tweets(limit: 5)"));
    }

    #[test]
    fn test_query_escapes_quotes() {
        let query = TwitterClient::build_query(r#"a"b"#);
        assert!(query.contains(r#"identity: "a\"b""#));
    }

    #[test]
    fn test_response_parsing() {
        let parsed: GraphQlResponse = serde_json::from_str(
            r#"{
                "data": {
                    "twitter": {
                        "user": {
                            "id": "77",
                            "screen_name": "wylsacom",
                            "name": "Wylsacom",
                            "tweets": [
                                { "text": "Hello", "id": "1800" },
                                { "text": "World", "id": "1799" }
                            ]
                        }
                    }
                }
            }"#,
        )
        .unwrap();

        let user = parsed.data.unwrap().twitter.unwrap().user.unwrap();
        assert_eq!(user.screen_name, "wylsacom");
        assert_eq!(user.tweets.len(), 2);
        assert_eq!(user.tweets[0].id, "1800");
    }

    #[test]
    fn test_null_user() {
        let parsed: GraphQlResponse =
            serde_json::from_str(r#"{ "data": { "twitter": { "user": null } } }"#).unwrap();
        assert!(parsed.data.unwrap().twitter.unwrap().user.is_none());
    }
}
