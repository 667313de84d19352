use crate::errors::{GatewayError, GatewayResult};
use crate::sources::SessionCredentials;

#[derive(Debug, Clone)]
pub struct InstagramConfig {
    pub web_url: String,
    pub api_url: String,
    pub credentials: Option<SessionCredentials>,
    /// Timeline pages followed per posts request
    pub max_pages: usize,
}

#[derive(Debug, Clone)]
pub struct YouTubeConfig {
    pub api_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct TwitterConfig {
    pub graphql_url: String,
}

/// Test accounts queried by the health check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthAccounts {
    pub public_instagram: String,
    pub private_instagram: String,
    pub youtube_channel: String,
    pub twitter_user: String,
}

impl Default for HealthAccounts {
    fn default() -> Self {
        Self {
            public_instagram: "nc_ficus".to_string(),
            private_instagram: "st4s_r".to_string(),
            youtube_channel: "mrMigles".to_string(),
            twitter_user: "wylsacom".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub instagram: InstagramConfig,
    pub youtube: YouTubeConfig,
    pub twitter: TwitterConfig,
    pub health: HealthAccounts,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> GatewayResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> GatewayResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let base_url = |key: &str, default: &str| var(key, default).trim_end_matches('/').to_string();

        let server_port = var("SERVER_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| GatewayError::Config(format!("SERVER_PORT: {}", e)))?;

        let max_pages = var("INSTAGRAM_MAX_PAGES", "50")
            .parse::<usize>()
            .map_err(|e| GatewayError::Config(format!("INSTAGRAM_MAX_PAGES: {}", e)))?;

        let credentials = SessionCredentials {
            ds_user_id: var("DC_USER_ID", ""),
            session_id: var("SESSION_ID", ""),
            csrf_token: var("CSRF_TOKEN", ""),
        };
        let credentials = if credentials.session_id.is_empty() {
            None
        } else {
            Some(credentials)
        };

        let api_key = lookup("YOUTUBE_API_KEY")
            .filter(|key| !key.is_empty())
            .ok_or_else(|| GatewayError::MissingEnvVar("YOUTUBE_API_KEY".to_string()))?;

        let defaults = HealthAccounts::default();
        let health = HealthAccounts {
            public_instagram: var("HEALTH_PUBLIC_INSTAGRAM", &defaults.public_instagram),
            private_instagram: var("HEALTH_PRIVATE_INSTAGRAM", &defaults.private_instagram),
            youtube_channel: var("HEALTH_YOUTUBE_CHANNEL", &defaults.youtube_channel),
            twitter_user: var("HEALTH_TWITTER_USER", &defaults.twitter_user),
        };

        Ok(Self {
            server_host: var("SERVER_HOST", "0.0.0.0"),
            server_port,
            instagram: InstagramConfig {
                web_url: base_url("INSTAGRAM_WEB_URL", "https://www.instagram.com"),
                api_url: base_url("INSTAGRAM_API_URL", "https://i.instagram.com"),
                credentials,
                max_pages,
            },
            youtube: YouTubeConfig {
                api_url: base_url("YOUTUBE_API_URL", "https://www.googleapis.com/youtube/v3"),
                api_key,
            },
            twitter: TwitterConfig {
                graphql_url: var("TWITTER_GRAPHQL_URL", "https://www.graphqlhub.com/graphql"),
            },
            health,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
