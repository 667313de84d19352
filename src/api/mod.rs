pub mod handlers;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::Config;
use crate::services::{InstagramService, MonitoringService, TwitterService, YouTubeService};
use crate::sources::{InstagramClient, TwitterClient, YouTubeClient};

pub struct AppState {
    pub instagram: Arc<InstagramService>,
    pub youtube: Arc<YouTubeService>,
    pub twitter: Arc<TwitterService>,
    pub monitoring: MonitoringService,
}

impl AppState {
    pub fn new(
        instagram: Arc<InstagramService>,
        youtube: Arc<YouTubeService>,
        twitter: Arc<TwitterService>,
        monitoring: MonitoringService,
    ) -> Self {
        Self {
            instagram,
            youtube,
            twitter,
            monitoring,
        }
    }

    /// Wire the HTTP clients for every platform from configuration
    pub fn from_config(config: &Config) -> Self {
        let instagram = Arc::new(InstagramService::new(
            Arc::new(InstagramClient::public(&config.instagram)),
            Arc::new(InstagramClient::private(&config.instagram)),
        ));
        let youtube = Arc::new(YouTubeService::new(Arc::new(YouTubeClient::new(
            &config.youtube,
        ))));
        let twitter = Arc::new(TwitterService::new(Arc::new(TwitterClient::new(
            &config.twitter,
        ))));
        let monitoring = MonitoringService::new(
            instagram.clone(),
            youtube.clone(),
            twitter.clone(),
            config.health.clone(),
        );

        Self::new(instagram, youtube, twitter, monitoring)
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Instagram
        .route("/api/posts/{username}", get(handlers::posts))
        .route("/api/posts/{username}/{last}", get(handlers::posts))
        .route("/api/stories/{username}", get(handlers::stories))
        .route("/api/stories/{username}/{last}", get(handlers::stories))
        // Twitter
        .route("/api/tweets/{user}", get(handlers::tweets))
        .route("/api/tweets/{user}/{last}", get(handlers::tweets))
        // YouTube
        .route("/api/videos/{channel}", get(handlers::videos))
        // Health check
        .route("/api/health", get(handlers::health))
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
        .layer(CompressionLayer::new())
        // Access log at INFO: method and path on the span, status and latency on response
        .layer(
            TraceLayer::new_for_http()
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                }),
        )
}
