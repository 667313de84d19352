use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;

use crate::api::AppState;
use crate::domain::{Cursor, InstaUser, TwitterUser, Video};
use crate::errors::GatewayResult;

// --- Path params ---

#[derive(Debug, Deserialize)]
pub struct ProfilePath {
    username: String,
    last: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TimelinePath {
    user: String,
    last: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelPath {
    channel: String,
}

// --- Handlers ---

pub async fn posts(
    State(state): State<Arc<AppState>>,
    Path(params): Path<ProfilePath>,
) -> GatewayResult<Json<InstaUser>> {
    let cursor = Cursor::parse(params.last.as_deref());
    let user = state.instagram.posts(&params.username, cursor).await?;
    Ok(Json(user))
}

pub async fn stories(
    State(state): State<Arc<AppState>>,
    Path(params): Path<ProfilePath>,
) -> GatewayResult<Json<InstaUser>> {
    let cursor = Cursor::parse(params.last.as_deref());
    let user = state.instagram.stories(&params.username, cursor).await?;
    Ok(Json(user))
}

pub async fn tweets(
    State(state): State<Arc<AppState>>,
    Path(params): Path<TimelinePath>,
) -> GatewayResult<Json<TwitterUser>> {
    let cursor = Cursor::parse(params.last.as_deref());
    let user = state.twitter.last_tweets(&params.user, cursor).await?;
    Ok(Json(user))
}

pub async fn videos(
    State(state): State<Arc<AppState>>,
    Path(params): Path<ChannelPath>,
) -> GatewayResult<Json<Vec<Video>>> {
    let videos = state.youtube.last_videos(&params.channel).await?;
    Ok(Json(videos))
}

pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let status = state.monitoring.check().await;
    let code = if status.is_up() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (code, Json(status))
}
