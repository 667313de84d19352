use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream {service} responded with status {status}")]
    UpstreamStatus { service: &'static str, status: u16 },

    // Parsing errors
    #[error("Response decoding failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // Lookup errors
    #[error("Channel not found: {0}")]
    ChannelNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Health check failed: {0}")]
    Unhealthy(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "Request failed");

        let body = serde_json::json!({ "Error": self.to_string() });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_response_is_internal_error() {
        let response = GatewayError::ChannelNotFound("nobody".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_upstream_status_message() {
        let err = GatewayError::UpstreamStatus {
            service: "youtube",
            status: 403,
        };
        assert_eq!(err.to_string(), "Upstream youtube responded with status 403");
    }

    #[test]
    fn test_unhealthy_message() {
        let err = GatewayError::Unhealthy("Cannot obtain tweets".to_string());
        assert_eq!(err.to_string(), "Health check failed: Cannot obtain tweets");
    }
}
