use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failures of a single exchange with the inference endpoint
///
/// These never reach the display host; the pipeline turns them into a degraded result.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RecommendationError {
    #[error("Endpoint returned status {status}")]
    Endpoint { status: u16 },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for RecommendationError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            RecommendationError::Endpoint {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            RecommendationError::Decode(err.to_string())
        } else {
            RecommendationError::Transport(err.to_string())
        }
    }
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_error_display() {
        let err = RecommendationError::Endpoint { status: 503 };
        assert_eq!(err.to_string(), "Endpoint returned status 503");

        let err = RecommendationError::Decode("missing field `recommendation`".to_string());
        assert_eq!(err.to_string(), "Decode error: missing field `recommendation`");
    }

    #[test]
    fn test_app_error_status_codes() {
        let response = AppError::NotFound("nothing yet".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::InvalidInput("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
