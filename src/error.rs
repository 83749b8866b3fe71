// API error taxonomy and its mapping onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

/// Everything a handler can fail with. Each variant owns its status code
/// and exact JSON body; handlers never build error responses by hand.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Referenced id does not exist. The string is the user-visible
    /// resource name ("Hero", "Power", "Hero or Power").
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Strength outside the recognized set on hero_power creation.
    #[error("Invalid strength value")]
    InvalidStrength,

    /// Description (or another validated field) violated a business rule.
    #[error("validation errors")]
    Validation,

    /// Anything unexpected from the persistence layer. The cause is logged
    /// server-side and never leaks into the response body.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("{resource} not found") })),
            )
                .into_response(),
            ApiError::InvalidStrength => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid strength value" })),
            )
                .into_response(),
            ApiError::Validation => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "errors": ["validation errors"] })),
            )
                .into_response(),
            ApiError::Internal(err) => {
                tracing::error!("internal error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        let response = ApiError::NotFound("Hero").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_status() {
        let response = ApiError::Validation.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ApiError::NotFound("Hero or Power").to_string(),
            "Hero or Power not found"
        );
        assert_eq!(
            ApiError::InvalidStrength.to_string(),
            "Invalid strength value"
        );
    }
}
