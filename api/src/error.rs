use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Request-level failures surfaced by the issue endpoints.
///
/// Category lookup failures are deliberately absent: they degrade the
/// listing to default weights instead of failing it (see `issues::resolve_tags`).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The data store could not be reached or rejected a query.
    #[error("data store unavailable: {0}")]
    Store(String),

    /// A stored post or comment is missing an expected field. Fatal to the
    /// whole batch: one bad record aborts the request rather than silently
    /// shrinking the triage list.
    #[error("malformed record: {0}")]
    Malformed(String),

    /// Single-issue lookup matched no post. Kept distinct from `Store` so
    /// clients can tell a missing issue from an outage.
    #[error("issue not found")]
    NotFound,

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<rusqlite::Error> for ApiError {
    fn from(err: rusqlite::Error) -> Self {
        ApiError::Store(err.to_string())
    }
}

impl From<r2d2::Error> for ApiError {
    fn from(err: r2d2::Error) -> Self {
        ApiError::Store(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Issue not found" }),
            ),
            ApiError::Store(details)
            | ApiError::Malformed(details)
            | ApiError::Internal(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Failed to fetch issues", "details": details }),
            ),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let resp = ApiError::NotFound.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_failure_maps_to_500() {
        let resp = ApiError::Store("connection refused".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
