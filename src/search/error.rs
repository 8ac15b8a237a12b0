use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Failures a search caller can observe.
///
/// Unclassified hits and hits without an authoritative record are not errors;
/// they come back as results with unset display fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Rejected before any backend call.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The index query failed and the gateway is configured to surface it.
    #[error("Search backend unavailable: {0}")]
    BackendUnavailable(String),
}

impl SearchError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SearchError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            SearchError::BackendUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
