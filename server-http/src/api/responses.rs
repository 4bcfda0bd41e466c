use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::ErrorKind;

#[derive(Serialize)]
pub struct HealthResponse {
    pub message: String,
}

/// Error body returned for every failed request
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// user-level status message
    pub status: String,
    /// application-specific error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    /// application-level error message, for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            code: None,
            error: None,
        }
    }
}

/// An HTTP status paired with its JSON error body
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    pub fn bad_request(status: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorResponse::new(status),
        }
    }

    pub fn internal() -> Self {
        Self::from_kind(ErrorKind::Internal)
    }

    /// Only `NotFound` is a client error; every other kind is the server's fault.
    pub fn from_kind(kind: ErrorKind) -> Self {
        let status = match kind {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Misconfigured | ErrorKind::RateLimited | ErrorKind::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        Self {
            status,
            body: ErrorResponse::new(kind.message()),
        }
    }
}

impl From<&shared::Error> for ApiError {
    fn from(err: &shared::Error) -> Self {
        Self::from_kind(err.kind())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
