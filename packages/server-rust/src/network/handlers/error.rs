//! Mapping of invocation failures onto HTTP responses.

use aspectkit_core::InvocationError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

/// JSON error body: `{"code": "...", "message": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

/// Handler error wrapping the failure returned by a dispatched operation.
#[derive(Debug)]
pub struct ApiError(pub InvocationError);

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            InvocationError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            InvocationError::NotFound(_) => StatusCode::NOT_FOUND,
            InvocationError::Denied { .. } => StatusCode::FORBIDDEN,
            InvocationError::Interceptor { .. } | InvocationError::Failed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<InvocationError> for ApiError {
    fn from(err: InvocationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(code = self.0.code(), error = %self.0, "operation failed");
        }
        let body = ErrorBody {
            code: self.0.code(),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
