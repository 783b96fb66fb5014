//! API error handling.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::error::AtlasError;

/// API error types with HTTP mappings.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    BadRequest(String),

    #[error("cannot cluster: {0}")]
    Unprocessable(String),

    #[error("upstream oracle unavailable: {0}")]
    Upstream(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Upstream(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Unprocessable(_) => "unprocessable",
            ApiError::Upstream(_) => "upstream_unavailable",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl From<AtlasError> for ApiError {
    fn from(err: AtlasError) -> Self {
        match &err {
            AtlasError::MalformedGraph { .. } | AtlasError::CycleDetected { .. } => {
                ApiError::BadRequest(err.to_string())
            }
            AtlasError::InsufficientNodes { .. } => ApiError::Unprocessable(err.to_string()),
            AtlasError::OracleUnavailable(_) => ApiError::Upstream(err.to_string()),
            AtlasError::OracleResponseMalformed { .. } | AtlasError::SourceUnavailable { .. } => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("api error: {self}");
        }

        let body = json!({
            "success": false,
            "error": self.to_string(),
            "code": self.code(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err: ApiError = AtlasError::InsufficientNodes { got: 3, need: 6 }.into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let err: ApiError =
            AtlasError::OracleUnavailable(anyhow::anyhow!("connection refused")).into();
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);

        let err: ApiError = AtlasError::CycleDetected {
            cycle: vec!["f".into(), "g".into(), "f".into()],
        }
        .into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ApiError::BadRequest("x".into()).code(), "bad_request");
        assert_eq!(ApiError::Internal("x".into()).code(), "internal_error");
    }
}
