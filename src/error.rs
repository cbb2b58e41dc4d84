//! Error types shared by the HTTP handlers and the remote-service clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Failures talking to the prediction or dataset service.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("HTTP request to {service} failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("timed out waiting for {0}")]
    Timeout(&'static str),

    #[error("{service} returned HTTP {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("{service} returned an unreadable body: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl ServiceError {
    /// Classify a reqwest error raised while sending a request.
    pub fn transport(service: &'static str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout(service)
        } else {
            Self::Transport { service, source }
        }
    }

    /// Classify a reqwest error raised while reading a response body.
    pub fn decode(service: &'static str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout(service)
        } else {
            Self::Decode { service, source }
        }
    }
}

/// Errors surfaced to HTTP clients.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid input: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error(transparent)]
    Upstream(#[from] ServiceError),

    #[error("session {0} not found or expired")]
    SessionNotFound(Uuid),

    #[error("page size must be one of 10, 25 or 50 (got {0})")]
    InvalidPageSize(usize),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error_type: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidPageSize(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(ServiceError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::SessionNotFound(_) => StatusCode::NOT_FOUND,
            Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::Upstream(ServiceError::Timeout(_)) => "upstream_timeout",
            Self::Upstream(_) => "upstream_error",
            Self::SessionNotFound(_) => "session_not_found",
            Self::InvalidPageSize(_) => "invalid_page_size",
            Self::Task(_) => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %self, "request failed");
        }

        let details = match &self {
            Self::Validation(errors) => Some(serde_json::json!({ "errors": errors })),
            Self::SessionNotFound(id) => Some(serde_json::json!({ "session_id": id })),
            _ => None,
        };

        let body = ErrorResponse {
            error_type: self.error_type(),
            message: self.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_failed_task_is_internal_error() {
        let handle = tokio::spawn(std::future::pending::<()>());
        handle.abort();
        let err = AppError::from(handle.await.unwrap_err());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_type(), "internal_error");
    }

    #[test]
    fn test_validation_is_bad_request() {
        let err = AppError::Validation(vec!["diameter is required".into()]);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "invalid input: diameter is required");
    }

    #[test]
    fn test_upstream_status_codes() {
        let timeout = AppError::from(ServiceError::Timeout("prediction service"));
        assert_eq!(timeout.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(timeout.error_type(), "upstream_timeout");

        let rejected = AppError::from(ServiceError::Status {
            service: "dataset service",
            status: 500,
            body: "boom".into(),
        });
        assert_eq!(rejected.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            rejected.to_string(),
            "dataset service returned HTTP 500: boom"
        );
    }

    #[test]
    fn test_session_not_found() {
        let err = AppError::SessionNotFound(Uuid::nil());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
