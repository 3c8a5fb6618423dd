use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::error::AppError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Serialize, Clone)]
pub enum ApiError {
    #[error("Internal server error")]
    InternalError(String),

    #[error("Invalid request: {}", .0.join("; "))]
    ValidationError(Vec<String>),

    #[error("Upstream rejected the request: {0}")]
    UpstreamRejected(String),

    #[error("Upstream rate limited: {0}")]
    UpstreamRateLimited(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Inconsistent state: {0}")]
    InconsistentState(String),

    #[error("Deadline exceeded after {0} seconds")]
    DeadlineExceeded(u64),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::InvalidRequest(violations) => Self::ValidationError(violations),
            AppError::UpstreamRejected(msg) => Self::UpstreamRejected(msg),
            // Retries are already exhausted by the time a rate limit reaches
            // the router, but the caller should still see 429.
            AppError::UpstreamRateLimited(msg) | AppError::UpstreamTransient(msg) => {
                Self::UpstreamRateLimited(msg)
            }
            AppError::UpstreamUnavailable { attempts, message } => {
                Self::UpstreamUnavailable(format!("gave up after {attempts} attempts: {message}"))
            }
            AppError::StorageUnavailable(msg) => Self::StorageUnavailable(msg),
            AppError::InconsistentState(msg) => Self::InconsistentState(msg),
            AppError::DeadlineExceeded(secs) => Self::DeadlineExceeded(secs),
            AppError::NotFound(msg) => Self::NotFound(msg),
            AppError::Database(_) | AppError::OpenAI(_) | AppError::ObjectStore(_) => {
                tracing::error!("Internal error: {:?}", err);
                Self::InternalError("Internal server error".to_string())
            }
            _ => {
                tracing::error!("Internal error: {:?}", err);
                Self::InternalError("Internal server error".to_string())
            }
        }
    }
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamRejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UpstreamRateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            Self::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::InconsistentState(_) => StatusCode::CONFLICT,
            Self::DeadlineExceeded(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::InternalError(_) => "internal",
            Self::ValidationError(_) => "invalid_request",
            Self::UpstreamRejected(_) => "upstream_rejected",
            Self::UpstreamRateLimited(_) => "upstream_rate_limited",
            Self::UpstreamUnavailable(_) => "upstream_unavailable",
            Self::StorageUnavailable(_) => "storage_unavailable",
            Self::InconsistentState(_) => "inconsistent_state",
            Self::DeadlineExceeded(_) => "deadline_exceeded",
            Self::NotFound(_) => "not_found",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            status: "error".to_string(),
            kind: self.kind().to_string(),
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[derive(Serialize, Debug)]
struct ErrorResponse {
    status: String,
    kind: String,
    error: String,
}
