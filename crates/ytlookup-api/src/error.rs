//! API error types.

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;
use ytlookup_upstream::UpstreamError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("API key not configured")]
    MissingApiKey,

    #[error("{message}: {cause}")]
    OperationFailed { message: String, cause: String },

    #[error("Upstream error: {0}")]
    BadGateway(String),

    #[error("Upstream timed out: {0}")]
    GatewayTimeout(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Storage error: {0}")]
    Storage(#[from] ytlookup_storage::StorageError),
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// A failure whose public message is fixed and whose cause is only shown
    /// outside production.
    pub fn operation_failed(message: impl Into<String>, cause: impl ToString) -> Self {
        Self::OperationFailed {
            message: message.into(),
            cause: cause.to_string(),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::MissingApiKey
            | ApiError::OperationFailed { .. }
            | ApiError::Internal(_)
            | ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Validation(_) => "validation_error",
            ApiError::RateLimited => "rate_limited",
            ApiError::MissingApiKey => "api_key_missing",
            ApiError::OperationFailed { .. } => "operation_failed",
            ApiError::BadGateway(_) => "upstream_error",
            ApiError::GatewayTimeout(_) => "upstream_timeout",
            ApiError::Internal(_) => "internal_error",
            ApiError::Storage(_) => "storage_error",
        }
    }

    /// Body text, without the variant prefix used by `Display`.
    fn detail(&self, production: bool) -> String {
        match self {
            ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Validation(msg)
            | ApiError::BadGateway(msg)
            | ApiError::GatewayTimeout(msg) => msg.clone(),
            ApiError::RateLimited | ApiError::MissingApiKey => self.to_string(),
            ApiError::OperationFailed { message, cause } => {
                if production {
                    message.clone()
                } else {
                    format!("{}: {}", message, cause)
                }
            }
            // Don't expose internal error details in production
            ApiError::Internal(_) | ApiError::Storage(_) => {
                if production {
                    "An internal error occurred".to_string()
                } else {
                    self.to_string()
                }
            }
        }
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::NotFound(msg) => ApiError::NotFound(msg),
            UpstreamError::RateLimited(_) => ApiError::RateLimited,
            UpstreamError::Status { status, body } if (400..500).contains(&status) => {
                ApiError::BadGateway(format!("Upstream rejected request ({}): {}", status, body))
            }
            UpstreamError::Status { status, .. } => {
                ApiError::BadGateway(format!("Upstream service error ({})", status))
            }
            UpstreamError::Network(e) if e.is_timeout() => ApiError::GatewayTimeout(e.to_string()),
            UpstreamError::Network(e) => ApiError::BadGateway(format!("Upstream unreachable: {}", e)),
            UpstreamError::Timeout(secs) => {
                ApiError::GatewayTimeout(format!("Operation timed out after {} seconds", secs))
            }
            UpstreamError::InvalidResponse(msg) => {
                ApiError::BadGateway(format!("Invalid upstream response: {}", msg))
            }
            UpstreamError::Json(e) => ApiError::BadGateway(format!("Invalid upstream response: {}", e)),
            err @ (UpstreamError::Config(_)
            | UpstreamError::ToolNotFound
            | UpstreamError::ToolFailed(_)
            | UpstreamError::Io(_)) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            warn!(error = %self, status = status.as_u16(), "Request failed");
        }

        let production = std::env::var("ENVIRONMENT")
            .map(|env| env.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let body = ErrorResponse {
            detail: self.detail(production),
            code: Some(self.code().to_string()),
        };

        (status, Json(body)).into_response()
    }
}
