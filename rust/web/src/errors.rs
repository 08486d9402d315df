/// Error shaping for the dealer HTTP surface.
///
/// Every failing request gets a small JSON body with a machine-readable
/// code, a human-readable message, and optional structured details. The
/// [`IntoErrorResponse`] trait maps domain errors onto status codes and
/// those bodies, logging by severity on the way out.
use serde::{Deserialize, Serialize};
use std::fmt;
use warp::http::StatusCode;
use warp::reply::{self, Response};
use warp::Reply;

use dealer_engine::errors::DealError;

use crate::dealer::DealerError;
use crate::spec::SpecError;

/// Standard error response format for all endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g., "invalid_request")
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (structured data)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: Some(details),
        }
    }

    /// Convert to an HTTP response with the given status code
    pub fn into_response(self, status: StatusCode) -> Response {
        reply::with_status(reply::json(&self), status).into_response()
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Error classification for logging levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Client errors (4xx)
    Client,
    /// Server errors (5xx)
    Server,
}

/// Trait for converting errors to HTTP responses with proper logging
pub trait IntoErrorResponse {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error code
    fn error_code(&self) -> &'static str;

    /// Human-readable error message
    fn error_message(&self) -> String;

    /// Optional structured details
    fn error_details(&self) -> Option<serde_json::Value> {
        None
    }

    fn severity(&self) -> ErrorSeverity {
        if self.status_code().is_server_error() {
            ErrorSeverity::Server
        } else {
            ErrorSeverity::Client
        }
    }

    fn to_error_response(&self) -> ErrorResponse {
        if let Some(details) = self.error_details() {
            ErrorResponse::with_details(self.error_code(), self.error_message(), details)
        } else {
            ErrorResponse::new(self.error_code(), self.error_message())
        }
    }

    /// Convert to an HTTP response, logging by severity
    fn into_http_response(self) -> Response
    where
        Self: Sized,
    {
        let status = self.status_code();
        let error_response = self.to_error_response();

        match self.severity() {
            ErrorSeverity::Client => {
                tracing::warn!(error = %error_response, status = status.as_u16(), "client error");
            }
            ErrorSeverity::Server => {
                tracing::error!(error = %error_response, status = status.as_u16(), "server error");
            }
        }

        error_response.into_response(status)
    }
}

impl IntoErrorResponse for DealError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_code(&self) -> &'static str {
        match self {
            DealError::HandSizeOutOfRange { .. } | DealError::OverCapacity { .. } => {
                "invalid_request"
            }
            DealError::Exhausted { .. } => "deck_exhausted",
        }
    }

    fn error_message(&self) -> String {
        self.to_string()
    }

    fn error_details(&self) -> Option<serde_json::Value> {
        match self {
            DealError::Exhausted {
                requested,
                remaining,
            } => Some(serde_json::json!({
                "requested": requested,
                "remaining": remaining,
            })),
            _ => None,
        }
    }
}

impl IntoErrorResponse for DealerError {
    fn status_code(&self) -> StatusCode {
        match self {
            DealerError::Deal(err) => err.status_code(),
            DealerError::StatePoisoned => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            DealerError::Deal(err) => err.error_code(),
            DealerError::StatePoisoned => "deck_state_poisoned",
        }
    }

    fn error_message(&self) -> String {
        self.to_string()
    }

    fn error_details(&self) -> Option<serde_json::Value> {
        match self {
            DealerError::Deal(err) => err.error_details(),
            DealerError::StatePoisoned => None,
        }
    }
}

impl IntoErrorResponse for SpecError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_code(&self) -> &'static str {
        "spec_unavailable"
    }

    fn error_message(&self) -> String {
        self.to_string()
    }
}
