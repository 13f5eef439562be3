//! Request-level failures of the trigger service
//!
//! Deployment failures never surface here; they land in the status record.
//! Only routing mistakes and a dead worker become HTTP errors.

use serde::Serialize;

/// What went wrong with a request, and the HTTP status it answers with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// No such route (404)
    NotFound,
    /// Known route, unsupported method (405)
    MethodNotAllowed,
    /// The deployment worker is gone (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status for this code
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::Internal => 500,
        }
    }

    /// Code as it appears in the JSON body
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::Internal => "INTERNAL_ERROR",
        }
    }
}

/// A rejected request
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Category, which fixes the status code
    pub code: ErrorCode,
    /// Message returned to the caller
    pub message: String,
}

impl ApiError {
    /// Unknown route
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::NotFound,
            message: message.into(),
        }
    }

    /// Known route hit with the wrong method
    #[must_use]
    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::MethodNotAllowed,
            message: message.into(),
        }
    }

    /// Service-side failure, such as a stopped worker
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Internal,
            message: message.into(),
        }
    }

    /// HTTP status to answer with
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.code.status_code()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

/// Error response body: `{"error": {"code": ..., "message": ...}}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// The rejection
    pub error: ApiErrorData,
}

/// Code and message as sent on the wire
#[derive(Debug, Serialize)]
pub struct ApiErrorData {
    /// One of `NOT_FOUND`, `METHOD_NOT_ALLOWED`, `INTERNAL_ERROR`
    pub code: String,
    /// Message for the caller
    pub message: String,
}

impl From<&ApiError> for ErrorBody {
    fn from(err: &ApiError) -> Self {
        Self {
            error: ApiErrorData {
                code: err.code.as_str().to_string(),
                message: err.message.clone(),
            },
        }
    }
}
